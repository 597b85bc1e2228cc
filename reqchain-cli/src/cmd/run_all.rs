use std::path::PathBuf;

use reqchain_exec::StoreScope;

use crate::args::{OutputArgs, RunArgs};
use crate::cmd::config::build_runner;
use crate::cmd::report::emit_report;
use crate::exit_codes;
use crate::output::print_error;
use crate::utils::{collect_flow_files, load_flow};

pub async fn run_all_cmd(
    paths: &[PathBuf],
    per_flow_store: bool,
    run: RunArgs,
    output: OutputArgs,
) -> i32 {
    let files = match collect_flow_files(paths) {
        Ok(files) => files,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };
    if files.is_empty() {
        print_error(output.format, output.quiet, "no flow files found");
        return exit_codes::RUNTIME_ERROR;
    }

    let mut flows = Vec::with_capacity(files.len());
    for file in &files {
        match load_flow(file) {
            Ok(flow) => flows.push(flow),
            Err(e) => {
                print_error(output.format, output.quiet, &e.to_string());
                return if e.is_validation() {
                    exit_codes::VALIDATION_FAILED
                } else {
                    exit_codes::RUNTIME_ERROR
                };
            }
        }
    }

    let scope = if per_flow_store {
        StoreScope::PerFlow
    } else {
        StoreScope::Shared
    };
    let mut runner = match build_runner(&run, scope) {
        Ok(runner) => runner,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let reports = runner.run_all(&flows).await;
    for report in &reports {
        emit_report(report, &output);
    }

    if reports.iter().all(|r| r.succeeded()) {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}
