use std::path::Path;

use reqchain_exec::StoreScope;

use crate::args::{OutputArgs, RunArgs};
use crate::cmd::config::build_runner;
use crate::cmd::report::emit_report;
use crate::exit_codes;
use crate::output::print_error;
use crate::utils::load_flow;

pub async fn run_cmd(
    path: &Path,
    request: Option<&str>,
    up_to: Option<&str>,
    run: RunArgs,
    output: OutputArgs,
) -> i32 {
    let flow = match load_flow(path) {
        Ok(flow) => flow,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return if e.is_validation() {
                exit_codes::VALIDATION_FAILED
            } else {
                exit_codes::RUNTIME_ERROR
            };
        }
    };

    let mut runner = match build_runner(&run, StoreScope::Shared) {
        Ok(runner) => runner,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let report = if let Some(id) = request {
        match runner.run_single(&flow, id).await {
            Ok(report) => report,
            Err(e) => {
                print_error(output.format, output.quiet, &e.to_string());
                return exit_codes::RUN_FAILED;
            }
        }
    } else if let Some(id) = up_to {
        runner.run_up_to(&flow, id).await
    } else {
        runner.run_flow(&flow).await
    };

    emit_report(&report, &output);
    if report.succeeded() {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}
