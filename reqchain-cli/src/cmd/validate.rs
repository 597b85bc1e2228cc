use std::path::PathBuf;

use reqchain_core::{parse_flow_str, validate_flow, DocumentFormat};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::{collect_flow_files, flow_name};
use crate::OutputArgs;

#[derive(Serialize)]
struct ValidateResult {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(paths: &[PathBuf], output: OutputArgs) -> i32 {
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

    let mut results = Vec::with_capacity(files.len());
    let mut exit = exit_codes::SUCCESS;

    for file in &files {
        let shown = file.display().to_string();
        let content = match std::fs::read_to_string(file) {
            Ok(v) => v,
            Err(e) => {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("failed to read {shown}: {e}"),
                );
                return exit_codes::RUNTIME_ERROR;
            }
        };

        let errors = match parse_flow_str(&content, &flow_name(file), DocumentFormat::Auto) {
            Ok(parsed) => match validate_flow(&parsed.flow) {
                Ok(()) => vec![],
                Err(e) => e.violations.iter().map(|v| v.to_string()).collect(),
            },
            Err(e) => vec![e.to_string()],
        };

        if !errors.is_empty() {
            exit = exit_codes::VALIDATION_FAILED;
        }
        results.push(ValidateResult {
            path: shown,
            valid: errors.is_empty(),
            errors,
        });
    }

    if output.format == OutputFormat::Text && !output.quiet {
        for r in &results {
            if r.valid {
                println!("ok: {}", r.path);
            } else {
                println!("invalid: {}", r.path);
                for e in &r.errors {
                    println!("  - {e}");
                }
            }
        }
    } else {
        print_result(output.format, output.quiet, &results);
    }

    exit
}
