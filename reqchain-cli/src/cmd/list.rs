use std::path::Path;

use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::load_flow;
use crate::OutputArgs;

#[derive(Serialize)]
struct RequestInfo {
    id: String,
    method: String,
    url: String,
}

#[derive(Serialize)]
struct ListResult {
    flow: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    base_url: String,
    requests: Vec<RequestInfo>,
}

pub async fn list_cmd(path: &Path, output: OutputArgs) -> i32 {
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

    let result = ListResult {
        flow: flow.name.clone(),
        base_url: flow.base_url.clone(),
        requests: flow
            .requests
            .iter()
            .map(|r| RequestInfo {
                id: r.id.clone(),
                method: r.method.clone(),
                url: r.url.clone(),
            })
            .collect(),
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("flow {} ({} requests)", result.flow, result.requests.len());
        for r in &result.requests {
            println!("  - {:<16} {:<7} {}", r.id, r.method, r.url);
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}
