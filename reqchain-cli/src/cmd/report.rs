use reqchain_exec::{RunOutcome, RunReport};
use serde::Serialize;

use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
pub struct RunView {
    pub run_id: String,
    pub flow: String,
    pub outcome: String,
    pub requests: Vec<RequestView>,
}

#[derive(Serialize)]
pub struct RequestView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub body: String,
    pub duration_ms: u64,
}

impl RunView {
    pub fn from_report(report: &RunReport) -> Self {
        Self {
            run_id: report.run_id.to_string(),
            flow: report.flow.clone(),
            outcome: outcome_label(&report.outcome),
            requests: report
                .results
                .iter()
                .map(|r| RequestView {
                    id: r.id.clone(),
                    status_code: r.status_code,
                    state: r.state_label(),
                    error: r.failure().map(|reason| reason.to_string()),
                    body: r.body.clone(),
                    duration_ms: r.duration_ms,
                })
                .collect(),
        }
    }
}

pub fn outcome_label(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Completed => "completed".to_string(),
        RunOutcome::Aborted { request_id } => format!("aborted at '{request_id}'"),
        RunOutcome::TargetNotFound { target } => format!("target '{target}' not found"),
    }
}

pub fn emit_report(report: &RunReport, output: &OutputArgs) {
    if output.quiet {
        return;
    }
    if output.format == OutputFormat::Text {
        println!("flow {}: {}", report.flow, outcome_label(&report.outcome));
        for r in &report.results {
            let status = r
                .status_code
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            match r.failure() {
                None => println!("  {:<16} {:>4}  Executed ({} ms)", r.id, status, r.duration_ms),
                Some(reason) => println!(
                    "  {:<16} {:>4}  Error: {reason} ({} ms)",
                    r.id, status, r.duration_ms
                ),
            }
        }
    } else {
        print_result(output.format, output.quiet, &RunView::from_report(report));
    }
}
