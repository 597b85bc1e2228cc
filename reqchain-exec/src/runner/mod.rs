use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqchain_core::{RequestFlow, RequestTemplate, ResponseStore};
use uuid::Uuid;

use crate::executor::events::{Event, EventSink, NoOpEventSink};
use crate::executor::transport::Transport;
use crate::executor::{execute_template, ExecutionResult, RequestState};

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Forwarded to the transport on every call.
    pub insecure_tls: bool,
    /// Whether `run_all` shares one store across flows or clears it per flow.
    pub store_scope: StoreScope,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            insecure_tls: false,
            store_scope: StoreScope::Shared,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    /// One store spans the whole batch, so later flows may reference earlier
    /// flows' responses.
    Shared,
    /// Each flow starts from an empty store.
    PerFlow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// A reference failure cut the sequence short after the named request;
    /// requests beyond it were never attempted and are absent from results.
    Aborted { request_id: String },
    /// The whole flow ran without meeting the target id. Completed results
    /// and store entries are retained.
    TargetNotFound { target: String },
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub flow: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One entry per request actually attempted, in execution order.
    pub results: Vec<ExecutionResult>,
    pub outcome: RunOutcome,
}

impl RunReport {
    /// A run succeeded only if it completed and every attempted request
    /// executed.
    pub fn succeeded(&self) -> bool {
        self.outcome == RunOutcome::Completed && self.results.iter().all(|r| r.is_executed())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("request '{id}' not found in flow '{flow}'")]
    RequestNotFound { flow: String, id: String },
}

/// Sequential chain orchestrator. Owns the response store for its runs and
/// awaits every call before issuing the next: request N+1's resolution reads
/// store state left by request N, so ordering is a correctness requirement.
pub struct Runner {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn EventSink>,
    options: RunOptions,
    store: ResponseStore,
}

impl Runner {
    pub fn new(transport: Arc<dyn Transport>, options: RunOptions) -> Self {
        Self {
            transport,
            sink: Arc::new(NoOpEventSink),
            options,
            store: ResponseStore::new(),
        }
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn store(&self) -> &ResponseStore {
        &self.store
    }

    /// Reset between runs. Idempotent.
    pub fn clear_store(&mut self) {
        self.store.clear();
    }

    /// Execute exactly one request of the flow.
    pub async fn run_single(
        &mut self,
        flow: &RequestFlow,
        request_id: &str,
    ) -> Result<RunReport, RunError> {
        let template = flow
            .request(request_id)
            .ok_or_else(|| RunError::RequestNotFound {
                flow: flow.name.clone(),
                id: request_id.to_string(),
            })?;
        Ok(self
            .run(&flow.name, &flow.base_url, std::slice::from_ref(template), None)
            .await)
    }

    /// Execute every request of the flow, strictly in declared order.
    pub async fn run_flow(&mut self, flow: &RequestFlow) -> RunReport {
        self.run(&flow.name, &flow.base_url, &flow.requests, None).await
    }

    /// Execute requests in order, stopping after `target_id` (inclusive).
    pub async fn run_up_to(&mut self, flow: &RequestFlow, target_id: &str) -> RunReport {
        self.run(&flow.name, &flow.base_url, &flow.requests, Some(target_id))
            .await
    }

    /// Execute a batch of flows, one at a time, in lexicographic name order.
    pub async fn run_all(&mut self, flows: &[RequestFlow]) -> Vec<RunReport> {
        let mut ordered: Vec<&RequestFlow> = flows.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));

        let run_id = Uuid::new_v4();
        self.sink.emit(Event::RunStarted { run_id }).await;

        let mut reports = Vec::with_capacity(ordered.len());
        for flow in ordered {
            if self.options.store_scope == StoreScope::PerFlow {
                self.store.clear();
            }
            reports.push(
                self.run_sequence(run_id, &flow.name, &flow.base_url, &flow.requests, None)
                    .await,
            );
        }

        self.sink.emit(Event::RunFinished { run_id }).await;
        reports
    }

    async fn run(
        &mut self,
        flow_name: &str,
        base_url: &str,
        requests: &[RequestTemplate],
        target: Option<&str>,
    ) -> RunReport {
        let run_id = Uuid::new_v4();
        self.sink.emit(Event::RunStarted { run_id }).await;
        let report = self
            .run_sequence(run_id, flow_name, base_url, requests, target)
            .await;
        self.sink.emit(Event::RunFinished { run_id }).await;
        report
    }

    /// The single ordered-execution primitive behind all entry points.
    async fn run_sequence(
        &mut self,
        run_id: Uuid,
        flow_name: &str,
        base_url: &str,
        requests: &[RequestTemplate],
        target: Option<&str>,
    ) -> RunReport {
        let started_at = Utc::now();
        self.sink
            .emit(Event::FlowStarted {
                run_id,
                flow: flow_name.to_string(),
            })
            .await;

        let mut results = Vec::new();
        // Until the target is met, a target-bearing run is headed for failure.
        let mut outcome = match target {
            Some(t) => RunOutcome::TargetNotFound {
                target: t.to_string(),
            },
            None => RunOutcome::Completed,
        };

        for template in requests {
            self.sink
                .emit(Event::RequestStarted {
                    run_id,
                    request_id: template.id.clone(),
                    method: template.method.clone(),
                })
                .await;

            let result = execute_template(
                template,
                base_url,
                self.options.insecure_tls,
                self.transport.as_ref(),
                &mut self.store,
            )
            .await;

            match &result.state {
                RequestState::Executed => {
                    self.sink
                        .emit(Event::RequestFinished {
                            run_id,
                            request_id: result.id.clone(),
                            status: result.status_code.unwrap_or(0),
                        })
                        .await;
                }
                RequestState::Failed(reason) => {
                    self.sink
                        .emit(Event::RequestFailed {
                            run_id,
                            request_id: result.id.clone(),
                            reason: reason.to_string(),
                        })
                        .await;
                }
            }

            let aborts = result.aborts_flow();
            results.push(result);

            if aborts {
                let request_id = template.id.clone();
                self.sink
                    .emit(Event::FlowAborted {
                        run_id,
                        flow: flow_name.to_string(),
                        request_id: request_id.clone(),
                    })
                    .await;
                outcome = RunOutcome::Aborted { request_id };
                break;
            }

            if target == Some(template.id.as_str()) {
                outcome = RunOutcome::Completed;
                break;
            }
        }

        self.sink
            .emit(Event::FlowFinished {
                run_id,
                flow: flow_name.to_string(),
            })
            .await;

        RunReport {
            run_id,
            flow: flow_name.to_string(),
            started_at,
            finished_at: Utc::now(),
            results,
            outcome,
        }
    }
}
