use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

/// Lifecycle events for one run. Emitted at step boundaries by the runner;
/// never from inside an in-flight call.
#[derive(Debug, Clone)]
pub enum Event {
    RunStarted {
        run_id: Uuid,
    },
    RunFinished {
        run_id: Uuid,
    },
    FlowStarted {
        run_id: Uuid,
        flow: String,
    },
    FlowFinished {
        run_id: Uuid,
        flow: String,
    },
    FlowAborted {
        run_id: Uuid,
        flow: String,
        request_id: String,
    },
    RequestStarted {
        run_id: Uuid,
        request_id: String,
        method: String,
    },
    RequestFinished {
        run_id: Uuid,
        request_id: String,
        status: u16,
    },
    RequestFailed {
        run_id: Uuid,
        request_id: String,
        reason: String,
    },
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}

/// One JSON object per line on stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        let json = match event {
            Event::RunStarted { run_id } => {
                json!({ "type": "run.started", "run_id": run_id.to_string() })
            }
            Event::RunFinished { run_id } => {
                json!({ "type": "run.finished", "run_id": run_id.to_string() })
            }
            Event::FlowStarted { run_id, flow } => {
                json!({ "type": "flow.started", "run_id": run_id.to_string(), "flow": flow })
            }
            Event::FlowFinished { run_id, flow } => {
                json!({ "type": "flow.finished", "run_id": run_id.to_string(), "flow": flow })
            }
            Event::FlowAborted {
                run_id,
                flow,
                request_id,
            } => {
                json!({ "type": "flow.aborted", "run_id": run_id.to_string(), "flow": flow, "request_id": request_id })
            }
            Event::RequestStarted {
                run_id,
                request_id,
                method,
            } => {
                json!({ "type": "request.started", "run_id": run_id.to_string(), "request_id": request_id, "method": method })
            }
            Event::RequestFinished {
                run_id,
                request_id,
                status,
            } => {
                json!({ "type": "request.finished", "run_id": run_id.to_string(), "request_id": request_id, "status": status })
            }
            Event::RequestFailed {
                run_id,
                request_id,
                reason,
            } => {
                json!({ "type": "request.failed", "run_id": run_id.to_string(), "request_id": request_id, "reason": reason })
            }
        };
        println!("{}", serde_json::to_string(&json).unwrap_or_default());
    }
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}
