#![forbid(unsafe_code)]

pub mod executor;
pub mod runner;

pub use executor::{
    execute_template, CompositeEventSink, Event, EventSink, ExecutionResult, FailureReason,
    NoOpEventSink, ReqwestTransport, RequestState, StdoutEventSink, Transport, TransportError,
    TransportRequest, TransportResponse,
};
pub use runner::{RunError, RunOptions, RunOutcome, RunReport, Runner, StoreScope};
