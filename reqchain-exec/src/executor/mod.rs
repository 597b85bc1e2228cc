pub mod events;
mod request;
mod result;
pub mod transport;

pub use events::{CompositeEventSink, Event, EventSink, NoOpEventSink, StdoutEventSink};
pub use request::execute_template;
pub use result::{ExecutionResult, FailureReason, RequestState};
pub use transport::{
    ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse,
};
