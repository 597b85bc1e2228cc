use std::sync::Arc;

use reqchain_exec::{
    EventSink, NoOpEventSink, ReqwestTransport, RunOptions, Runner, StdoutEventSink, StoreScope,
    TransportError,
};

use crate::args::{EventsMode, RunArgs};

pub fn build_runner(run: &RunArgs, store_scope: StoreScope) -> Result<Runner, TransportError> {
    let transport = Arc::new(ReqwestTransport::new()?);
    let options = RunOptions {
        insecure_tls: run.insecure,
        store_scope,
    };
    let sink: Arc<dyn EventSink> = match run.events {
        EventsMode::None => Arc::new(NoOpEventSink),
        EventsMode::Stdout => Arc::new(StdoutEventSink),
    };
    Ok(Runner::new(transport, options).with_event_sink(sink))
}
