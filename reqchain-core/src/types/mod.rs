mod flow;
mod template;

pub use flow::{FlowDocument, RequestFlow};
pub use template::RequestTemplate;
