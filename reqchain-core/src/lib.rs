#![forbid(unsafe_code)]

pub mod error;
pub mod parser;
pub mod reference;
pub mod store;
pub mod types;
pub mod validate;

pub use crate::error::{ConfigError, FlowError, ParseError, Violation};
pub use crate::parser::{parse_flow_str, DocumentFormat, ParsedFlow};
pub use crate::reference::{
    parse_reference, resolve_template, scan_references, PathSegment, Reference, ReferenceError,
};
pub use crate::store::ResponseStore;
pub use crate::types::{FlowDocument, RequestFlow, RequestTemplate};
pub use crate::validate::{validate_flow, Validate};
