mod eval;
mod parse;
mod template;

pub use eval::{render_value, resolve_path};
pub use parse::{parse_reference, PathSegment, Reference};
pub use template::{resolve_template, scan_references};

/// Failures while resolving `{{id.response.path}}` placeholders. Every
/// variant carries the offending reference (or template) text so messages
/// are actionable without inspecting internals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("invalid reference syntax: '{reference}'")]
    InvalidSyntax { reference: String },
    #[error("no stored response for request id '{id}' in reference '{reference}'")]
    Unresolved { reference: String, id: String },
    #[error("field '{field}' not found in response for '{id}' (reference '{reference}')")]
    MissingField {
        reference: String,
        id: String,
        field: String,
    },
    #[error("field '{field}' is not an array in response for '{id}' (reference '{reference}')")]
    NotAnArray {
        reference: String,
        id: String,
        field: String,
    },
    #[error("index {index} out of bounds for field '{field}' in response for '{id}' (reference '{reference}')")]
    IndexOutOfBounds {
        reference: String,
        id: String,
        field: String,
        index: usize,
    },
    #[error("invalid array index in segment '{segment}' of reference '{reference}'")]
    InvalidArrayIndex { reference: String, segment: String },
    #[error("unresolved placeholder delimiters remain in '{text}'")]
    Unterminated { text: String },
}
