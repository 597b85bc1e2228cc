use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConfigError, Violation};
use crate::reference::scan_references;
use crate::types::{RequestFlow, RequestTemplate};

static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid regex"));

const METHODS: [&str; 8] = [
    "GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS", "TRACE",
];

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

impl Validate for RequestFlow {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_flow(self)
    }
}

/// Structural checks on a loaded flow: well-formed unique ids, known
/// methods, non-empty urls, and syntactically valid placeholders. Reference
/// targets are not checked here; whether an id resolves depends on run-time
/// store state.
pub fn validate_flow(flow: &RequestFlow) -> Result<(), ConfigError> {
    let mut v = Validator::new();
    v.validate_flow(flow);
    v.finish()
}

struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    fn finish(self) -> Result<(), ConfigError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::new(self.violations))
        }
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    fn validate_flow(&mut self, flow: &RequestFlow) {
        if flow.requests.is_empty() {
            self.push("requests", "must have at least one entry");
        }

        let mut seen = HashSet::<&str>::new();
        for (idx, request) in flow.requests.iter().enumerate() {
            let path = format!("requests[{idx}]");
            if !seen.insert(request.id.as_str()) {
                self.push(format!("{path}.id"), "must be unique within the flow");
            }
            self.validate_request(request, &path);
        }
    }

    fn validate_request(&mut self, request: &RequestTemplate, path: &str) {
        if request.id.is_empty() {
            self.push(format!("{path}.id"), "must not be empty");
        } else if !ID_RE.is_match(&request.id) {
            self.push(
                format!("{path}.id"),
                "must match regex [A-Za-z0-9_\\-]+",
            );
        }

        if request.method.is_empty() {
            self.push(format!("{path}.method"), "must not be empty");
        } else if !METHODS.contains(&request.method.to_ascii_uppercase().as_str()) {
            self.push(
                format!("{path}.method"),
                format!("unknown HTTP method '{}'", request.method),
            );
        }

        if request.url.is_empty() {
            self.push(format!("{path}.url"), "must not be empty");
        } else {
            self.validate_placeholders(&request.url, &format!("{path}.url"));
        }

        for (name, value) in &request.headers {
            self.validate_placeholders(value, &format!("{path}.headers.{name}"));
        }
        if let Some(body) = &request.body {
            self.validate_placeholders(body, &format!("{path}.requestBody"));
        }
    }

    fn validate_placeholders(&mut self, text: &str, path: &str) {
        if let Err(e) = scan_references(text) {
            self.push(path, e.to_string());
        }
    }
}
