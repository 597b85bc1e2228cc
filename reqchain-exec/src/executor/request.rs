use std::time::Instant;

use reqchain_core::{resolve_template, ReferenceError, RequestTemplate, ResponseStore};

use crate::executor::result::{ExecutionResult, FailureReason, RequestState};
use crate::executor::transport::{Transport, TransportRequest};

/// Execute one template: resolve its placeholders, perform the call,
/// classify the outcome, and record the parsed response in the store when it
/// is usable for chaining.
///
/// Store-write rule: only a status below 400 whose body parses as JSON
/// produces a store entry. A non-JSON success body leaves the request
/// `Executed` but unusable as a reference target; later references to this
/// id fail as unresolved.
pub async fn execute_template(
    template: &RequestTemplate,
    base_url: &str,
    insecure_tls: bool,
    transport: &dyn Transport,
    store: &mut ResponseStore,
) -> ExecutionResult {
    let started = Instant::now();

    let parts = match resolve_parts(template, store) {
        Ok(parts) => parts,
        Err(e) => {
            // Short-circuit: no network call is made on a resolution failure.
            return ExecutionResult {
                id: template.id.clone(),
                status_code: None,
                state: RequestState::Failed(FailureReason::Reference(e)),
                body: String::new(),
                duration_ms: elapsed_ms(started),
            };
        }
    };

    let request = TransportRequest {
        method: template.method.clone(),
        url: normalize_url(&parts.url, base_url),
        headers: parts.headers,
        body: parts.body,
        insecure_tls,
    };

    let response = match transport.send(request).await {
        Ok(response) => response,
        Err(e) => {
            return ExecutionResult {
                id: template.id.clone(),
                status_code: None,
                state: RequestState::Failed(FailureReason::Transport(e)),
                body: String::new(),
                duration_ms: elapsed_ms(started),
            };
        }
    };

    if response.status >= 400 {
        return ExecutionResult {
            id: template.id.clone(),
            status_code: Some(response.status),
            state: RequestState::Failed(FailureReason::HttpStatus(response.status)),
            body: response.body,
            duration_ms: elapsed_ms(started),
        };
    }

    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&response.body) {
        store.put(template.id.clone(), parsed);
    }

    ExecutionResult {
        id: template.id.clone(),
        status_code: Some(response.status),
        state: RequestState::Executed,
        body: response.body,
        duration_ms: elapsed_ms(started),
    }
}

struct ResolvedParts {
    url: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

fn resolve_parts(
    template: &RequestTemplate,
    store: &ResponseStore,
) -> Result<ResolvedParts, ReferenceError> {
    let url = resolve_template(&template.url, store)?;
    let mut headers = Vec::with_capacity(template.headers.len());
    for (name, value) in &template.headers {
        headers.push((name.clone(), resolve_template(value, store)?));
    }
    let body = match &template.body {
        Some(body) => Some(resolve_template(body, store)?),
        None => None,
    };
    Ok(ResolvedParts { url, headers, body })
}

/// A resolved url that already carries a scheme is used as-is; anything else
/// is joined onto the flow's base url, dropping one leading slash.
pub(crate) fn normalize_url(resolved: &str, base_url: &str) -> String {
    if resolved.starts_with("http://") || resolved.starts_with("https://") {
        return resolved.to_string();
    }
    let path = resolved.strip_prefix('/').unwrap_or(resolved);
    format!("{base_url}{path}")
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
