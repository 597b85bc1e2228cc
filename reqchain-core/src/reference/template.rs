use std::sync::LazyLock;

use regex::Regex;

use super::eval::{render_value, resolve_path};
use super::parse::parse_reference;
use super::{Reference, ReferenceError};
use crate::store::ResponseStore;

/// Non-overlapping `{{...}}` placeholders. Captured text is trimmed before
/// parsing, so `{{ a.response.x }}` is accepted.
static REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("valid regex"));

/// Substitute every placeholder in `input` with values read from the store,
/// left to right. Reads the store only; never writes it.
///
/// Post-condition: the result contains no `{{` or `}}` pair. A leftover pair
/// means the scan missed a malformed placeholder and is reported as
/// [`ReferenceError::Unterminated`] rather than passed through silently.
pub fn resolve_template(input: &str, store: &ResponseStore) -> Result<String, ReferenceError> {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for m in REF_RE.find_iter(input) {
        let raw = input[m.start() + 2..m.end() - 2].trim();
        out.push_str(&input[last..m.start()]);
        out.push_str(&resolve_reference(raw, store)?);
        last = m.end();
    }
    out.push_str(&input[last..]);

    if out.contains("{{") || out.contains("}}") {
        return Err(ReferenceError::Unterminated {
            text: input.to_string(),
        });
    }
    Ok(out)
}

/// Parse every placeholder in `input` without resolving anything.
///
/// Used at validation time: syntax errors and unbalanced delimiters are
/// caught before a run starts, while store lookups are deferred to run time.
pub fn scan_references(input: &str) -> Result<Vec<Reference>, ReferenceError> {
    let mut refs = Vec::new();
    let mut stripped = String::with_capacity(input.len());
    let mut last = 0;
    for m in REF_RE.find_iter(input) {
        let raw = input[m.start() + 2..m.end() - 2].trim();
        refs.push(parse_reference(raw)?);
        stripped.push_str(&input[last..m.start()]);
        last = m.end();
    }
    stripped.push_str(&input[last..]);

    if stripped.contains("{{") || stripped.contains("}}") {
        return Err(ReferenceError::Unterminated {
            text: input.to_string(),
        });
    }
    Ok(refs)
}

fn resolve_reference(raw: &str, store: &ResponseStore) -> Result<String, ReferenceError> {
    let reference = parse_reference(raw)?;
    let root = store
        .get(&reference.id)
        .ok_or_else(|| ReferenceError::Unresolved {
            reference: raw.to_string(),
            id: reference.id.clone(),
        })?;
    let value = resolve_path(raw, &reference, root)?;
    Ok(render_value(value))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn store_with(id: &str, value: serde_json::Value) -> ResponseStore {
        let mut store = ResponseStore::new();
        store.put(id, value);
        store
    }

    #[test]
    fn substitutes_single_placeholder() {
        let store = store_with("a", json!({"x": "5"}));
        let out = resolve_template("value={{a.response.x}}", &store).unwrap();
        assert_eq!(out, "value=5");
    }

    #[test]
    fn substitutes_multiple_placeholders_left_to_right() {
        let store = store_with("a", json!({"x": "1", "y": "2"}));
        let out = resolve_template("/{{a.response.x}}/{{a.response.y}}", &store).unwrap();
        assert_eq!(out, "/1/2");
    }

    #[test]
    fn trims_whitespace_inside_delimiters() {
        let store = store_with("a", json!({"x": "ok"}));
        let out = resolve_template("{{ a.response.x }}", &store).unwrap();
        assert_eq!(out, "ok");
    }

    #[test]
    fn compound_values_render_as_compact_json() {
        let store = store_with("a", json!({"x": {"y": 1}}));
        let out = resolve_template("{{a.response.x}}", &store).unwrap();
        assert_eq!(out, r#"{"y":1}"#);
    }

    #[test]
    fn absent_id_is_unresolved_regardless_of_path() {
        let store = ResponseStore::new();
        let err = resolve_template("{{ghost.response.anything.at.all}}", &store).unwrap_err();
        match err {
            ReferenceError::Unresolved { id, .. } => assert_eq!(id, "ghost"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn leftover_open_delimiter_is_unterminated() {
        let store = ResponseStore::new();
        let err = resolve_template("prefix {{a.response.x", &store).unwrap_err();
        assert!(matches!(err, ReferenceError::Unterminated { .. }));
    }

    #[test]
    fn leftover_close_delimiter_is_unterminated() {
        let store = store_with("a", json!({"x": "v"}));
        let err = resolve_template("{{a.response.x}} trailing }}", &store).unwrap_err();
        assert!(matches!(err, ReferenceError::Unterminated { .. }));
    }

    #[test]
    fn plain_text_passes_through() {
        let store = ResponseStore::new();
        let out = resolve_template("no placeholders here", &store).unwrap();
        assert_eq!(out, "no placeholders here");
    }

    #[test]
    fn scan_collects_references_without_a_store() {
        let refs = scan_references("/{{a.response.x}}/{{b.response.items[0].id}}").unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].id, "a");
        assert_eq!(refs[1].id, "b");
    }

    #[test]
    fn scan_rejects_bad_syntax() {
        assert!(scan_references("{{not-enough-parts}}").is_err());
        assert!(scan_references("dangling {{").is_err());
    }
}
