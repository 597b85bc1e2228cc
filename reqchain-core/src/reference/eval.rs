use serde_json::Value;

use super::{PathSegment, Reference, ReferenceError};

/// Walk a stored JSON value along the reference's path segments.
///
/// `raw` is the original placeholder text, carried into errors verbatim.
pub fn resolve_path<'a>(
    raw: &str,
    reference: &Reference,
    root: &'a Value,
) -> Result<&'a Value, ReferenceError> {
    let mut current = root;
    for segment in &reference.segments {
        match segment {
            PathSegment::Field(name) => {
                current = field(raw, &reference.id, current, name)?;
            }
            PathSegment::Index { field: name, index } => {
                let value = field(raw, &reference.id, current, name)?;
                let items = value.as_array().ok_or_else(|| ReferenceError::NotAnArray {
                    reference: raw.to_string(),
                    id: reference.id.clone(),
                    field: name.clone(),
                })?;
                current = items
                    .get(*index)
                    .ok_or_else(|| ReferenceError::IndexOutOfBounds {
                        reference: raw.to_string(),
                        id: reference.id.clone(),
                        field: name.clone(),
                        index: *index,
                    })?;
            }
        }
    }
    Ok(current)
}

fn field<'a>(
    raw: &str,
    id: &str,
    current: &'a Value,
    name: &str,
) -> Result<&'a Value, ReferenceError> {
    current
        .as_object()
        .and_then(|map| map.get(name))
        .ok_or_else(|| ReferenceError::MissingField {
            reference: raw.to_string(),
            id: id.to_string(),
            field: name.to_string(),
        })
}

/// Scalars render as bare text; objects and arrays as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
