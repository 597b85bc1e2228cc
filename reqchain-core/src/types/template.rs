use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Static description of one HTTP call. Templates are immutable once loaded;
/// execution results live in separate per-run values, never on the template.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RequestTemplate {
    pub id: String,

    pub method: String,

    /// May contain `{{id.response.path}}` placeholders, as may header values
    /// and the body.
    pub url: String,

    /// Declaration order is preserved and forwarded to the transport as-is.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,

    #[serde(
        rename = "requestBody",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "body_to_string"
    )]
    pub body: Option<String>,
}

/// A `requestBody` may be written as any YAML/JSON scalar or structure;
/// non-string values are coerced to their compact text form.
fn body_to_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
