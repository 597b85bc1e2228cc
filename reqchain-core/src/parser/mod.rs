use crate::error::ParseError;
use crate::types::{FlowDocument, RequestFlow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedFlow {
    pub flow: RequestFlow,
    pub format: DocumentFormat,
}

pub fn parse_flow_str(
    input: &str,
    name: &str,
    format: DocumentFormat,
) -> Result<ParsedFlow, ParseError> {
    let (document, format) = match format {
        DocumentFormat::Json => (serde_json::from_str::<FlowDocument>(input)?, format),
        DocumentFormat::Yaml => (serde_yaml::from_str::<FlowDocument>(input)?, format),
        DocumentFormat::Auto => parse_document_auto(input)?,
    };
    Ok(ParsedFlow {
        flow: document.into_flow(name),
        format,
    })
}

fn parse_document_auto(input: &str) -> Result<(FlowDocument, DocumentFormat), ParseError> {
    // Heuristic: JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<FlowDocument>(input) {
            Ok(doc) => Ok((doc, DocumentFormat::Json)),
            // A YAML flow-style document can look JSON-ish; give YAML a
            // chance before reporting the JSON error.
            Err(e) => match serde_yaml::from_str::<FlowDocument>(input) {
                Ok(doc) => Ok((doc, DocumentFormat::Yaml)),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<FlowDocument>(input) {
        Ok(doc) => Ok((doc, DocumentFormat::Yaml)),
        Err(e) => match serde_json::from_str::<FlowDocument>(input) {
            Ok(doc) => Ok((doc, DocumentFormat::Json)),
            Err(_) => Err(ParseError::Yaml(e)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_document_with_base_url() {
        let doc = r#"
baseUrl: https://api.example.com/
requests:
  - id: login
    method: POST
    url: /auth/login
    requestBody: '{"user":"admin"}'
"#;
        let parsed = parse_flow_str(doc, "auth", DocumentFormat::Auto).unwrap();
        assert_eq!(parsed.format, DocumentFormat::Yaml);
        assert_eq!(parsed.flow.name, "auth");
        assert_eq!(parsed.flow.base_url, "https://api.example.com/");
        assert_eq!(parsed.flow.requests.len(), 1);
        assert_eq!(parsed.flow.requests[0].id, "login");
    }

    #[test]
    fn parses_bare_request_list_with_empty_base_url() {
        let doc = r#"
- id: ping
  method: GET
  url: https://api.example.com/ping
"#;
        let parsed = parse_flow_str(doc, "ping", DocumentFormat::Auto).unwrap();
        assert_eq!(parsed.flow.base_url, "");
        assert_eq!(parsed.flow.requests[0].method, "GET");
    }

    #[test]
    fn auto_detects_json_document() {
        let doc = r#"{"baseUrl":"https://x.test","requests":[{"id":"a","method":"GET","url":"/a"}]}"#;
        let parsed = parse_flow_str(doc, "x", DocumentFormat::Auto).unwrap();
        assert_eq!(parsed.format, DocumentFormat::Json);
        assert_eq!(parsed.flow.base_url, "https://x.test");
    }

    #[test]
    fn coerces_non_string_request_body() {
        let doc = r#"
- id: a
  method: POST
  url: /a
  requestBody:
    user: admin
    count: 2
"#;
        let parsed = parse_flow_str(doc, "f", DocumentFormat::Auto).unwrap();
        let body = parsed.flow.requests[0].body.as_deref().unwrap();
        assert!(body.contains("\"user\":\"admin\""));
    }

    #[test]
    fn preserves_header_declaration_order() {
        let doc = r#"
- id: a
  method: GET
  url: /a
  headers:
    X-Second-Look: b
    Accept: application/json
"#;
        let parsed = parse_flow_str(doc, "f", DocumentFormat::Auto).unwrap();
        let names: Vec<&String> = parsed.flow.requests[0].headers.keys().collect();
        assert_eq!(names, ["X-Second-Look", "Accept"]);
    }

    #[test]
    fn rejects_garbage_input() {
        let err = parse_flow_str(": not : a : flow : {", "f", DocumentFormat::Auto);
        assert!(err.is_err());
    }
}
