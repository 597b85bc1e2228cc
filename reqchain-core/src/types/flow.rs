use crate::types::RequestTemplate;

/// An ordered set of request templates sharing a base URL. Order is
/// semantically significant: it is the only legal direction for references.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFlow {
    pub name: String,
    pub base_url: String,
    pub requests: Vec<RequestTemplate>,
}

impl RequestFlow {
    pub fn request(&self, id: &str) -> Option<&RequestTemplate> {
        self.requests.iter().find(|r| r.id == id)
    }
}

/// Wire shape of a flow definition: either a mapping with an optional
/// `baseUrl` and a `requests` list, or a bare list of request objects.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FlowDocument {
    Document {
        #[serde(rename = "baseUrl", default)]
        base_url: String,
        requests: Vec<RequestTemplate>,
    },
    Requests(Vec<RequestTemplate>),
}

impl FlowDocument {
    /// The flow name is not part of the document; callers supply it
    /// (typically the file stem).
    pub fn into_flow(self, name: impl Into<String>) -> RequestFlow {
        match self {
            FlowDocument::Document { base_url, requests } => RequestFlow {
                name: name.into(),
                base_url,
                requests,
            },
            FlowDocument::Requests(requests) => RequestFlow {
                name: name.into(),
                base_url: String::new(),
                requests,
            },
        }
    }
}
