use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: String,
    pub url: String,
    /// Already-resolved header pairs, in declaration order.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Skip certificate verification for this call. Forwarded unchanged from
    /// run configuration; the engine never builds its own trust settings.
    pub insecure_tls: bool,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("invalid http method: {0}")]
    Method(String),
    #[error("invalid url: {0}")]
    Url(String),
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("http error: {0}")]
    Other(String),
}

/// The wire-level collaborator. The engine only ever talks to this trait, so
/// tests substitute scripted implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    insecure_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds both clients up front; the per-request `insecure_tls` flag
    /// picks between them.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("reqchain/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        let insecure_client = reqwest::Client::builder()
            .user_agent(concat!("reqchain/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self {
            client,
            insecure_client,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let method: reqwest::Method = request
            .method
            .to_ascii_uppercase()
            .parse()
            .map_err(|_| TransportError::Method(request.method.clone()))?;
        let url = url::Url::parse(&request.url)
            .map_err(|e| TransportError::Url(format!("{}: {e}", request.url)))?;

        let client = if request.insecure_tls {
            &self.insecure_client
        } else {
            &self.client
        };

        let mut rb = client.request(method, url);
        for (name, value) in &request.headers {
            rb = rb.header(name, value);
        }
        if let Some(body) = request.body {
            rb = rb.body(body);
        }

        let resp = rb.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(map_reqwest_error)?;

        Ok(TransportResponse { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_connect() || e.is_request() {
        return TransportError::Network(e.to_string());
    }
    TransportError::Other(e.to_string())
}
