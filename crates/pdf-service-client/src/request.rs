use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::codec::JsonCodec;
use crate::error::{ClientError, InvalidInput, Result};

/// Versioned content type of render requests.
///
/// Part of the service contract: changing it is a breaking API change.
pub const API_VERSION: &str = "application/vnd.uk.gov.hmcts.pdf-service.v2+json;charset=UTF-8";
pub const APPLICATION_PDF: &str = "application/pdf";
pub const APPLICATION_JSON: &str = "application/json";
/// Header carrying the service-to-service identity token.
pub const SERVICE_AUTHORIZATION: HeaderName = HeaderName::from_static("serviceauthorization");

/// Placeholder name to value mapping substituted into the template.
pub type Placeholders = serde_json::Map<String, serde_json::Value>;

/// Fails with [`InvalidInput::MissingTemplate`] for `None` and
/// [`InvalidInput::EmptyTemplate`] for a zero-length slice.
pub fn require_non_empty(template: Option<&[u8]>) -> std::result::Result<&[u8], InvalidInput> {
    match template {
        None => Err(InvalidInput::MissingTemplate),
        Some([]) => Err(InvalidInput::EmptyTemplate),
        Some(bytes) => Ok(bytes),
    }
}

/// A validated render call: a non-empty template and its placeholder values.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    template: Vec<u8>,
    values: Placeholders,
}

impl RenderRequest {
    pub fn new(template: impl Into<Vec<u8>>, values: Placeholders) -> Result<Self> {
        Self::builder().template(template).values(values).build()
    }

    pub fn builder() -> RenderRequestBuilder {
        RenderRequestBuilder::default()
    }

    pub fn template(&self) -> &[u8] {
        &self.template
    }

    pub fn values(&self) -> &Placeholders {
        &self.values
    }

    /// The wire payload. Template bytes are decoded as UTF-8; invalid
    /// sequences are replaced rather than rejected.
    pub fn to_payload(&self) -> GeneratePdfRequest {
        GeneratePdfRequest {
            template: String::from_utf8_lossy(&self.template).into_owned(),
            values: self.values.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RenderRequestBuilder {
    template: Option<Vec<u8>>,
    values: Option<Placeholders>,
}

impl RenderRequestBuilder {
    pub fn template(mut self, template: impl Into<Vec<u8>>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn values(mut self, values: Placeholders) -> Self {
        self.values = Some(values);
        self
    }

    pub fn build(self) -> Result<RenderRequest> {
        let template = self.template.ok_or(InvalidInput::MissingTemplate)?;
        require_non_empty(Some(template.as_slice()))?;
        let values = self.values.ok_or(InvalidInput::MissingValues)?;
        Ok(RenderRequest { template, values })
    }
}

/// JSON body of a render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratePdfRequest {
    pub template: String,
    pub values: Placeholders,
}

/// A fully formed outbound HTTP request, ready for a [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct HttpRequestSpec {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpRequestSpec {
    pub fn header(&self, name: impl reqwest::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Build the POST for a render call. Performs no I/O.
pub fn build_render_request<C: JsonCodec + ?Sized>(
    endpoint: &Url,
    request: &RenderRequest,
    codec: &C,
    auth_token: Option<&str>,
) -> Result<HttpRequestSpec> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(API_VERSION));
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_PDF));
    if let Some(token) = auth_token {
        headers.insert(
            SERVICE_AUTHORIZATION,
            HeaderValue::from_str(token).map_err(|_| ClientError::InvalidAuthToken)?,
        );
    }

    let body = codec
        .encode_request(&request.to_payload())
        .map_err(|e| ClientError::service("Failed to convert PDF request into JSON", e))?;

    Ok(HttpRequestSpec {
        method: Method::POST,
        url: endpoint.clone(),
        headers,
        body,
    })
}

/// Build the GET for a health probe: JSON accepted, empty body.
pub fn build_health_request(endpoint: &Url) -> HttpRequestSpec {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    HttpRequestSpec {
        method: Method::GET,
        url: endpoint.clone(),
        headers,
        body: Vec::new(),
    }
}
