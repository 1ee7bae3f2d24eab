use std::future::Future;
use std::time::Duration;

use crate::error::TransportError;
use crate::request::HttpRequestSpec;

/// "Submit this request, return the raw body or a typed error."
///
/// Connection-level policy (TLS, pooling, timeouts) belongs to the
/// implementation, not to the client using it.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequestSpec,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// Default [`Transport`] backed by [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-configured client (timeouts, proxies, TLS roots).
    pub fn with_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Shorthand for a client with an overall request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { inner })
    }

    /// Return a reference to the underlying [`reqwest::Client`].
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequestSpec) -> Result<Vec<u8>, TransportError> {
        let resp = self
            .inner
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn execute(
        &self,
        request: HttpRequestSpec,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send {
        (**self).execute(request)
    }
}
