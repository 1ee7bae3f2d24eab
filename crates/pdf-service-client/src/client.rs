use std::sync::Arc;

use tracing::{debug, error};
use url::Url;

use crate::codec::{JsonCodec, SerdeJsonCodec};
use crate::error::{ClientError, Result};
use crate::health::{Health, HealthCheck, HealthError, RemoteHealth};
use crate::request::{
    Placeholders, RenderRequest, build_health_request, build_render_request,
};
use crate::transport::{ReqwestTransport, Transport};

const RENDER_PATH: &str = "/pdfs";
const HEALTH_PATH: &str = "/health";

/// Zero-argument credential supplier, called once per render call.
pub type AuthTokenSource = Arc<dyn Fn() -> String + Send + Sync>;

/// Client for the remote PDF templating service.
///
/// Holds only immutable configuration, so one instance can be cloned or
/// shared across tasks. Both endpoints are resolved once at construction.
#[derive(Clone)]
pub struct PdfServiceClient<T = ReqwestTransport, C = SerdeJsonCodec> {
    transport: T,
    codec: C,
    auth_token: Option<AuthTokenSource>,
    render_endpoint: Url,
    health_endpoint: Url,
}

impl PdfServiceClient<ReqwestTransport, SerdeJsonCodec> {
    pub fn builder() -> PdfServiceClientBuilder {
        PdfServiceClientBuilder::default()
    }
}

impl<T: Transport, C: JsonCodec> PdfServiceClient<T, C> {
    /// Create a client with explicit capabilities and no auth token.
    ///
    /// `base_url` must be absolute (e.g. `http://pdf-service:5500`). The
    /// `/pdfs` and `/health` paths replace whatever path it carries.
    pub fn new(transport: T, codec: C, base_url: &str) -> Result<Self> {
        let (render_endpoint, health_endpoint) = resolve_endpoints(base_url)?;
        Ok(Self {
            transport,
            codec,
            auth_token: None,
            render_endpoint,
            health_endpoint,
        })
    }

    /// Render `template` with `values` substituted into it.
    ///
    /// Returns the PDF bytes untouched. Fails before any I/O on an empty
    /// template.
    pub async fn generate_from_html(
        &self,
        template: impl Into<Vec<u8>>,
        values: Placeholders,
    ) -> Result<Vec<u8>> {
        let request = RenderRequest::new(template, values)?;
        self.render(&request).await
    }

    /// POST `{base_url}/pdfs`. A single attempt; failures are not retried.
    pub async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        let token = self.auth_token.as_ref().map(|source| source());
        let spec = build_render_request(
            &self.render_endpoint,
            request,
            &self.codec,
            token.as_deref(),
        )?;
        debug!(
            url = %spec.url,
            body_len = spec.body.len(),
            authenticated = token.is_some(),
            "requesting PDF"
        );

        self.transport
            .execute(spec)
            .await
            .map_err(|e| ClientError::service("Failed to request PDF from REST endpoint", e))
    }

    /// GET `{base_url}/health`. Never fails; see [`HealthCheck`].
    pub async fn service_healthy(&self) -> Health {
        match self.fetch_health().await {
            Ok(remote) => Health::from_status(remote.status),
            Err(err) => {
                error!(error = %err, url = %self.health_endpoint, "Error on pdf service healthcheck");
                Health::down(err)
            }
        }
    }

    async fn fetch_health(&self) -> std::result::Result<RemoteHealth, HealthError> {
        let spec = build_health_request(&self.health_endpoint);
        debug!(url = %spec.url, "checking PDF service health");
        let body = self.transport.execute(spec).await?;
        self.codec.decode_health(&body).map_err(HealthError::Decode)
    }

    pub fn render_endpoint(&self) -> &Url {
        &self.render_endpoint
    }

    pub fn health_endpoint(&self) -> &Url {
        &self.health_endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport, C: JsonCodec> HealthCheck for PdfServiceClient<T, C> {
    async fn health(&self) -> Health {
        self.service_healthy().await
    }
}

impl<T, C> std::fmt::Debug for PdfServiceClient<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfServiceClient")
            .field("render_endpoint", &self.render_endpoint.as_str())
            .field("health_endpoint", &self.health_endpoint.as_str())
            .field("auth_token", &self.auth_token.is_some())
            .finish()
    }
}

fn resolve_endpoints(base_url: &str) -> Result<(Url, Url)> {
    let base = Url::parse(base_url)?;
    if base.cannot_be_a_base() {
        return Err(ClientError::NotABaseUrl(base_url.to_string()));
    }
    Ok((base.join(RENDER_PATH)?, base.join(HEALTH_PATH)?))
}

/// Assembles a [`PdfServiceClient`].
///
/// Defaults: [`ReqwestTransport`], [`SerdeJsonCodec`], no auth token. The
/// base URL has no default.
pub struct PdfServiceClientBuilder<T = ReqwestTransport, C = SerdeJsonCodec> {
    base_url: Option<String>,
    transport: T,
    codec: C,
    auth_token: Option<AuthTokenSource>,
}

impl Default for PdfServiceClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            transport: ReqwestTransport::default(),
            codec: SerdeJsonCodec,
            auth_token: None,
        }
    }
}

impl<T: Transport, C: JsonCodec> PdfServiceClientBuilder<T, C> {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn transport<T2: Transport>(self, transport: T2) -> PdfServiceClientBuilder<T2, C> {
        PdfServiceClientBuilder {
            base_url: self.base_url,
            transport,
            codec: self.codec,
            auth_token: self.auth_token,
        }
    }

    pub fn codec<C2: JsonCodec>(self, codec: C2) -> PdfServiceClientBuilder<T, C2> {
        PdfServiceClientBuilder {
            base_url: self.base_url,
            transport: self.transport,
            codec,
            auth_token: self.auth_token,
        }
    }

    /// Attach a `ServiceAuthorization` token to every render call.
    ///
    /// `source` is invoked on each call and its result never cached, so
    /// short-lived tokens stay fresh. Health probes are sent without it.
    pub fn s2s_auth_token<F>(mut self, source: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.auth_token = Some(Arc::new(source));
        self
    }

    pub fn build(self) -> Result<PdfServiceClient<T, C>> {
        let base_url = self.base_url.ok_or(ClientError::MissingBaseUrl)?;
        let mut client = PdfServiceClient::new(self.transport, self.codec, &base_url)?;
        client.auth_token = self.auth_token;
        Ok(client)
    }
}
