//! Client for the remote HTML-to-PDF templating service.
//!
//! [`PdfServiceClient`] turns an HTML template plus placeholder values into a
//! versioned render request, returns the PDF bytes the service sends back,
//! and maps the service's `/health` payload onto a [`Health`] result.
//! HTTP and JSON handling are injected through [`Transport`] and
//! [`JsonCodec`], with reqwest and serde_json as defaults.

pub mod client;
pub mod codec;
pub mod error;
pub mod health;
pub mod request;
pub mod transport;

pub use client::{AuthTokenSource, PdfServiceClient, PdfServiceClientBuilder};
pub use codec::{JsonCodec, SerdeJsonCodec};
pub use error::{BoxError, ClientError, InvalidInput, Result, TransportError};
pub use health::{Health, HealthCheck, HealthError, RemoteHealth, Status};
pub use request::{
    API_VERSION, APPLICATION_JSON, APPLICATION_PDF, GeneratePdfRequest, HttpRequestSpec,
    Placeholders, RenderRequest, RenderRequestBuilder, SERVICE_AUTHORIZATION,
    build_health_request, build_render_request, require_non_empty,
};
pub use transport::{ReqwestTransport, Transport};
