use crate::error::BoxError;
use crate::health::RemoteHealth;
use crate::request::GeneratePdfRequest;

/// JSON encode/decode capability used by [`PdfServiceClient`](crate::PdfServiceClient).
///
/// Implementations must be safe to share across concurrent calls.
pub trait JsonCodec: Send + Sync {
    fn encode_request(&self, request: &GeneratePdfRequest) -> Result<Vec<u8>, BoxError>;

    fn decode_health(&self, body: &[u8]) -> Result<RemoteHealth, BoxError>;
}

/// Default codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
    fn encode_request(&self, request: &GeneratePdfRequest) -> Result<Vec<u8>, BoxError> {
        Ok(serde_json::to_vec(request)?)
    }

    fn decode_health(&self, body: &[u8]) -> Result<RemoteHealth, BoxError> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl<C: JsonCodec + ?Sized> JsonCodec for std::sync::Arc<C> {
    fn encode_request(&self, request: &GeneratePdfRequest) -> Result<Vec<u8>, BoxError> {
        (**self).encode_request(request)
    }

    fn decode_health(&self, body: &[u8]) -> Result<RemoteHealth, BoxError> {
        (**self).decode_health(body)
    }
}
