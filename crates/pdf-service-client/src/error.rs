/// Boxed error used for causes raised by injected capabilities.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Precondition failures detected before any request is built.
///
/// "Missing" means the value was never supplied; "empty" means it was
/// supplied with zero length. Callers rely on telling these apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("template is required")]
    MissingTemplate,
    #[error("template must not be empty")]
    EmptyTemplate,
    #[error("placeholder values are required")]
    MissingValues,
}

/// Failure reported by a [`Transport`](crate::Transport).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("PDF service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("HTTP request failed: {0}")]
    Request(#[source] BoxError),
}

impl TransportError {
    /// HTTP status code, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(_) => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(Box::new(err))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("PDF service base URL is required")]
    MissingBaseUrl,
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Base URL {0} cannot have paths resolved against it")]
    NotABaseUrl(String),
    #[error("S2S auth token contains invalid characters (non-visible ASCII)")]
    InvalidAuthToken,
    /// A render call failed; carries the original cause.
    #[error("{message}")]
    Service {
        message: &'static str,
        #[source]
        source: BoxError,
    },
}

impl ClientError {
    pub(crate) fn service(message: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Service {
            message,
            source: source.into(),
        }
    }

    /// The transport failure behind a failed render call, if that is what this is.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::Service { source, .. } => source.downcast_ref::<TransportError>(),
            _ => None,
        }
    }
}
