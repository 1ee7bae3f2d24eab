use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BoxError, TransportError};

/// Status token reported by the remote service's health endpoint.
///
/// The vocabulary is owned by the remote service. Tokens this crate does
/// not know about are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(Cow<'static, str>);

impl Status {
    pub const UP: Status = Status(Cow::Borrowed("UP"));
    pub const DOWN: Status = Status(Cow::Borrowed("DOWN"));
    pub const OUT_OF_SERVICE: Status = Status(Cow::Borrowed("OUT_OF_SERVICE"));
    pub const UNKNOWN: Status = Status(Cow::Borrowed("UNKNOWN"));

    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire shape of the health endpoint's body. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteHealth {
    pub status: Status,
}

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("health request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("malformed health response: {0}")]
    Decode(#[source] BoxError),
}

/// Outcome of a health probe.
#[derive(Debug)]
pub enum Health {
    Up,
    /// The service reported a non-up status, or could not be asked.
    /// `cause` is set only in the latter case.
    Down {
        status: Status,
        cause: Option<HealthError>,
    },
    Unknown,
}

impl Health {
    /// Map a reported status onto the tri-state result. Anything other than
    /// `UP` or `UNKNOWN` counts as down.
    pub fn from_status(status: Status) -> Self {
        if status == Status::UP {
            Health::Up
        } else if status == Status::UNKNOWN {
            Health::Unknown
        } else {
            Health::Down {
                status,
                cause: None,
            }
        }
    }

    pub fn down(cause: HealthError) -> Self {
        Health::Down {
            status: Status::DOWN,
            cause: Some(cause),
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Health::Up)
    }

    pub fn status(&self) -> &Status {
        static UP: Status = Status::UP;
        static UNKNOWN: Status = Status::UNKNOWN;
        match self {
            Health::Up => &UP,
            Health::Down { status, .. } => status,
            Health::Unknown => &UNKNOWN,
        }
    }

    pub fn cause(&self) -> Option<&HealthError> {
        match self {
            Health::Down { cause, .. } => cause.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cause() {
            Some(cause) => write!(f, "{} ({cause})", self.status()),
            None => write!(f, "{}", self.status()),
        }
    }
}

/// Health probe that reports status instead of failing.
pub trait HealthCheck: Send + Sync {
    /// Never fails: transport and parse errors come back as [`Health::Down`]
    /// carrying the cause.
    fn health(&self) -> impl std::future::Future<Output = Health> + Send;
}
