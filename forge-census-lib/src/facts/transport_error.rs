use core::fmt::{Display, Formatter};
use reqwest::StatusCode;

/// Why a request against the forge API could not produce a usable body.
#[derive(Debug)]
pub enum TransportErrorKind {
    /// The server answered with a status that the caller did not tolerate.
    Status(StatusCode),

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    Network(reqwest::Error),

    /// The response body could not be decoded into the expected shape.
    Decode(reqwest::Error),
}

/// A fatal failure while talking to the forge API.
///
/// Tolerated absences never surface as this type; they are reported as
/// [`Fetched::Absent`](super::Fetched::Absent) instead.
#[derive(Debug)]
pub struct TransportError {
    url: String,
    kind: TransportErrorKind,
}

impl TransportError {
    #[must_use]
    pub fn status(url: impl Into<String>, status: StatusCode) -> Self {
        Self {
            url: url.into(),
            kind: TransportErrorKind::Status(status),
        }
    }

    #[must_use]
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self {
            url: url.into(),
            kind: TransportErrorKind::Network(source),
        }
    }

    #[must_use]
    pub fn decode(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self {
            url: url.into(),
            kind: TransportErrorKind::Decode(source),
        }
    }

    /// The URL of the failed request
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn kind(&self) -> &TransportErrorKind {
        &self.kind
    }

    /// The HTTP status, if the server answered at all
    #[must_use]
    pub const fn status_code(&self) -> Option<StatusCode> {
        match &self.kind {
            TransportErrorKind::Status(status) => Some(*status),
            TransportErrorKind::Network(_) | TransportErrorKind::Decode(_) => None,
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.kind {
            TransportErrorKind::Status(status) => write!(f, "GET {} failed with status {status}", self.url),
            TransportErrorKind::Network(_) => write!(f, "GET {} could not be sent", self.url),
            TransportErrorKind::Decode(_) => write!(f, "GET {} returned an unexpected body", self.url),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            TransportErrorKind::Status(_) => None,
            TransportErrorKind::Network(e) | TransportErrorKind::Decode(e) => Some(e),
        }
    }
}
