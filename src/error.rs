use std::fmt;

/// Errors raised while forwarding metadata or dispatching a call.
///
/// Carries a machine-readable [`ErrorKind`] plus a human-readable message.
/// Callers are expected to surface these unchanged to their own callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    /// Creates a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The context carried no usable authentication pair.
    pub(crate) fn unauthenticated() -> Self {
        Self::new(ErrorKind::Unauthenticated, "the context is not authenticated")
    }

    /// Credentials that forbid insecure transport were about to go out in the clear.
    pub(crate) fn insecure_transport() -> Self {
        Self::new(
            ErrorKind::InsecureTransport,
            "credentials require transport security but the channel is insecure",
        )
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the fixed machine-readable code of the error kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

/// The kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No authentication pair was found on the inbound context.
    ///
    /// Not retryable: retrying without new credentials cannot succeed.
    Unauthenticated,
    /// Credentials forbid insecure transport and the channel is not encrypted.
    InsecureTransport,
}

impl ErrorKind {
    /// Stable code suitable for wire error details and metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::InsecureTransport => "insecure_transport",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Unauthenticated => write!(f, "Unauthenticated"),
            ErrorKind::InsecureTransport => write!(f, "Insecure transport"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_has_fixed_code_and_message() {
        let err = Error::unauthenticated();
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
        assert_eq!(err.code(), "unauthenticated");
        assert_eq!(err.message(), "the context is not authenticated");
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = Error::insecure_transport();
        let out = err.to_string();
        assert!(out.starts_with("Insecure transport: "));
        assert_eq!(err.code(), "insecure_transport");
    }
}
