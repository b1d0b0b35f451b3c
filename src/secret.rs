use std::fmt;

/// A wrapper that keeps credential payloads out of logs and formatted output.
///
/// `Secret<T>` is used for the `value` half of an authentication pair. The
/// wrapped value can only be read through [`expose_secret`](Self::expose_secret).
///
/// # Security Properties
///
/// - Does NOT implement `Deref`, `AsRef` or `Borrow`
/// - Debug and Display output is always `[REDACTED]`
/// - No type information is leaked in formatted output
///
/// Unlike a general-purpose secret box this one is `Clone`: forwarding hands
/// the same credential to every outgoing call made for one inbound request.
///
/// # Examples
///
/// ```
/// use rpc_metadata::Secret;
///
/// let token = Secret::new("abc123".to_string());
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// assert_eq!(token.expose_secret(), "abc123");
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Secret<T> {
    // Must stay private; formatting is the only other way to reach it.
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the secret value.
    ///
    /// The returned reference must not be logged or displayed.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
