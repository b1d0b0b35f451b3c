use std::fmt;

use crate::metadata::{AUTHORIZATION_KEY, ID_KEY, Metadata};
use crate::secret::Secret;

/// Identity and authorization data of a caller.
///
/// A record is parsed once from the inbound metadata of a call and is then
/// read-only. Forwarding produces a copy via
/// [`with_allow_insecure`](Self::with_allow_insecure) rather than mutating it.
///
/// `scheme` and `value` form the authentication pair. A record where either
/// half is empty carries no credentials.
///
/// # Examples
///
/// ```
/// use rpc_metadata::CredentialRecord;
///
/// let record = CredentialRecord::new("alice", "Bearer", "abc123");
/// assert!(record.is_authenticated());
/// assert!(!record.allow_insecure());
///
/// // The credential value never shows up in debug output
/// assert!(!format!("{:?}", record).contains("abc123"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    identity: String,
    scheme: String,
    value: Secret<String>,
    allow_insecure: bool,
}

impl CredentialRecord {
    /// Creates a record that forbids insecure transport.
    pub fn new(
        identity: impl Into<String>,
        scheme: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            scheme: scheme.into(),
            value: Secret::new(value.into()),
            allow_insecure: false,
        }
    }

    /// Parses a record from inbound call metadata.
    ///
    /// Reads the first `id` value as the identity and splits the first
    /// `authorization` value at its first space into scheme and value.
    /// Missing headers leave the corresponding fields empty.
    pub fn from_metadata(md: &Metadata) -> Self {
        let identity = md.get(ID_KEY).unwrap_or_default();
        let (scheme, value) = md
            .get(AUTHORIZATION_KEY)
            .map(split_authorization)
            .unwrap_or_default();
        Self::new(identity, scheme, value)
    }

    /// Returns a copy with the transport-security flag overridden.
    pub fn with_allow_insecure(&self, allow_insecure: bool) -> Self {
        Self {
            allow_insecure,
            ..self.clone()
        }
    }

    /// Returns the caller identity, possibly empty.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the authentication scheme, possibly empty.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the credential payload.
    pub fn value(&self) -> &Secret<String> {
        &self.value
    }

    /// Whether this record may be sent over an unencrypted channel.
    pub fn allow_insecure(&self) -> bool {
        self.allow_insecure
    }

    /// Returns `true` when both halves of the authentication pair are set.
    pub fn is_authenticated(&self) -> bool {
        !self.scheme.is_empty() && !self.value.expose_secret().is_empty()
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("identity", &self.identity)
            .field("scheme", &self.scheme)
            .field("value", &self.value)
            .field("allow_insecure", &self.allow_insecure)
            .finish()
    }
}

fn split_authorization(header: &str) -> (&str, &str) {
    match header.split_once(' ') {
        Some((scheme, value)) => (scheme, value.trim_start_matches(' ')),
        None => (header, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_authorization_and_id() {
        let md = Metadata::new()
            .with("id", "alice")
            .with("authorization", "Bearer abc123");

        let record = CredentialRecord::from_metadata(&md);

        assert_eq!(record.identity(), "alice");
        assert_eq!(record.scheme(), "Bearer");
        assert_eq!(record.value().expose_secret(), "abc123");
        assert!(record.is_authenticated());
        assert!(!record.allow_insecure());
    }

    #[test]
    fn empty_metadata_yields_empty_record() {
        let record = CredentialRecord::from_metadata(&Metadata::new());
        assert_eq!(record, CredentialRecord::default());
        assert!(!record.is_authenticated());
    }

    #[test]
    fn scheme_without_value_is_not_authenticated() {
        let md = Metadata::new().with("authorization", "Bearer");
        let record = CredentialRecord::from_metadata(&md);

        assert_eq!(record.scheme(), "Bearer");
        assert!(record.value().expose_secret().is_empty());
        assert!(!record.is_authenticated());
    }

    #[test]
    fn value_without_scheme_is_not_authenticated() {
        let record = CredentialRecord::new("", "", "abc");
        assert!(!record.is_authenticated());
    }

    #[test]
    fn value_keeps_inner_spaces() {
        let md = Metadata::new().with("authorization", "Key  a b");
        let record = CredentialRecord::from_metadata(&md);

        assert_eq!(record.scheme(), "Key");
        assert_eq!(record.value().expose_secret(), "a b");
    }

    #[test]
    fn override_copies_without_mutating() {
        let original = CredentialRecord::new("alice", "Bearer", "abc");
        let copy = original.with_allow_insecure(true);

        assert!(copy.allow_insecure());
        assert!(!original.allow_insecure());
        assert_eq!(copy.identity(), original.identity());
        assert_eq!(copy.value(), original.value());
    }

    #[test]
    fn debug_redacts_value() {
        let record = CredentialRecord::new("alice", "Bearer", "hunter2");
        let out = format!("{:?}", record);

        assert!(out.contains("alice"));
        assert!(out.contains("[REDACTED]"));
        assert!(!out.contains("hunter2"));
    }
}
