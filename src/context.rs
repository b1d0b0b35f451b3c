use std::sync::Arc;

use crate::credentials::CredentialRecord;
use crate::metadata::{Metadata, REQUEST_ID_KEY};

/// Immutable snapshot of the metadata visible to a handler.
///
/// A `CallContext` carries:
/// - the inbound metadata received with the call being handled
/// - the outbound metadata to send with calls made while handling it
/// - the [`CredentialRecord`] parsed from the inbound metadata
///
/// Contexts are never mutated. Every `with_*` method returns a derived
/// context and leaves the receiver untouched; clones share storage through
/// `Arc`, so passing contexts down a call chain is cheap.
///
/// # Examples
///
/// ```
/// use rpc_metadata::{CallContext, Metadata};
///
/// let inbound = Metadata::new()
///     .with("authorization", "Bearer abc123")
///     .with("x-request-id", "req-42");
///
/// let ctx = CallContext::incoming(inbound);
/// assert_eq!(ctx.request_id(), Some("req-42"));
/// assert!(ctx.credentials().is_authenticated());
/// assert!(ctx.outgoing().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    incoming: Arc<Metadata>,
    outgoing: Arc<Metadata>,
    credentials: Arc<CredentialRecord>,
}

impl CallContext {
    /// Creates an empty context with no inbound call, e.g. for a client
    /// that originates a call chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the context for a received call.
    ///
    /// The credential record is parsed here, once per inbound call.
    pub fn incoming(md: Metadata) -> Self {
        let credentials = CredentialRecord::from_metadata(&md);
        Self {
            incoming: Arc::new(md),
            outgoing: Arc::default(),
            credentials: Arc::new(credentials),
        }
    }

    /// Returns a derived context whose outbound metadata is `md`.
    pub fn with_outgoing(&self, md: Metadata) -> Self {
        Self {
            incoming: Arc::clone(&self.incoming),
            outgoing: Arc::new(md),
            credentials: Arc::clone(&self.credentials),
        }
    }

    /// Returns a derived context carrying `credentials` instead of the
    /// record parsed from the inbound metadata.
    pub fn with_credentials(&self, credentials: CredentialRecord) -> Self {
        Self {
            incoming: Arc::clone(&self.incoming),
            outgoing: Arc::clone(&self.outgoing),
            credentials: Arc::new(credentials),
        }
    }

    /// Inbound metadata of the call being handled.
    pub fn incoming_metadata(&self) -> &Metadata {
        &self.incoming
    }

    /// Metadata to send with outgoing calls.
    pub fn outgoing(&self) -> &Metadata {
        &self.outgoing
    }

    /// Credential record of the inbound caller; empty when none was sent.
    pub fn credentials(&self) -> &CredentialRecord {
        &self.credentials
    }

    /// First inbound correlation identifier, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.incoming.get(REQUEST_ID_KEY)
    }

    /// Returns `true` if both contexts share the same outbound storage.
    pub fn shares_outgoing(&self, other: &CallContext) -> bool {
        Arc::ptr_eq(&self.outgoing, &other.outgoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_empty() {
        let ctx = CallContext::new();
        assert!(ctx.incoming_metadata().is_empty());
        assert!(ctx.outgoing().is_empty());
        assert!(!ctx.credentials().is_authenticated());
        assert_eq!(ctx.request_id(), None);
    }

    #[test]
    fn incoming_parses_credentials_once() {
        let ctx = CallContext::incoming(
            Metadata::new()
                .with("id", "alice")
                .with("authorization", "Bearer abc"),
        );

        assert_eq!(ctx.credentials().identity(), "alice");
        assert_eq!(ctx.credentials().scheme(), "Bearer");
    }

    #[test]
    fn with_outgoing_derives_new_context() {
        let ctx = CallContext::incoming(Metadata::new().with("x-request-id", "r1"));
        let derived = ctx.with_outgoing(Metadata::new().with("k", "v"));

        assert!(ctx.outgoing().is_empty());
        assert_eq!(derived.outgoing().get("k"), Some("v"));
        assert_eq!(derived.request_id(), Some("r1"));
        assert!(!ctx.shares_outgoing(&derived));
    }

    #[test]
    fn clones_share_storage() {
        let ctx = CallContext::incoming(Metadata::new());
        let clone = ctx.clone();
        assert!(ctx.shares_outgoing(&clone));
        assert_eq!(ctx, clone);
    }

    #[test]
    fn with_credentials_replaces_record() {
        let ctx = CallContext::new();
        let derived = ctx.with_credentials(CredentialRecord::new("svc", "Key", "k"));

        assert!(derived.credentials().is_authenticated());
        assert!(!ctx.credentials().is_authenticated());
    }
}
