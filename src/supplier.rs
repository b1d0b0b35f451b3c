//! Per-call credential suppliers and the call options that carry them.
//!
//! The transport calls [`PerCallCredentials::request_metadata`] right before
//! a call is sent and writes the returned headers onto the wire. It must also
//! consult [`PerCallCredentials::require_transport_security`] and refuse to
//! send the call over an unencrypted channel when it returns `true`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::credentials::CredentialRecord;
use crate::metadata::{AUTHORIZATION_KEY, ID_KEY};

/// A hook that materializes headers for a single outgoing call.
pub trait PerCallCredentials: Send + Sync {
    /// Returns the headers to attach to the call.
    ///
    /// `uris` identifies the target resources; implementations may ignore it.
    /// This never fails: no data means an empty map.
    fn request_metadata(&self, uris: &[&str]) -> BTreeMap<String, String>;

    /// Returns `true` if these credentials must not travel over an
    /// unencrypted channel.
    fn require_transport_security(&self) -> bool;
}

impl PerCallCredentials for CredentialRecord {
    fn request_metadata(&self, _uris: &[&str]) -> BTreeMap<String, String> {
        let mut md = BTreeMap::new();
        if !self.identity().is_empty() {
            md.insert(ID_KEY.to_string(), self.identity().to_string());
        }
        if self.is_authenticated() {
            md.insert(
                AUTHORIZATION_KEY.to_string(),
                format!("{} {}", self.scheme(), self.value().expose_secret()),
            );
        }
        md
    }

    fn require_transport_security(&self) -> bool {
        !self.allow_insecure()
    }
}

/// An option attached to an outgoing call.
#[derive(Clone)]
pub enum CallOption {
    /// Credentials materialized by the transport at send time.
    PerCallCredentials(Arc<dyn PerCallCredentials>),
}

impl CallOption {
    /// Wraps a supplier as a call option.
    pub fn per_call_credentials(creds: impl PerCallCredentials + 'static) -> Self {
        CallOption::PerCallCredentials(Arc::new(creds))
    }

    /// Returns the credential supplier carried by this option, if any.
    pub fn credentials(&self) -> Option<&dyn PerCallCredentials> {
        match self {
            CallOption::PerCallCredentials(creds) => Some(creds.as_ref()),
        }
    }
}

impl fmt::Debug for CallOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallOption::PerCallCredentials(creds) => f
                .debug_struct("PerCallCredentials")
                .field(
                    "require_transport_security",
                    &creds.require_transport_security(),
                )
                .finish_non_exhaustive(),
        }
    }
}
