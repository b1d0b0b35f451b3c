//! Send-time header materialization for outgoing calls.
//!
//! [`OutgoingCall`] is the boundary to the RPC transport. The transport builds
//! one per call, attaches the call options produced by forwarding, and asks
//! for the final headers right before writing them to the wire. Enforcement
//! of the transport-security flag happens here.

use crate::context::CallContext;
use crate::error::Error;
use crate::metadata::Metadata;
use crate::supplier::CallOption;

/// Whether the channel a call goes out on is encrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSecurity {
    /// TLS or an equivalent encrypted transport.
    Secure,
    /// Plaintext transport.
    Insecure,
}

/// A call about to be sent, with the options attached to it.
///
/// # Examples
///
/// ```
/// use rpc_metadata::{CallContext, ChannelSecurity, Metadata, OutgoingCall, forward_auth};
///
/// let ctx = CallContext::incoming(Metadata::new().with("authorization", "Bearer abc123"));
/// let opt = forward_auth(&ctx, false).unwrap();
///
/// let call = OutgoingCall::new(&ctx).with_option(opt);
///
/// let headers = call.headers(ChannelSecurity::Secure).unwrap();
/// assert_eq!(headers.get("authorization"), Some("Bearer abc123"));
///
/// // Credentials that forbid insecure transport are never sent in the clear
/// assert!(call.headers(ChannelSecurity::Insecure).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct OutgoingCall<'a> {
    ctx: &'a CallContext,
    uris: Vec<String>,
    options: Vec<CallOption>,
}

impl<'a> OutgoingCall<'a> {
    /// Starts a call made while handling `ctx`.
    pub fn new(ctx: &'a CallContext) -> Self {
        Self {
            ctx,
            uris: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Records a target resource locator passed to credential suppliers.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uris.push(uri.into());
        self
    }

    /// Attaches a call option. Options are applied in attachment order.
    pub fn with_option(mut self, option: CallOption) -> Self {
        self.options.push(option);
        self
    }

    /// Returns the attached options.
    pub fn options(&self) -> &[CallOption] {
        &self.options
    }

    /// Materializes the headers to send on a channel of the given security.
    ///
    /// Starts from the context's outbound metadata and writes each
    /// supplier's headers over it, replacing earlier values for the same
    /// keys. Suppliers are invoked on every call to this method.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InsecureTransport`](crate::ErrorKind::InsecureTransport)
    /// error, and no headers, if the channel is insecure and any attached
    /// supplier requires transport security.
    pub fn headers(&self, channel: ChannelSecurity) -> Result<Metadata, Error> {
        let uris: Vec<&str> = self.uris.iter().map(String::as_str).collect();
        let mut headers = self.ctx.outgoing().clone();

        for creds in self.options.iter().filter_map(CallOption::credentials) {
            if channel == ChannelSecurity::Insecure && creds.require_transport_security() {
                tracing::warn!(
                    target: "rpc_metadata",
                    request_id = ?self.ctx.request_id(),
                    "refusing to send credentials over an insecure channel"
                );
                return Err(Error::insecure_transport());
            }
            for (key, value) in creds.request_metadata(&uris) {
                headers.set(&key, value);
            }
        }

        tracing::trace!(
            target: "rpc_metadata",
            request_id = ?self.ctx.request_id(),
            header_count = headers.len(),
            "materialized outgoing headers"
        );

        Ok(headers)
    }
}
