//! Forwarding of inbound credentials and request ids to outgoing calls.
//!
//! Both operations are pure functions over an immutable [`CallContext`]:
//!
//! ```text
//! inbound call
//!   ↓
//! CallContext::incoming(md)          parses the CredentialRecord once
//!   ↓
//! forward_auth(&ctx, allow_insecure) → CallOption (per-call credentials)
//! forward_request_id(ctx)            → CallContext with x-request-id outbound
//!   ↓
//! OutgoingCall materializes headers at send time
//! ```

use crate::config::{ForwardConfig, RequestIdJoin};
use crate::context::CallContext;
use crate::error::Error;
use crate::metadata::{Metadata, REQUEST_ID_KEY};
use crate::supplier::CallOption;

/// Returns a call option carrying the credentials of the inbound call.
///
/// The record is copied with its transport-security flag set to
/// `allow_insecure`; the record on `ctx` is left untouched. Call this once
/// per outgoing call.
///
/// # Errors
///
/// Returns an [`ErrorKind::Unauthenticated`](crate::ErrorKind::Unauthenticated)
/// error if the context has no scheme or no value.
///
/// # Examples
///
/// ```
/// use rpc_metadata::{CallContext, Metadata, PerCallCredentials, forward_auth};
///
/// let ctx = CallContext::incoming(Metadata::new().with("authorization", "Bearer abc123"));
/// let opt = forward_auth(&ctx, false).expect("authenticated");
///
/// let headers = opt.credentials().unwrap().request_metadata(&[]);
/// assert_eq!(headers["authorization"], "Bearer abc123");
/// ```
pub fn forward_auth(ctx: &CallContext, allow_insecure: bool) -> Result<CallOption, Error> {
    let record = ctx.credentials();
    if !record.is_authenticated() {
        return Err(Error::unauthenticated());
    }

    tracing::debug!(
        target: "rpc_metadata",
        request_id = ?ctx.request_id(),
        scheme = %record.scheme(),
        allow_insecure,
        "forwarding inbound credentials"
    );

    Ok(CallOption::per_call_credentials(
        record.with_allow_insecure(allow_insecure),
    ))
}

/// Propagates the inbound `x-request-id` to the outbound metadata.
///
/// Returns `ctx` unchanged when the inbound call carried no non-empty request
/// id. Otherwise the inbound values are appended to any outbound values
/// already present, so applying this twice yields each id twice. Use a
/// [`Forwarder`] with [`RequestIdJoin::Dedup`] to avoid that.
///
/// # Examples
///
/// ```
/// use rpc_metadata::{CallContext, Metadata, forward_request_id};
///
/// let ctx = CallContext::incoming(Metadata::new().with("x-request-id", "req-42"));
/// let out = forward_request_id(ctx);
///
/// assert_eq!(out.outgoing().get_all("x-request-id"), ["req-42"]);
/// ```
pub fn forward_request_id(ctx: CallContext) -> CallContext {
    join_request_id(ctx, RequestIdJoin::Append)
}

fn join_request_id(ctx: CallContext, join: RequestIdJoin) -> CallContext {
    let outgoing = ctx.outgoing();
    let forwarded: Metadata = ctx
        .incoming_metadata()
        .get_all(REQUEST_ID_KEY)
        .iter()
        .filter(|id| !id.is_empty())
        .filter(|id| match join {
            RequestIdJoin::Append => true,
            RequestIdJoin::Dedup => !outgoing.get_all(REQUEST_ID_KEY).contains(*id),
        })
        .map(|id| (REQUEST_ID_KEY, id.as_str()))
        .collect();

    if forwarded.is_empty() {
        return ctx;
    }

    tracing::trace!(
        target: "rpc_metadata",
        request_id = ?ctx.request_id(),
        "forwarding request id"
    );

    let joined = outgoing.join(&forwarded);
    ctx.with_outgoing(joined)
}

/// Forwards credentials and request ids using a fixed [`ForwardConfig`].
///
/// # Examples
///
/// ```
/// use rpc_metadata::{CallContext, ForwardConfig, Forwarder, Metadata, RequestIdJoin};
///
/// let forwarder = Forwarder::new(
///     ForwardConfig::default().with_request_id_join(RequestIdJoin::Dedup),
/// );
///
/// let ctx = CallContext::incoming(Metadata::new().with("x-request-id", "req-1"));
/// let once = forwarder.forward_request_id(ctx);
/// let twice = forwarder.forward_request_id(once.clone());
///
/// assert_eq!(twice, once);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Forwarder {
    config: ForwardConfig,
}

impl Forwarder {
    /// Creates a forwarder with the given settings.
    pub fn new(config: ForwardConfig) -> Self {
        Self { config }
    }

    /// Returns the forwarder's settings.
    pub fn config(&self) -> &ForwardConfig {
        &self.config
    }

    /// [`forward_auth`] with the configured transport-security override.
    ///
    /// # Errors
    ///
    /// Returns an `Unauthenticated` error if the context carries no
    /// authentication pair.
    pub fn forward_auth(&self, ctx: &CallContext) -> Result<CallOption, Error> {
        forward_auth(ctx, self.config.allow_insecure())
    }

    /// [`forward_request_id`] with the configured join policy.
    pub fn forward_request_id(&self, ctx: CallContext) -> CallContext {
        join_request_id(ctx, self.config.request_id_join())
    }
}
