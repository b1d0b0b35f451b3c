//! Per-call credential and request-id forwarding across RPC boundaries.
//!
//! This crate turns the metadata of an inbound call into metadata for the
//! calls a handler makes while serving it:
//! - **Credential supply**: a [`CredentialRecord`] materializes `id` and
//!   `authorization` headers at send time through [`PerCallCredentials`]
//! - **Auth forwarding**: [`forward_auth`] copies the inbound credentials onto
//!   an outgoing call, with an explicit transport-security override
//! - **Request-id forwarding**: [`forward_request_id`] propagates
//!   `x-request-id` to the outbound metadata
//!
//! Everything works on an explicit, immutable [`CallContext`]. There is no
//! ambient or thread-local state, and nothing here validates credentials.
//!
//! # Examples
//!
//! ```
//! use rpc_metadata::{
//!     CallContext, ChannelSecurity, Metadata, OutgoingCall, forward_auth, forward_request_id,
//! };
//!
//! // Metadata received with the inbound call
//! let inbound = Metadata::new()
//!     .with("id", "alice")
//!     .with("authorization", "Bearer abc123")
//!     .with("x-request-id", "req-42");
//!
//! let ctx = forward_request_id(CallContext::incoming(inbound));
//! let auth = forward_auth(&ctx, false).expect("inbound call is authenticated");
//!
//! let headers = OutgoingCall::new(&ctx)
//!     .with_option(auth)
//!     .headers(ChannelSecurity::Secure)
//!     .expect("secure channel");
//!
//! assert_eq!(headers.get("authorization"), Some("Bearer abc123"));
//! assert_eq!(headers.get("id"), Some("alice"));
//! assert_eq!(headers.get("x-request-id"), Some("req-42"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod credentials;
mod error;
mod forward;
mod metadata;
mod secret;
mod supplier;
mod transport;

pub use config::{ForwardConfig, RequestIdJoin};
pub use context::CallContext;
pub use credentials::CredentialRecord;
pub use error::{Error, ErrorKind};
pub use forward::{Forwarder, forward_auth, forward_request_id};
pub use metadata::{AUTHORIZATION_KEY, ID_KEY, Metadata, REQUEST_ID_KEY};
pub use secret::Secret;
pub use supplier::{CallOption, PerCallCredentials};
pub use transport::{ChannelSecurity, OutgoingCall};
