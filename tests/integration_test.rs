use rpc_metadata::{
    CallContext, ChannelSecurity, CredentialRecord, ErrorKind, ForwardConfig, Forwarder, Metadata,
    OutgoingCall, PerCallCredentials, RequestIdJoin, forward_auth, forward_request_id,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn inbound(md: Metadata) -> CallContext {
    CallContext::incoming(md)
}

#[test]
fn unauthenticated_context_yields_no_call_option() {
    init_tracing();
    let ctx = inbound(Metadata::new().with("x-request-id", "req-1"));

    let err = forward_auth(&ctx, true).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    assert_eq!(err.code(), "unauthenticated");
    assert_eq!(
        err.to_string(),
        "Unauthenticated: the context is not authenticated"
    );
}

#[test]
fn bearer_token_is_forwarded() {
    init_tracing();
    let ctx = inbound(Metadata::new().with("authorization", "Bearer abc123"));

    let opt = forward_auth(&ctx, false).unwrap();
    let headers = opt.credentials().unwrap().request_metadata(&[]);

    assert_eq!(headers["authorization"], "Bearer abc123");
    assert!(!headers.contains_key("id"));
}

#[test]
fn request_id_absent_returns_identical_context() {
    let ctx = inbound(Metadata::new().with("authorization", "Bearer abc"));
    let out = forward_request_id(ctx.clone());

    assert_eq!(out, ctx);
    assert!(out.shares_outgoing(&ctx));
}

#[test]
fn request_id_forwarded_to_outgoing() {
    init_tracing();
    let ctx = inbound(Metadata::new().with("x-request-id", "req-42"));
    let out = forward_request_id(ctx);

    assert_eq!(out.outgoing().get_all("x-request-id"), ["req-42"]);
    assert_eq!(out.request_id(), Some("req-42"));
}

#[test]
fn request_id_join_policies() {
    let ctx = inbound(Metadata::new().with("x-request-id", "req-42"));

    let appended = forward_request_id(forward_request_id(ctx.clone()));
    assert_eq!(
        appended.outgoing().get_all("x-request-id"),
        ["req-42", "req-42"]
    );

    let dedup = Forwarder::new(ForwardConfig::default().with_request_id_join(RequestIdJoin::Dedup));
    let once = dedup.forward_request_id(ctx);
    let twice = dedup.forward_request_id(once.clone());
    assert_eq!(twice.outgoing().get_all("x-request-id"), ["req-42"]);
}

#[test]
fn end_to_end_call_chain() {
    init_tracing();
    let ctx = inbound(
        Metadata::new()
            .with("id", "alice")
            .with("authorization", "Bearer abc123")
            .with("x-request-id", "req-7"),
    );
    let ctx = forward_request_id(ctx);

    // Two downstream calls share the same inbound credentials
    for uri in ["/users.Users/Get", "/billing.Billing/Charge"] {
        let opt = forward_auth(&ctx, false).unwrap();
        let headers = OutgoingCall::new(&ctx)
            .with_uri(uri)
            .with_option(opt)
            .headers(ChannelSecurity::Secure)
            .unwrap();

        assert_eq!(headers.get("id"), Some("alice"));
        assert_eq!(headers.get("authorization"), Some("Bearer abc123"));
        assert_eq!(headers.get_all("x-request-id"), ["req-7"]);

        // The downstream service parses the same record back out
        let downstream = CallContext::incoming(headers);
        assert_eq!(downstream.credentials().identity(), "alice");
        assert!(downstream.credentials().is_authenticated());
        assert_eq!(downstream.request_id(), Some("req-7"));
    }
}

#[test]
fn insecure_channel_policy_is_enforced() {
    init_tracing();
    let ctx = inbound(Metadata::new().with("authorization", "Bearer abc123"));

    let strict = OutgoingCall::new(&ctx).with_option(forward_auth(&ctx, false).unwrap());
    let err = strict.headers(ChannelSecurity::Insecure).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsecureTransport);

    let lax = OutgoingCall::new(&ctx).with_option(forward_auth(&ctx, true).unwrap());
    assert!(lax.headers(ChannelSecurity::Insecure).is_ok());
}

#[test]
fn credential_value_never_leaks_in_debug() {
    let ctx = inbound(Metadata::new().with("authorization", "Bearer topsecret"));
    let opt = forward_auth(&ctx, false).unwrap();

    assert!(!format!("{:?}", ctx.credentials()).contains("topsecret"));
    assert!(!format!("{:?}", opt).contains("topsecret"));
    assert!(!format!("{:?}", CredentialRecord::new("a", "b", "topsecret")).contains("topsecret"));
}

#[test]
fn contexts_are_shareable_across_threads() {
    let ctx = forward_request_id(inbound(
        Metadata::new()
            .with("authorization", "Bearer abc")
            .with("x-request-id", "req-9"),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ctx = ctx.clone();
            std::thread::spawn(move || {
                let opt = forward_auth(&ctx, false).unwrap();
                OutgoingCall::new(&ctx)
                    .with_option(opt)
                    .headers(ChannelSecurity::Secure)
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let headers = handle.join().unwrap();
        assert_eq!(headers.get("authorization"), Some("Bearer abc"));
        assert_eq!(headers.get("x-request-id"), Some("req-9"));
    }
}
