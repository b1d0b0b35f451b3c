/// How forwarded request ids are merged into existing outbound values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestIdJoin {
    /// Append every inbound value, even if the outbound store already has it.
    #[default]
    Append,
    /// Append only inbound values not already present in the outbound store.
    Dedup,
}

/// Settings for a [`Forwarder`](crate::Forwarder).
///
/// Defaults forbid sending forwarded credentials over insecure channels and
/// append request ids.
///
/// # Examples
///
/// ```
/// use rpc_metadata::{ForwardConfig, RequestIdJoin};
///
/// let config = ForwardConfig::default()
///     .with_allow_insecure(true)
///     .with_request_id_join(RequestIdJoin::Dedup);
///
/// assert!(config.allow_insecure());
/// assert_eq!(config.request_id_join(), RequestIdJoin::Dedup);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardConfig {
    allow_insecure: bool,
    request_id_join: RequestIdJoin,
}

impl ForwardConfig {
    /// Sets whether forwarded credentials may travel over insecure channels.
    pub fn with_allow_insecure(mut self, allow_insecure: bool) -> Self {
        self.allow_insecure = allow_insecure;
        self
    }

    /// Sets the request-id join policy.
    pub fn with_request_id_join(mut self, join: RequestIdJoin) -> Self {
        self.request_id_join = join;
        self
    }

    /// Whether forwarded credentials may travel over insecure channels.
    pub fn allow_insecure(&self) -> bool {
        self.allow_insecure
    }

    /// The request-id join policy.
    pub fn request_id_join(&self) -> RequestIdJoin {
        self.request_id_join
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict() {
        let config = ForwardConfig::default();
        assert!(!config.allow_insecure());
        assert_eq!(config.request_id_join(), RequestIdJoin::Append);
    }
}
