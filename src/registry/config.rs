//! Per-connection configuration.

use std::fmt;
use std::sync::Arc;

use crate::forward::OutboundRequest;

/// A pre-send hook, invoked with the mutable outbound request just before
/// dispatch.
pub type OutboundHook = Arc<dyn Fn(&mut OutboundRequest) + Send + Sync>;

/// Immutable description of one backend connection.
///
/// `location` is the base URL every forwarded path is appended to; no
/// trailing-slash normalization is performed. `json` forces JSON encoding
/// for all forwarded bodies. The hooks, when set, run once per request
/// with the mutable [`OutboundRequest`].
#[derive(Clone, Default)]
pub struct ConnectionConfig {
    pub(crate) location: String,
    pub(crate) json: bool,
    pub(crate) before_post: Option<OutboundHook>,
    pub(crate) before_pass: Option<OutboundHook>,
}

impl ConnectionConfig {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    /// Force JSON encoding for all forwarded bodies.
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Hook run before every `post` dispatch.
    pub fn before_post(mut self, hook: impl Fn(&mut OutboundRequest) + Send + Sync + 'static) -> Self {
        self.before_post = Some(Arc::new(hook));
        self
    }

    /// Hook run before every `pass` dispatch, ahead of the body-encoding
    /// decision.
    pub fn before_pass(mut self, hook: impl Fn(&mut OutboundRequest) + Send + Sync + 'static) -> Self {
        self.before_pass = Some(Arc::new(hook));
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub(crate) fn before_post_hook(&self) -> Option<&OutboundHook> {
        self.before_post.as_ref()
    }

    pub(crate) fn before_pass_hook(&self) -> Option<&OutboundHook> {
        self.before_pass.as_ref()
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("location", &self.location)
            .field("json", &self.json)
            .field("before_post", &self.before_post.is_some())
            .field("before_pass", &self.before_pass.is_some())
            .finish()
    }
}
