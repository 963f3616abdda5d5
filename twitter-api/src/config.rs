use serde::{Deserialize, Serialize};

/// Client settings. Every field has a default, so a partial document
/// deserializes.
///
/// Connection settings (endpoint, timeouts, user agent) belong to the
/// [`Transport`](crate::Transport) implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Deduplicate entities through a client-owned identity map.
    pub identity_map: bool,
    /// Member cap per batch request; larger batches are split.
    pub max_users_per_request: usize,
}

impl ClientConfig {
    pub const MAX_USERS_PER_REQUEST: usize = 100;
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            identity_map: false,
            max_users_per_request: Self::MAX_USERS_PER_REQUEST,
        }
    }
}
