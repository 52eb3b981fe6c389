use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Display name and optional platform id for a mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlayer {
    pub display_name: String,
    pub player_id: Option<String>,
}

/// Maps a mention handle from an announcement to the name results are
/// stored under. Resolution never fails: an unknown handle is kept as-is.
#[async_trait]
pub trait PlayerIdentityResolver: Send + Sync {
    async fn resolve(&self, handle: &str) -> ResolvedPlayer;

    /// Records the display name for a platform id. A later call for the
    /// same id replaces the name.
    async fn register(&self, player_id: &str, display_name: &str);
}

/// Numeric handles are platform user ids; everything else is already a name.
///
/// Ids can be registered with their display name. An unknown id is used
/// as both name and id so that nothing is lost.
pub struct HandleResolver {
    id_to_name: Arc<RwLock<HashMap<String, String>>>,
}

impl HandleResolver {
    pub fn new() -> Self {
        Self {
            id_to_name: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn is_platform_id(handle: &str) -> bool {
        !handle.is_empty() && handle.chars().all(|c| c.is_ascii_digit())
    }
}

impl Default for HandleResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerIdentityResolver for HandleResolver {
    async fn resolve(&self, handle: &str) -> ResolvedPlayer {
        if !Self::is_platform_id(handle) {
            return ResolvedPlayer {
                display_name: handle.to_string(),
                player_id: None,
            };
        }

        let known = self.id_to_name.read().await.get(handle).cloned();
        debug!(player_id = %handle, display_name = ?known, "Platform id lookup");

        ResolvedPlayer {
            display_name: known.unwrap_or_else(|| handle.to_string()),
            player_id: Some(handle.to_string()),
        }
    }

    async fn register(&self, player_id: &str, display_name: &str) {
        let display_name = display_name.trim();
        if !Self::is_platform_id(player_id) || display_name.is_empty() {
            debug!(%player_id, "Ignoring member entry that is not an id/name pair");
            return;
        }

        self.id_to_name
            .write()
            .await
            .insert(player_id.to_string(), display_name.to_string());
    }
}
