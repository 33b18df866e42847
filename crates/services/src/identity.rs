use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use persona_core::model::UserId;
use storage::repository::KeyValueStore;

/// Durable key holding the respondent id.
pub const USER_ID_KEY: &str = "personality_test_user_id";

/// Resolves the per-installation respondent id.
pub struct IdentityService {
    kv: Arc<dyn KeyValueStore>,
    cached: Mutex<Option<UserId>>,
}

impl IdentityService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            cached: Mutex::new(None),
        }
    }

    /// The stored id, generating and saving one on first use.
    ///
    /// When storage is unavailable the generated id lives in memory only and
    /// stays stable for the lifetime of this service.
    pub async fn user_id(&self) -> UserId {
        let mut cached = self.cached.lock().await;
        if let Some(id) = cached.as_ref() {
            return id.clone();
        }

        let stored = match self.kv.get(USER_ID_KEY).await {
            Ok(value) => value.map(UserId::new).filter(|id| !id.is_empty()),
            Err(err) => {
                warn!(error = %err, "could not read respondent id");
                None
            }
        };

        let id = match stored {
            Some(id) => id,
            None => {
                let id = UserId::generate();
                info!(user_id = %id, "generated respondent id");
                if let Err(err) = self.kv.set(USER_ID_KEY, id.as_str()).await {
                    warn!(error = %err, "could not save respondent id");
                }
                id
            }
        };

        *cached = Some(id.clone());
        id
    }

    /// Forget the current id; the next `user_id` call generates a new one.
    pub async fn reset(&self) {
        let mut cached = self.cached.lock().await;
        *cached = None;
        if let Err(err) = self.kv.remove(USER_ID_KEY).await {
            warn!(error = %err, "could not clear respondent id");
        }
    }
}
