use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use persona_core::Clock;
use persona_core::progress::{
    PersistEffect, ProgressAction, ProgressDenominator, ProgressState, reduce,
};
use storage::repository::KeyValueStore;

/// Durable key holding the in-progress quiz snapshot.
pub const PROGRESS_KEY: &str = "personality_test_progress";

/// Single owner of quiz progress.
///
/// Every dispatch runs the reducer and then mirrors the result into the
/// key/value store while still holding the state lock, so transitions and
/// their writes land in dispatch order. Storage failures are logged and never
/// reach the caller; the in-memory state stays authoritative.
pub struct ProgressStore {
    clock: Clock,
    kv: Arc<dyn KeyValueStore>,
    state: Mutex<ProgressState>,
}

impl ProgressStore {
    /// Store starting from defaults without touching storage.
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            clock,
            kv,
            state: Mutex::new(ProgressState::default()),
        }
    }

    /// Store restored from the durable snapshot, if a usable one exists.
    ///
    /// Completed snapshots are ignored. Unreadable or malformed snapshots are
    /// logged and the store starts from defaults.
    pub async fn initialize(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        let store = Self::new(clock, kv);

        let raw = match store.kv.get(PROGRESS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return store,
            Err(err) => {
                warn!(error = %err, "could not read saved progress; starting fresh");
                return store;
            }
        };

        match ProgressState::from_snapshot_json(&raw) {
            Ok(snapshot) if snapshot.is_completed() => {
                debug!("saved progress belongs to a completed quiz; ignoring");
            }
            Ok(snapshot) => {
                store.dispatch(ProgressAction::LoadProgress(snapshot)).await;
            }
            Err(err) => {
                warn!(error = %err, "saved progress is malformed; starting fresh");
            }
        }

        store
    }

    /// Apply `action` and mirror the outcome to storage.
    ///
    /// Returns the state after the transition.
    pub async fn dispatch(&self, action: ProgressAction) -> ProgressState {
        self.dispatch_if(action, |_| true).await
    }

    /// Apply `action` only if `allow` accepts the current state.
    ///
    /// The check and the transition happen under one lock. A rejected action
    /// returns the unchanged state and writes nothing.
    pub async fn dispatch_if<F>(&self, action: ProgressAction, allow: F) -> ProgressState
    where
        F: FnOnce(&ProgressState) -> bool,
    {
        let mut guard = self.state.lock().await;
        if !allow(&guard) {
            return guard.clone();
        }
        let name = action.name();
        let current = std::mem::take(&mut *guard);
        let (next, effect) = reduce(current, action, self.clock.now_millis());
        *guard = next.clone();

        debug!(
            action = name,
            ?effect,
            answered = next.answered_count(),
            index = next.current_question_index(),
            "progress transition"
        );
        self.persist(&next, effect).await;

        next
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> ProgressState {
        self.state.lock().await.clone()
    }

    pub async fn has_unfinished_test(&self) -> bool {
        self.state.lock().await.has_unfinished_test()
    }

    pub async fn progress_percentage(&self, denominator: ProgressDenominator) -> u32 {
        self.state.lock().await.progress_percentage(denominator)
    }

    async fn persist(&self, state: &ProgressState, effect: PersistEffect) {
        match effect {
            PersistEffect::Write => {
                let json = match state.to_snapshot_json() {
                    Ok(json) => json,
                    Err(err) => {
                        warn!(error = %err, "could not encode progress snapshot");
                        return;
                    }
                };
                if let Err(err) = self.kv.set(PROGRESS_KEY, &json).await {
                    warn!(error = %err, "could not save progress");
                }
            }
            PersistEffect::Delete => {
                if let Err(err) = self.kv.remove(PROGRESS_KEY).await {
                    warn!(error = %err, "could not clear saved progress");
                }
            }
            PersistEffect::Skip => {}
        }
    }
}
