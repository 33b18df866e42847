//! Lifetime of work started on behalf of a view.
//!
//! A view owns a `ScopeGuard`; once the guard drops, pending requests started
//! through the scope resolve to `None` and timers stop.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::{CancellationToken, DropGuard};

#[derive(Clone, Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

/// Cancels its scope when dropped.
#[derive(Debug)]
pub struct ScopeGuard {
    _guard: DropGuard,
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn guard(&self) -> ScopeGuard {
        ScopeGuard {
            _guard: self.token.clone().drop_guard(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Await `fut` unless the scope ends first.
    pub async fn run<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            () = self.token.cancelled() => None,
            out = fut => Some(out),
        }
    }

    /// Await `fut` to completion, then return its output only if the scope
    /// is still live.
    ///
    /// Unlike `run`, the work itself is never abandoned halfway.
    pub async fn finish<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        let out = fut.await;
        (!self.is_cancelled()).then_some(out)
    }
}

/// Seconds spent on a quiz, counted while its view is alive.
#[derive(Clone, Debug, Default)]
pub struct ElapsedTimer {
    seconds: Arc<AtomicU64>,
}

impl ElapsedTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(seconds: u64) -> Self {
        Self {
            seconds: Arc::new(AtomicU64::new(seconds)),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> u64 {
        self.seconds.load(Ordering::Relaxed)
    }

    /// Move the count up to `seconds` if it is behind. Returns the new total.
    pub fn resume_from(&self, seconds: u64) -> u64 {
        self.seconds.fetch_max(seconds, Ordering::Relaxed).max(seconds)
    }

    /// Tick once per second until `scope` is cancelled.
    ///
    /// `on_tick` receives the running total after each tick.
    pub async fn run<F>(&self, scope: &ViewScope, mut on_tick: F)
    where
        F: FnMut(u64),
    {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        while scope.run(interval.tick()).await.is_some() {
            let total = self.seconds.fetch_add(1, Ordering::Relaxed) + 1;
            on_tick(total);
        }
    }
}
