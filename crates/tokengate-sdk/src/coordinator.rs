//! Single-flight refresh coordination.
//!
//! [`RefreshCoordinator`] owns the in-memory access token and guarantees
//! that any number of concurrently failing calls trigger at most one
//! refresh operation. The first caller to find no cycle in flight
//! becomes the **leader** and runs the refresh; everyone else subscribes
//! to the cycle's broadcast and suspends until the outcome is known.
//! One send resolves the whole batch, so "drain once, success or failure
//! alike" is a structural property rather than queue bookkeeping.
//!
//! Lock discipline: one `std::sync::Mutex` over both the token and the
//! in-flight slot, never held across an `.await`. Only the leader that
//! set the slot clears it, and the token is only written at cycle
//! resolution (or by [`set_token`](RefreshCoordinator::set_token) on
//! login/logout, outside any cycle).

use std::future::Future;
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::error::SdkError;

/// Result of a refresh cycle, delivered to every suspended caller.
#[derive(Debug, Clone)]
enum RefreshOutcome {
    /// A new access token was obtained and stored.
    Refreshed(String),
    /// The refresh itself failed; the whole batch fails with it.
    Failed(String),
}

#[derive(Default)]
struct CoordinatorState {
    current_token: Option<String>,
    in_flight: Option<broadcast::Sender<RefreshOutcome>>,
}

/// Holds the current access token and serialises refresh cycles.
#[derive(Default)]
pub struct RefreshCoordinator {
    state: Mutex<CoordinatorState>,
}

impl RefreshCoordinator {
    /// A coordinator with no token and no cycle in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// The access token to attach to outgoing calls, if any.
    pub fn bearer(&self) -> Option<String> {
        self.lock().current_token.clone()
    }

    /// Install or discard the held token (login / logout).
    pub fn set_token(&self, token: Option<String>) {
        self.lock().current_token = token;
    }

    /// Obtain a fresh access token, running `do_refresh` at most once
    /// across all concurrent callers.
    ///
    /// The leader's refresh error is broadcast to every waiter, so all
    /// callers of a failed cycle resolve with the same
    /// [`SdkError::RefreshFailed`]. On failure the held token is
    /// discarded: the session has ended and the caller must
    /// re-authenticate.
    pub async fn refresh<F, Fut>(&self, do_refresh: F) -> Result<String, SdkError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, SdkError>>,
    {
        let rx = {
            let mut state = self.lock();
            match &state.in_flight {
                Some(tx) => Some(tx.subscribe()),
                None => {
                    let (tx, _) = broadcast::channel(1);
                    state.in_flight = Some(tx);
                    None
                }
            }
        };
        let Some(mut rx) = rx else {
            return self.lead(do_refresh).await;
        };

        // A cycle is in flight: suspend until its outcome is broadcast.
        match rx.recv().await {
            Ok(RefreshOutcome::Refreshed(token)) => Ok(token),
            Ok(RefreshOutcome::Failed(reason)) => Err(SdkError::RefreshFailed(reason)),
            Err(_) => Err(SdkError::RefreshFailed("refresh cycle abandoned".into())),
        }
    }

    /// Run the refresh as the cycle leader and broadcast the outcome.
    async fn lead<F, Fut>(&self, do_refresh: F) -> Result<String, SdkError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, SdkError>>,
    {
        let result = do_refresh().await;

        let mut state = self.lock();
        let outcome = match &result {
            Ok(token) => {
                state.current_token = Some(token.clone());
                RefreshOutcome::Refreshed(token.clone())
            }
            Err(e) => {
                state.current_token = None;
                RefreshOutcome::Failed(e.to_string())
            }
        };
        // Only the leader that set the in-flight slot clears it.
        if let Some(tx) = state.in_flight.take() {
            // No receivers means nobody queued behind us; that's fine.
            let _ = tx.send(outcome);
        }
        drop(state);

        result.map_err(|e| SdkError::RefreshFailed(e.to_string()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CoordinatorState> {
        self.state.lock().expect("coordinator state poisoned")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
