//!
//! Loader boundary: populates the session store from the opaque "fetch
//! current user" call made on navigation.
//!
//! The fetch itself is asynchronous relative to the store: the user can
//! log out while a fetch is still in flight. The boundary is therefore
//! split into two phases: [`begin_load`] captures the session epoch before
//! the fetch starts, and [`complete_load`] applies the result only if the
//! epoch is unchanged, dropping stale results instead of letting a late
//! fetch repopulate a session the user just cleared.
//!
//! [`complete_load`] also enforces the populate-once policy: fetched data
//! never overwrites an already-populated session. The store's `set_user`
//! stays an unconditional setter; the discipline lives here, at the call
//! site that deals in fetched data.

use tracing::{debug, warn};

use crate::error::FetchError;
use crate::primitives::{User, UserPayload};
use crate::session::{SessionEpoch, SessionStore};

/// Source of the current-user record; implemented over the HTTP client.
///
/// Implementations either return a complete-or-not payload or fail
/// outright. They must not retry internally; retry policy belongs to the
/// caller.
pub trait UserSource {
    fn fetch_current_user(&self) -> Result<UserPayload, FetchError>;
}

/// Epoch snapshot taken when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: SessionEpoch,
}

/// Non-throwing result of applying a fetch to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store was empty and is now populated with the fetched user.
    Loaded,
    /// The store already held a user; the fetched record was discarded.
    AlreadyPresent,
    /// The session was written between `begin_load` and `complete_load`
    /// (e.g. a logout); the fetched record was discarded.
    Stale,
    /// The fetch failed or the payload was malformed. The store is
    /// untouched; the message is suitable for display.
    Failed(String),
}

/// Captures the session epoch before a fetch begins.
pub fn begin_load(store: &SessionStore) -> LoadTicket {
    LoadTicket {
        epoch: store.epoch(),
    }
}

/// Applies a completed fetch to the store.
///
/// Order of the guards matters: a failed fetch never touches the store, a
/// stale ticket is rejected before the payload is even examined, and an
/// already-populated session wins over any fetched record.
pub fn complete_load(
    store: &mut SessionStore,
    ticket: LoadTicket,
    fetched: Result<UserPayload, FetchError>,
) -> LoadOutcome {
    let payload = match fetched {
        Ok(payload) => payload,
        Err(err) => {
            debug!(%err, "current-user fetch failed");
            return LoadOutcome::Failed(err.to_string());
        }
    };

    if store.epoch() != ticket.epoch {
        warn!(
            started_at = ticket.epoch,
            now = store.epoch(),
            "dropping stale current-user fetch"
        );
        return LoadOutcome::Stale;
    }

    if store.current_user().is_some() {
        debug!("session already populated; fetched user discarded");
        return LoadOutcome::AlreadyPresent;
    }

    match User::try_from(payload) {
        Ok(user) => {
            store.set_user(Some(user));
            LoadOutcome::Loaded
        }
        Err(err) => {
            warn!(%err, "rejecting malformed user payload");
            LoadOutcome::Failed(err.to_string())
        }
    }
}

/// Runs both phases around a synchronous source. With a synchronous source
/// nothing can interleave, so this never yields `Stale`; the split-phase
/// API exists for callers whose fetch completes on a later turn of the
/// event loop.
pub fn load_current_user(store: &mut SessionStore, source: &impl UserSource) -> LoadOutcome {
    let ticket = begin_load(store);
    let fetched = source.fetch_current_user();
    complete_load(store, ticket, fetched)
}
