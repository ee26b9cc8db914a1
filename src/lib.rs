#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! qrmenu-core is the session and permission core of a QR-code menu
//! management client.
//!
//! It provides three cooperating pieces: a [`session::SessionStore`]
//! holding the authenticated operator's identity and role set, the pure
//! [`capabilities`] predicates deriving access decisions from that role
//! set, and the [`loader`] boundary that populates the store from an
//! opaque "fetch current user" call while guarding against stale writes.
//! UI layers consume these as a library; HTTP, routing, and rendering live
//! elsewhere, and every capability answer here is advisory; the server
//! performs its own authorization.

// Module for core data structures (User, UserPayload).
pub mod primitives;

// Re-export the core entity types at the crate root.
pub use primitives::{User, UserPayload};

// Module for the role-based capability predicates.
pub mod capabilities;

// Module for error types.
pub mod error;

// Module for the session store.
pub mod session;

// Module for the loader boundary.
pub mod loader;

pub use error::{FetchError, SessionError};
pub use loader::{begin_load, complete_load, load_current_user, LoadOutcome, LoadTicket, UserSource};
pub use session::{SessionEpoch, SessionStore, SubscriptionId};
