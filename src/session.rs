//!
//! Session store: the single process-wide holder of the authenticated user.
//!
//! The store is an explicit, injectable service rather than an ambient
//! global; the composition root constructs one and passes it down. Mutators
//! take `&mut self`; the surrounding application is a single-threaded UI
//! event loop and serializes user-triggered actions, so the store carries
//! no locking of its own.
//!
//! Every applied mutation bumps a monotonic session epoch. The loader
//! captures the epoch when it starts a fetch and compares it on completion,
//! which is what lets a logout (or any other intervening write) invalidate
//! a late-arriving fetch result instead of being silently clobbered by it.

use tracing::debug;

use crate::primitives::User;

/// Monotonic counter identifying a point in the session's mutation history.
pub type SessionEpoch = u64;

/// Handle returned by [`SessionStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Observer invoked synchronously after a mutation, with the post-mutation
/// user (or `None` once the session is empty).
pub type SessionObserver = Box<dyn Fn(Option<&User>)>;

/// Holder of the current session: either empty or exactly one fully-formed
/// [`User`].
#[derive(Default)]
pub struct SessionStore {
    user: Option<User>,
    epoch: SessionEpoch,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, SessionObserver)>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user)
            .field("epoch", &self.epoch)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl SessionStore {
    /// Creates an empty store at epoch zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current user, or `None` when unauthenticated. Never cached by
    /// callers; capability answers are recomputed from this on demand.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The current session epoch. Captured by the loader before a fetch and
    /// compared on completion to detect intervening writes.
    pub fn epoch(&self) -> SessionEpoch {
        self.epoch
    }

    /// Replaces the stored user unconditionally.
    ///
    /// Always succeeds; the populate-once discipline for fetched data lives
    /// at the loader boundary, not here, so logout-adjacent flows can still
    /// overwrite freely. Observers are notified synchronously.
    pub fn set_user(&mut self, user: Option<User>) {
        debug!(present = user.is_some(), "session user replaced");
        self.user = user;
        self.epoch += 1;
        self.notify();
    }

    /// Replaces the stored user's roles, preserving `id`, `username`, and
    /// `email`. No-op on an empty session.
    pub fn update_roles(&mut self, roles: Vec<String>) {
        let Some(current) = self.user.as_ref() else {
            debug!("role update ignored: no user in session");
            return;
        };
        debug!(count = roles.len(), "session roles updated");
        self.user = Some(current.with_roles(roles));
        self.epoch += 1;
        self.notify();
    }

    /// Returns the session to the empty state. Idempotent: clearing an
    /// already-empty session changes nothing and notifies nobody.
    pub fn clear_user(&mut self) {
        if self.user.is_none() {
            return;
        }
        debug!("session cleared");
        self.user = None;
        self.epoch += 1;
        self.notify();
    }

    /// Registers an observer, invoked synchronously after every applied
    /// mutation with the post-mutation user.
    pub fn subscribe(&mut self, observer: SessionObserver) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, observer));
        id
    }

    /// Removes an observer. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    fn notify(&self) {
        for (_, observer) in &self.subscribers {
            observer(self.user.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "alice".into(),
            email: "a@x.com".into(),
            roles: vec!["DEVELOPER".into()],
        }
    }

    #[test]
    fn starts_empty_at_epoch_zero() {
        let store = SessionStore::new();
        assert_eq!(store.current_user(), None);
        assert_eq!(store.epoch(), 0);
    }

    #[test]
    fn set_user_stores_exactly_what_was_given() {
        let mut store = SessionStore::new();
        store.set_user(Some(sample_user()));
        assert_eq!(store.current_user(), Some(&sample_user()));
        assert_eq!(store.epoch(), 1);
    }

    #[test]
    fn update_roles_preserves_identity_fields() {
        let mut store = SessionStore::new();
        store.set_user(Some(sample_user()));
        store.update_roles(vec!["X".into(), "Y".into()]);

        let user = store.current_user().unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.roles, vec!["X".to_string(), "Y".to_string()]);
    }

    #[test]
    fn update_roles_on_empty_session_is_a_noop() {
        let mut store = SessionStore::new();
        store.update_roles(vec!["X".into()]);
        assert_eq!(store.current_user(), None);
        assert_eq!(store.epoch(), 0);
    }

    #[test]
    fn clear_user_is_idempotent() {
        let mut store = SessionStore::new();
        store.set_user(Some(sample_user()));
        store.clear_user();
        assert_eq!(store.current_user(), None);
        let epoch_after_first_clear = store.epoch();

        store.clear_user();
        assert_eq!(store.current_user(), None);
        assert_eq!(store.epoch(), epoch_after_first_clear);
    }

    #[test]
    fn every_applied_mutation_advances_the_epoch() {
        let mut store = SessionStore::new();
        store.set_user(Some(sample_user()));
        assert_eq!(store.epoch(), 1);
        store.update_roles(vec![]);
        assert_eq!(store.epoch(), 2);
        store.clear_user();
        assert_eq!(store.epoch(), 3);
        store.set_user(None);
        assert_eq!(store.epoch(), 4);
    }

    #[test]
    fn observers_see_each_mutation_synchronously() {
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut store = SessionStore::new();
        let id = store.subscribe(Box::new(move |user| {
            sink.borrow_mut().push(user.map(|u| u.username.clone()));
        }));

        store.set_user(Some(sample_user()));
        store.update_roles(vec!["ADMIN".into()]);
        store.clear_user();
        assert_eq!(
            *seen.borrow(),
            vec![Some("alice".to_string()), Some("alice".to_string()), None]
        );

        store.unsubscribe(id);
        store.set_user(Some(sample_user()));
        assert_eq!(seen.borrow().len(), 3);
    }
}
