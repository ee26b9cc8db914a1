//!
//! Core data structures for the session core: the authenticated `User`
//! entity and the wire-shaped `UserPayload` it is constructed from.

use crate::error::SessionError;

/// The authenticated restaurant operator for the current session.
///
/// A `User` is a strict product type: every field is mandatory once the
/// value exists. "No user" is represented as `Option<User>` at the session
/// level, never as a partially-filled record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    /// Stable account identifier.
    pub id: u64,
    /// Unique per account; the ownership key for resource comparisons.
    pub username: String,
    /// Informational only; never used in access decisions.
    pub email: String,
    /// Role tokens (e.g. `"ADMIN"`, `"DEVELOPER"`). Order irrelevant,
    /// duplicates permitted.
    pub roles: Vec<String>,
}

impl User {
    /// Returns a copy of this user with `roles` replaced and every other
    /// field preserved.
    pub fn with_roles(&self, roles: Vec<String>) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            roles,
        }
    }
}

/// The user record as it arrives over the wire, with every field optional.
///
/// The REST layer deserializes into this shape; `TryFrom<UserPayload>`
/// rejects incomplete records so a partially-filled user can never reach
/// the session store. A missing `roles` array is also rejected rather than
/// defaulted: an account with no roles is sent as an empty array, so an
/// absent one indicates a malformed response.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl UserPayload {
    /// Parses a payload from a raw JSON response body.
    ///
    /// # Arguments
    /// * `body` - The JSON text of the "fetch current user" response.
    ///
    /// # Returns
    /// The parsed payload, or `SessionError::MalformedUser` if the body is
    /// not a JSON object of the expected shape.
    pub fn from_json(body: &str) -> Result<UserPayload, SessionError> {
        serde_json::from_str(body).map_err(|_| SessionError::MalformedUser("body"))
    }
}

impl TryFrom<UserPayload> for User {
    type Error = SessionError;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        Ok(User {
            id: payload.id.ok_or(SessionError::MalformedUser("id"))?,
            username: payload
                .username
                .ok_or(SessionError::MalformedUser("username"))?,
            email: payload.email.ok_or(SessionError::MalformedUser("email"))?,
            roles: payload.roles.ok_or(SessionError::MalformedUser("roles"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> UserPayload {
        UserPayload {
            id: Some(7),
            username: Some("alice".into()),
            email: Some("a@x.com".into()),
            roles: Some(vec!["DEVELOPER".into()]),
        }
    }

    #[test]
    fn complete_payload_converts() {
        let user = User::try_from(full_payload()).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.roles, vec!["DEVELOPER".to_string()]);
    }

    #[test]
    fn missing_fields_are_rejected_by_name() {
        let mut p = full_payload();
        p.username = None;
        assert_eq!(
            User::try_from(p),
            Err(SessionError::MalformedUser("username"))
        );

        let mut p = full_payload();
        p.roles = None;
        assert_eq!(User::try_from(p), Err(SessionError::MalformedUser("roles")));
    }

    #[test]
    fn from_json_tolerates_absent_fields() {
        let p = UserPayload::from_json(r#"{"id": 3, "username": "bob"}"#).unwrap();
        assert_eq!(p.id, Some(3));
        assert_eq!(p.username.as_deref(), Some("bob"));
        assert_eq!(p.email, None);
        assert_eq!(p.roles, None);
    }

    #[test]
    fn from_json_rejects_non_object() {
        assert!(UserPayload::from_json("[1,2]").is_err());
    }

    #[test]
    fn with_roles_preserves_identity_fields() {
        let user = User::try_from(full_payload()).unwrap();
        let updated = user.with_roles(vec!["ADMIN".into(), "X".into()]);
        assert_eq!(updated.id, user.id);
        assert_eq!(updated.username, user.username);
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.roles, vec!["ADMIN".to_string(), "X".to_string()]);
    }
}
