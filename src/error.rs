//!
//! Error types for the session core.

/// Errors produced while validating user data at the loader boundary.
///
/// The session store and the capability predicates never raise for inputs
/// they accept; only boundary validation can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The fetched user payload is missing a required field. The payload is
    /// rejected whole rather than admitted as a partially-filled user.
    #[error("user payload missing required field `{0}`")]
    MalformedUser(&'static str),
}

/// Failure of the opaque "fetch current user" call.
///
/// Produced by `UserSource` implementations; the loader converts it into a
/// displayable message rather than propagating it, so the UI layer never
/// sees a raw transport error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be completed (connectivity, timeout, 5xx).
    #[error("network error: {0}")]
    Network(String),
    /// The server rejected the credentials or the session cookie expired.
    #[error("not authenticated")]
    Unauthorized,
    /// Any other failure surfaced by the transport layer.
    #[error("fetch error: {0}")]
    Other(String),
}
