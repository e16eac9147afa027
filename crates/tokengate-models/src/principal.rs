//! The authenticated identity carried inside access tokens.
//!
//! A [`Principal`] is embedded as the access-token payload at login time
//! and handed to protected handlers by the request gate after a
//! successful verification. It is immutable once issued; profile changes
//! only become visible when a new token is minted (login or refresh).

use serde::{Deserialize, Serialize};

/// The authenticated identity payload.
///
/// Serialised directly into access-token claims and into the
/// [`SessionResponse`](crate::SessionResponse) body, so the field names
/// are part of the wire format.
///
/// # Examples
///
/// ```
/// use tokengate_models::Principal;
///
/// let p = Principal {
///     id: 1,
///     email: "jane@example.com".into(),
///     name: "Jane".into(),
/// };
/// assert_eq!(p.id, 1);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable user identifier; the only field carried by refresh tokens.
    pub id: u64,
    /// Email address, also the login identifier.
    pub email: String,
    /// Display name.
    pub name: String,
}
