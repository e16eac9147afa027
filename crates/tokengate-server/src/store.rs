//! Credential and identity lookup.
//!
//! The auth routes only ever need two lookups: by email at login, and by
//! id at refresh (the principal is re-derived from the store rather than
//! trusted from refresh-token claims, so profile changes take effect on
//! the next refresh). [`UserStore`] keeps that capability abstract; the
//! bundled [`StaticUserStore`] holds the single demo record.

use tokengate_models::Principal;

/// A stored user record: identity fields plus the login secret.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Stable user identifier.
    pub id: u64,
    /// Login identifier.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plaintext login secret, compared for exact match.
    pub password: String,
}

impl UserRecord {
    /// The identity payload issued into tokens for this user.
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Read-only lookup capability over the user population.
pub trait UserStore: Send + Sync {
    /// Look up a record by login identifier.
    fn find_by_email(&self, email: &str) -> Option<UserRecord>;

    /// Look up a record by id.
    fn find_by_id(&self, id: u64) -> Option<UserRecord>;
}

/// In-memory store backed by a fixed list of records.
pub struct StaticUserStore {
    users: Vec<UserRecord>,
}

impl StaticUserStore {
    /// Build a store over the given records.
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// The single demo record the server ships with.
    pub fn demo() -> Self {
        Self::new(vec![UserRecord {
            id: 1,
            email: "jane@example.com".into(),
            name: "Jane".into(),
            password: "pass123".into(),
        }])
    }
}

impl UserStore for StaticUserStore {
    fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users.iter().find(|u| u.email == email).cloned()
    }

    fn find_by_id(&self, id: u64) -> Option<UserRecord> {
        self.users.iter().find(|u| u.id == id).cloned()
    }
}
