//! Credential store.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use super::StoredUser;

/// Read-only credential lookup.
///
/// The gate resolves token subjects and login usernames through this trait;
/// it never writes. Implementations must be safe for concurrent reads.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by username. `Ok(None)` means the user is unknown;
    /// `Err` is reserved for backend faults.
    async fn lookup(&self, username: &str) -> Result<Option<StoredUser>>;
}

/// In-memory credential table, seeded from configuration at startup.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: HashMap<String, StoredUser>,
}

impl InMemoryUserStore {
    pub fn new(users: impl IntoIterator<Item = StoredUser>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|u| (u.username.clone(), u))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn lookup(&self, username: &str) -> Result<Option<StoredUser>> {
        Ok(self.users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user(username: &str) -> StoredUser {
        StoredUser {
            username: username.to_string(),
            full_name: None,
            email: None,
            password_hash: "$2b$04$placeholderplaceholderplace".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lookup() {
        let store = InMemoryUserStore::new([make_user("alice"), make_user("bob")]);
        assert_eq!(store.len(), 2);

        let user = store.lookup("alice").await.unwrap();
        assert_eq!(user.unwrap().username, "alice");

        assert!(store.lookup("mallory").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_usernames_keep_last() {
        let mut first = make_user("alice");
        first.email = Some("first@example.com".to_string());
        let mut second = make_user("alice");
        second.email = Some("second@example.com".to_string());

        let store = InMemoryUserStore::new([first, second]);
        assert_eq!(store.len(), 1);
        let user = store.lookup("alice").await.unwrap().unwrap();
        assert_eq!(user.email.as_deref(), Some("second@example.com"));
    }
}
