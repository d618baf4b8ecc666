//! User account store.

use super::{join_err, storage_err};
use agrareg_commons::{Result, User, UserId};
use agrareg_store::{EntityStore, StorageBackend};
use std::sync::Arc;

/// Typed store for user accounts, keyed by [`UserId`].
pub struct UserStore {
    backend: Arc<dyn StorageBackend>,
}

impl UserStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

impl EntityStore<UserId, User> for UserStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        "users"
    }
}

impl UserStore {
    /// Looks up a user by username. Soft-deleted users are still returned;
    /// callers decide whether deleted accounts count.
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.scan_all().map_err(storage_err)?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    /// Number of stored accounts, including soft-deleted ones.
    pub fn user_count(&self) -> Result<usize> {
        self.count().map_err(storage_err)
    }

    pub async fn save_async(self: &Arc<Self>, user: User) -> Result<User> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            store.put(&user.id.clone(), &user).map_err(storage_err)?;
            Ok(user)
        })
        .await
        .map_err(join_err)?
    }

    pub async fn find_by_username_async(self: &Arc<Self>, username: String) -> Result<Option<User>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.find_by_username(&username))
            .await
            .map_err(join_err)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrareg_commons::Role;
    use agrareg_store::{InMemoryBackend, Partition};
    use chrono::Utc;

    fn store() -> Arc<UserStore> {
        let backend = Arc::new(InMemoryBackend::new());
        backend.create_partition(&Partition::new("users")).unwrap();
        Arc::new(UserStore::new(backend))
    }

    fn user(username: &str) -> User {
        User {
            id: UserId::generate(),
            username: username.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::Worker,
            email: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_find_by_username() {
        let store = store();
        let u = user("alice");
        store.put(&u.id.clone(), &u).unwrap();

        assert_eq!(store.find_by_username("alice").unwrap(), Some(u));
        assert_eq!(store.find_by_username("bob").unwrap(), None);
        assert_eq!(store.user_count().unwrap(), 1);
    }
}
