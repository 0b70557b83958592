// User Repository
//
// Concurrency-safe in-memory store of user records keyed by email.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use parking_lot::Mutex;
use thiserror::Error;

use crate::database::models::User;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("no user registered under {0}")]
    NotFound(String),
    #[error("email {0} is already registered")]
    EmailTaken(String),
    /// The record under this email no longer carries the credential that was checked.
    #[error("credential for {0} changed since it was verified")]
    StaleCredential(String),
}

/// Owns every `User` record. Callers only ever receive clones.
///
/// A single coarse lock guards the map; every method holds it for exactly one
/// operation, so compound changes (`insert_new`, `update_verified`, `rename_verified`) are
/// atomic.
#[derive(Debug, Default)]
pub struct UserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point lookup by exact email, no normalization.
    pub fn get(&self, email: &str) -> Option<User> {
        self.users.lock().get(email).cloned()
    }

    /// Insert or overwrite the record stored under `user.email`.
    pub fn save(&self, user: User) {
        self.users.lock().insert(user.email.clone(), user);
    }

    /// Insert a record only if its email is free.
    pub fn insert_new(&self, user: User) -> Result<(), RepositoryError> {
        match self.users.lock().entry(user.email.clone()) {
            Entry::Occupied(entry) => Err(RepositoryError::EmailTaken(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(user);
                Ok(())
            }
        }
    }

    /// Apply `change` to the live record under the lock, provided it still
    /// carries the `credential` the caller verified.
    ///
    /// `change` must not touch `email`; use [`rename_verified`](Self::rename_verified)
    /// to move a key.
    pub fn update_verified<T>(
        &self,
        email: &str,
        credential: &str,
        change: impl FnOnce(&mut User) -> T,
    ) -> Result<T, RepositoryError> {
        let mut users = self.users.lock();
        let user = users
            .get_mut(email)
            .ok_or_else(|| RepositoryError::NotFound(email.to_string()))?;
        if user.credential != credential {
            return Err(RepositoryError::StaleCredential(email.to_string()));
        }
        Ok(change(user))
    }

    /// Move the record stored under `old` to `new`, keeping every other field.
    /// Same credential guard as [`update_verified`](Self::update_verified).
    pub fn rename_verified(
        &self,
        old: &str,
        credential: &str,
        new: &str,
    ) -> Result<(), RepositoryError> {
        let mut users = self.users.lock();
        match users.get(old) {
            None => return Err(RepositoryError::NotFound(old.to_string())),
            Some(user) if user.credential != credential => {
                return Err(RepositoryError::StaleCredential(old.to_string()));
            }
            Some(_) => {}
        }
        if old == new {
            return Ok(());
        }
        if users.contains_key(new) {
            return Err(RepositoryError::EmailTaken(new.to_string()));
        }
        if let Some(mut user) = users.remove(old) {
            user.email = new.to_string();
            users.insert(new.to_string(), user);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn cake_lover() -> User {
        User::new("test@mail.com", "sealed", "cheesecake")
    }

    #[test]
    fn test_get_missing_user() {
        let repo = UserRepository::new();
        assert!(repo.get("test@mail.com").is_none());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_save_overwrites() {
        let repo = UserRepository::new();
        repo.save(cake_lover());
        repo.save(User::new("test@mail.com", "sealed", "brownie"));

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get("test@mail.com").unwrap().favorite_cake, "brownie");
    }

    #[test]
    fn test_lookup_is_exact() {
        let repo = UserRepository::new();
        repo.save(cake_lover());
        assert!(repo.get("TEST@mail.com").is_none());
        assert!(repo.get(" test@mail.com").is_none());
    }

    #[test]
    fn test_insert_new_rejects_duplicate() {
        let repo = UserRepository::new();
        repo.insert_new(cake_lover()).unwrap();

        let err = repo
            .insert_new(User::new("test@mail.com", "other", "brownie"))
            .unwrap_err();
        assert_eq!(err, RepositoryError::EmailTaken("test@mail.com".to_string()));
        assert_eq!(repo.get("test@mail.com").unwrap(), cake_lover());
    }

    #[test]
    fn test_update_changes_live_record() {
        let repo = UserRepository::new();
        repo.save(cake_lover());

        repo.update_verified("test@mail.com", "sealed", |u| {
            u.favorite_cake = "anothercake".to_string()
        })
        .unwrap();
        assert_eq!(repo.get("test@mail.com").unwrap().favorite_cake, "anothercake");
    }

    #[test]
    fn test_update_missing_user() {
        let repo = UserRepository::new();
        let err = repo
            .update_verified("ghost@mail.com", "sealed", |_| ())
            .unwrap_err();
        assert_eq!(err, RepositoryError::NotFound("ghost@mail.com".to_string()));
    }

    #[test]
    fn test_rename_moves_key() {
        let repo = UserRepository::new();
        repo.save(cake_lover());

        repo.rename_verified("test@mail.com", "sealed", "test2@mail.com")
            .unwrap();

        assert!(repo.get("test@mail.com").is_none());
        let moved = repo.get("test2@mail.com").unwrap();
        assert_eq!(moved.email, "test2@mail.com");
        assert_eq!(moved.credential, "sealed");
        assert_eq!(moved.favorite_cake, "cheesecake");
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_rename_to_taken_email() {
        let repo = UserRepository::new();
        repo.save(cake_lover());
        repo.save(User::new("test2@mail.com", "sealed", "brownie"));

        let err = repo
            .rename_verified("test@mail.com", "sealed", "test2@mail.com")
            .unwrap_err();
        assert_eq!(err, RepositoryError::EmailTaken("test2@mail.com".to_string()));
        assert_eq!(repo.get("test@mail.com").unwrap().favorite_cake, "cheesecake");
        assert_eq!(repo.get("test2@mail.com").unwrap().favorite_cake, "brownie");
    }

    #[test]
    fn test_rename_to_same_email() {
        let repo = UserRepository::new();
        repo.save(cake_lover());
        repo.rename_verified("test@mail.com", "sealed", "test@mail.com")
            .unwrap();
        assert_eq!(repo.get("test@mail.com").unwrap(), cake_lover());
    }

    #[test]
    fn test_update_with_stale_credential() {
        let repo = UserRepository::new();
        repo.save(cake_lover());

        let err = repo
            .update_verified("test@mail.com", "rotated", |u| {
                u.favorite_cake = "brownie".to_string()
            })
            .unwrap_err();
        assert_eq!(err, RepositoryError::StaleCredential("test@mail.com".to_string()));
        assert_eq!(repo.get("test@mail.com").unwrap(), cake_lover());
    }

    #[test]
    fn test_rename_with_stale_credential() {
        let repo = UserRepository::new();
        repo.save(cake_lover());

        let err = repo
            .rename_verified("test@mail.com", "rotated", "test2@mail.com")
            .unwrap_err();
        assert_eq!(err, RepositoryError::StaleCredential("test@mail.com".to_string()));
        assert!(repo.get("test2@mail.com").is_none());
        assert_eq!(repo.get("test@mail.com").unwrap(), cake_lover());
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let repo = Arc::new(UserRepository::new());
        repo.save(User::new("test@mail.com", "sealed", ""));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    for _ in 0..100 {
                        repo.update_verified("test@mail.com", "sealed", |u| {
                            u.favorite_cake.push('x')
                        })
                        .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.get("test@mail.com").unwrap().favorite_cake.len(), 800);
    }

    #[test]
    fn test_concurrent_registration_keeps_one_winner() {
        let repo = Arc::new(UserRepository::new());

        let winners: usize = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    repo.insert_new(User::new("race@mail.com", format!("p{i}"), "cake"))
                        .is_ok() as usize
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .sum();

        assert_eq!(winners, 1);
        assert_eq!(repo.len(), 1);
    }
}
