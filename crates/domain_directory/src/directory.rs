//! The user directory
//!
//! Owns the account list, answers identity lookups, and writes the full list
//! through its store after every mutation.

use std::fmt;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::DirectoryError;
use crate::ports::UserStorePort;
use crate::user::{Actor, User, UserRole};
use crate::validation::UserValidator;

/// The accounts seeded into an empty or unreadable store
///
/// These are documented fixtures for demos and tests, not secrets.
pub fn default_accounts() -> Vec<User> {
    let now = Utc::now();
    vec![
        User::new(
            "admin@university.com",
            "Admin User",
            UserRole::AcademicManager,
            "Administration",
            "admin123",
        )
        .created_at(now),
        User::new("hr@university.com", "HR Manager", UserRole::HrManager, "HR", "hr123")
            .created_at(now),
        User::new(
            "lecturer@university.com",
            "John Lecturer",
            UserRole::Lecturer,
            "Computer Science",
            "lecturer123",
        )
        .created_at(now),
        User::new(
            "coordinator@university.com",
            "Sarah Coordinator",
            UserRole::ProgramCoordinator,
            "Computer Science",
            "coord123",
        )
        .created_at(now),
    ]
}

/// Durable store of user accounts
///
/// # Invariants
///
/// - No two accounts share an email, ignoring case
/// - Accounts are never removed, only deactivated
/// - The in-memory list matches the last successful save
pub struct UserDirectory {
    users: Vec<User>,
    store: Box<dyn UserStorePort>,
}

impl UserDirectory {
    /// Opens the directory over a store
    ///
    /// A store that is missing, empty, or unreadable is treated as empty and
    /// re-seeded with [`default_accounts`]. Start-up never fails on storage.
    pub fn open(store: impl UserStorePort) -> Self {
        let store: Box<dyn UserStorePort> = Box::new(store);

        let loaded = match store.load() {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, "User store unreadable, treating as empty");
                Vec::new()
            }
        };

        let users = if loaded.is_empty() {
            let seeded = default_accounts();
            info!(count = seeded.len(), "Seeding default accounts");
            if let Err(e) = store.save(&seeded) {
                warn!(error = %e, "Failed to persist default accounts");
            }
            seeded
        } else {
            info!(count = loaded.len(), "Loaded user accounts");
            loaded
        };

        Self { users, store }
    }

    /// Finds an account by email, ignoring case, active or not
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.has_email(email))
    }

    /// Lists active accounts in insertion order, optionally filtered by role
    pub fn list_active(&self, role: Option<UserRole>) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.is_active)
            .filter(|u| role.map_or(true, |r| u.role == r))
            .collect()
    }

    /// Number of active accounts
    pub fn active_user_count(&self) -> usize {
        self.users.iter().filter(|u| u.is_active).count()
    }

    /// Registers a new account
    ///
    /// # Errors
    ///
    /// - `Validation` if the candidate breaks a registration rule
    /// - `DuplicateUser` if any account, active or not, has the same email
    ///   ignoring case
    /// - `Storage` if the save fails; the directory is left unchanged
    pub fn register(&mut self, candidate: User) -> Result<User, DirectoryError> {
        let validation = UserValidator::validate_registration(&candidate);
        if !validation.is_valid {
            return Err(DirectoryError::validation_failed(validation.errors));
        }

        if self.find_by_email(&candidate.email).is_some() {
            return Err(DirectoryError::DuplicateUser(candidate.email));
        }

        self.users.push(candidate.clone());
        if let Err(e) = self.store.save(&self.users) {
            self.users.pop();
            return Err(e.into());
        }

        info!(email = %candidate.email, role = ?candidate.role, "Registered user");
        Ok(candidate)
    }

    /// Deactivates an account; deactivating twice is a no-op
    ///
    /// # Errors
    ///
    /// - `NotFound` if no account has the email
    /// - `Storage` if the save fails; the flag is restored
    pub fn deactivate(&mut self, email: &str) -> Result<(), DirectoryError> {
        let index = self
            .users
            .iter()
            .position(|u| u.has_email(email))
            .ok_or_else(|| DirectoryError::not_found(email))?;

        let was_active = self.users[index].is_active;
        self.users[index].is_active = false;

        if let Err(e) = self.store.save(&self.users) {
            self.users[index].is_active = was_active;
            return Err(e.into());
        }

        if was_active {
            info!(email = %self.users[index].email, "Deactivated user");
        } else {
            debug!(email = %self.users[index].email, "User already inactive");
        }
        Ok(())
    }

    /// Checks an email/password pair
    ///
    /// Unknown emails, wrong passwords and deactivated accounts are
    /// indistinguishable to the caller.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, DirectoryError> {
        match self.find_by_email(email.trim()) {
            Some(user) if user.is_active && user.password == password => {
                debug!(email = %user.email, "Authenticated user");
                Ok(user.clone())
            }
            _ => {
                debug!(email = %email, "Authentication failed");
                Err(DirectoryError::InvalidCredentials)
            }
        }
    }

    /// Resolves the acting identity for an authorization-checked call
    ///
    /// The role always comes from the directory. Deactivated accounts
    /// cannot act.
    pub fn resolve_actor(&self, email: &str) -> Result<Actor, DirectoryError> {
        self.find_by_email(email)
            .filter(|u| u.is_active)
            .map(User::actor)
            .ok_or_else(|| DirectoryError::not_found(email))
    }
}

impl fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDirectory")
            .field("users", &self.users.len())
            .field("active", &self.active_user_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::InMemoryUserStore;

    #[test]
    fn test_default_accounts_cover_every_role() {
        let accounts = default_accounts();
        for role in UserRole::ALL {
            assert!(accounts.iter().any(|u| u.role == role), "missing {:?}", role);
        }
    }

    #[test]
    fn test_open_seeds_empty_store() {
        let directory = UserDirectory::open(InMemoryUserStore::new());
        assert_eq!(directory.active_user_count(), 4);
        assert!(directory.find_by_email("lecturer@university.com").is_some());
    }

    #[test]
    fn test_register_rolls_back_when_save_fails() {
        let store = InMemoryUserStore::with_users(default_accounts()).failing_saves();
        let mut directory = UserDirectory::open(store);

        let candidate = User::new(
            "new@university.com",
            "New User",
            UserRole::Lecturer,
            "Physics",
            "password1",
        );
        let result = directory.register(candidate);

        assert!(matches!(result, Err(DirectoryError::Storage(_))));
        assert!(directory.find_by_email("new@university.com").is_none());
    }

    #[test]
    fn test_deactivate_restores_flag_when_save_fails() {
        let store = InMemoryUserStore::with_users(default_accounts()).failing_saves();
        let mut directory = UserDirectory::open(store);

        let result = directory.deactivate("lecturer@university.com");

        assert!(matches!(result, Err(DirectoryError::Storage(_))));
        assert!(directory.find_by_email("lecturer@university.com").unwrap().is_active);
    }
}
