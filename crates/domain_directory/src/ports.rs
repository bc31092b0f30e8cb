//! Directory Ports
//!
//! The directory needs exactly two things from its backing store: the full
//! account list at start-up, and a way to write the full list back after a
//! change. Adapters:
//!
//! - **JSON file**: `infra_store::JsonFileUserStore`
//! - **In-memory**: [`mock::InMemoryUserStore`] for tests and demos

use std::sync::Arc;

use core_kernel::{DomainPort, PortError};

use crate::user::User;

/// Durable load/save capability for the account list
pub trait UserStorePort: DomainPort {
    /// Loads every stored account
    ///
    /// A store that has never been written returns an empty list rather
    /// than an error.
    fn load(&self) -> Result<Vec<User>, PortError>;

    /// Replaces the stored account list
    fn save(&self, users: &[User]) -> Result<(), PortError>;
}

impl<T: UserStorePort> UserStorePort for Arc<T> {
    fn load(&self) -> Result<Vec<User>, PortError> {
        (**self).load()
    }

    fn save(&self, users: &[User]) -> Result<(), PortError> {
        (**self).save(users)
    }
}

/// In-memory store for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct StoreState {
        users: Vec<User>,
        corrupt: bool,
        fail_saves: bool,
        save_count: usize,
    }

    /// In-memory implementation of UserStorePort
    #[derive(Debug, Default)]
    pub struct InMemoryUserStore {
        state: Mutex<StoreState>,
    }

    impl InMemoryUserStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with accounts
        pub fn with_users(users: Vec<User>) -> Self {
            let store = Self::new();
            if let Ok(mut state) = store.state.lock() {
                state.users = users;
            }
            store
        }

        /// A store whose contents cannot be read back
        pub fn corrupt() -> Self {
            let store = Self::new();
            if let Ok(mut state) = store.state.lock() {
                state.corrupt = true;
            }
            store
        }

        /// Makes every subsequent save fail
        pub fn failing_saves(self) -> Self {
            if let Ok(mut state) = self.state.lock() {
                state.fail_saves = true;
            }
            self
        }

        /// Number of successful saves so far
        pub fn save_count(&self) -> usize {
            self.state.lock().map(|s| s.save_count).unwrap_or(0)
        }

        /// Snapshot of the last saved account list
        pub fn saved_users(&self) -> Vec<User> {
            self.state.lock().map(|s| s.users.clone()).unwrap_or_default()
        }
    }

    impl DomainPort for InMemoryUserStore {}

    impl UserStorePort for InMemoryUserStore {
        fn load(&self) -> Result<Vec<User>, PortError> {
            let state = self
                .state
                .lock()
                .map_err(|_| PortError::internal("user store lock poisoned"))?;
            if state.corrupt {
                return Err(PortError::transformation("stored users are not valid JSON"));
            }
            Ok(state.users.clone())
        }

        fn save(&self, users: &[User]) -> Result<(), PortError> {
            let mut state = self
                .state
                .lock()
                .map_err(|_| PortError::internal("user store lock poisoned"))?;
            if state.fail_saves {
                return Err(PortError::io(
                    "simulated write failure",
                    std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                ));
            }
            state.users = users.to_vec();
            state.corrupt = false;
            state.save_count += 1;
            Ok(())
        }
    }
}
