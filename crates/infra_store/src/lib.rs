//! Storage Infrastructure Layer
//!
//! File-backed implementations of the domain ports. The user directory is
//! persisted as a single pretty-printed JSON array of accounts.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_store::JsonFileUserStore;
//! use domain_directory::UserDirectory;
//!
//! let store = JsonFileUserStore::new("data/users.json");
//! let directory = UserDirectory::open(store);
//! ```

pub mod error;
pub mod adapters;

pub use error::StoreError;
pub use adapters::JsonFileUserStore;
