//! User Directory Domain
//!
//! This crate owns the user accounts of the claims system. It is the single
//! source of truth for identity and role: claims only hold an owner email and
//! resolve it here at read time.
//!
//! # Roles
//!
//! - **Lecturer**: creates and submits claims
//! - **ProgramCoordinator** / **AcademicManager**: review, approve and reject
//! - **HRManager**: pays approved claims and manages accounts
//!
//! # Persistence
//!
//! The directory writes its full account list through a [`UserStorePort`]
//! after every mutation. A missing, empty or unreadable store is replaced by
//! the default accounts instead of failing start-up.
//!
//! ```rust,ignore
//! use domain_directory::{UserDirectory, InMemoryUserStore};
//!
//! let directory = UserDirectory::open(InMemoryUserStore::new());
//! let lecturer = directory.authenticate("lecturer@university.com", "lecturer123")?;
//! ```

pub mod user;
pub mod error;
pub mod validation;
pub mod ports;
pub mod directory;

pub use user::{User, UserProfile, UserRole, Actor, same_email};
pub use error::DirectoryError;
pub use validation::{UserValidator, ValidationResult};
pub use ports::UserStorePort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryUserStore;
pub use directory::{UserDirectory, default_accounts};
