//! Tests for the user directory

use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use core_kernel::{DomainPort, PortError};
use domain_directory::{
    default_accounts, DirectoryError, User, UserDirectory, UserRole, UserStorePort,
};

/// Store that records every save so tests can inspect persistence
#[derive(Default)]
struct RecordingStore {
    initial: Option<Result<Vec<User>, String>>,
    saves: Mutex<Vec<Vec<User>>>,
}

impl RecordingStore {
    fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with_users(users: Vec<User>) -> Arc<Self> {
        Arc::new(Self {
            initial: Some(Ok(users)),
            ..Default::default()
        })
    }

    fn unreadable() -> Arc<Self> {
        Arc::new(Self {
            initial: Some(Err("unexpected end of JSON input".to_string())),
            ..Default::default()
        })
    }

    fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    fn last_saved(&self) -> Vec<User> {
        self.saves.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl DomainPort for RecordingStore {}

impl UserStorePort for RecordingStore {
    fn load(&self) -> Result<Vec<User>, PortError> {
        match &self.initial {
            None => Ok(Vec::new()),
            Some(Ok(users)) => Ok(users.clone()),
            Some(Err(message)) => Err(PortError::transformation(message.clone())),
        }
    }

    fn save(&self, users: &[User]) -> Result<(), PortError> {
        self.saves.lock().unwrap().push(users.to_vec());
        Ok(())
    }
}

fn new_lecturer(email: &str) -> User {
    User::new(email, "Test Lecturer", UserRole::Lecturer, "Physics", "password1")
}

// ============================================================================
// Start-up and seeding
// ============================================================================

mod seeding_tests {
    use super::*;

    #[test]
    fn test_missing_store_is_seeded_and_saved() {
        let store = RecordingStore::empty();
        let directory = UserDirectory::open(store.clone());

        assert_eq!(directory.active_user_count(), 4);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.last_saved().len(), 4);
    }

    #[test]
    fn test_corrupt_store_is_reseeded_not_fatal() {
        let store = RecordingStore::unreadable();
        let directory = UserDirectory::open(store.clone());

        assert!(directory.find_by_email("admin@university.com").is_some());
        assert!(directory.find_by_email("hr@university.com").is_some());
        assert!(directory.find_by_email("coordinator@university.com").is_some());
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_existing_accounts_are_not_reseeded() {
        let store = RecordingStore::with_users(vec![new_lecturer("only@university.com")]);
        let directory = UserDirectory::open(store.clone());

        assert_eq!(directory.active_user_count(), 1);
        assert!(directory.find_by_email("admin@university.com").is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_seeded_credentials_work() {
        let directory = UserDirectory::open(RecordingStore::empty());

        let pairs = [
            ("admin@university.com", "admin123", UserRole::AcademicManager),
            ("hr@university.com", "hr123", UserRole::HrManager),
            ("lecturer@university.com", "lecturer123", UserRole::Lecturer),
            ("coordinator@university.com", "coord123", UserRole::ProgramCoordinator),
        ];
        for (email, password, role) in pairs {
            let user = directory.authenticate(email, password).unwrap();
            assert_eq!(user.role, role);
        }
    }
}

// ============================================================================
// Lookups
// ============================================================================

mod lookup_tests {
    use super::*;

    #[test]
    fn test_find_by_email_ignores_case() {
        let directory = UserDirectory::open(RecordingStore::empty());
        let user = directory.find_by_email("LECTURER@University.COM").unwrap();
        assert_eq!(user.email, "lecturer@university.com");
    }

    #[test]
    fn test_find_by_email_returns_inactive_accounts() {
        let mut directory = UserDirectory::open(RecordingStore::empty());
        directory.deactivate("lecturer@university.com").unwrap();

        let user = directory.find_by_email("lecturer@university.com").unwrap();
        assert!(!user.is_active);
    }

    #[test]
    fn test_list_active_keeps_insertion_order_and_filters_role() {
        let mut directory = UserDirectory::open(RecordingStore::empty());
        directory.register(new_lecturer("second.lecturer@university.com")).unwrap();

        let all: Vec<&str> = directory
            .list_active(None)
            .into_iter()
            .map(|u| u.email.as_str())
            .collect();
        assert_eq!(
            all,
            vec![
                "admin@university.com",
                "hr@university.com",
                "lecturer@university.com",
                "coordinator@university.com",
                "second.lecturer@university.com",
            ]
        );

        let lecturers: Vec<&str> = directory
            .list_active(Some(UserRole::Lecturer))
            .into_iter()
            .map(|u| u.email.as_str())
            .collect();
        assert_eq!(
            lecturers,
            vec!["lecturer@university.com", "second.lecturer@university.com"]
        );
    }

    #[test]
    fn test_list_active_excludes_deactivated() {
        let mut directory = UserDirectory::open(RecordingStore::empty());
        directory.deactivate("coordinator@university.com").unwrap();

        assert!(directory
            .list_active(Some(UserRole::ProgramCoordinator))
            .is_empty());
        assert_eq!(directory.active_user_count(), 3);
    }
}

// ============================================================================
// Registration and deactivation
// ============================================================================

mod mutation_tests {
    use super::*;

    #[test]
    fn test_register_appends_and_persists() {
        let store = RecordingStore::empty();
        let mut directory = UserDirectory::open(store.clone());

        let user = directory.register(new_lecturer("new@university.com")).unwrap();

        assert_eq!(user.email, "new@university.com");
        assert_eq!(store.save_count(), 2);
        assert!(store.last_saved().iter().any(|u| u.email == "new@university.com"));
    }

    #[test]
    fn test_register_rejects_duplicate_of_inactive_account() {
        let mut directory = UserDirectory::open(RecordingStore::empty());
        directory.deactivate("lecturer@university.com").unwrap();

        let result = directory.register(new_lecturer("lecturer@university.com"));
        assert!(matches!(result, Err(DirectoryError::DuplicateUser(_))));
    }

    #[test]
    fn test_register_validates_fields() {
        let mut directory = UserDirectory::open(RecordingStore::empty());
        let mut candidate = new_lecturer("short@university.com");
        candidate.password = "abc".to_string();

        let result = directory.register(candidate);
        assert!(matches!(result, Err(DirectoryError::Validation(_))));
        assert!(directory.find_by_email("short@university.com").is_none());
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let store = RecordingStore::empty();
        let mut directory = UserDirectory::open(store.clone());

        directory.deactivate("lecturer@university.com").unwrap();
        directory.deactivate("LECTURER@university.com").unwrap();

        assert!(!directory.find_by_email("lecturer@university.com").unwrap().is_active);
        assert_eq!(store.save_count(), 3);
        let saved = store.last_saved();
        let stored = saved.iter().find(|u| u.email == "lecturer@university.com").unwrap();
        assert!(!stored.is_active);
    }

    #[test]
    fn test_deactivate_unknown_email() {
        let mut directory = UserDirectory::open(RecordingStore::empty());
        let result = directory.deactivate("nobody@university.com");
        assert!(matches!(result, Err(DirectoryError::NotFound(_))));
    }
}

// ============================================================================
// Authentication
// ============================================================================

mod authentication_tests {
    use super::*;

    #[test]
    fn test_wrong_password_rejected() {
        let directory = UserDirectory::open(RecordingStore::empty());
        let result = directory.authenticate("lecturer@university.com", "wrong");
        assert!(matches!(result, Err(DirectoryError::InvalidCredentials)));
    }

    #[test]
    fn test_inactive_account_cannot_sign_in_or_act() {
        let mut directory = UserDirectory::open(RecordingStore::empty());
        directory.deactivate("lecturer@university.com").unwrap();

        assert!(matches!(
            directory.authenticate("lecturer@university.com", "lecturer123"),
            Err(DirectoryError::InvalidCredentials)
        ));
        assert!(matches!(
            directory.resolve_actor("lecturer@university.com"),
            Err(DirectoryError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_actor_uses_directory_role() {
        let directory = UserDirectory::open(RecordingStore::empty());
        let actor = directory.resolve_actor("Hr@University.com").unwrap();
        assert_eq!(actor.role, UserRole::HrManager);
        assert_eq!(actor.email, "hr@university.com");
    }

    #[test]
    fn test_email_is_case_insensitive_for_sign_in() {
        let directory = UserDirectory::open(RecordingStore::with_users(default_accounts()));
        assert!(directory.authenticate("Admin@University.com", "admin123").is_ok());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn flip_case(email: &str, mask: &[bool]) -> String {
    email
        .chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
        .collect()
}

proptest! {
    #[test]
    fn case_variants_of_an_email_are_duplicates(
        local in "[a-z][a-z0-9]{2,12}",
        mask in proptest::collection::vec(any::<bool>(), 1..16),
    ) {
        let mut directory = UserDirectory::open(RecordingStore::empty());
        let email = format!("{}@university.com", local);
        directory.register(new_lecturer(&email)).unwrap();

        let variant = flip_case(&email, &mask);
        let result = directory.register(new_lecturer(&variant));

        prop_assert!(matches!(result, Err(DirectoryError::DuplicateUser(_))));
        prop_assert_eq!(directory.active_user_count(), 5);
    }
}
