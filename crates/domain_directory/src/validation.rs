//! Registration rules for user accounts
//!
//! # Validation Rules
//!
//! - Email must be a valid address without surrounding whitespace
//! - Full name is required and at most 100 characters
//! - Department is required
//! - Password must be at least 6 characters
//!
//! Seeded default accounts are trusted and never pass through here.

use validator::Validate;

use crate::user::User;

/// Result of account validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the account is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for accounts entering the directory
pub struct UserValidator;

impl UserValidator {
    /// Validates a registration candidate
    ///
    /// Field rules come from the `Validate` derive on [`User`]; rules the
    /// derive cannot express are checked here.
    pub fn validate_registration(user: &User) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if let Err(errors) = user.validate() {
            let mut messages: Vec<String> = Vec::new();
            for (field, field_errors) in errors.field_errors() {
                for error in field_errors.iter() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", field, error.code));
                    messages.push(message);
                }
            }
            // field_errors is a map; keep messages stable for display
            messages.sort();
            for message in messages {
                result.add_error(message);
            }
        }

        if user.email.trim() != user.email {
            result.add_error("Email must not have leading or trailing spaces");
        }
        if !user.full_name.is_empty() && user.full_name.trim().is_empty() {
            result.add_error("Full name cannot be blank");
        }
        if !user.department.is_empty() && user.department.trim().is_empty() {
            result.add_error("Department cannot be blank");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRole;

    fn candidate() -> User {
        User::new(
            "new.lecturer@university.com",
            "New Lecturer",
            UserRole::Lecturer,
            "Mathematics",
            "secret123",
        )
    }

    #[test]
    fn test_valid_candidate() {
        let result = UserValidator::validate_registration(&candidate());
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn test_short_password_rejected() {
        let mut user = candidate();
        user.password = "12345".to_string();

        let result = UserValidator::validate_registration(&user);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("at least 6")));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut user = candidate();
        user.email = "not-an-email".to_string();

        let result = UserValidator::validate_registration(&user);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("valid email")));
    }

    #[test]
    fn test_long_full_name_rejected() {
        let mut user = candidate();
        user.full_name = "x".repeat(101);

        assert!(!UserValidator::validate_registration(&user).is_valid);
    }

    #[test]
    fn test_blank_department_rejected() {
        let mut user = candidate();
        user.department = "   ".to_string();

        let result = UserValidator::validate_registration(&user);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Department")));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut user = candidate();
        user.password = "1".to_string();
        user.department = String::new();

        let result = UserValidator::validate_registration(&user);
        assert_eq!(result.errors.len(), 2);
    }
}
