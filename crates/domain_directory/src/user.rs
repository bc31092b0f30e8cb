//! User accounts and roles

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The role a user plays in the claims workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UserRole {
    /// Submits claims for hours worked
    Lecturer,
    /// Reviews and approves claims
    ProgramCoordinator,
    /// Reviews and approves claims, manages accounts
    AcademicManager,
    /// Pays approved claims, manages accounts
    #[serde(rename = "HRManager", alias = "HrManager")]
    HrManager,
}

impl UserRole {
    /// All roles in declaration order
    pub const ALL: [UserRole; 4] = [
        UserRole::Lecturer,
        UserRole::ProgramCoordinator,
        UserRole::AcademicManager,
        UserRole::HrManager,
    ];

    /// Coordinators and academic managers move claims through review
    pub fn is_reviewer(&self) -> bool {
        matches!(self, UserRole::ProgramCoordinator | UserRole::AcademicManager)
    }

    /// Only HR managers release payments
    pub fn is_payer(&self) -> bool {
        matches!(self, UserRole::HrManager)
    }

    /// Any role other than Lecturer
    pub fn is_staff(&self) -> bool {
        !matches!(self, UserRole::Lecturer)
    }

    /// Roles allowed to list and deactivate accounts
    pub fn can_manage_users(&self) -> bool {
        matches!(self, UserRole::AcademicManager | UserRole::HrManager)
    }

    /// Human-readable role name
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Lecturer => "Lecturer",
            UserRole::ProgramCoordinator => "Program Coordinator",
            UserRole::AcademicManager => "Academic Manager",
            UserRole::HrManager => "HR Manager",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Compares two emails the way every directory lookup does: ignoring case
pub fn same_email(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// A user account as held by the directory and its backing store
///
/// The stored representation includes the password. Anything shown to a
/// display layer goes through [`User::profile`] instead.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Unique identifier, compared case-insensitively
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Full name must be between 1 and 100 characters"))]
    pub full_name: String,
    /// Workflow role
    pub role: UserRole,
    /// Department label
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    /// Opaque password; plain comparison only
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    /// When the account was created
    pub created_date: DateTime<Utc>,
    /// Deactivated accounts are kept but cannot sign in
    pub is_active: bool,
}

impl User {
    /// Creates a new active account
    pub fn new(
        email: impl Into<String>,
        full_name: impl Into<String>,
        role: UserRole,
        department: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            role,
            department: department.into(),
            password: password.into(),
            created_date: Utc::now(),
            is_active: true,
        }
    }

    /// Sets the creation timestamp
    pub fn created_at(mut self, created_date: DateTime<Utc>) -> Self {
        self.created_date = created_date;
        self
    }

    /// Returns true if the email matches this account, ignoring case
    pub fn has_email(&self, email: &str) -> bool {
        same_email(&self.email, email)
    }

    /// The identity used for authorization checks
    pub fn actor(&self) -> Actor {
        Actor::new(self.email.clone(), self.role)
    }

    /// The outward representation, without the password
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            department: self.department.clone(),
            created_date: self.created_date,
            is_active: self.is_active,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .field("department", &self.department)
            .field("password", &"<redacted>")
            .field("created_date", &self.created_date)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// A user as exposed to display layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub department: String,
    pub created_date: DateTime<Utc>,
    pub is_active: bool,
}

/// The identity performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Email of the acting user
    pub email: String,
    /// Role as recorded in the directory
    pub role: UserRole,
}

impl Actor {
    pub fn new(email: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }
}
