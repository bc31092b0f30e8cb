//! Account DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_directory::{User, UserProfile, UserRole};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub department: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn into_user(self) -> User {
        User::new(
            self.email,
            self.full_name,
            self.role,
            self.department,
            self.password,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    pub role: Option<UserRole>,
}
