//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use farmhub_core::traits::Resource;
use farmhub_core::types::{ResourceKind, UserId};

use super::role::Role;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Email address (may be empty).
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Business role.
    pub role: Role,
    /// Inactive accounts cannot authenticate.
    pub is_active: bool,
    /// Platform staff flag; grants admin bypass.
    pub is_staff: bool,
    /// Platform superuser flag; grants admin bypass.
    pub is_superuser: bool,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the account was created.
    pub date_joined: DateTime<Utc>,
    /// Last successful login time.
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the account carries a platform-level override.
    pub fn is_platform_admin(&self) -> bool {
        self.is_superuser || self.is_staff || self.role == Role::Superadmin
    }
}

impl Resource for User {
    type Id = UserId;
    type New = NewUser;
    type Changes = UserChanges;
    type Filter = UserFilter;

    const KIND: ResourceKind = ResourceKind::User;

    fn by_id(id: UserId) -> UserFilter {
        UserFilter {
            id: Some(id),
            ..Default::default()
        }
    }
}

/// Request payload for creating a user. The password arrives in plain text
/// and is hashed by the service layer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    /// Desired username.
    #[validate(length(min = 1, max = 150, message = "must be between 1 and 150 characters"))]
    pub username: String,
    /// Email address.
    #[serde(default)]
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    /// Given name.
    #[serde(default)]
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub last_name: String,
    /// Requested role; defaults to FARMER.
    #[serde(default)]
    pub role: Role,
    /// Plain-text password.
    pub password: String,
}

/// Request payload for updating a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    /// New email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    /// New given name.
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub first_name: Option<String>,
    /// New family name.
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub last_name: Option<String>,
    /// New role; platform admins only.
    pub role: Option<Role>,
    /// Activate or deactivate; platform admins only.
    pub is_active: Option<bool>,
    /// New plain-text password.
    pub password: Option<String>,
}

/// Row data for inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Business role.
    pub role: Role,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Platform staff flag.
    pub is_staff: bool,
    /// Platform superuser flag.
    pub is_superuser: bool,
}

/// Column changes for an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    /// New email address.
    pub email: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
    /// Successful authentication time.
    pub last_login: Option<DateTime<Utc>>,
}

/// Attribute filter for user listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilter {
    /// Exact id.
    #[serde(skip)]
    pub id: Option<UserId>,
    /// Exact username.
    pub username: Option<String>,
    /// Only users with this role.
    pub role: Option<Role>,
}

impl UserFilter {
    /// Whether a user row satisfies the filter.
    pub fn matches(&self, user: &User) -> bool {
        self.id.is_none_or(|id| user.id == id)
            && self.username.as_deref().is_none_or(|name| user.username == name)
            && self.role.is_none_or(|role| user.role == role)
    }
}
