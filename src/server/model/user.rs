//! User domain models and parameters.

use chrono::{DateTime, Utc};
use entity::user::UserRole;

use crate::model::user::{PaginatedUsersDto, RoleDto, UserDto};

/// Application user authenticated through the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Subject identifier issued by the identity provider.
    pub subject: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role.into(),
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            subject: entity.subject,
            email: entity.email,
            name: entity.name,
            role: entity.role,
            created_at: entity.created_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Parameters for upserting a user after a successful login.
///
/// `role` of `None` keeps the stored role of an existing user and creates new users
/// as students.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    pub subject: String,
    pub email: String,
    pub name: String,
    pub role: Option<UserRole>,
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            items: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

impl From<UserRole> for RoleDto {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => RoleDto::Admin,
            UserRole::Instructor => RoleDto::Instructor,
            UserRole::Student => RoleDto::Student,
        }
    }
}

impl From<RoleDto> for UserRole {
    fn from(role: RoleDto) -> Self {
        match role {
            RoleDto::Admin => UserRole::Admin,
            RoleDto::Instructor => UserRole::Instructor,
            RoleDto::Student => UserRole::Student,
        }
    }
}
