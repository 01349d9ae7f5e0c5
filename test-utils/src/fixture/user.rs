//! User fixtures for creating in-memory test data.

use chrono::Utc;
use entity::user::{self, UserRole};

/// Default test user subject.
pub const DEFAULT_SUBJECT: &str = "oauth-subject-1";

/// Default test user email.
pub const DEFAULT_EMAIL: &str = "student@example.com";

/// Default test user name.
pub const DEFAULT_NAME: &str = "Test Student";

/// Creates a student user entity model with default values.
///
/// # Default Values
/// - id: `1`
/// - subject: `"oauth-subject-1"`
/// - email: `"student@example.com"`
/// - name: `"Test Student"`
/// - role: `Student`
pub fn entity() -> user::Model {
    entity_builder().build()
}

/// Creates a user entity builder for customization.
///
/// # Example
///
/// ```rust,ignore
/// let admin = fixture::user::entity_builder()
///     .id(7)
///     .role(UserRole::Admin)
///     .build();
/// ```
pub fn entity_builder() -> UserEntityBuilder {
    UserEntityBuilder::default()
}

/// Builder for creating customized user entity models.
pub struct UserEntityBuilder {
    id: i32,
    subject: String,
    email: String,
    name: String,
    role: UserRole,
}

impl Default for UserEntityBuilder {
    fn default() -> Self {
        Self {
            id: 1,
            subject: DEFAULT_SUBJECT.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            name: DEFAULT_NAME.to_string(),
            role: UserRole::Student,
        }
    }
}

impl UserEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Builds and returns the user entity model.
    pub fn build(self) -> user::Model {
        user::Model {
            id: self.id,
            subject: self.subject,
            email: self.email,
            name: self.name,
            role: self.role,
            created_at: Utc::now(),
        }
    }
}
