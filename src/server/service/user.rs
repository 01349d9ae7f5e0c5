use entity::user::UserRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        total_pages,
        user::{PaginatedUsers, User},
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a page of users ordered by name.
    pub async fn get_all_users(&self, page: u64, per_page: u64) -> Result<PaginatedUsers, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_all_paginated(page, per_page)
            .await?;

        Ok(PaginatedUsers {
            users,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Changes the role of a user.
    ///
    /// # Arguments
    /// - `actor` - Admin performing the change
    /// - `user_id` - User whose role changes
    /// - `role` - New role
    ///
    /// # Returns
    /// - `Ok(User)` - User with the new role
    /// - `Err(AppError::BadRequest)` - Admin tried to demote themself
    /// - `Err(AppError::NotFound)` - No user with `user_id`
    pub async fn set_role(
        &self,
        actor: &User,
        user_id: i32,
        role: UserRole,
    ) -> Result<User, AppError> {
        if actor.id == user_id && role != UserRole::Admin {
            return Err(AppError::BadRequest(
                "Admins cannot remove their own admin role".to_string(),
            ));
        }

        let user = UserRepository::new(self.db)
            .set_role(user_id, role)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        tracing::info!(actor_id = actor.id, user_id, role = ?role, "Changed user role");

        Ok(user)
    }
}
