//! Request authorization guard.
//!
//! `AuthGuard` resolves the session user and checks `Permission`s against the ability
//! map. Permissions that name a resource load it first, so a missing resource answers
//! 404 before any access decision is made.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{
        course::CourseRepository, lesson::LessonRepository, purchase::PurchaseRepository,
        user::UserRepository,
    },
    error::{auth::AuthError, AppError},
    middleware::{
        ability::{Ability, Action, Subject},
        session::AuthSession,
    },
    model::user::User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Manage users and every other resource.
    Admin,
    CreateCourse,
    /// Update or delete the course and its curriculum.
    ManageCourse(i32),
    /// Read the full content of a lesson: `(course_id, lesson_id)`.
    ViewCourseContent(i32, i32),
    ViewPurchase(i32),
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Requires a signed-in user holding every permission.
    ///
    /// # Arguments
    /// - `permissions` - Permissions checked in order; the first failure is returned
    ///
    /// # Returns
    /// - `Ok(User)` - Signed-in user with every permission
    /// - `Err(AuthError::UserNotInSession)` - No user in session (401)
    /// - `Err(AuthError::UserNotInDatabase)` - Session user was deleted (401)
    /// - `Err(AuthError::AccessDenied)` - A permission was denied (403)
    /// - `Err(AppError::NotFound)` - A resource named by a permission does not exist
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            self.check(Some(&user), *permission).await?;
        }

        Ok(user)
    }

    /// Checks permissions for an optional viewer.
    ///
    /// Anonymous visitors pass when the ability map allows them. A session pointing
    /// at a deleted user is treated as anonymous.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Signed-in viewer with every permission
    /// - `Ok(None)` - Anonymous viewer with every permission
    /// - `Err(AuthError::UserNotInSession)` - Anonymous viewer was denied (401)
    /// - `Err(AuthError::AccessDenied)` - Signed-in viewer was denied (403)
    /// - `Err(AppError::NotFound)` - A resource named by a permission does not exist
    pub async fn permit(&self, permissions: &[Permission]) -> Result<Option<User>, AppError> {
        let user = self.current_user().await?;

        for permission in permissions {
            self.check(user.as_ref(), *permission).await?;
        }

        Ok(user)
    }

    /// Gets the signed-in user without checking any permission.
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Ok(None);
        };

        Ok(UserRepository::new(self.db).find_by_id(user_id).await?)
    }

    async fn check(&self, user: Option<&User>, permission: Permission) -> Result<(), AppError> {
        let ability = Ability::for_user(user);

        let (action, subject, description) = match permission {
            Permission::Admin => (Action::Manage, Subject::User, "admin access".to_string()),
            Permission::CreateCourse => {
                let Some(user) = user else {
                    return Err(AuthError::UserNotInSession.into());
                };
                (
                    Action::Create,
                    Subject::Course {
                        instructor_id: user.id,
                        published: false,
                    },
                    "course creation".to_string(),
                )
            }
            Permission::ManageCourse(course_id) => {
                let course = CourseRepository::new(self.db)
                    .find_by_id(course_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Course {} not found", course_id)))?;
                (
                    Action::Update,
                    course.subject(),
                    format!("management of course {}", course_id),
                )
            }
            Permission::ViewCourseContent(course_id, lesson_id) => {
                let course = CourseRepository::new(self.db)
                    .find_by_id(course_id)
                    .await?
                    .filter(|course| {
                        course.is_published() || ability.can(Action::Update, &course.subject())
                    })
                    .ok_or_else(|| AppError::NotFound(format!("Course {} not found", course_id)))?;
                let lesson = LessonRepository::new(self.db)
                    .find_in_course(course_id, lesson_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Lesson {} not found", lesson_id)))?;
                let purchased = match user {
                    Some(user) => {
                        PurchaseRepository::new(self.db)
                            .has_completed(user.id, course_id)
                            .await?
                    }
                    None => false,
                };
                (
                    Action::Read,
                    Subject::CourseContent {
                        instructor_id: course.instructor_id,
                        purchased,
                        preview: lesson.is_preview,
                    },
                    format!("content of lesson {}", lesson_id),
                )
            }
            Permission::ViewPurchase(purchase_id) => {
                let purchase = PurchaseRepository::new(self.db)
                    .find_by_id(purchase_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Purchase {} not found", purchase_id))
                    })?;
                (
                    Action::Read,
                    purchase.subject(),
                    format!("purchase {}", purchase_id),
                )
            }
        };

        if ability.can(action, &subject) {
            return Ok(());
        }

        match user {
            Some(user) => Err(AuthError::AccessDenied(
                user.id,
                format!("User lacks permission for {}", description),
            )
            .into()),
            None => Err(AuthError::UserNotInSession.into()),
        }
    }
}
