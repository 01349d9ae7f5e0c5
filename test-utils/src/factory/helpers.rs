//! Shared helper utilities for factory methods.
//!
//! Provides unique ID generation and shortcuts that create an entity together with
//! the rows it depends on.

use entity::{course::CourseStatus, user::UserRole};
use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an instructor and a draft course owned by them.
///
/// # Returns
/// - `Ok((instructor, course))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_course_with_instructor(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::course::Model), DbErr> {
    let instructor = crate::factory::user::UserFactory::new(db)
        .role(UserRole::Instructor)
        .build()
        .await?;
    let course = crate::factory::course::create_course(db, instructor.id).await?;

    Ok((instructor, course))
}

/// Creates a published, priced course with one section holding one lesson.
///
/// The lesson is not a preview lesson.
///
/// # Returns
/// - `Ok((instructor, course, section, lesson))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_published_course_with_lesson(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::course::Model,
        entity::section::Model,
        entity::lesson::Model,
    ),
    DbErr,
> {
    let instructor = crate::factory::user::UserFactory::new(db)
        .role(UserRole::Instructor)
        .build()
        .await?;
    let course = crate::factory::course::CourseFactory::new(db, instructor.id)
        .status(CourseStatus::Published)
        .build()
        .await?;
    let section = crate::factory::section::create_section(db, course.id).await?;
    let lesson = crate::factory::lesson::create_lesson(db, section.id).await?;

    Ok((instructor, course, section, lesson))
}
