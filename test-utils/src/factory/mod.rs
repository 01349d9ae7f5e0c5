//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults, reducing boilerplate in tests. Each
//! entity has a `*Factory` builder for customization and a `create_*` shorthand for
//! quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::user::create_user(&db).await?;
//!     let (instructor, course, section, lesson) =
//!         factory::helpers::create_published_course_with_lesson(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let instructor = factory::user::UserFactory::new(&db)
//!     .role(UserRole::Instructor)
//!     .build()
//!     .await?;
//!
//! let course = factory::course::CourseFactory::new(&db, instructor.id)
//!     .price_cents(4999)
//!     .status(CourseStatus::Published)
//!     .build()
//!     .await?;
//! ```

pub mod category;
pub mod course;
pub mod helpers;
pub mod lesson;
pub mod purchase;
pub mod section;
pub mod user;

pub use category::{create_category, create_child_category};
pub use course::create_course;
pub use lesson::create_lesson;
pub use purchase::create_purchase;
pub use section::create_section;
pub use user::{create_instructor, create_user};
