//! Test fixtures providing reusable test data without database insertion.
//!
//! Fixtures create in-memory entity models for unit tests of business rules such as
//! ability checks and link generation. Unlike factories, fixtures do NOT insert data
//! into the database.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let student = fixture::user::entity();
//! let published = fixture::course::entity_builder()
//!     .status(CourseStatus::Published)
//!     .build();
//! ```

pub mod course;
pub mod purchase;
pub mod user;

pub use course::{entity as course_entity, entity_builder as course_entity_builder};
pub use purchase::{entity as purchase_entity, entity_builder as purchase_entity_builder};
pub use user::{entity as user_entity, entity_builder as user_entity_builder};
