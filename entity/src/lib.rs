//! SeaORM entity models for the course marketplace.
//!
//! One module per table. Use [`prelude`] for the entity types.

pub mod prelude;

pub mod category;
pub mod category_closure;
pub mod course;
pub mod lesson;
pub mod payment_event;
pub mod purchase;
pub mod section;
pub mod user;
