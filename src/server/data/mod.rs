//! Database repository layer for all domain entities.
//!
//! Repositories wrap SeaORM entity queries for one aggregate each and return domain
//! models from `server::model`, keeping entity types out of the service layer. Writes
//! that span several tables run inside a transaction owned by the repository.

pub mod category;
pub mod course;
pub mod lesson;
pub mod payment_event;
pub mod purchase;
pub mod section;
pub mod user;

#[cfg(test)]
mod test;
