//! Small helpers shared by services and models.

pub mod links;
pub mod markdown;
pub mod money;
pub mod slug;
