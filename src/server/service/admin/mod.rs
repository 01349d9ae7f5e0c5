//! Administrative bootstrap services.

pub mod code;
