//! Session wrappers, the authorization guard and the ability map.

pub mod ability;
pub mod auth;
pub mod session;
