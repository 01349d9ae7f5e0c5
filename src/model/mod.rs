//! Data transfer objects shared by the HTTP API.
//!
//! Every request and response body is defined here with serde and utoipa `ToSchema`
//! derives so the OpenAPI document stays in sync with the handlers.

pub mod api;
pub mod category;
pub mod course;
pub mod curriculum;
pub mod purchase;
pub mod user;
pub mod webhook;
