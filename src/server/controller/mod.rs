//! HTTP request handlers.
//!
//! Handlers extract the request, authorize it through `AuthGuard`, convert DTOs into
//! parameter types, call a service and convert the resulting domain model back into a
//! DTO. Every handler carries a `#[utoipa::path]` annotation for the OpenAPI document.

pub mod admin;
pub mod auth;
pub mod category;
pub mod course;
pub mod curriculum;
pub mod purchase;
pub mod webhook;
