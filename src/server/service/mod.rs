//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Validation, ownership rules and the purchase status table
//! - **Orchestration**: Coordinating repositories with the identity provider and PayPal
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod admin;
pub mod auth;
pub mod category;
pub mod course;
pub mod lesson;
pub mod paypal;
pub mod purchase;
pub mod section;
pub mod user;
pub mod webhook;
