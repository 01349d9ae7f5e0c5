use crate::server::{
    error::AppError,
    model::purchase::{Purchase, StatusChange},
    service::purchase::PurchaseService,
};
use chrono::{Duration, Utc};
use entity::purchase::PurchaseStatus;
use test_utils::{builder::TestBuilder, factory};

mod expire_stale;
