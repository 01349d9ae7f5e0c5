use crate::server::{data::purchase::PurchaseRepository, model::purchase::CreatePurchaseParams};
use chrono::{Duration, Utc};
use entity::purchase::PurchaseStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod set_order;
mod update_status;
