use crate::server::{error::AppError, model::user::User, service::user::UserService};
use entity::user::UserRole;
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory};

mod set_role;
