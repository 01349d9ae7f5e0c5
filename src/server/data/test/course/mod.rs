use crate::server::{
    data::course::CourseRepository,
    model::course::{CreateCourseParams, UpdateCourseParams},
};
use entity::{course::CourseStatus, purchase::PurchaseStatus};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod update;
