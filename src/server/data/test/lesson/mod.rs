use crate::server::{
    data::lesson::LessonRepository,
    model::curriculum::{CreateLessonParams, UpdateLessonParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod update;
