use crate::server::{
    data::section::SectionRepository,
    model::curriculum::{CreateSectionParams, UpdateSectionParams},
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
