use crate::server::{
    data::course::CourseRepository,
    error::AppError,
    middleware::ability::Ability,
    model::{
        course::{CourseFilter, CreateCourseParams, UpdateCourseParams},
        user::User,
    },
    service::course::CourseService,
};
use entity::{course::CourseStatus, purchase::PurchaseStatus, user::UserRole};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get;
mod list_published;

fn create_params(instructor_id: i32, title: &str) -> CreateCourseParams {
    CreateCourseParams {
        instructor_id,
        title: title.to_string(),
        description: "Learn things".to_string(),
        price_cents: 2500,
        currency: "EUR".to_string(),
        category_id: None,
    }
}

fn update_params(course: &entity::course::Model, status: CourseStatus) -> UpdateCourseParams {
    UpdateCourseParams {
        id: course.id,
        title: course.title.clone(),
        description: course.description.clone(),
        price_cents: course.price_cents,
        currency: course.currency.clone(),
        category_id: course.category_id,
        status,
    }
}
