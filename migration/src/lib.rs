pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_category_table;
mod m20260105_000003_create_category_closure_table;
mod m20260106_000004_create_course_table;
mod m20260106_000005_create_section_table;
mod m20260106_000006_create_lesson_table;
mod m20260112_000007_create_purchase_table;
mod m20260112_000008_create_payment_event_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_category_table::Migration),
            Box::new(m20260105_000003_create_category_closure_table::Migration),
            Box::new(m20260106_000004_create_course_table::Migration),
            Box::new(m20260106_000005_create_section_table::Migration),
            Box::new(m20260106_000006_create_lesson_table::Migration),
            Box::new(m20260112_000007_create_purchase_table::Migration),
            Box::new(m20260112_000008_create_payment_event_table::Migration),
        ]
    }
}
