//! Category factory for creating categories together with their closure rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

/// Factory for creating test categories.
///
/// Inserts the category, its depth 0 closure row and one closure row per ancestor of
/// the configured parent, mirroring what the repository does.
pub struct CategoryFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    slug: String,
    description: Option<String>,
    parent_id: Option<i32>,
}

impl<'a> CategoryFactory<'a> {
    /// Creates a new CategoryFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Category {id}"`
    /// - slug: `"category-{id}"`
    /// - description: `None`
    /// - parent_id: `None` (root category)
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Category {}", id),
            slug: format!("category-{}", id),
            description: None,
            parent_id: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn parent(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Builds and inserts the category with its closure rows.
    pub async fn build(self) -> Result<entity::category::Model, DbErr> {
        let category = entity::category::ActiveModel {
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set(self.description),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        entity::category_closure::ActiveModel {
            ancestor_id: ActiveValue::Set(category.id),
            descendant_id: ActiveValue::Set(category.id),
            depth: ActiveValue::Set(0),
        }
        .insert(self.db)
        .await?;

        if let Some(parent_id) = self.parent_id {
            let ancestors = entity::prelude::CategoryClosure::find()
                .filter(entity::category_closure::Column::DescendantId.eq(parent_id))
                .all(self.db)
                .await?;

            for ancestor in ancestors {
                entity::category_closure::ActiveModel {
                    ancestor_id: ActiveValue::Set(ancestor.ancestor_id),
                    descendant_id: ActiveValue::Set(category.id),
                    depth: ActiveValue::Set(ancestor.depth + 1),
                }
                .insert(self.db)
                .await?;
            }
        }

        Ok(category)
    }
}

/// Creates a root category with default values.
pub async fn create_category(db: &DatabaseConnection) -> Result<entity::category::Model, DbErr> {
    CategoryFactory::new(db).build().await
}

/// Creates a category below `parent_id`.
pub async fn create_child_category(
    db: &DatabaseConnection,
    parent_id: i32,
) -> Result<entity::category::Model, DbErr> {
    CategoryFactory::new(db).parent(parent_id).build().await
}
