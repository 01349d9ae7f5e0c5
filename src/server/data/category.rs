//! Category tree repository backed by a closure table.
//!
//! Every category owns a depth 0 row pairing it with itself plus one row per ancestor.
//! Writes that touch several closure rows run inside a single transaction.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::server::model::category::{Category, CreateCategoryParams, UpdateCategoryParams};

pub struct CategoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category and its closure rows.
    ///
    /// Inserts the depth 0 self row and, when a parent is given, one row per ancestor
    /// of the parent with the ancestor's depth plus one.
    ///
    /// # Arguments
    /// - `params` - Name, description and optional parent
    /// - `slug` - Unique slug already resolved by the caller
    ///
    /// # Returns
    /// - `Ok(Category)` - The created category
    /// - `Err(DbErr)` - Database error; nothing is written
    pub async fn create(
        &self,
        params: CreateCategoryParams,
        slug: String,
    ) -> Result<Category, DbErr> {
        let txn = self.db.begin().await?;

        let category = entity::category::ActiveModel {
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(slug),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut rows = vec![closure_row(category.id, category.id, 0)];

        if let Some(parent_id) = params.parent_id {
            let ancestors = entity::prelude::CategoryClosure::find()
                .filter(entity::category_closure::Column::DescendantId.eq(parent_id))
                .all(&txn)
                .await?;

            rows.extend(
                ancestors
                    .into_iter()
                    .map(|row| closure_row(row.ancestor_id, category.id, row.depth + 1)),
            );
        }

        entity::prelude::CategoryClosure::insert_many(rows)
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;

        Ok(Category::from_entity(category))
    }

    /// Finds a category by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::Category::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Category::from_entity))
    }

    /// Checks whether a category already uses `slug`.
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Category::find()
            .filter(entity::category::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets the ancestors of a category ordered from the root down to the direct parent.
    ///
    /// The category itself is not included.
    pub async fn get_ancestors(&self, id: i32) -> Result<Vec<Category>, DbErr> {
        let rows = entity::prelude::CategoryClosure::find()
            .filter(entity::category_closure::Column::DescendantId.eq(id))
            .filter(entity::category_closure::Column::Depth.gt(0))
            .order_by_desc(entity::category_closure::Column::Depth)
            .all(self.db)
            .await?;

        let ordered_ids: Vec<i32> = rows.iter().map(|row| row.ancestor_id).collect();

        let mut categories = entity::prelude::Category::find()
            .filter(entity::category::Column::Id.is_in(ordered_ids.clone()))
            .all(self.db)
            .await?;

        categories.sort_by_key(|category| {
            ordered_ids
                .iter()
                .position(|id| *id == category.id)
                .unwrap_or(usize::MAX)
        });

        Ok(categories.into_iter().map(Category::from_entity).collect())
    }

    /// Gets the direct children of a category ordered by name.
    pub async fn get_children(&self, id: i32) -> Result<Vec<Category>, DbErr> {
        let child_ids: Vec<i32> = entity::prelude::CategoryClosure::find()
            .filter(entity::category_closure::Column::AncestorId.eq(id))
            .filter(entity::category_closure::Column::Depth.eq(1))
            .all(self.db)
            .await?
            .into_iter()
            .map(|row| row.descendant_id)
            .collect();

        let entities = entity::prelude::Category::find()
            .filter(entity::category::Column::Id.is_in(child_ids))
            .order_by_asc(entity::category::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Category::from_entity).collect())
    }

    /// Gets every category ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Category>, DbErr> {
        let entities = entity::prelude::Category::find()
            .order_by_asc(entity::category::Column::Name)
            .order_by_asc(entity::category::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Category::from_entity).collect())
    }

    /// Gets every `(child_id, parent_id)` pair of the tree.
    pub async fn get_parent_links(&self) -> Result<Vec<(i32, i32)>, DbErr> {
        let rows = entity::prelude::CategoryClosure::find()
            .filter(entity::category_closure::Column::Depth.eq(1))
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.descendant_id, row.ancestor_id))
            .collect())
    }

    /// Gets the ids of a category and all of its descendants.
    ///
    /// # Returns
    /// - `Ok(ids)` - Ids including `id` itself, empty if the category does not exist
    /// - `Err(DbErr)` - Database error during query
    pub async fn descendant_ids(&self, id: i32) -> Result<Vec<i32>, DbErr> {
        let rows = entity::prelude::CategoryClosure::find()
            .filter(entity::category_closure::Column::AncestorId.eq(id))
            .order_by_asc(entity::category_closure::Column::Depth)
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.descendant_id).collect())
    }

    /// Checks whether `descendant_id` is `ancestor_id` or lies below it.
    pub async fn is_descendant(&self, ancestor_id: i32, descendant_id: i32) -> Result<bool, DbErr> {
        let row = entity::prelude::CategoryClosure::find_by_id((ancestor_id, descendant_id))
            .one(self.db)
            .await?;

        Ok(row.is_some())
    }

    /// Updates a category and moves it with its subtree when the parent changes.
    ///
    /// Moving removes every closure row linking the subtree to its old ancestors and
    /// links each subtree node to each ancestor of the new parent. The caller must
    /// ensure the new parent is not inside the subtree.
    ///
    /// # Returns
    /// - `Ok(Some(Category))` - Updated category
    /// - `Ok(None)` - Category not found
    /// - `Err(DbErr)` - Database error; nothing is written
    pub async fn update(&self, params: UpdateCategoryParams) -> Result<Option<Category>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(entity) = entity::prelude::Category::find_by_id(params.id)
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let current_parent = entity::prelude::CategoryClosure::find()
            .filter(entity::category_closure::Column::DescendantId.eq(params.id))
            .filter(entity::category_closure::Column::Depth.eq(1))
            .one(&txn)
            .await?
            .map(|row| row.ancestor_id);

        let mut active: entity::category::ActiveModel = entity.into();
        active.name = ActiveValue::Set(params.name);
        active.description = ActiveValue::Set(params.description);
        let entity = active.update(&txn).await?;

        if current_parent != params.parent_id {
            move_subtree(&txn, params.id, params.parent_id).await?;
        }

        txn.commit().await?;

        Ok(Some(Category::from_entity(entity)))
    }

    /// Deletes a category with its whole subtree.
    ///
    /// Courses filed under any deleted category lose their category.
    ///
    /// # Returns
    /// - `Ok(true)` - Subtree deleted
    /// - `Ok(false)` - Category not found
    /// - `Err(DbErr)` - Database error; nothing is written
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let subtree_ids: Vec<i32> = entity::prelude::CategoryClosure::find()
            .filter(entity::category_closure::Column::AncestorId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|row| row.descendant_id)
            .collect();

        if subtree_ids.is_empty() {
            return Ok(false);
        }

        entity::prelude::Course::update_many()
            .col_expr(
                entity::course::Column::CategoryId,
                Expr::value(Option::<i32>::None),
            )
            .filter(entity::course::Column::CategoryId.is_in(subtree_ids.clone()))
            .exec(&txn)
            .await?;

        entity::prelude::CategoryClosure::delete_many()
            .filter(entity::category_closure::Column::DescendantId.is_in(subtree_ids.clone()))
            .exec(&txn)
            .await?;

        entity::prelude::Category::delete_many()
            .filter(entity::category::Column::Id.is_in(subtree_ids))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(true)
    }
}

/// Re-links the subtree rooted at `id` below `new_parent_id` (or the root).
async fn move_subtree(
    txn: &DatabaseTransaction,
    id: i32,
    new_parent_id: Option<i32>,
) -> Result<(), DbErr> {
    let subtree = entity::prelude::CategoryClosure::find()
        .filter(entity::category_closure::Column::AncestorId.eq(id))
        .all(txn)
        .await?;
    let subtree_ids: Vec<i32> = subtree.iter().map(|row| row.descendant_id).collect();

    entity::prelude::CategoryClosure::delete_many()
        .filter(entity::category_closure::Column::DescendantId.is_in(subtree_ids.clone()))
        .filter(entity::category_closure::Column::AncestorId.is_not_in(subtree_ids))
        .exec(txn)
        .await?;

    let Some(parent_id) = new_parent_id else {
        return Ok(());
    };

    let ancestors = entity::prelude::CategoryClosure::find()
        .filter(entity::category_closure::Column::DescendantId.eq(parent_id))
        .all(txn)
        .await?;

    let rows: Vec<_> = ancestors
        .iter()
        .flat_map(|ancestor| {
            subtree.iter().map(move |node| {
                closure_row(
                    ancestor.ancestor_id,
                    node.descendant_id,
                    ancestor.depth + node.depth + 1,
                )
            })
        })
        .collect();

    if !rows.is_empty() {
        entity::prelude::CategoryClosure::insert_many(rows)
            .exec_without_returning(txn)
            .await?;
    }

    Ok(())
}

fn closure_row(
    ancestor_id: i32,
    descendant_id: i32,
    depth: i32,
) -> entity::category_closure::ActiveModel {
    entity::category_closure::ActiveModel {
        ancestor_id: ActiveValue::Set(ancestor_id),
        descendant_id: ActiveValue::Set(descendant_id),
        depth: ActiveValue::Set(depth),
    }
}
