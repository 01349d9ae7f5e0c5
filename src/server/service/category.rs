use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::category::CategoryRepository,
    error::AppError,
    model::category::{
        Category, CategoryDetail, CategoryTreeNode, CreateCategoryParams, UpdateCategoryParams,
    },
    util::slug,
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category below an optional parent.
    ///
    /// The slug is derived from the name when not given.
    ///
    /// # Returns
    /// - `Ok(CategoryDetail)` - Created category with its breadcrumb
    /// - `Err(AppError::BadRequest)` - Empty name or slug
    /// - `Err(AppError::NotFound)` - Parent does not exist
    /// - `Err(AppError::Conflict)` - Slug already taken
    pub async fn create(&self, params: CreateCategoryParams) -> Result<CategoryDetail, AppError> {
        let repo = CategoryRepository::new(self.db);

        if params.name.is_empty() {
            return Err(AppError::BadRequest(
                "Category name must not be empty".to_string(),
            ));
        }

        let slug = slug::slugify(params.slug.as_deref().unwrap_or(&params.name));
        if slug.is_empty() {
            return Err(AppError::BadRequest(
                "Category slug must contain letters or digits".to_string(),
            ));
        }

        if let Some(parent_id) = params.parent_id {
            if repo.find_by_id(parent_id).await?.is_none() {
                return Err(AppError::NotFound(format!(
                    "Parent category {} not found",
                    parent_id
                )));
            }
        }

        if repo.slug_exists(&slug).await? {
            return Err(AppError::Conflict(format!(
                "Category slug '{}' is already in use",
                slug
            )));
        }

        let category = repo.create(params, slug).await?;

        tracing::info!(category_id = category.id, "Created category");

        self.detail(category).await
    }

    /// Gets a category with its breadcrumb and direct children.
    pub async fn get(&self, id: i32) -> Result<CategoryDetail, AppError> {
        let category = CategoryRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        self.detail(category).await
    }

    /// Gets the whole category forest with children ordered by name.
    pub async fn tree(&self) -> Result<Vec<CategoryTreeNode>, AppError> {
        let repo = CategoryRepository::new(self.db);

        let categories = repo.get_all().await?;
        let parents: HashMap<i32, i32> = repo.get_parent_links().await?.into_iter().collect();

        let mut children: HashMap<Option<i32>, Vec<Category>> = HashMap::new();
        for category in categories {
            children
                .entry(parents.get(&category.id).copied())
                .or_default()
                .push(category);
        }

        Ok(build_nodes(None, &mut children))
    }

    /// Renames a category and moves it below a new parent.
    ///
    /// # Returns
    /// - `Ok(CategoryDetail)` - Updated category
    /// - `Err(AppError::BadRequest)` - Empty name, or the new parent lies inside the subtree
    /// - `Err(AppError::NotFound)` - Category or parent does not exist
    pub async fn update(&self, params: UpdateCategoryParams) -> Result<CategoryDetail, AppError> {
        let repo = CategoryRepository::new(self.db);

        if params.name.is_empty() {
            return Err(AppError::BadRequest(
                "Category name must not be empty".to_string(),
            ));
        }

        if repo.find_by_id(params.id).await?.is_none() {
            return Err(not_found(params.id));
        }

        if let Some(parent_id) = params.parent_id {
            if repo.find_by_id(parent_id).await?.is_none() {
                return Err(AppError::NotFound(format!(
                    "Parent category {} not found",
                    parent_id
                )));
            }

            if repo.is_descendant(params.id, parent_id).await? {
                return Err(AppError::BadRequest(
                    "A category cannot be moved below itself or its descendants".to_string(),
                ));
            }
        }

        let id = params.id;
        let category = repo.update(params).await?.ok_or_else(|| not_found(id))?;

        tracing::info!(category_id = id, "Updated category");

        self.detail(category).await
    }

    /// Deletes a category with its whole subtree.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !CategoryRepository::new(self.db).delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!(category_id = id, "Deleted category subtree");

        Ok(())
    }

    async fn detail(&self, category: Category) -> Result<CategoryDetail, AppError> {
        let repo = CategoryRepository::new(self.db);

        let breadcrumb = repo.get_ancestors(category.id).await?;
        let children = repo.get_children(category.id).await?;

        Ok(CategoryDetail {
            category,
            breadcrumb,
            children,
        })
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Category {} not found", id))
}

/// Takes the children of `parent` out of the map and builds their subtrees.
fn build_nodes(
    parent: Option<i32>,
    children: &mut HashMap<Option<i32>, Vec<Category>>,
) -> Vec<CategoryTreeNode> {
    let Some(categories) = children.remove(&parent) else {
        return Vec::new();
    };

    categories
        .into_iter()
        .map(|category| {
            let nodes = build_nodes(Some(category.id), children);
            CategoryTreeNode {
                category,
                children: nodes,
            }
        })
        .collect()
}
