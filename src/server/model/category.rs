//! Category tree domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::category::{
        CategoryDto, CategorySummaryDto, CategoryTreeNodeDto, CreateCategoryDto, UpdateCategoryDto,
    },
    server::{middleware::ability::Ability, util::links},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn from_entity(entity: entity::category::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            created_at: entity.created_at,
        }
    }

    pub fn into_summary_dto(self) -> CategorySummaryDto {
        CategorySummaryDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
        }
    }
}

/// Category with its position in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDetail {
    pub category: Category,
    /// Ancestors ordered from the root down to the direct parent.
    pub breadcrumb: Vec<Category>,
    /// Direct children ordered by name.
    pub children: Vec<Category>,
}

impl CategoryDetail {
    pub fn parent_id(&self) -> Option<i32> {
        self.breadcrumb.last().map(|parent| parent.id)
    }

    /// Converts to a DTO, attaching the links the viewer may follow.
    pub fn into_dto(self, ability: &Ability) -> CategoryDto {
        let parent_id = self.parent_id();
        let links = links::category_links(self.category.id, ability);

        CategoryDto {
            id: self.category.id,
            name: self.category.name,
            slug: self.category.slug,
            description: self.category.description,
            parent_id,
            breadcrumb: self
                .breadcrumb
                .into_iter()
                .map(Category::into_summary_dto)
                .collect(),
            children: self
                .children
                .into_iter()
                .map(Category::into_summary_dto)
                .collect(),
            links,
        }
    }
}

/// Node of the category forest.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTreeNode {
    pub category: Category,
    pub children: Vec<CategoryTreeNode>,
}

impl CategoryTreeNode {
    pub fn into_dto(self) -> CategoryTreeNodeDto {
        CategoryTreeNodeDto {
            id: self.category.id,
            name: self.category.name,
            slug: self.category.slug,
            children: self
                .children
                .into_iter()
                .map(CategoryTreeNode::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCategoryParams {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}

impl CreateCategoryParams {
    pub fn from_dto(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            slug: dto.slug,
            description: dto.description,
            parent_id: dto.parent_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCategoryParams {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// New parent, `None` moves the category to the root.
    pub parent_id: Option<i32>,
}

impl UpdateCategoryParams {
    pub fn from_dto(id: i32, dto: UpdateCategoryDto) -> Self {
        Self {
            id,
            name: dto.name.trim().to_string(),
            description: dto.description,
            parent_id: dto.parent_id,
        }
    }
}
