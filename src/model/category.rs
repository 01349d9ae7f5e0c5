use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::LinkDto;

/// Category without tree context, used in breadcrumbs and child lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySummaryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    /// Ancestors ordered from the root down to the direct parent.
    pub breadcrumb: Vec<CategorySummaryDto>,
    /// Direct children ordered by name.
    pub children: Vec<CategorySummaryDto>,
    pub links: Vec<LinkDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryTreeNodeDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    #[schema(no_recursion)]
    pub children: Vec<CategoryTreeNodeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryDto {
    pub name: String,
    /// Derived from `name` when omitted.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}

/// Full replacement of a category. A `parent_id` of `null` moves the category to the root.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCategoryDto {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}
