use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Largest page size accepted by paginated endpoints.
pub const MAX_ENTRIES_PER_PAGE: u64 = 100;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Hypermedia link describing a follow-up request the viewer may perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LinkDto {
    /// Relation name such as `self`, `update` or `purchase`.
    pub rel: String,
    pub href: String,
    /// HTTP method to use with `href`.
    pub method: String,
}

#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

impl PaginationParams {
    /// Page size clamped to `1..=MAX_ENTRIES_PER_PAGE`.
    pub fn per_page(&self) -> u64 {
        self.entries.clamp(1, MAX_ENTRIES_PER_PAGE)
    }
}

pub(crate) fn default_entries() -> u64 {
    10
}
