//! Shared query-string DTOs

use serde::Deserialize;

/// Pagination-control signal. A present `page` switches list payloads into
/// the paginated shape.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Rendering controls: free-form format name (resolved against the closed
/// format set) and requested locale.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct RenderQuery {
    pub format: Option<String>,
    pub locale: Option<String>,
}
