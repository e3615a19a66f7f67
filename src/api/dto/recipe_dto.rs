//! Recipe API DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create payload for a recipe. The optional `locale` names the language the
/// submitted name/description are written in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeCreateRequest {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 24, message = "servings must be between 1 and 24"))]
    pub servings: u32,
    pub tags: Option<Vec<String>>,
    #[validate(length(min = 2, max = 8, message = "locale must be a BCP 47 tag"))]
    pub locale: Option<String>,
}
