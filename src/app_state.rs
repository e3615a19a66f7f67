use std::sync::Arc;

use crate::domain::recipe::service::{InMemoryRecipeRepository, RecipeService};
use crate::domain::response::format::ResponseConfig;

#[derive(Clone)]
pub struct AppState {
    pub recipe_service: Arc<RecipeService<InMemoryRecipeRepository>>,
    pub response_config: Arc<ResponseConfig>,
}

pub fn build_app_state() -> AppState {
    AppState {
        recipe_service: Arc::new(RecipeService::new(InMemoryRecipeRepository::seeded())),
        response_config: Arc::new(ResponseConfig::from_env()),
    }
}
