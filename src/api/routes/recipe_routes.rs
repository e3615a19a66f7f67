//! Recipe routes (e.g., /api/v1/recipes/*)

use axum::{routing::get, Router};

use crate::api::controller::recipe::RecipeController;
use crate::app_state::AppState;

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(RecipeController::list_recipes).post(RecipeController::create_recipe),
        )
        .route("/{id}", get(RecipeController::get_recipe))
}
