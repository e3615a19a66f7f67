//! Recipe controller: connects routes to recipe operations

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::query_dto::{PageQuery, RenderQuery};
use crate::api::dto::recipe_dto::RecipeCreateRequest;
use crate::app_state::AppState;
use crate::domain::response::envelope::ResponseEnvelope;
use crate::domain::response::format::OutputFormat;
use crate::domain::response::payload::Payload;
use crate::errors::{internal_error, AppError};

pub struct RecipeController;

impl RecipeController {
    /// Envelope pre-wired with the app config and the request's rendering
    /// controls.
    fn envelope(state: &AppState, render: &RenderQuery) -> ResponseEnvelope {
        let format = OutputFormat::resolve(
            render.format.as_deref(),
            state.response_config.default_format,
        );
        let mut envelope = ResponseEnvelope::new()
            .with_config(state.response_config.as_ref().clone())
            .with_format(format);
        if let Some(locale) = &render.locale {
            envelope = envelope.with_locale(locale.clone());
        }
        envelope
    }

    pub async fn list_recipes(
        State(state): State<AppState>,
        Query(page): Query<PageQuery>,
        Query(render): Query<RenderQuery>,
    ) -> Result<ResponseEnvelope, AppError> {
        let recipes = state.recipe_service.list().await?;
        let items = recipes.into_iter().map(Payload::model).collect();
        let mut envelope = Self::envelope(&state, &render);
        if render.format.is_none() {
            // Listings default to the compact representation
            envelope = envelope.with_model_format("recipe", OutputFormat::Compact);
        }
        Ok(envelope.with_paginated_payload(items, &page))
    }

    pub async fn get_recipe(
        State(state): State<AppState>,
        Path(id): Path<Uuid>,
        Query(render): Query<RenderQuery>,
    ) -> Result<ResponseEnvelope, AppError> {
        let recipe = state
            .recipe_service
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("recipe {id}")))?;
        Ok(Self::envelope(&state, &render).with_payload(Payload::model(recipe)))
    }

    pub async fn create_recipe(
        State(state): State<AppState>,
        Json(payload): Json<RecipeCreateRequest>,
    ) -> Result<ResponseEnvelope, AppError> {
        payload.validate()?;
        let recipe = state
            .recipe_service
            .create(payload)
            .await
            .map_err(internal_error)?;
        Ok(ResponseEnvelope::new()
            .with_config(state.response_config.as_ref().clone())
            .with_status(201)
            .with_header("location", format!("/api/v1/recipes/{}", recipe.id))
            .with_payload_entry("recipe", Payload::model(recipe))?
            .with_payload_entry("message", "recipe created")?)
    }
}
