//! Recipe lookup and creation over a pluggable repository

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use chrono::Utc;
use indexmap::indexmap;
use tracing::info;
use uuid::Uuid;

use crate::api::dto::recipe_dto::RecipeCreateRequest;
use crate::domain::recipe::model::{Recipe, RecipeTranslation};

pub trait RecipeRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Recipe>>;
    fn find(&self, id: Uuid) -> Result<Option<Recipe>>;
    fn insert(&self, recipe: Recipe) -> Result<()>;
}

pub struct InMemoryRecipeRepository {
    recipes: Mutex<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self {
            recipes: Mutex::new(Vec::new()),
        }
    }

    pub fn seeded() -> Self {
        let now = Utc::now();
        let recipes = vec![
            Recipe {
                id: Uuid::new_v4(),
                servings: 2,
                tags: vec!["fish".to_string(), "dinner".to_string()],
                default_locale: "en".to_string(),
                translations: indexmap! {
                    "en".to_string() => RecipeTranslation {
                        name: "Maple Glazed Salmon".to_string(),
                        description: Some("Pan-seared salmon with a maple glaze".to_string()),
                    },
                    "fr".to_string() => RecipeTranslation {
                        name: "Saumon laqué à l'érable".to_string(),
                        description: Some("Saumon poêlé, laqué à l'érable".to_string()),
                    },
                },
                created_at: now,
                updated_at: now,
            },
            Recipe {
                id: Uuid::new_v4(),
                servings: 4,
                tags: vec!["curry".to_string()],
                default_locale: "en".to_string(),
                translations: indexmap! {
                    "en".to_string() => RecipeTranslation {
                        name: "Butter Chicken".to_string(),
                        description: Some("Tomato and butter chicken curry".to_string()),
                    },
                },
                created_at: now,
                updated_at: now,
            },
        ];
        Self {
            recipes: Mutex::new(recipes),
        }
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, Vec<Recipe>>> {
        self.recipes.lock().map_err(|_| anyhow!("recipe store poisoned"))
    }
}

impl Default for InMemoryRecipeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeRepository for InMemoryRecipeRepository {
    fn list(&self) -> Result<Vec<Recipe>> {
        Ok(self.guard()?.clone())
    }

    fn find(&self, id: Uuid) -> Result<Option<Recipe>> {
        Ok(self.guard()?.iter().find(|recipe| recipe.id == id).cloned())
    }

    fn insert(&self, recipe: Recipe) -> Result<()> {
        self.guard()?.push(recipe);
        Ok(())
    }
}

pub struct RecipeService<R: RecipeRepository> {
    repo: R,
}

impl<R: RecipeRepository> RecipeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Recipe>> {
        self.repo.list()
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Recipe>> {
        self.repo.find(id)
    }

    pub async fn create(&self, req: RecipeCreateRequest) -> Result<Recipe> {
        let locale = req.locale.unwrap_or_else(|| "en".to_string());
        let now = Utc::now();
        let recipe = Recipe {
            id: Uuid::new_v4(),
            servings: req.servings,
            tags: req.tags.unwrap_or_default(),
            default_locale: locale.clone(),
            translations: indexmap! {
                locale => RecipeTranslation {
                    name: req.name,
                    description: req.description,
                },
            },
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(recipe.clone())?;
        info!(recipe_id = %recipe.id, "recipe created");
        Ok(recipe)
    }
}
