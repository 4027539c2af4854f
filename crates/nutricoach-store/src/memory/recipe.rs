//! In-memory recipe repository

use async_trait::async_trait;
use dashmap::DashMap;
use nutricoach_types::{PhaseType, Recipe, RecipeId};
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::repo::{CreateRecipe, RecipeRepository, UpdateRecipe};

/// In-memory recipe repository
#[derive(Default, Clone)]
pub struct MemoryRecipeRepository {
    recipes: Arc<DashMap<RecipeId, Recipe>>,
}

impl MemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_by_title(&self, keep: impl Fn(&Recipe) -> bool) -> Vec<Recipe> {
        let mut recipes: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|r| keep(r.value()))
            .map(|r| r.value().clone())
            .collect();
        recipes.sort_by(|a, b| a.title.cmp(&b.title));
        recipes
    }
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn find_by_id(&self, id: RecipeId) -> StoreResult<Option<Recipe>> {
        Ok(self.recipes.get(&id).map(|r| r.value().clone()))
    }

    async fn list(&self) -> StoreResult<Vec<Recipe>> {
        Ok(self.sorted_by_title(|_| true))
    }

    async fn list_by_phase(&self, phase: PhaseType) -> StoreResult<Vec<Recipe>> {
        Ok(self.sorted_by_title(|r| r.phase_tag == phase))
    }

    async fn create(&self, recipe: CreateRecipe) -> StoreResult<Recipe> {
        let row = Recipe {
            id: RecipeId::new(),
            title: recipe.title,
            description: recipe.description,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            calories: recipe.calories,
            phase_tag: recipe.phase_tag,
        };
        self.recipes.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: RecipeId, update: UpdateRecipe) -> StoreResult<Recipe> {
        let mut recipe = self.recipes.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(title) = update.title {
            recipe.title = title;
        }
        if let Some(description) = update.description {
            recipe.description = Some(description);
        }
        if let Some(ingredients) = update.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(steps) = update.steps {
            recipe.steps = steps;
        }
        if let Some(calories) = update.calories {
            recipe.calories = Some(calories);
        }
        if let Some(phase) = update.phase_tag {
            recipe.phase_tag = phase;
        }

        Ok(recipe.clone())
    }

    async fn delete(&self, id: RecipeId) -> StoreResult<Recipe> {
        self.recipes
            .remove(&id)
            .map(|(_, recipe)| recipe)
            .ok_or(StoreError::NotFound)
    }
}
