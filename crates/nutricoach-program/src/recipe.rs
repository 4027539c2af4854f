//! Recipe catalogue service

use nutricoach_store::{CreateRecipe, Repositories, UpdateRecipe};
use nutricoach_types::{Ingredient, PhaseType, Recipe, RecipeId};

use crate::error::{ProgramError, ProgramResult};

/// New recipe input
pub type NewRecipe = CreateRecipe;

fn validate_title(title: &str) -> ProgramResult<()> {
    if title.trim().is_empty() {
        return Err(ProgramError::Validation("recipe title is empty".into()));
    }
    Ok(())
}

fn validate_ingredients(ingredients: &[Ingredient]) -> ProgramResult<()> {
    for item in ingredients {
        if item.ingredient.trim().is_empty() {
            return Err(ProgramError::Validation("ingredient name is empty".into()));
        }
        if !item.quantity.is_finite() || item.quantity < 0.0 {
            return Err(ProgramError::Validation(format!(
                "invalid quantity for {}: {}",
                item.ingredient, item.quantity
            )));
        }
    }
    Ok(())
}

/// Recipe service
#[derive(Clone)]
pub struct RecipeService {
    repos: Repositories,
}

impl RecipeService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Add a recipe to the catalogue
    pub async fn create(&self, recipe: NewRecipe) -> ProgramResult<Recipe> {
        validate_title(&recipe.title)?;
        validate_ingredients(&recipe.ingredients)?;

        let created = self.repos.recipes.create(recipe).await?;
        tracing::info!(
            recipe_id = %created.id,
            phase = %created.phase_tag,
            "Recipe created"
        );
        Ok(created)
    }

    /// All recipes sorted by title
    pub async fn list(&self) -> ProgramResult<Vec<Recipe>> {
        Ok(self.repos.recipes.list().await?)
    }

    /// Recipes for a phase sorted by title
    pub async fn list_by_phase(&self, phase: PhaseType) -> ProgramResult<Vec<Recipe>> {
        Ok(self.repos.recipes.list_by_phase(phase).await?)
    }

    pub async fn find(&self, id: RecipeId) -> ProgramResult<Recipe> {
        self.repos
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(ProgramError::RecipeNotFound)
    }

    /// Update the given fields of a recipe
    pub async fn update(&self, id: RecipeId, update: UpdateRecipe) -> ProgramResult<Recipe> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }
        if let Some(ingredients) = &update.ingredients {
            validate_ingredients(ingredients)?;
        }

        self.repos
            .recipes
            .update(id, update)
            .await
            .map_err(|e| ProgramError::not_found_as(e, ProgramError::RecipeNotFound))
    }

    pub async fn delete(&self, id: RecipeId) -> ProgramResult<Recipe> {
        let deleted = self
            .repos
            .recipes
            .delete(id)
            .await
            .map_err(|e| ProgramError::not_found_as(e, ProgramError::RecipeNotFound))?;
        tracing::info!(recipe_id = %id, "Recipe deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, quantity: f64) -> Ingredient {
        Ingredient {
            ingredient: name.into(),
            quantity,
            unit: "g".into(),
            category: String::new(),
        }
    }

    #[test]
    fn test_validate_ingredients() {
        let valid = [ingredient("Riz", 0.0), ingredient("Lentilles", 80.0)];
        assert!(validate_ingredients(&valid).is_ok());
        assert!(validate_ingredients(&[ingredient("Riz", -5.0)]).is_err());
        assert!(validate_ingredients(&[ingredient("Riz", f64::NAN)]).is_err());
        assert!(validate_ingredients(&[ingredient("  ", 10.0)]).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Soupe").is_ok());
        assert!(validate_title("   ").unwrap_err().is_validation());
    }
}
