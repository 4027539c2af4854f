//! Recipe types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PhaseType;

/// Unique recipe identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub Uuid);

impl RecipeId {
    /// Create a new random recipe ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name
    pub ingredient: String,
    pub quantity: f64,
    /// Unit such as `g`, `ml` or `pièce`
    pub unit: String,
    /// Shopping aisle; empty means uncategorised
    #[serde(default)]
    pub category: String,
}

/// A recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub calories: Option<u32>,
    /// Phase the recipe is written for
    pub phase_tag: PhaseType,
}
