//! Weekly shopping list
//!
//! Built from the recipes of the user's current menu week. Ingredients with
//! the same name and unit (case-insensitive) are summed, grouped by
//! category, and large gram or millilitre amounts are shown in kg or l.

use chrono::NaiveDate;
use nutricoach_store::Repositories;
use nutricoach_types::{Ingredient, PhaseType, Recipe, RecipeId, UserId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::error::{ProgramError, ProgramResult};
use crate::menu::MenuService;

/// Category for ingredients without one
pub const DEFAULT_CATEGORY: &str = "Autres";

/// A quantity with its display unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    pub quantity: f64,
    pub unit: String,
}

/// One line of a shopping list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListItem {
    pub ingredient: String,
    pub quantity: f64,
    pub unit: String,
}

/// Shopping list for one menu week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyShoppingList {
    pub week: u32,
    pub phase: PhaseType,
    /// Items per category, categories sorted by name
    pub categories: BTreeMap<String, Vec<ShoppingListItem>>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert `g` and `ml` to `kg` and `l` from 1000 up, rounded to 2 decimals
pub fn format_quantity(quantity: f64, unit: &str) -> Quantity {
    if quantity.is_nan() {
        return Quantity {
            quantity,
            unit: unit.to_string(),
        };
    }

    let larger = match unit.to_lowercase().as_str() {
        "g" => Some("kg"),
        "ml" => Some("l"),
        _ => None,
    };

    match larger {
        Some(larger) if quantity >= 1000.0 => Quantity {
            quantity: round2(quantity / 1000.0),
            unit: larger.to_string(),
        },
        _ => Quantity {
            quantity: round2(quantity),
            unit: unit.to_string(),
        },
    }
}

/// Sum ingredients by name and unit, then group them by category.
///
/// The first occurrence of an ingredient decides its spelling and category.
pub fn group_ingredients<'a>(
    ingredients: impl IntoIterator<Item = &'a Ingredient>,
) -> BTreeMap<String, Vec<ShoppingListItem>> {
    let mut merged: Vec<Ingredient> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for item in ingredients {
        let key = (item.ingredient.to_lowercase(), item.unit.to_lowercase());
        match index.get(&key) {
            Some(&i) => merged[i].quantity += item.quantity,
            None => {
                index.insert(key, merged.len());
                merged.push(item.clone());
            }
        }
    }

    let mut categories: BTreeMap<String, Vec<ShoppingListItem>> = BTreeMap::new();
    for item in merged {
        let category = if item.category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            item.category
        };
        let formatted = format_quantity(item.quantity, &item.unit);
        categories.entry(category).or_default().push(ShoppingListItem {
            ingredient: item.ingredient,
            quantity: formatted.quantity,
            unit: formatted.unit,
        });
    }
    categories
}

/// Shopping list service
#[derive(Clone)]
pub struct ShoppingListService {
    repos: Repositories,
    menus: MenuService,
}

impl ShoppingListService {
    pub fn new(repos: Repositories, menus: MenuService) -> Self {
        Self { repos, menus }
    }

    /// Shopping list for the menu week the user is in on `today`.
    ///
    /// Fails with `MenuWeekNotFound` when there is no current menu.
    pub async fn weekly_for_user(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> ProgramResult<WeeklyShoppingList> {
        let menu = self
            .menus
            .current_menu_for_user(user_id, today)
            .await?
            .and_then(|current| current.menu)
            .ok_or(ProgramError::MenuWeekNotFound)?;

        let mut recipes: HashMap<RecipeId, Option<Recipe>> = HashMap::new();
        let mut ingredients = Vec::new();

        for recipe_ref in menu.days.iter().flat_map(|day| day.recipes()) {
            if !recipes.contains_key(&recipe_ref.id) {
                let recipe = self.repos.recipes.find_by_id(recipe_ref.id).await?;
                if recipe.is_none() {
                    tracing::warn!(
                        recipe_id = %recipe_ref.id,
                        menu_week_id = %menu.id,
                        "Menu references a missing recipe"
                    );
                }
                recipes.insert(recipe_ref.id, recipe);
            }
            if let Some(Some(recipe)) = recipes.get(&recipe_ref.id) {
                ingredients.extend(recipe.ingredients.iter().cloned());
            }
        }

        tracing::debug!(
            user_id = %user_id,
            week = menu.week_number,
            ingredients = ingredients.len(),
            "Shopping list built"
        );

        Ok(WeeklyShoppingList {
            week: menu.week_number,
            phase: menu.phase,
            categories: group_ingredients(&ingredients),
        })
    }
}
