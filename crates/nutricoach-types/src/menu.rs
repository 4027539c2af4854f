//! Weekly menu types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PhaseType, Recipe, RecipeId};

/// Unique menu week identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuWeekId(pub Uuid);

impl MenuWeekId {
    /// Create a new random menu week ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MenuWeekId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MenuWeekId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a recipe used in a menu slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRef {
    pub id: RecipeId,
    pub title: String,
}

impl From<&Recipe> for RecipeRef {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
        }
    }
}

/// Meals for one day of a menu week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDay {
    /// Day of the week, 1..=7
    pub day_number: u8,
    pub breakfast: Option<RecipeRef>,
    pub lunch: Option<RecipeRef>,
    pub dinner: Option<RecipeRef>,
}

impl MenuDay {
    /// Recipes planned for the day, breakfast first
    pub fn recipes(&self) -> impl Iterator<Item = &RecipeRef> {
        [&self.breakfast, &self.lunch, &self.dinner]
            .into_iter()
            .flatten()
    }
}

/// The menu of one week of one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuWeek {
    pub id: MenuWeekId,
    pub phase: PhaseType,
    /// Week within the phase, starting at 1
    pub week_number: u32,
    pub days: Vec<MenuDay>,
}

impl MenuWeek {
    /// Find the day with the given day number
    pub fn day(&self, day_number: u8) -> Option<&MenuDay> {
        self.days.iter().find(|d| d.day_number == day_number)
    }
}

/// Recipe titles for the meals of a single day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealsOfDay {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
    /// Snacks are not planned yet; always empty
    pub snack: Option<String>,
}

impl From<&MenuDay> for MealsOfDay {
    fn from(day: &MenuDay) -> Self {
        Self {
            breakfast: day.breakfast.as_ref().map(|r| r.title.clone()),
            lunch: day.lunch.as_ref().map(|r| r.title.clone()),
            dinner: day.dinner.as_ref().map(|r| r.title.clone()),
            snack: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str) -> Option<RecipeRef> {
        Some(RecipeRef {
            id: RecipeId::new(),
            title: title.into(),
        })
    }

    #[test]
    fn test_day_recipes_skip_empty_slots() {
        let day = MenuDay {
            day_number: 1,
            breakfast: recipe("Porridge"),
            lunch: None,
            dinner: recipe("Curry"),
        };
        let titles: Vec<_> = day.recipes().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Porridge", "Curry"]);

        let meals = MealsOfDay::from(&day);
        assert_eq!(meals.lunch, None);
        assert_eq!(meals.snack, None);
    }
}
