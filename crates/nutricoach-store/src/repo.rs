//! Repository traits
//!
//! Define async repository interfaces for storage operations.

use async_trait::async_trait;
use chrono::NaiveDate;
use nutricoach_types::{
    Ingredient, MenuDay, MenuWeek, MenuWeekId, PhaseType, Recipe, RecipeId, Role, Subscription,
    SubscriptionId, SubscriptionStatus, SubscriptionType, SubscriptionWithPhases, User, UserId,
    WeighIn,
};
use std::sync::Arc;

use crate::error::StoreResult;
use crate::memory::MemoryRepositories;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Create a new user; email must be unique
    async fn create(&self, user: CreateUser) -> StoreResult<User>;

    /// List all users, oldest first
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Update user role
    async fn update_role(&self, id: UserId, role: Role) -> StoreResult<User>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub height_cm: Option<u16>,
}

/// Subscription repository trait
///
/// Phase sessions are owned by their subscription: they are written together
/// with it and removed with it.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Find a subscription by ID
    async fn find_by_id(&self, id: SubscriptionId) -> StoreResult<Option<SubscriptionWithPhases>>;

    /// Find the ACTIVE subscription of a user
    async fn find_active_by_user_id(
        &self,
        user_id: UserId,
    ) -> StoreResult<Option<SubscriptionWithPhases>>;

    /// All subscriptions of a user with their sessions, newest first
    async fn list_by_user_id(&self, user_id: UserId) -> StoreResult<Vec<SubscriptionWithPhases>>;

    /// Subscriptions matching a filter, newest first
    async fn list(&self, filter: SubscriptionFilter) -> StoreResult<Vec<Subscription>>;

    /// Atomically create a subscription and all of its phase sessions.
    ///
    /// Fails with `ActiveSubscriptionExists` if the new subscription is
    /// ACTIVE and the user already holds an ACTIVE one.
    async fn create_with_phases(
        &self,
        sub: CreateSubscription,
        phases: Vec<CreatePhaseSession>,
    ) -> StoreResult<SubscriptionWithPhases>;

    /// Update status, optionally moving the end date.
    ///
    /// Activating enforces the one-active-subscription rule.
    async fn update_status(
        &self,
        id: SubscriptionId,
        status: SubscriptionStatus,
        end_date: Option<NaiveDate>,
    ) -> StoreResult<Subscription>;

    /// Delete a subscription and its phase sessions
    async fn delete(&self, id: SubscriptionId) -> StoreResult<Subscription>;
}

/// Create subscription input
#[derive(Debug, Clone)]
pub struct CreateSubscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub subscription_type: SubscriptionType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: SubscriptionStatus,
}

/// Create phase session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePhaseSession {
    pub phase: PhaseType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Subscription list filter
#[derive(Debug, Clone, Default)]
pub struct SubscriptionFilter {
    pub user_id: Option<UserId>,
    pub status: Option<SubscriptionStatus>,
}

/// Weigh-in repository trait
#[async_trait]
pub trait WeighInRepository: Send + Sync {
    /// Record a weigh-in
    async fn create(&self, weigh_in: CreateWeighIn) -> StoreResult<WeighIn>;

    /// Weigh-ins in an inclusive date range, oldest first
    async fn list_by_user_id(
        &self,
        user_id: UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> StoreResult<Vec<WeighIn>>;

    /// The `limit` most recent weigh-ins, newest first
    async fn recent(&self, user_id: UserId, limit: usize) -> StoreResult<Vec<WeighIn>>;

    /// The earliest weigh-in
    async fn first(&self, user_id: UserId) -> StoreResult<Option<WeighIn>>;

    /// The latest weigh-in
    async fn latest(&self, user_id: UserId) -> StoreResult<Option<WeighIn>>;

    /// Minimum and maximum recorded weight
    async fn weight_range(&self, user_id: UserId) -> StoreResult<Option<(f64, f64)>>;
}

/// Create weigh-in input
#[derive(Debug, Clone)]
pub struct CreateWeighIn {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub note: Option<String>,
    pub photo_url: Option<String>,
}

/// Menu repository trait
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Find a menu week by ID
    async fn find_by_id(&self, id: MenuWeekId) -> StoreResult<Option<MenuWeek>>;

    /// Find the menu for a phase and week number
    async fn find_by_phase_and_week(
        &self,
        phase: PhaseType,
        week_number: u32,
    ) -> StoreResult<Option<MenuWeek>>;

    /// Create a menu week; (phase, week) must be unique
    async fn create(&self, week: CreateMenuWeek) -> StoreResult<MenuWeek>;

    /// Replace a menu week and all of its days
    async fn replace(&self, id: MenuWeekId, week: CreateMenuWeek) -> StoreResult<MenuWeek>;

    /// Delete a menu week and its days
    async fn delete(&self, id: MenuWeekId) -> StoreResult<MenuWeek>;
}

/// Create menu week input
#[derive(Debug, Clone)]
pub struct CreateMenuWeek {
    pub phase: PhaseType,
    pub week_number: u32,
    pub days: Vec<MenuDay>,
}

/// Recipe repository trait
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Find a recipe by ID
    async fn find_by_id(&self, id: RecipeId) -> StoreResult<Option<Recipe>>;

    /// All recipes, sorted by title
    async fn list(&self) -> StoreResult<Vec<Recipe>>;

    /// Recipes tagged with a phase, sorted by title
    async fn list_by_phase(&self, phase: PhaseType) -> StoreResult<Vec<Recipe>>;

    /// Create a recipe
    async fn create(&self, recipe: CreateRecipe) -> StoreResult<Recipe>;

    /// Apply a partial update
    async fn update(&self, id: RecipeId, update: UpdateRecipe) -> StoreResult<Recipe>;

    /// Delete a recipe
    async fn delete(&self, id: RecipeId) -> StoreResult<Recipe>;
}

/// Create recipe input
#[derive(Debug, Clone)]
pub struct CreateRecipe {
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub calories: Option<u32>,
    pub phase_tag: PhaseType,
}

/// Partial recipe update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateRecipe {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub steps: Option<Vec<String>>,
    pub calories: Option<u32>,
    pub phase_tag: Option<PhaseType>,
}

/// Repository handles shared by services
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub weigh_ins: Arc<dyn WeighInRepository>,
    pub menus: Arc<dyn MenuRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
}

impl From<MemoryRepositories> for Repositories {
    fn from(repos: MemoryRepositories) -> Self {
        Self {
            users: Arc::new(repos.users),
            subscriptions: Arc::new(repos.subscriptions),
            weigh_ins: Arc::new(repos.weigh_ins),
            menus: Arc::new(repos.menus),
            recipes: Arc::new(repos.recipes),
        }
    }
}
