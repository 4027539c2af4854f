//! NutriCoach Program - Coaching program logic
//!
//! Phase timeline generation for subscription plans, program status
//! resolution, and the subscription, weigh-in, menu, recipe, shopping list,
//! user and dashboard services built on top of them.
//!
//! # Example
//!
//! ```rust,ignore
//! use nutricoach_program::{ProgramConfig, SubscriptionService, AssignSubscriptionRequest};
//! use nutricoach_store::{MemoryRepositories, Repositories};
//!
//! let repos: Repositories = MemoryRepositories::new().into();
//! let config = ProgramConfig::new().with_final_phase(Some(PhaseType::Detox));
//! let subscriptions = SubscriptionService::new(repos, config);
//!
//! // Assign a plan; phase sessions are generated and stored with it
//! let sub = subscriptions
//!     .assign_subscription(AssignSubscriptionRequest {
//!         user_id,
//!         subscription_type: SubscriptionType::Vip12,
//!         start_date,
//!     })
//!     .await?;
//!
//! // Where is the user today?
//! let status = subscriptions.program_status_for_user(user_id, today).await?;
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod menu;
pub mod pattern;
pub mod recipe;
pub mod shopping_list;
pub mod status;
pub mod subscription;
pub mod timeline;
pub mod user;
pub mod weigh_in;

pub use config::ProgramConfig;
pub use dashboard::{DashboardKpis, DashboardService, UserOverview};
pub use error::{ProgramError, ProgramResult};
pub use menu::{CurrentMenu, MenuService, NewMenuWeek};
pub use pattern::{pattern_weeks, PatternEntry, PatternTable, FINAL_PHASE_WEEKS};
pub use recipe::{NewRecipe, RecipeService};
pub use shopping_list::{
    format_quantity, group_ingredients, Quantity, ShoppingListItem, ShoppingListService,
    WeeklyShoppingList, DEFAULT_CATEGORY,
};
pub use status::{resolve_status, validate_timeline, week_of_day, weekday_of_day, ProgramStatus};
pub use subscription::{AssignSubscriptionRequest, CreateSubscriptionRequest, SubscriptionService};
pub use timeline::{generate_timeline, Timeline, TimelineSession};
pub use user::{NewUser, UserDetails, UserService};
pub use weigh_in::{body_mass_index, period_from_query, NewWeighIn, WeighInService};
