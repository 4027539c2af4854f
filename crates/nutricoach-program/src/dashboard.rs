//! Dashboard and admin overview

use chrono::NaiveDate;
use nutricoach_store::Repositories;
use nutricoach_types::{MealsOfDay, PhaseType, SubscriptionWithPhases, User, UserId, WeighInStats};
use serde::Serialize;

use crate::config::ProgramConfig;
use crate::error::ProgramResult;
use crate::menu::MenuService;
use crate::recipe::RecipeService;
use crate::shopping_list::ShoppingListService;
use crate::status::{resolve_status, ProgramStatus};
use crate::subscription::SubscriptionService;
use crate::user::UserService;
use crate::weigh_in::WeighInService;

/// Key figures shown on a user's dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardKpis {
    pub current_weight_kg: Option<f64>,
    /// First recorded weight minus the latest one
    pub total_weight_lost_kg: Option<f64>,
    pub current_phase: Option<PhaseType>,
    pub day_in_phase: Option<i64>,
    pub menu_of_the_day: Option<MealsOfDay>,
}

/// Everything an admin sees about one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserOverview {
    pub user: User,
    pub active_subscription: Option<SubscriptionWithPhases>,
    pub program_status: ProgramStatus,
    pub weight_stats: Option<WeighInStats>,
}

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    repos: Repositories,
    subscriptions: SubscriptionService,
    weigh_ins: WeighInService,
    menus: MenuService,
    recipes: RecipeService,
    shopping_lists: ShoppingListService,
    users: UserService,
}

impl DashboardService {
    /// Build the dashboard and the services it aggregates
    pub fn new(repos: Repositories, config: ProgramConfig) -> Self {
        let subscriptions = SubscriptionService::new(repos.clone(), config);
        let menus = MenuService::new(repos.clone(), subscriptions.clone());
        Self {
            weigh_ins: WeighInService::new(repos.clone()),
            recipes: RecipeService::new(repos.clone()),
            shopping_lists: ShoppingListService::new(repos.clone(), menus.clone()),
            users: UserService::new(repos.clone()),
            menus,
            subscriptions,
            repos,
        }
    }

    pub fn subscriptions(&self) -> &SubscriptionService {
        &self.subscriptions
    }

    pub fn weigh_ins(&self) -> &WeighInService {
        &self.weigh_ins
    }

    pub fn menus(&self) -> &MenuService {
        &self.menus
    }

    pub fn recipes(&self) -> &RecipeService {
        &self.recipes
    }

    pub fn shopping_lists(&self) -> &ShoppingListService {
        &self.shopping_lists
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    /// Dashboard figures for a user on `today`
    pub async fn dashboard_for_user(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> ProgramResult<DashboardKpis> {
        let (current_weight_kg, total_weight_lost_kg) = self.weigh_ins.progress(user_id).await?;
        let status = self
            .subscriptions
            .program_status_for_user(user_id, today)
            .await?;

        let menu_of_the_day = match (status.phase, status.day_in_phase) {
            (Some(phase), Some(day)) => self.menus.meals_for_day(phase, day).await?,
            _ => None,
        };

        Ok(DashboardKpis {
            current_weight_kg,
            total_weight_lost_kg,
            current_phase: status.phase,
            day_in_phase: status.day_in_phase,
            menu_of_the_day,
        })
    }

    /// Admin overview of a user; `None` if the user does not exist
    pub async fn user_overview(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> ProgramResult<Option<UserOverview>> {
        let Some(user) = self.repos.users.find_by_id(user_id).await? else {
            return Ok(None);
        };

        let active_subscription = self.subscriptions.find_active_for_user(user_id).await?;
        let program_status = resolve_status(active_subscription.as_ref(), today)?;
        let weight_stats = self.weigh_ins.stats(user_id).await?;

        Ok(Some(UserOverview {
            user,
            active_subscription,
            program_status,
            weight_stats,
        }))
    }
}
