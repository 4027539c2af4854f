//! Weekly menu service

use chrono::NaiveDate;
use nutricoach_store::{CreateMenuWeek, Repositories};
use nutricoach_types::{MealsOfDay, MenuWeek, MenuWeekId, PhaseType, UserId};
use serde::Serialize;
use std::collections::HashSet;

use crate::error::{ProgramError, ProgramResult};
use crate::status::{week_of_day, weekday_of_day, ProgramStatus};
use crate::subscription::SubscriptionService;

/// New or replacement menu week
pub type NewMenuWeek = CreateMenuWeek;

/// Menu of the current week together with the status it was chosen for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentMenu {
    pub status: ProgramStatus,
    /// `None` when no menu is published for this phase and week
    pub menu: Option<MenuWeek>,
}

fn validate_week(week: &NewMenuWeek) -> ProgramResult<()> {
    if week.week_number < 1 {
        return Err(ProgramError::Validation("week number starts at 1".into()));
    }

    let mut seen = HashSet::new();
    for day in &week.days {
        if !(1..=7).contains(&day.day_number) {
            return Err(ProgramError::Validation(format!(
                "day number {} is outside 1..=7",
                day.day_number
            )));
        }
        if !seen.insert(day.day_number) {
            return Err(ProgramError::Validation(format!(
                "day number {} appears twice",
                day.day_number
            )));
        }
    }
    Ok(())
}

/// Menu service
#[derive(Clone)]
pub struct MenuService {
    repos: Repositories,
    subscriptions: SubscriptionService,
}

impl MenuService {
    pub fn new(repos: Repositories, subscriptions: SubscriptionService) -> Self {
        Self {
            repos,
            subscriptions,
        }
    }

    /// Publish a menu week
    pub async fn create_week(&self, week: NewMenuWeek) -> ProgramResult<MenuWeek> {
        validate_week(&week)?;
        let created = self.repos.menus.create(week).await?;
        tracing::info!(
            menu_week_id = %created.id,
            phase = %created.phase,
            week = created.week_number,
            "Menu week created"
        );
        Ok(created)
    }

    /// Replace a menu week and all of its days
    pub async fn replace_week(
        &self,
        id: MenuWeekId,
        week: NewMenuWeek,
    ) -> ProgramResult<MenuWeek> {
        validate_week(&week)?;
        self.repos
            .menus
            .replace(id, week)
            .await
            .map_err(|e| ProgramError::not_found_as(e, ProgramError::MenuWeekNotFound))
    }

    /// Menu week by ID
    pub async fn find_week(&self, id: MenuWeekId) -> ProgramResult<MenuWeek> {
        self.repos
            .menus
            .find_by_id(id)
            .await?
            .ok_or(ProgramError::MenuWeekNotFound)
    }

    /// Delete a menu week
    pub async fn delete_week(&self, id: MenuWeekId) -> ProgramResult<MenuWeek> {
        self.repos
            .menus
            .delete(id)
            .await
            .map_err(|e| ProgramError::not_found_as(e, ProgramError::MenuWeekNotFound))
    }

    /// Menu for a phase and week, days sorted by day number
    pub async fn find_by_phase_and_week(
        &self,
        phase: PhaseType,
        week_number: u32,
    ) -> ProgramResult<Option<MenuWeek>> {
        Ok(self
            .repos
            .menus
            .find_by_phase_and_week(phase, week_number)
            .await?)
    }

    /// Menu of the week the user is currently in.
    ///
    /// `None` without an active subscription or outside any phase.
    pub async fn current_menu_for_user(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> ProgramResult<Option<CurrentMenu>> {
        let status = self
            .subscriptions
            .program_status_for_user(user_id, today)
            .await?;

        let (Some(phase), Some(week)) = (status.phase, status.week_in_phase) else {
            return Ok(None);
        };
        let Ok(week) = u32::try_from(week) else {
            return Ok(None);
        };

        let menu = self.find_by_phase_and_week(phase, week).await?;
        Ok(Some(CurrentMenu { status, menu }))
    }

    /// Meals planned for a given day of a phase
    pub async fn meals_for_day(
        &self,
        phase: PhaseType,
        day_in_phase: i64,
    ) -> ProgramResult<Option<MealsOfDay>> {
        if day_in_phase < 1 {
            return Ok(None);
        }
        let (Ok(week), Ok(weekday)) = (
            u32::try_from(week_of_day(day_in_phase)),
            u8::try_from(weekday_of_day(day_in_phase)),
        ) else {
            return Ok(None);
        };

        Ok(self
            .find_by_phase_and_week(phase, week)
            .await?
            .and_then(|menu| menu.day(weekday).map(MealsOfDay::from)))
    }
}
