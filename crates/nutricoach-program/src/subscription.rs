//! Subscription service
//!
//! Creation and admin management of subscriptions. Creating a subscription
//! generates its phase timeline and stores both in one atomic write; the
//! generated end date replaces whatever end date the caller supplied.

use chrono::{Days, NaiveDate};
use nutricoach_store::{CreateSubscription, Repositories, SubscriptionFilter};
use nutricoach_types::{
    Subscription, SubscriptionId, SubscriptionStatus, SubscriptionType, SubscriptionWithPhases,
    UserId,
};
use serde::Deserialize;
use std::time::Instant;

use crate::config::ProgramConfig;
use crate::error::{ProgramError, ProgramResult};
use crate::status::{resolve_status, ProgramStatus};
use crate::timeline::generate_timeline;

/// Create a subscription with an explicit end date
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Admin assignment of a plan; the end date is derived from the plan
#[derive(Debug, Clone, Deserialize)]
pub struct AssignSubscriptionRequest {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,
    pub start_date: NaiveDate,
}

/// Subscription service
#[derive(Clone)]
pub struct SubscriptionService {
    repos: Repositories,
    config: ProgramConfig,
}

impl SubscriptionService {
    /// Create a new subscription service
    pub fn new(repos: Repositories, config: ProgramConfig) -> Self {
        Self { repos, config }
    }

    /// Create a subscription and its phase sessions.
    pub async fn create_subscription(
        &self,
        req: CreateSubscriptionRequest,
    ) -> ProgramResult<SubscriptionWithPhases> {
        if req.end_date < req.start_date {
            return Err(ProgramError::Validation(format!(
                "end date {} is before start date {}",
                req.end_date, req.start_date
            )));
        }

        self.repos
            .users
            .find_by_id(req.user_id)
            .await?
            .ok_or(ProgramError::UserNotFound)?;

        let timeline = generate_timeline(
            &self.config.patterns,
            req.subscription_type,
            req.start_date,
            req.end_date,
            self.config.final_phase_vippp,
        )?;

        if timeline.is_empty() {
            tracing::warn!(
                subscription_type = %req.subscription_type,
                "No phase pattern for subscription type, end date left unchanged"
            );
        } else if timeline.end_date != req.end_date {
            tracing::debug!(
                requested = %req.end_date,
                computed = %timeline.end_date,
                "Correcting subscription end date from phase timeline"
            );
        }

        let created = self
            .repos
            .subscriptions
            .create_with_phases(
                CreateSubscription {
                    id: SubscriptionId::new(),
                    user_id: req.user_id,
                    subscription_type: req.subscription_type,
                    start_date: req.start_date,
                    end_date: timeline.end_date,
                    status: SubscriptionStatus::Active,
                },
                timeline.sessions.into_iter().map(Into::into).collect(),
            )
            .await?;

        metrics::counter!(
            "program_subscriptions_created_total",
            "type" => req.subscription_type.code()
        )
        .increment(1);

        tracing::info!(
            user_id = %req.user_id,
            subscription_id = %created.subscription.id,
            subscription_type = %req.subscription_type,
            phases = created.phase_sessions.len(),
            "Subscription created"
        );

        Ok(created)
    }

    /// Assign a plan to a user who has no ACTIVE subscription.
    pub async fn assign_subscription(
        &self,
        req: AssignSubscriptionRequest,
    ) -> ProgramResult<SubscriptionWithPhases> {
        self.repos
            .users
            .find_by_id(req.user_id)
            .await?
            .ok_or(ProgramError::UserNotFound)?;

        if self
            .repos
            .subscriptions
            .find_active_by_user_id(req.user_id)
            .await?
            .is_some()
        {
            return Err(ProgramError::ActiveSubscriptionExists {
                user_id: req.user_id,
            });
        }

        // Last day of the plan; replaced by the generated end date on creation
        let days = u64::from(req.subscription_type.duration_weeks()) * 7 - 1;
        let end_date = req
            .start_date
            .checked_add_days(Days::new(days))
            .ok_or(ProgramError::DateOutOfRange(req.start_date))?;

        self.create_subscription(CreateSubscriptionRequest {
            user_id: req.user_id,
            subscription_type: req.subscription_type,
            start_date: req.start_date,
            end_date,
        })
        .await
    }

    /// All subscriptions of a user with their phases, newest first
    pub async fn list_for_user(&self, user_id: UserId) -> ProgramResult<Vec<SubscriptionWithPhases>> {
        Ok(self.repos.subscriptions.list_by_user_id(user_id).await?)
    }

    /// Subscriptions matching a filter, newest first
    pub async fn list(&self, filter: SubscriptionFilter) -> ProgramResult<Vec<Subscription>> {
        Ok(self.repos.subscriptions.list(filter).await?)
    }

    /// The ACTIVE subscription of a user
    pub async fn find_active_for_user(
        &self,
        user_id: UserId,
    ) -> ProgramResult<Option<SubscriptionWithPhases>> {
        Ok(self.repos.subscriptions.find_active_by_user_id(user_id).await?)
    }

    /// Change a subscription's status.
    ///
    /// Ending a subscription whose end date is still ahead moves the end date
    /// to `today`.
    pub async fn update_status(
        &self,
        id: SubscriptionId,
        status: SubscriptionStatus,
        today: NaiveDate,
    ) -> ProgramResult<Subscription> {
        let current = self
            .repos
            .subscriptions
            .find_by_id(id)
            .await?
            .ok_or(ProgramError::SubscriptionNotFound)?;

        let end_date = (status == SubscriptionStatus::Ended
            && current.subscription.end_date > today)
            .then_some(today);

        let updated = self
            .repos
            .subscriptions
            .update_status(id, status, end_date)
            .await
            .map_err(|e| ProgramError::not_found_as(e, ProgramError::SubscriptionNotFound))?;

        tracing::info!(subscription_id = %id, status = %status, "Subscription status updated");
        Ok(updated)
    }

    /// Delete a subscription and its phase sessions
    pub async fn delete_subscription(&self, id: SubscriptionId) -> ProgramResult<Subscription> {
        let deleted = self
            .repos
            .subscriptions
            .delete(id)
            .await
            .map_err(|e| ProgramError::not_found_as(e, ProgramError::SubscriptionNotFound))?;

        tracing::info!(subscription_id = %id, user_id = %deleted.user_id, "Subscription deleted");
        Ok(deleted)
    }

    /// Program status of a user on `today`
    pub async fn program_status_for_user(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> ProgramResult<ProgramStatus> {
        let start = Instant::now();

        let active = self.find_active_for_user(user_id).await?;
        let result = resolve_status(active.as_ref(), today);

        if let Err(ref e) = result {
            tracing::error!(user_id = %user_id, error = %e, "Program status could not be resolved");
        }
        metrics::histogram!(
            "program_operation_duration_seconds",
            "operation" => "program_status",
            "result" => if result.is_ok() { "ok" } else { "err" }
        )
        .record(start.elapsed().as_secs_f64());

        result
    }
}

impl std::fmt::Debug for SubscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
