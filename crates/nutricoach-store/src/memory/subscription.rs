//! In-memory subscription repository
//!
//! Subscriptions and their phase sessions live behind one `RwLock`, so a
//! subscription and its full timeline become visible in a single write and
//! the one-active-subscription check happens inside that same write.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use nutricoach_types::{
    PhaseSession, PhaseSessionId, Subscription, SubscriptionId, SubscriptionStatus,
    SubscriptionWithPhases, UserId,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::repo::{
    CreatePhaseSession, CreateSubscription, SubscriptionFilter, SubscriptionRepository,
};

#[derive(Default)]
struct Tables {
    subscriptions: HashMap<SubscriptionId, Subscription>,
    sessions: HashMap<SubscriptionId, Vec<PhaseSession>>,
    /// Insertion order, oldest first
    order: Vec<SubscriptionId>,
}

impl Tables {
    fn with_phases(&self, id: &SubscriptionId) -> Option<SubscriptionWithPhases> {
        let subscription = self.subscriptions.get(id)?.clone();
        let phase_sessions = self.sessions.get(id).cloned().unwrap_or_default();
        Some(SubscriptionWithPhases {
            subscription,
            phase_sessions,
        })
    }

    fn newest_first(&self) -> impl Iterator<Item = &Subscription> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.subscriptions.get(id))
    }

    fn active_for(&self, user_id: UserId) -> Option<&Subscription> {
        self.subscriptions
            .values()
            .find(|s| s.user_id == user_id && s.status == SubscriptionStatus::Active)
    }
}

/// In-memory subscription repository
#[derive(Default, Clone)]
pub struct MemorySubscriptionRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored phase sessions across all subscriptions
    pub async fn phase_session_count(&self) -> usize {
        self.tables.read().await.sessions.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl SubscriptionRepository for MemorySubscriptionRepository {
    async fn find_by_id(&self, id: SubscriptionId) -> StoreResult<Option<SubscriptionWithPhases>> {
        Ok(self.tables.read().await.with_phases(&id))
    }

    async fn find_active_by_user_id(
        &self,
        user_id: UserId,
    ) -> StoreResult<Option<SubscriptionWithPhases>> {
        let tables = self.tables.read().await;
        Ok(tables
            .active_for(user_id)
            .map(|s| s.id)
            .and_then(|id| tables.with_phases(&id)))
    }

    async fn list_by_user_id(&self, user_id: UserId) -> StoreResult<Vec<SubscriptionWithPhases>> {
        let tables = self.tables.read().await;
        Ok(tables
            .newest_first()
            .filter(|s| s.user_id == user_id)
            .filter_map(|s| tables.with_phases(&s.id))
            .collect())
    }

    async fn list(&self, filter: SubscriptionFilter) -> StoreResult<Vec<Subscription>> {
        let tables = self.tables.read().await;
        Ok(tables
            .newest_first()
            .filter(|s| filter.user_id.map_or(true, |u| s.user_id == u))
            .filter(|s| filter.status.map_or(true, |st| s.status == st))
            .cloned()
            .collect())
    }

    async fn create_with_phases(
        &self,
        sub: CreateSubscription,
        phases: Vec<CreatePhaseSession>,
    ) -> StoreResult<SubscriptionWithPhases> {
        let mut tables = self.tables.write().await;

        if sub.status == SubscriptionStatus::Active && tables.active_for(sub.user_id).is_some() {
            return Err(StoreError::ActiveSubscriptionExists {
                user_id: sub.user_id,
            });
        }
        if tables.subscriptions.contains_key(&sub.id) {
            return Err(StoreError::Conflict(format!(
                "subscription {} already exists",
                sub.id
            )));
        }

        let subscription = Subscription {
            id: sub.id,
            user_id: sub.user_id,
            subscription_type: sub.subscription_type,
            start_date: sub.start_date,
            end_date: sub.end_date,
            status: sub.status,
            created_at: Utc::now(),
        };

        let phase_sessions: Vec<PhaseSession> = phases
            .into_iter()
            .map(|p| PhaseSession {
                id: PhaseSessionId::new(),
                subscription_id: sub.id,
                phase: p.phase,
                start_date: p.start_date,
                end_date: p.end_date,
            })
            .collect();

        tables.subscriptions.insert(sub.id, subscription.clone());
        tables.sessions.insert(sub.id, phase_sessions.clone());
        tables.order.push(sub.id);

        tracing::debug!(
            subscription_id = %sub.id,
            phases = phase_sessions.len(),
            "Subscription stored"
        );

        Ok(SubscriptionWithPhases {
            subscription,
            phase_sessions,
        })
    }

    async fn update_status(
        &self,
        id: SubscriptionId,
        status: SubscriptionStatus,
        end_date: Option<NaiveDate>,
    ) -> StoreResult<Subscription> {
        let mut tables = self.tables.write().await;

        let user_id = tables
            .subscriptions
            .get(&id)
            .map(|s| s.user_id)
            .ok_or(StoreError::NotFound)?;

        if status == SubscriptionStatus::Active {
            if let Some(active) = tables.active_for(user_id) {
                if active.id != id {
                    return Err(StoreError::ActiveSubscriptionExists { user_id });
                }
            }
        }

        let sub = tables
            .subscriptions
            .get_mut(&id)
            .ok_or(StoreError::NotFound)?;
        sub.status = status;
        if let Some(end) = end_date {
            sub.end_date = end;
        }
        Ok(sub.clone())
    }

    async fn delete(&self, id: SubscriptionId) -> StoreResult<Subscription> {
        let mut tables = self.tables.write().await;
        let removed = tables.subscriptions.remove(&id).ok_or(StoreError::NotFound)?;
        tables.sessions.remove(&id);
        tables.order.retain(|s| *s != id);
        Ok(removed)
    }
}
