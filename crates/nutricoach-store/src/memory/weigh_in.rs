//! In-memory weigh-in repository

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use nutricoach_types::{UserId, WeighIn, WeighInId};
use std::sync::Arc;

use crate::error::StoreResult;
use crate::repo::{CreateWeighIn, WeighInRepository};

/// In-memory weigh-in repository
///
/// Each user's weigh-ins are kept sorted by date (stable for equal dates).
#[derive(Default, Clone)]
pub struct MemoryWeighInRepository {
    by_user: Arc<DashMap<UserId, Vec<WeighIn>>>,
}

impl MemoryWeighInRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WeighInRepository for MemoryWeighInRepository {
    async fn create(&self, weigh_in: CreateWeighIn) -> StoreResult<WeighIn> {
        let row = WeighIn {
            id: WeighInId::new(),
            user_id: weigh_in.user_id,
            date: weigh_in.date,
            weight_kg: weigh_in.weight_kg,
            note: weigh_in.note,
            photo_url: weigh_in.photo_url,
        };

        let mut entries = self.by_user.entry(row.user_id).or_default();
        let pos = entries.partition_point(|w| w.date <= row.date);
        entries.insert(pos, row.clone());

        Ok(row)
    }

    async fn list_by_user_id(
        &self,
        user_id: UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> StoreResult<Vec<WeighIn>> {
        Ok(self
            .by_user
            .get(&user_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|w| from.map_or(true, |f| w.date >= f))
                    .filter(|w| to.map_or(true, |t| w.date <= t))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn recent(&self, user_id: UserId, limit: usize) -> StoreResult<Vec<WeighIn>> {
        Ok(self
            .by_user
            .get(&user_id)
            .map(|entries| entries.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn first(&self, user_id: UserId) -> StoreResult<Option<WeighIn>> {
        Ok(self
            .by_user
            .get(&user_id)
            .and_then(|entries| entries.first().cloned()))
    }

    async fn latest(&self, user_id: UserId) -> StoreResult<Option<WeighIn>> {
        Ok(self
            .by_user
            .get(&user_id)
            .and_then(|entries| entries.last().cloned()))
    }

    async fn weight_range(&self, user_id: UserId) -> StoreResult<Option<(f64, f64)>> {
        Ok(self.by_user.get(&user_id).and_then(|entries| {
            entries.iter().map(|w| w.weight_kg).fold(None, |acc, w| match acc {
                None => Some((w, w)),
                Some((min, max)) => Some((min.min(w), max.max(w))),
            })
        }))
    }
}
