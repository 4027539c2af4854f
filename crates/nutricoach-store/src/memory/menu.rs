//! In-memory menu repository

use async_trait::async_trait;
use nutricoach_types::{MenuWeek, MenuWeekId, PhaseType};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::repo::{CreateMenuWeek, MenuRepository};

#[derive(Default)]
struct MenuTables {
    weeks: HashMap<MenuWeekId, MenuWeek>,
    by_slot: HashMap<(PhaseType, u32), MenuWeekId>,
}

/// In-memory menu repository
#[derive(Default, Clone)]
pub struct MemoryMenuRepository {
    tables: Arc<RwLock<MenuTables>>,
}

impl MemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_days(mut week: CreateMenuWeek) -> CreateMenuWeek {
    week.days.sort_by_key(|d| d.day_number);
    week
}

#[async_trait]
impl MenuRepository for MemoryMenuRepository {
    async fn find_by_id(&self, id: MenuWeekId) -> StoreResult<Option<MenuWeek>> {
        Ok(self.tables.read().await.weeks.get(&id).cloned())
    }

    async fn find_by_phase_and_week(
        &self,
        phase: PhaseType,
        week_number: u32,
    ) -> StoreResult<Option<MenuWeek>> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_slot
            .get(&(phase, week_number))
            .and_then(|id| tables.weeks.get(id))
            .cloned())
    }

    async fn create(&self, week: CreateMenuWeek) -> StoreResult<MenuWeek> {
        let week = sorted_days(week);
        let mut tables = self.tables.write().await;

        let slot = (week.phase, week.week_number);
        if tables.by_slot.contains_key(&slot) {
            return Err(StoreError::Conflict(format!(
                "menu already exists for {} week {}",
                week.phase, week.week_number
            )));
        }

        let row = MenuWeek {
            id: MenuWeekId::new(),
            phase: week.phase,
            week_number: week.week_number,
            days: week.days,
        };
        tables.by_slot.insert(slot, row.id);
        tables.weeks.insert(row.id, row.clone());
        Ok(row)
    }

    async fn replace(&self, id: MenuWeekId, week: CreateMenuWeek) -> StoreResult<MenuWeek> {
        let week = sorted_days(week);
        let mut tables = self.tables.write().await;

        let old_slot = tables
            .weeks
            .get(&id)
            .map(|w| (w.phase, w.week_number))
            .ok_or(StoreError::NotFound)?;
        let new_slot = (week.phase, week.week_number);

        if new_slot != old_slot {
            if tables.by_slot.contains_key(&new_slot) {
                return Err(StoreError::Conflict(format!(
                    "menu already exists for {} week {}",
                    week.phase, week.week_number
                )));
            }
            tables.by_slot.remove(&old_slot);
            tables.by_slot.insert(new_slot, id);
        }

        let row = MenuWeek {
            id,
            phase: week.phase,
            week_number: week.week_number,
            days: week.days,
        };
        tables.weeks.insert(id, row.clone());
        Ok(row)
    }

    async fn delete(&self, id: MenuWeekId) -> StoreResult<MenuWeek> {
        let mut tables = self.tables.write().await;
        let removed = tables.weeks.remove(&id).ok_or(StoreError::NotFound)?;
        tables.by_slot.remove(&(removed.phase, removed.week_number));
        Ok(removed)
    }
}
