//! In-memory user repository

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use nutricoach_types::{Role, User, UserId};
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::repo::{CreateUser, UserRepository};

/// In-memory user repository
#[derive(Default, Clone)]
pub struct MemoryUserRepository {
    users: Arc<DashMap<UserId, User>>,
    by_email: Arc<DashMap<String, UserId>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let key = email.to_lowercase();
        Ok(self
            .by_email
            .get(&key)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> StoreResult<User> {
        // Email index entry first, then the id slot; both stay locked until insert
        match self.by_email.entry(user.email.to_lowercase()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                "email already registered: {}",
                user.email
            ))),
            Entry::Vacant(email_slot) => match self.users.entry(user.id) {
                Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                    "user {} already exists",
                    user.id
                ))),
                Entry::Vacant(id_slot) => {
                    let row = User {
                        id: user.id,
                        email: user.email,
                        first_name: user.first_name,
                        last_name: user.last_name,
                        role: user.role,
                        height_cm: user.height_cm,
                        created_at: Utc::now(),
                    };
                    id_slot.insert(row.clone());
                    email_slot.insert(row.id);
                    Ok(row)
                }
            },
        }
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|r| r.value().clone()).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.email.cmp(&b.email)));
        Ok(users)
    }

    async fn update_role(&self, id: UserId, role: Role) -> StoreResult<User> {
        let mut user = self.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.role = role;
        Ok(user.clone())
    }
}
