//! Common test utilities for nutricoach-program integration tests

use chrono::NaiveDate;
use nutricoach_store::{CreateUser, MemoryRepositories, Repositories, UserRepository};
use nutricoach_types::{Role, UserId};

/// In-memory backend plus the trait-object handles services take
pub struct TestStore {
    pub memory: MemoryRepositories,
    pub repos: Repositories,
}

impl TestStore {
    pub fn new() -> Self {
        let memory = MemoryRepositories::new();
        let repos = Repositories::from(memory.clone());
        Self { memory, repos }
    }

    /// Register a user with an optional height
    #[allow(dead_code)]
    pub async fn user(&self, email: &str, height_cm: Option<u16>) -> UserId {
        self.memory
            .users
            .create(CreateUser {
                id: UserId::new(),
                email: email.to_string(),
                first_name: None,
                last_name: None,
                role: Role::User,
                height_cm,
            })
            .await
            .unwrap()
            .id
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
