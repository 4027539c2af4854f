//! NutriCoach Store - Storage abstractions
//!
//! Async repository traits for NutriCoach services, plus an in-memory
//! backend used by the CLI and by tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use nutricoach_store::{MemoryRepositories, SubscriptionRepository};
//!
//! let repos = MemoryRepositories::new();
//!
//! let active = repos.subscriptions.find_active_by_user_id(user_id).await?;
//! ```

pub mod error;
pub mod memory;
pub mod repo;

pub use error::{StoreError, StoreResult};
pub use memory::{
    MemoryMenuRepository, MemoryRecipeRepository, MemoryRepositories,
    MemorySubscriptionRepository, MemoryUserRepository, MemoryWeighInRepository,
};
pub use repo::*;
