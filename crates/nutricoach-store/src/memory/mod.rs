//! In-memory repository implementations

mod menu;
mod recipe;
mod subscription;
mod user;
mod weigh_in;

pub use menu::MemoryMenuRepository;
pub use recipe::MemoryRecipeRepository;
pub use subscription::MemorySubscriptionRepository;
pub use user::MemoryUserRepository;
pub use weigh_in::MemoryWeighInRepository;

/// All repositories bundled together
#[derive(Clone, Default)]
pub struct MemoryRepositories {
    pub users: MemoryUserRepository,
    pub subscriptions: MemorySubscriptionRepository,
    pub weigh_ins: MemoryWeighInRepository,
    pub menus: MemoryMenuRepository,
    pub recipes: MemoryRecipeRepository,
}

impl MemoryRepositories {
    /// Create an empty set of repositories
    pub fn new() -> Self {
        Self::default()
    }
}
