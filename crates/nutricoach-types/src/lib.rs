//! NutriCoach Types - Shared domain types
//!
//! This crate contains domain types used across NutriCoach crates:
//! - User identity and roles
//! - Subscription plans, phases and phase sessions
//! - Weigh-ins, recipes and weekly menus

pub mod error;
pub mod menu;
pub mod phase;
pub mod recipe;
pub mod subscription;
pub mod user;
pub mod weigh_in;

pub use error::*;
pub use menu::*;
pub use phase::*;
pub use recipe::*;
pub use subscription::*;
pub use user::*;
pub use weigh_in::*;
