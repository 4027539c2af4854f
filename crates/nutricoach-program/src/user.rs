//! Admin user management

use nutricoach_store::{CreateUser, Repositories};
use nutricoach_types::{Role, Subscription, User, UserId, WeighIn};
use serde::{Deserialize, Serialize};

use crate::error::{ProgramError, ProgramResult};

/// New user input
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    pub height_cm: Option<u16>,
}

/// A user with their subscription history and latest weigh-in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetails {
    pub user: User,
    /// Latest end date first
    pub subscriptions: Vec<Subscription>,
    pub latest_weigh_in: Option<WeighIn>,
}

/// User service
#[derive(Clone)]
pub struct UserService {
    repos: Repositories,
}

impl UserService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Register a user; the email must be unique
    pub async fn register(&self, input: NewUser) -> ProgramResult<User> {
        let email = input.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ProgramError::Validation(format!(
                "invalid email: {}",
                input.email
            )));
        }
        if input.height_cm == Some(0) {
            return Err(ProgramError::Validation("height must be positive".into()));
        }

        let user = self
            .repos
            .users
            .create(CreateUser {
                id: UserId::new(),
                email: email.to_string(),
                first_name: input.first_name,
                last_name: input.last_name,
                role: input.role,
                height_cm: input.height_cm,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// All users, oldest first
    pub async fn list(&self) -> ProgramResult<Vec<User>> {
        Ok(self.repos.users.list().await?)
    }

    pub async fn find_by_email(&self, email: &str) -> ProgramResult<Option<User>> {
        Ok(self.repos.users.find_by_email(email.trim()).await?)
    }

    /// Change a user's role
    pub async fn update_role(&self, id: UserId, role: Role) -> ProgramResult<User> {
        let user = self
            .repos
            .users
            .update_role(id, role)
            .await
            .map_err(|e| ProgramError::not_found_as(e, ProgramError::UserNotFound))?;

        tracing::info!(user_id = %id, role = %role, "User role updated");
        Ok(user)
    }

    /// User with subscriptions and latest weigh-in; `None` if absent
    pub async fn details(&self, id: UserId) -> ProgramResult<Option<UserDetails>> {
        let Some(user) = self.repos.users.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut subscriptions: Vec<Subscription> = self
            .repos
            .subscriptions
            .list_by_user_id(id)
            .await?
            .into_iter()
            .map(|s| s.subscription)
            .collect();
        subscriptions.sort_by(|a, b| b.end_date.cmp(&a.end_date));

        let latest_weigh_in = self.repos.weigh_ins.latest(id).await?;

        Ok(Some(UserDetails {
            user,
            subscriptions,
            latest_weigh_in,
        }))
    }
}
