use std::sync::Arc;

use charades_domain::{User, Username};

use super::SessionError;
use crate::infrastructure::ports::UserRepo;

/// Register (or fetch) a user by name. First registration wins.
pub struct RegisterUser {
    users: Arc<dyn UserRepo>,
}

impl RegisterUser {
    pub fn new(users: Arc<dyn UserRepo>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, username: &str) -> Result<User, SessionError> {
        let username = Username::new(username).map_err(SessionError::InvalidUsername)?;
        let user = self.users.get_or_create(&username).await?;
        tracing::debug!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }
}
