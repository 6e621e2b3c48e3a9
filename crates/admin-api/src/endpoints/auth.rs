use admin_core::models::{LoginRequest, LoginResponse};
use admin_core::session::CurrentUser;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;

pub struct Auth<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }
}

impl Auth<'_> {
    /// `POST /api/auth/login`. Does not touch the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.client.post("/api/auth/login", &body).await
    }

    /// Log in and store the returned token and user in the session.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<CurrentUser, ApiError> {
        let response = self.login(username, password).await?;
        let user = response.to_current_user();
        self.client
            .session()
            .set_session(&response.token, &user)
            .map_err(|e| ApiError::local(format!("Failed to store session: {e}")))?;
        info!(user = %user.username, "signed in");
        Ok(user)
    }

    /// Forget the stored session.
    pub fn sign_out(&self) {
        self.client.session().clear();
    }
}
