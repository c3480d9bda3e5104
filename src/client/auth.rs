//! Sign-in and password change.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Access, ApiClient};
use crate::errors::ApiError;
use crate::models::UserProfile;
use crate::session::codec;

/// Shortest password the backend accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: UserProfile,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Deserialize, Default)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    /// Exchange credentials for a session and store it.
    ///
    /// A token that is already unusable (unreadable or past `exp`) is not
    /// stored; the next route check would only tear it down again.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let request = self
            .request(Method::POST, "/api/auth/login", Access::Public)
            .json(&LoginRequest { email, password });
        let LoginResponse { token, user } = self.send_json(request).await?;

        if codec::is_expired(&token) {
            warn!("Login returned a token that is malformed or already expired");
            return Err(ApiError::Decode(
                "the server issued an unusable session token".to_string(),
            ));
        }

        self.guard().start_session(&token, &user)?;
        Ok(user)
    }

    /// Change the signed-in user's password. Returns the server's message.
    pub async fn change_password(
        &self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<String, ApiError> {
        validate_new_password(new, confirm)?;

        let request = self
            .request(Method::POST, "/api/auth/change-password", Access::Protected)
            .json(&ChangePasswordRequest {
                current_password: current,
                new_password: new,
            });
        let response: Option<MessageResponse> = self.send_json(request).await?;
        Ok(response
            .unwrap_or_default()
            .message
            .unwrap_or_else(|| "Password changed successfully".to_string()))
    }
}

fn validate_new_password(new: &str, confirm: &str) -> Result<(), ApiError> {
    if new != confirm {
        return Err(ApiError::Validation(
            "New passwords do not match".to_string(),
        ));
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "New password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
