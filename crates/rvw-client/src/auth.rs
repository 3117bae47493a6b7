//! `/api/auth/*` endpoints.

use async_trait::async_trait;
use rvw_auth::{AuthError, IdentityProvider};
use rvw_core::entities::{TokenResponse, UserIdentity};
use rvw_core::responses::GoogleAuthorizeUrl;
use serde::Serialize;

use crate::{ApiClient, ApiError};

#[derive(Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Create an account and receive a session token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a rejected registration.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<TokenResponse, ApiError> {
        self.post(
            "/api/auth/register",
            &RegisterBody {
                email,
                password,
                name,
            },
        )
        .await
    }

    /// Exchange credentials for a session token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        self.post("/api/auth/login", &LoginBody { email, password })
            .await
    }

    /// Identity behind the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; a rejected token surfaces as a `401`.
    pub async fn me(&self) -> Result<UserIdentity, ApiError> {
        self.get("/api/auth/me").await
    }

    /// URL that starts the Google sign-in flow in a browser.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or server failure.
    pub async fn google_authorize_url(&self) -> Result<String, ApiError> {
        let resp: GoogleAuthorizeUrl = self.get("/api/auth/google/authorize").await?;
        Ok(resp.authorization_url)
    }
}

#[async_trait]
impl IdentityProvider for ApiClient {
    async fn current_user(&self) -> Result<UserIdentity, AuthError> {
        self.me()
            .await
            .map_err(|e| AuthError::Identity(e.to_string()))
    }
}
