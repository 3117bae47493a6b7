//! # rvw-client
//!
//! HTTP client for the document-review backend.
//!
//! [`ApiClient`] wraps a `reqwest::Client`, attaches the bearer token read
//! from the shared [`KeyValueStore`] on every call, and normalizes error
//! bodies into [`ApiError`]. A `401` from any endpoint clears the stored
//! token and fires the injected [`LoginRedirect`] hook before the error is
//! returned. Each REST resource lives in its own module as an `impl ApiClient`
//! block.

pub mod auth;
pub mod chat;
pub mod health;
pub mod reviews;
pub mod templates;
pub mod upload;

mod error;
mod http;

pub use chat::ChatSession;
pub use error::ApiError;
pub use http::extract_detail;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, header};
use rvw_auth::{KeyValueStore, TOKEN_KEY};
use rvw_config::ApiConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Invoked after a `401` has cleared the stored token.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

impl<F: Fn() + Send + Sync> LoginRedirect for F {
    fn redirect_to_login(&self) {
        self();
    }
}

fn log_redirect() {
    tracing::warn!("session expired; sign in again with `rvw auth login`");
}

/// Client for the review backend's REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn KeyValueStore>,
    on_unauthorized: Arc<dyn LoginRedirect>,
}

impl ApiClient {
    /// Build a client for `base_url` (trailing slashes are ignored).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` fails
    /// to build (TLS backend initialization).
    pub fn new(
        base_url: &str,
        timeout: Duration,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("rvw/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
            on_unauthorized: Arc::new(log_redirect),
        })
    }

    /// Build a client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_config(
        config: &ApiConfig,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ApiError> {
        Self::new(
            config.normalized_base_url(),
            Duration::from_secs(config.request_timeout_secs),
            storage,
        )
    }

    /// Replace the hook fired after a `401`.
    #[must_use]
    pub fn with_login_redirect(mut self, hook: Arc<dyn LoginRedirect>) -> Self {
        self.on_unauthorized = hook;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Storage the bearer token is read from.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.storage
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a JSON request and decode the JSON response as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failure, [`ApiError::Api`] on a
    /// non-success status, and [`ApiError::Decode`] on an unexpected body.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.execute(self.build(method, path, body)).await?;
        http::decode(resp).await
    }

    /// Like [`Self::request`] but discards the response body.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.build(method, path, body)).await?;
        Ok(())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    fn build<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RequestBuilder {
        tracing::debug!(%method, path, "api request");
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.storage.get(TOKEN_KEY) {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let resp = builder.send().await?;
        match http::check_response(resp).await {
            Err(err) if err.is_unauthorized() => {
                self.force_logout();
                Err(err)
            }
            other => other,
        }
    }

    fn force_logout(&self) {
        tracing::warn!("backend rejected credentials; clearing stored token");
        if let Err(error) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(%error, "failed to clear stored token");
        }
        self.on_unauthorized.redirect_to_login();
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
