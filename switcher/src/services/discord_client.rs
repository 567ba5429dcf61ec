//! Minimal Discord REST client
//!
//! Only the handful of endpoints the switcher needs. Configuration sources:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! - `DISCORD_TOKEN`: bot token (required)
//! - `DISCORD_API_BASE`: API root, defaults to [`DiscordClient::DEFAULT_API_BASE`]

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{SwitcherError, SwitcherResult};

pub struct DiscordClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl DiscordClient {
    pub const DEFAULT_API_BASE: &'static str = "https://discord.com/api/v10";
    const TOKEN_VAR: &'static str = "DISCORD_TOKEN";
    const API_BASE_VAR: &'static str = "DISCORD_API_BASE";

    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Build a client from the environment, loading `.env` first
    pub fn from_env() -> SwitcherResult<Self> {
        // Missing .env is fine; real environment variables still apply.
        let _ = dotenv::dotenv();

        let token = std::env::var(Self::TOKEN_VAR)
            .map_err(|_| SwitcherError::config(format!("{} must be set", Self::TOKEN_VAR)))?;
        let base_url =
            std::env::var(Self::API_BASE_VAR).unwrap_or_else(|_| Self::DEFAULT_API_BASE.to_string());

        Ok(Self::with_base_url(token, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> SwitcherResult<reqwest::Response> {
        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bot {}", self.token));
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    fn check(status: StatusCode, path: &str) -> SwitcherResult<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(SwitcherError::PlatformStatus {
                status: status.as_u16(),
                path: path.to_string(),
            })
        }
    }

    /// GET a JSON resource; `None` when the platform answers 404
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> SwitcherResult<Option<T>> {
        let response = self.send(Method::GET, path, None).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::check(response.status(), path)?;
        Ok(Some(response.json::<T>().await?))
    }

    pub async fn patch_json(&self, path: &str, body: &Value) -> SwitcherResult<()> {
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        Self::check(response.status(), path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> SwitcherResult<()> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::check(response.status(), path)
    }
}
