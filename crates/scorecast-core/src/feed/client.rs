//! HTTP client for the competition results feed.
//!
//! This module provides the `FeedClient` struct for fetching scored
//! events and authenticating against the feed's admin endpoints.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::SessionData;
use crate::models::EventRecord;

use super::FeedError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow feed responses while failing fast enough for a live board.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
/// 3 retries with exponential backoff usually succeeds without excessive delay.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
/// 1 second is polite to the server while not making users wait too long.
const INITIAL_BACKOFF_MS: u64 = 1000;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Client for the results feed.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct FeedClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl FeedClient {
    /// Create a new feed client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Authenticate against the feed and return session data
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<SessionData> {
        let url = format!("{}/auth/login", self.base_url);

        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send login request")?;

        let response = Self::check_response(response).await?;

        let login: LoginResponse = response.json().await.context("Failed to parse login response")?;

        Ok(SessionData::new(login.token, username.to_string()))
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(response: reqwest::Response) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            // Rate limited - signal to retry
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(FeedError::from_status(status, &body).into())
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(FeedError::from_status(status, &body).into())
        }
    }

    /// Fetch the full event list from the feed
    pub async fn fetch_events(&self) -> Result<Vec<EventRecord>> {
        let url = format!("{}/events", self.base_url);
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(&url)
                .headers(self.auth_headers()?)
                .send()
                .await
                .with_context(|| format!("Failed to send GET request to {}", url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    let text = response.text().await?;
                    debug!("Events response received");
                    return Ok(Self::parse_events(&text)?);
                }
                None => {
                    // Rate limited
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(FeedError::RateLimited.into());
                    }
                    warn!(url = %url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2; // Exponential backoff
                }
            }
        }
    }

    /// Parse an events payload: a bare array, or one wrapped in a
    /// common envelope field. A body that is not recognisably an event
    /// list is an error, never an empty list - an empty board must only
    /// come from a feed that actually said so.
    fn parse_events(text: &str) -> Result<Vec<EventRecord>, FeedError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| FeedError::InvalidResponse(format!("Payload is not JSON: {}", e)))?;

        let list = match value {
            serde_json::Value::Array(_) => value,
            serde_json::Value::Object(mut map) => map
                .remove("events")
                .or_else(|| map.remove("data"))
                .ok_or_else(|| {
                    FeedError::InvalidResponse("Payload carries no event list".to_string())
                })?,
            _ => {
                return Err(FeedError::InvalidResponse(
                    "Payload is not an event list".to_string(),
                ))
            }
        };

        serde_json::from_value(list)
            .map_err(|e| FeedError::InvalidResponse(format!("Malformed event record: {}", e)))
    }
}
