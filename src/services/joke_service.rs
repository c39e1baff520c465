use std::time::Duration;

use crate::{
    models::{JokeData, JokeEnvelope},
    utils::AppError,
};

/// Client for the joke API (`{type, value: {id, joke, categories}}`)
#[derive(Clone)]
pub struct JokeClient {
    http: reqwest::Client,
    base_url: String,
}

impl JokeClient {
    /// `timeout` of None leaves requests unbounded
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `url` and decodes the joke envelope
    pub async fn fetch_joke(&self, url: &str) -> Result<JokeData, AppError> {
        log::debug!("🃏 Fetching joke: {}", url);

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to reach joke API: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Joke API error: {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read joke API response: {}", e)))?;

        let envelope: JokeEnvelope = serde_json::from_slice(&body)
            .map_err(|e| AppError::Decode(format!("Failed to parse joke API response: {}", e)))?;

        Ok(envelope.value)
    }

    pub async fn fetch_random_joke(&self) -> Result<JokeData, AppError> {
        self.fetch_joke(&self.base_url).await
    }

    /// Joke with the given names substituted by the API
    pub async fn fetch_personal_joke(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<JokeData, AppError> {
        let url = self.personal_joke_url(first_name, last_name);
        self.fetch_joke(&url).await
    }

    pub fn personal_joke_url(&self, first_name: &str, last_name: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}firstName={}&lastName={}",
            self.base_url,
            separator,
            urlencoding::encode(first_name),
            urlencoding::encode(last_name)
        )
    }
}
