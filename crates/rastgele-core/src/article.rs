//! Random article endpoint client.
//!
//! The endpoint answers a plain GET with `{ "article_url": "..." }`. Failures
//! are returned to the caller, which shows a notification and clears its
//! loading indicator; nothing is retried here.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::util::{compact_text, is_http_url, normalize_text_option};

#[derive(Debug, Deserialize)]
struct ArticleResponse {
    #[serde(default)]
    article_url: Option<String>,
}

/// HTTP client for the random article endpoint.
#[derive(Debug, Clone)]
pub struct ArticleClient {
    endpoint: String,
    client: reqwest::Client,
}

impl ArticleClient {
    /// Builds a client for an explicit endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = normalize_endpoint(&endpoint.into())?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|error| Error::Request(format!("Failed to construct HTTP client: {error}")))?;
        Ok(Self { endpoint, client })
    }

    /// Returns the endpoint this client was configured with.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the endpoint for a random article URL.
    pub async fn random_article(&self) -> Result<String> {
        tracing::debug!("Requesting random article from {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: compact_text(&body),
            });
        }

        parse_article_response(&body)
    }
}

/// Extract the article URL from an endpoint response body.
pub fn parse_article_response(body: &str) -> Result<String> {
    let payload: ArticleResponse =
        serde_json::from_str(body).map_err(|error| Error::Decode(error.to_string()))?;
    let url = normalize_text_option(payload.article_url).ok_or(Error::MissingField("article_url"))?;
    if !is_http_url(&url) {
        return Err(Error::MissingField("article_url"));
    }
    Ok(url)
}

fn normalize_endpoint(raw: &str) -> Result<String> {
    let endpoint = raw.trim().to_string();
    if endpoint.is_empty() {
        return Err(Error::InvalidInput(
            "Article endpoint must not be empty".to_string(),
        ));
    }
    if !is_http_url(&endpoint) {
        return Err(Error::InvalidInput(
            "Article endpoint must include http:// or https://".to_string(),
        ));
    }
    Ok(endpoint)
}
