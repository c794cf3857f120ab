use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::{Config, PipelineConfig};
use crate::error::{truncate_body, Error, Result};
use crate::models::{BoardSnapshot, GraphQLResponse};
use crate::monday::paginator::Paginator;
use crate::monday::source::BoardSource;

pub struct MondayClient {
    client: Client,
    api_url: String,
    timeout: Duration,
}

impl MondayClient {
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_token.trim().is_empty() {
            return Err(Error::Auth("board API token is empty".to_string()));
        }

        let mut auth = header::HeaderValue::from_str(config.api_token.trim())?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            "api-version",
            header::HeaderValue::from_str(&config.api_version)?,
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("boardreport/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            timeout: config.request_timeout,
        })
    }

    /// Runs one GraphQL query and returns its `data` member.
    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let response = self
            .client
            .post(&self.api_url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::BoardApi(format!(
                "HTTP {} - {}",
                status,
                truncate_body(&body)
            )));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        let envelope: GraphQLResponse<T> = serde_json::from_str(&body).map_err(|e| {
            Error::ParseError(format!("{} in body: {}", e, truncate_body(&body)))
        })?;

        if !envelope.errors.is_empty() {
            let messages: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(Error::BoardApi(truncate_body(&messages.join("; "))));
        }
        if let Some(message) = envelope.error_message {
            return Err(Error::BoardApi(truncate_body(&message)));
        }

        envelope
            .data
            .ok_or_else(|| Error::ParseError("response has no data member".to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Network(err)
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl BoardSource for MondayClient {
    async fn fetch_board(&self, config: &PipelineConfig) -> Result<BoardSnapshot> {
        tracing::info!("Reading board: id={}", config.board_id);
        Paginator::new(self)
            .fetch_all(
                &config.board_id,
                &config.status_column_id,
                config.page_size,
                config.max_items,
            )
            .await
    }

    fn name(&self) -> &str {
        "monday.com"
    }
}
