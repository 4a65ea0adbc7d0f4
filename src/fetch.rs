// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! HTTP access to provider APIs.

use serde::de::DeserializeOwned;

use crate::config::HttpOptions;
use crate::errors::TranslatorError;

/// Thin wrapper over one shared `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(options: &HttpOptions) -> Result<Self, TranslatorError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout())
            .user_agent(options.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// Query parameters are kept out of error messages since they may carry
    /// credentials.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TranslatorError> {
        let body = self.get_text(url, query).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Like [`HttpFetcher::get_json`], but an empty body yields `None`.
    pub async fn get_json_optional<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, TranslatorError> {
        let body = self.get_text(url, query).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }

    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TranslatorError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslatorError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await.map_err(reqwest::Error::without_url)?)
    }
}
