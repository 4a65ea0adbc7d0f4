// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for fetching provider catalogs and translating them into source files.

use thiserror::Error;

/// Error type for every translator and for the HTTP layer underneath them.
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// A provider that needs credentials was configured without them.
    #[error("API key is required. Set the {env_var} environment variable.")]
    MissingApiKey { env_var: String },

    /// Transport-level HTTP failure (DNS, TLS, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status code.
    #[error("Request to {url} failed with HTTP status {status}")]
    Status { url: String, status: u16 },

    /// The provider answered with a body of an unexpected shape.
    #[error("Unexpected response from {source_name}: {reason}")]
    UnexpectedResponse { source_name: String, reason: String },

    /// The Nerd Fonts repository has no published release.
    #[error("No releases found at {url}")]
    NoReleases { url: String },

    /// The requested translator id is not known.
    #[error("Unknown translator: '{0}'")]
    UnknownTranslator(String),

    /// Writing the translated source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing or parsing JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
