// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the answer-generation service, without a trailing slash.
    pub base_url: String,
    /// User identifier sent with queries and feedback.
    ///
    /// The backend keys stored feedback on `(user_id, response_id)`, so two
    /// people sharing an id would overwrite each other's ratings.
    pub user_id: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            user_id: "anonymous".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Use plain ASCII borders and markers instead of unicode glyphs.
    #[serde(default)]
    pub ascii: bool,
}
