//! Religion and festival tagging for contributed documents.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const UNKNOWN: &str = "Unknown";

/// Only the start of a document is sent for classification.
pub const PROMPT_TEXT_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
    pub religion: String,
    pub festival: String,
}

impl Categorization {
    pub fn unknown() -> Self {
        Self {
            religion: UNKNOWN.to_string(),
            festival: UNKNOWN.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CategorizeError {
    #[error("categorizer returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("categorizer request failed: {0}")]
    Transport(String),

    #[error("categorizer response had no content")]
    EmptyResponse,
}

impl From<reqwest::Error> for CategorizeError {
    fn from(err: reqwest::Error) -> Self {
        CategorizeError::Transport(err.to_string())
    }
}

#[async_trait]
pub trait DocumentCategorizer: Send + Sync {
    async fn categorize(&self, text: &str) -> Result<Categorization, CategorizeError>;
}

pub struct OpenAiCategorizer {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiCategorizer {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl DocumentCategorizer for OpenAiCategorizer {
    async fn categorize(&self, text: &str) -> Result<Categorization, CategorizeError> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt(text) }],
            "response_format": { "type": "json_object" },
        });

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| CategorizeError::Transport("invalid API key header".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CategorizeError::Upstream { status, body });
        }

        let completion: Value = resp.json().await?;
        let content = completion["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(CategorizeError::EmptyResponse)?;
        Ok(parse_categorization(content))
    }
}

/// Build the classification prompt from the first [`PROMPT_TEXT_CHARS`]
/// characters of `text`.
pub fn prompt(text: &str) -> String {
    let excerpt: String = text.chars().take(PROMPT_TEXT_CHARS).collect();
    format!(
        "Analyze the following ritual document and identify:\n\
         1. Which religion it belongs to (e.g., Hinduism, Buddhism, Christianity, etc.)\n\
         2. Which festival or occasion it is associated with\n\n\
         Text: {excerpt}\n\n\
         Return the results in JSON format with \"religion\" and \"festival\" fields."
    )
}

/// Read `religion` and `festival` from a JSON reply. Missing, blank or
/// non-string fields become `Unknown`.
pub fn parse_categorization(content: &str) -> Categorization {
    let Ok(value) = serde_json::from_str::<Value>(content) else {
        return Categorization::unknown();
    };
    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string()
    };
    Categorization {
        religion: field("religion"),
        festival: field("festival"),
    }
}
