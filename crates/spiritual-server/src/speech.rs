//! Text-to-speech for Priest Mode narration.
//!
//! [`ElevenLabsClient`] talks to the ElevenLabs REST API. Synthesized clips are
//! kept in a bounded [`SpeechCache`] so stepping back and forth through a
//! ritual does not request the same audio twice.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dashmap::DashMap;
use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;

pub const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io/v1";
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.75,
            similarity_boost: 0.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_id: String,
    pub settings: VoiceSettings,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            settings: VoiceSettings::default(),
        }
    }

    fn cache_key(&self) -> String {
        format!(
            "{}|{:.2}|{:.2}|{}",
            self.voice_id, self.settings.stability, self.settings.similarity_boost, self.text
        )
    }
}

#[derive(Debug, Error)]
pub enum SpeechError {
    /// The provider answered with a non-success status.
    #[error("speech provider returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("speech request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        SpeechError::Transport(err.to_string())
    }
}

/// Turns text into MPEG audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError>;
}

pub struct ElevenLabsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ElevenLabsClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn headers(&self) -> Result<HeaderMap, SpeechError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("audio/mpeg"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "xi-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|_| SpeechError::Transport("invalid API key header".to_string()))?,
        );
        Ok(headers)
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError> {
        let url = format!("{}/text-to-speech/{}", self.base_url, request.voice_id);
        let body = json!({
            "text": request.text,
            "model_id": DEFAULT_MODEL_ID,
            "voice_settings": {
                "stability": request.settings.stability,
                "similarity_boost": request.settings.similarity_boost,
            }
        });

        let resp = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, voice = %request.voice_id, "ElevenLabs API error");
            return Err(SpeechError::Upstream { status, body });
        }

        let audio = resp.bytes().await?;
        tracing::debug!(bytes = audio.len(), voice = %request.voice_id, "speech synthesized");
        Ok(audio.to_vec())
    }
}

/// FIFO cache of synthesized clips, bounded by entry count and total bytes.
pub struct SpeechCache {
    entries: DashMap<String, Arc<Vec<u8>>>,
    order: Mutex<CacheOrder>,
    capacity: usize,
    max_bytes: usize,
}

#[derive(Default)]
struct CacheOrder {
    keys: VecDeque<String>,
    bytes: usize,
}

impl SpeechCache {
    /// A capacity or byte budget of zero disables caching.
    pub fn new(capacity: usize, max_bytes: usize) -> Self {
        Self {
            entries: DashMap::new(),
            order: Mutex::new(CacheOrder::default()),
            capacity,
            max_bytes,
        }
    }

    pub fn get(&self, request: &SpeechRequest) -> Option<Arc<Vec<u8>>> {
        self.entries
            .get(&request.cache_key())
            .map(|entry| entry.clone())
    }

    /// Clips larger than the whole byte budget are not cached.
    pub fn insert(&self, request: &SpeechRequest, audio: Arc<Vec<u8>>) {
        if self.capacity == 0 || audio.len() > self.max_bytes {
            return;
        }
        let key = request.cache_key();
        let mut order = self.order.lock();
        order.bytes += audio.len();
        match self.entries.insert(key.clone(), audio) {
            Some(previous) => order.bytes -= previous.len(),
            None => order.keys.push_back(key),
        }
        while order.keys.len() > self.capacity || order.bytes > self.max_bytes {
            let Some(oldest) = order.keys.pop_front() else {
                break;
            };
            if let Some((_, evicted)) = self.entries.remove(&oldest) {
                order.bytes -= evicted.len();
            }
        }
    }

    /// Total size of the cached clips.
    pub fn bytes(&self) -> usize {
        self.order.lock().bytes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Encode MPEG audio as a `data:` URL the browser can play directly.
pub fn audio_data_url(audio: &[u8]) -> String {
    format!("data:audio/mpeg;base64,{}", STANDARD.encode(audio))
}
