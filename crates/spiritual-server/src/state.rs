use spiritual_core::Storage;
use std::sync::Arc;

use crate::categorize::{DocumentCategorizer, OpenAiCategorizer};
use crate::config::ServerConfig;
use crate::session::SessionManager;
use crate::speech::{ElevenLabsClient, SpeechCache, SpeechSynthesizer};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub sessions: Arc<SessionManager>,
    /// `None` when no ElevenLabs key is configured.
    pub speech: Option<Arc<dyn SpeechSynthesizer>>,
    pub speech_cache: Arc<SpeechCache>,
    /// `None` when no OpenAI key is configured.
    pub categorizer: Option<Arc<dyn DocumentCategorizer>>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig, storage: Arc<dyn Storage>) -> Self {
        let speech = config.elevenlabs_api_key.as_ref().map(|key| {
            Arc::new(ElevenLabsClient::new(key, &config.elevenlabs_base_url))
                as Arc<dyn SpeechSynthesizer>
        });
        let categorizer = config.openai_api_key.as_ref().map(|key| {
            Arc::new(OpenAiCategorizer::new(
                key,
                &config.openai_base_url,
                &config.openai_model,
            )) as Arc<dyn DocumentCategorizer>
        });

        Self {
            storage,
            sessions: Arc::new(SessionManager::new(
                config.session_ttl,
                config.max_sessions,
            )),
            speech,
            speech_cache: Arc::new(SpeechCache::new(
                config.speech_cache_entries,
                config.speech_cache_bytes,
            )),
            categorizer,
            config,
        }
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_categorizer(mut self, categorizer: Arc<dyn DocumentCategorizer>) -> Self {
        self.categorizer = Some(categorizer);
        self
    }
}
