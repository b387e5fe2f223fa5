use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ApiError, Result};
use crate::extract::ApiJson;
use crate::session::CurrentUser;
use crate::speech::{audio_data_url, SpeechError, SpeechRequest, VoiceSettings, DEFAULT_VOICE_ID};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/synthesize", post(synthesize))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    voice_id: Option<String>,
    #[serde(default)]
    stability: Option<f32>,
    #[serde(default)]
    similarity_boost: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    message: &'static str,
    success: bool,
    audio_url: String,
    cached: bool,
}

fn speech_request(body: SynthesizeRequest) -> Result<SpeechRequest> {
    let text = body
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Text is required".to_string()))?;

    let defaults = VoiceSettings::default();
    Ok(SpeechRequest {
        text,
        voice_id: body
            .voice_id
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
        settings: VoiceSettings {
            stability: body.stability.unwrap_or(defaults.stability).clamp(0.0, 1.0),
            similarity_boost: body
                .similarity_boost
                .unwrap_or(defaults.similarity_boost)
                .clamp(0.0, 1.0),
        },
    })
}

async fn synthesize(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(body): ApiJson<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>> {
    let request = speech_request(body)?;

    let synthesizer = state.speech.as_ref().ok_or_else(|| {
        ApiError::NotConfigured("ElevenLabs API key is not configured".to_string())
    })?;

    if let Some(audio) = state.speech_cache.get(&request) {
        tracing::debug!(user_id = current.user.id, "speech served from cache");
        return Ok(Json(SynthesizeResponse {
            message: "Voice synthesis successful",
            success: true,
            audio_url: audio_data_url(&audio),
            cached: true,
        }));
    }

    let audio = synthesizer.synthesize(&request).await.map_err(|err| match err {
        SpeechError::Upstream { status, body } => ApiError::Upstream {
            status,
            message: "Error from ElevenLabs API".to_string(),
            details: body,
        },
        SpeechError::Transport(details) => ApiError::Upstream {
            status: 502,
            message: "Failed to synthesize voice".to_string(),
            details,
        },
    })?;

    let audio = Arc::new(audio);
    state.speech_cache.insert(&request, audio.clone());
    tracing::info!(
        user_id = current.user.id,
        voice = %request.voice_id,
        chars = request.text.chars().count(),
        "speech synthesized"
    );

    Ok(Json(SynthesizeResponse {
        message: "Voice synthesis successful",
        success: true,
        audio_url: audio_data_url(&audio),
        cached: false,
    }))
}
