//! Static choice lists the client renders in its pickers.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::speech::DEFAULT_VOICE_ID;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Voice {
    pub id: &'static str,
    pub name: &'static str,
    pub accent: &'static str,
}

const fn voice(id: &'static str, name: &'static str) -> Voice {
    Voice {
        id,
        name,
        accent: "American",
    }
}

pub const VOICES: [Voice; 8] = [
    voice("21m00Tcm4TlvDq8ikWAM", "Rachel - Warm Female"),
    voice("AZnzlk1XvdvUeBnXmlld", "Domi - Soft Male"),
    voice("EXAVITQu4vr4xnSDxMaL", "Bella - Soft Female"),
    voice("ErXwobaYiN019PkySvjV", "Antoni - Gentle Male"),
    voice("MF3mGyEYCl7XYWbV9V6O", "Elli - Gentle Female"),
    voice("TxGEqnHWrfWFTfGW9XjX", "Josh - Deep Male"),
    voice("VR6AewLTigWG4xSOukaG", "Arnold - Deep Male"),
    voice("pNInz6obpgDQGcFmaJgB", "Adam - Calm Male"),
];

/// Same voices under names suited to devotional content.
pub const SPIRITUAL_VOICES: [Voice; 4] = [
    voice("21m00Tcm4TlvDq8ikWAM", "Spiritual Guide (Female)"),
    voice("ErXwobaYiN019PkySvjV", "Meditation Guide (Male)"),
    voice("EXAVITQu4vr4xnSDxMaL", "Ritual Voice (Female)"),
    voice("VR6AewLTigWG4xSOukaG", "Priest Voice (Male)"),
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Choice<T> {
    pub value: T,
    pub label: &'static str,
}

const fn choice<T>(value: T, label: &'static str) -> Choice<T> {
    Choice { value, label }
}

pub const RELIGIONS: [Choice<&str>; 9] = [
    choice("hinduism", "Hinduism"),
    choice("buddhism", "Buddhism"),
    choice("jainism", "Jainism"),
    choice("sikhism", "Sikhism"),
    choice("islam", "Islam"),
    choice("christianity", "Christianity"),
    choice("judaism", "Judaism"),
    choice("zoroastrianism", "Zoroastrianism"),
    choice("other", "Other"),
];

pub const SECONDARY_INTERESTS: [Choice<&str>; 6] = [
    choice("vedic-astrology", "Vedic Astrology"),
    choice("ayurveda", "Ayurveda"),
    choice("yoga", "Yoga & Meditation"),
    choice("mantras", "Mantras & Chanting"),
    choice("philosophy", "Eastern Philosophy"),
    choice("rituals", "Traditional Rituals"),
];

pub const LANGUAGES: [Choice<&str>; 10] = [
    choice("english", "English"),
    choice("hindi", "Hindi"),
    choice("sanskrit", "Sanskrit"),
    choice("tamil", "Tamil"),
    choice("bengali", "Bengali"),
    choice("gujarati", "Gujarati"),
    choice("marathi", "Marathi"),
    choice("telugu", "Telugu"),
    choice("kannada", "Kannada"),
    choice("malayalam", "Malayalam"),
];

pub const REMINDER_DAYS: [Choice<i32>; 4] = [
    choice(1, "1 day before"),
    choice(3, "3 days before"),
    choice(7, "1 week before"),
    choice(14, "2 weeks before"),
];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/voices", get(list_voices))
        .route("/api/options", get(list_options))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceCatalog {
    default_voice_id: &'static str,
    voices: &'static [Voice],
    spiritual_voices: &'static [Voice],
}

async fn list_voices() -> Json<VoiceCatalog> {
    Json(VoiceCatalog {
        default_voice_id: DEFAULT_VOICE_ID,
        voices: &VOICES,
        spiritual_voices: &SPIRITUAL_VOICES,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Options {
    religions: &'static [Choice<&'static str>],
    secondary_interests: &'static [Choice<&'static str>],
    languages: &'static [Choice<&'static str>],
    reminder_days: &'static [Choice<i32>],
}

async fn list_options() -> Json<Options> {
    Json(Options {
        religions: &RELIGIONS,
        secondary_interests: &SECONDARY_INTERESTS,
        languages: &LANGUAGES,
        reminder_days: &REMINDER_DAYS,
    })
}
