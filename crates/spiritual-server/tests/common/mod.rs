//! Shared fixtures for the HTTP tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use spiritual_core::{MemStorage, Storage};
use spiritual_server::categorize::{CategorizeError, Categorization, DocumentCategorizer};
use spiritual_server::config::ServerConfig;
use spiritual_server::create_router;
use spiritual_server::speech::{SpeechError, SpeechRequest, SpeechSynthesizer};
use spiritual_server::state::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const MODERATOR_EMAIL: &str = "priest@example.com";

pub fn config() -> ServerConfig {
    ServerConfig {
        moderators: vec![MODERATOR_EMAIL.to_string()],
        ..ServerConfig::default()
    }
}

pub fn state() -> AppState {
    AppState::new(config(), Arc::new(MemStorage::new()) as Arc<dyn Storage>)
}

pub fn server(state: AppState) -> TestServer {
    TestServer::new(create_router(state)).unwrap()
}

/// Sign in and return the `Cookie` header to send on later requests.
pub async fn login(server: &TestServer, google_id: &str, email: &str) -> (HeaderName, HeaderValue) {
    let response = server
        .post("/api/auth/google")
        .json(&json!({
            "googleId": google_id,
            "email": email,
            "username": google_id,
            "firstName": "Asha",
        }))
        .await;
    response.assert_status(StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    let pair = set_cookie.split(';').next().unwrap().to_string();
    (header::COOKIE, HeaderValue::from_str(&pair).unwrap())
}

pub fn festival_body(name: &str, religion: &str, date: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "religion": religion,
        "date": date,
        "story": format!("The story of {name}"),
    })
}

/// Speech synthesizer that returns fixed bytes and counts calls.
#[derive(Default)]
pub struct FakeSpeech {
    pub calls: AtomicUsize,
}

impl FakeSpeech {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, _request: &SpeechRequest) -> Result<Vec<u8>, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(b"ID3".to_vec())
    }
}

/// Speech synthesizer that always fails with the given upstream status.
pub struct RejectingSpeech(pub u16);

#[async_trait]
impl SpeechSynthesizer for RejectingSpeech {
    async fn synthesize(&self, _request: &SpeechRequest) -> Result<Vec<u8>, SpeechError> {
        Err(SpeechError::Upstream {
            status: self.0,
            body: "invalid api key".to_string(),
        })
    }
}

pub struct FixedCategorizer;

#[async_trait]
impl DocumentCategorizer for FixedCategorizer {
    async fn categorize(&self, text: &str) -> Result<Categorization, CategorizeError> {
        let festival = if text.contains("Garba") { "Navratri" } else { "Diwali" };
        Ok(Categorization {
            religion: "Hinduism".to_string(),
            festival: festival.to_string(),
        })
    }
}

pub struct BrokenCategorizer;

#[async_trait]
impl DocumentCategorizer for BrokenCategorizer {
    async fn categorize(&self, _text: &str) -> Result<Categorization, CategorizeError> {
        Err(CategorizeError::Transport("connection refused".to_string()))
    }
}
