mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

use common::{
    login, server, state, BrokenCategorizer, FakeSpeech, FixedCategorizer, RejectingSpeech,
};

#[tokio::test]
async fn test_synthesize_requires_text() {
    let server = server(state().with_speech(Arc::new(FakeSpeech::default())));
    let (name, value) = login(&server, "g-1", "one@example.com").await;

    for body in [json!({}), json!({ "text": "" }), json!({ "text": "   " })] {
        let response = server
            .post("/api/synthesize")
            .add_header(name.clone(), value.clone())
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["message"], "Text is required");
        assert_eq!(error["success"], false);
    }
}

#[tokio::test]
async fn test_synthesize_without_api_key() {
    let server = server(state());
    let (name, value) = login(&server, "g-1", "one@example.com").await;

    let response = server
        .post("/api/synthesize")
        .add_header(name, value)
        .json(&json!({ "text": "Step 1. Light the lamp" }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = response.json();
    assert_eq!(error["message"], "ElevenLabs API key is not configured");
}

#[tokio::test]
async fn test_synthesize_returns_data_url_and_caches() {
    let speech = Arc::new(FakeSpeech::default());
    let server = server(state().with_speech(speech.clone()));
    let (name, value) = login(&server, "g-1", "one@example.com").await;
    let body = json!({ "text": "Step 1. Light the lamp", "voiceId": "VR6AewLTigWG4xSOukaG" });

    let first: Value = server
        .post("/api/synthesize")
        .add_header(name.clone(), value.clone())
        .json(&body)
        .await
        .json();
    assert_eq!(first["success"], true);
    assert_eq!(first["message"], "Voice synthesis successful");
    assert_eq!(first["audioUrl"], "data:audio/mpeg;base64,SUQz");
    assert_eq!(first["cached"], false);

    let second: Value = server
        .post("/api/synthesize")
        .add_header(name.clone(), value.clone())
        .json(&body)
        .await
        .json();
    assert_eq!(second["audioUrl"], first["audioUrl"]);
    assert_eq!(second["cached"], true);
    assert_eq!(speech.calls(), 1);

    server
        .post("/api/synthesize")
        .add_header(name, value)
        .json(&json!({ "text": "Step 1. Light the lamp", "stability": 0.3 }))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(speech.calls(), 2);
}

#[tokio::test]
async fn test_synthesize_passes_upstream_status_through() {
    let server = server(state().with_speech(Arc::new(RejectingSpeech(401))));
    let (name, value) = login(&server, "g-1", "one@example.com").await;

    let response = server
        .post("/api/synthesize")
        .add_header(name, value)
        .json(&json!({ "text": "Om" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let error: Value = response.json();
    assert_eq!(error["message"], "Error from ElevenLabs API");
    assert_eq!(error["details"], "invalid api key");
}

#[tokio::test]
async fn test_categorize() {
    let server = server(state().with_categorizer(Arc::new(FixedCategorizer)));
    let (name, value) = login(&server, "g-1", "one@example.com").await;

    let result: Value = server
        .post("/api/categorize")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "text": "Garba is danced for nine nights" }))
        .await
        .json();
    assert_eq!(result, json!({ "religion": "Hinduism", "festival": "Navratri" }));

    server
        .post("/api/categorize")
        .add_header(name, value)
        .json(&json!({ "text": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_categorize_falls_back_to_unknown() {
    let unknown = json!({ "religion": "Unknown", "festival": "Unknown" });

    for state in [state(), state().with_categorizer(Arc::new(BrokenCategorizer))] {
        let server = server(state);
        let (name, value) = login(&server, "g-1", "one@example.com").await;
        let response = server
            .post("/api/categorize")
            .add_header(name, value)
            .json(&json!({ "text": "A prayer for the harvest" }))
            .await;
        response.assert_status(StatusCode::OK);
        let result: Value = response.json();
        assert_eq!(result, unknown);
    }
}
