mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use spiritual_core::NewFestival;

use common::{festival_body, login, server, state, MODERATOR_EMAIL};

#[tokio::test]
async fn test_create_then_fetch_festival() {
    let server = server(state());
    let (name, value) = login(&server, "g-mod", MODERATOR_EMAIL).await;

    let body = festival_body("Vesak", "Buddhism", "2027-05-20");
    let response = server
        .post("/api/festivals")
        .add_header(name, value)
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();

    let fetched: Value = server
        .get(&format!("/api/festivals/{}", created["id"]))
        .await
        .json();
    assert_eq!(fetched, created);
    for field in ["name", "description", "religion", "date", "story"] {
        assert_eq!(fetched[field], body[field], "{field}");
    }
}

#[tokio::test]
async fn test_festival_creation_is_moderated() {
    let server = server(state());
    let body = festival_body("Holi", "Hinduism", "2027-03-22");

    server
        .post("/api/festivals")
        .json(&body)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = login(&server, "g-user", "devotee@example.com").await;
    let response = server
        .post("/api/festivals")
        .add_header(name, value)
        .json(&body)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let error: Value = response.json();
    assert_eq!(error["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_festival_lookup_errors() {
    let server = server(state());
    server.get("/api/festivals/999").await.assert_status(StatusCode::NOT_FOUND);
    server.get("/api/festivals/diwali").await.assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/api/festivals/date/31-10-2026")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_festival_filters() {
    let server = server(state());
    let (name, value) = login(&server, "g-mod", MODERATOR_EMAIL).await;
    for (festival, religion, date) in [
        ("Diwali", "Hinduism", "2026-11-08"),
        ("Vaisakhi", "Sikhism", "2027-04-14"),
        ("Holi", "Hinduism", "2027-03-22"),
    ] {
        server
            .post("/api/festivals")
            .add_header(name.clone(), value.clone())
            .json(&festival_body(festival, religion, date))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let all: Vec<Value> = server.get("/api/festivals").await.json();
    assert_eq!(all.len(), 3);
    let everything: Vec<Value> = server
        .get("/api/festivals")
        .add_query_param("religion", "all")
        .await
        .json();
    assert_eq!(everything.len(), 3);

    let hindu: Vec<Value> = server
        .get("/api/festivals")
        .add_query_param("religion", "hinduism")
        .await
        .json();
    assert_eq!(hindu.len(), 2);

    let on_date: Vec<Value> = server.get("/api/festivals/date/2027-04-14").await.json();
    assert_eq!(on_date.len(), 1);
    assert_eq!(on_date[0]["name"], "Vaisakhi");
}

#[tokio::test]
async fn test_today_and_featured() {
    let server = server(state());
    let today = Utc::now().date_naive().to_string();
    let (moderator, token) = login(&server, "g-mod", MODERATOR_EMAIL).await;

    server.get("/api/festivals/today/featured").await.assert_status(StatusCode::NOT_FOUND);

    for (festival, religion) in [("Paryushan", "Jainism"), ("Gurpurab", "Sikhism")] {
        server
            .post("/api/festivals")
            .add_header(moderator.clone(), token.clone())
            .json(&festival_body(festival, religion, &today))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let todays: Vec<Value> = server.get("/api/festivals/today").await.json();
    assert_eq!(todays.len(), 2);

    let anonymous: Value = server.get("/api/festivals/today/featured").await.json();
    assert_eq!(anonymous["name"], "Paryushan");

    let (name, value) = login(&server, "g-sikh", "sikh@example.com").await;
    server
        .put("/api/preferences")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "primaryReligion": "Sikhism" }))
        .await
        .assert_status(StatusCode::OK);
    let featured: Value = server
        .get("/api/festivals/today/featured")
        .add_header(name, value)
        .await
        .json();
    assert_eq!(featured["name"], "Gurpurab");
}

#[tokio::test]
async fn test_upcoming_and_reminders_follow_preferences() {
    let server = server(state());
    let today = Utc::now().date_naive();
    let (moderator, token) = login(&server, "g-mod", MODERATOR_EMAIL).await;

    for (festival, religion, offset) in [
        ("Past", "Hinduism", -3),
        ("Soon", "Hinduism", 2),
        ("Later", "Hinduism", 20),
        ("Other", "Buddhism", 1),
    ] {
        let date = (today + Duration::days(offset)).to_string();
        server
            .post("/api/festivals")
            .add_header(moderator.clone(), token.clone())
            .json(&festival_body(festival, religion, &date))
            .await
            .assert_status(StatusCode::CREATED);
    }

    // New accounts default to Hinduism with a three day reminder window.
    let (name, value) = login(&server, "g-9", "nine@example.com").await;
    let upcoming: Vec<Value> = server
        .get("/api/festivals/upcoming")
        .add_header(name.clone(), value.clone())
        .await
        .json();
    let names: Vec<_> = upcoming.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Soon", "Later"]);

    let limited: Vec<Value> = server
        .get("/api/festivals/upcoming")
        .add_query_param("limit", 1)
        .add_header(name.clone(), value.clone())
        .await
        .json();
    assert_eq!(limited.len(), 1);

    let reminders: Vec<Value> = server
        .get("/api/festivals/reminders")
        .add_header(name.clone(), value.clone())
        .await
        .json();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0]["name"], "Soon");
    assert_eq!(reminders[0]["daysUntil"], 2);

    server
        .put("/api/preferences")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "primaryReligion": "Hinduism", "notifyFestivals": false }))
        .await
        .assert_status(StatusCode::OK);
    let muted: Vec<Value> = server
        .get("/api/festivals/reminders")
        .add_header(name, value)
        .await
        .json();
    assert!(muted.is_empty());
}

#[tokio::test]
async fn test_reminders_cover_the_whole_window() {
    let state = state();
    let today = Utc::now().date_naive();
    for n in 0..60 {
        state
            .storage
            .create_festival(NewFestival {
                name: format!("Ekadashi {n}"),
                description: "Fasting day".to_string(),
                religion: "Hinduism".to_string(),
                date: today + Duration::days(n % 5),
                image_url: None,
                story: None,
            })
            .unwrap();
    }
    let server = server(state);

    let (name, value) = login(&server, "g-fast", "fast@example.com").await;
    server
        .put("/api/preferences")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "primaryReligion": "Hinduism", "festivalReminderDays": 7 }))
        .await
        .assert_status(StatusCode::OK);

    let reminders: Vec<Value> = server
        .get("/api/festivals/reminders")
        .add_header(name, value)
        .await
        .json();
    assert_eq!(reminders.len(), 60);
    assert_eq!(reminders[0]["daysUntil"], 0);
    assert_eq!(reminders[59]["daysUntil"], 4);
}

#[tokio::test]
async fn test_ritual_update_rejects_blank_fields() {
    let server = server(state());
    let (name, value) = login(&server, "g-mod", MODERATOR_EMAIL).await;

    let ritual: Value = server
        .post("/api/rituals")
        .add_header(name.clone(), value.clone())
        .json(&json!({
            "title": "Ganga Aarti",
            "description": "Evening lamp offering",
            "content": "Performed at dusk",
            "steps": ["Light the lamps", "Sing the aarti"],
            "religion": "Hinduism",
        }))
        .await
        .json();
    let ritual_id = ritual["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/rituals/{ritual_id}"))
        .add_header(name, value)
        .json(&json!({ "title": "   ", "steps": ["", " "] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let stored: Value = server.get(&format!("/api/rituals/{ritual_id}")).await.json();
    assert_eq!(stored["title"], "Ganga Aarti");
    assert_eq!(stored["steps"], json!(["Light the lamps", "Sing the aarti"]));
}

#[tokio::test]
async fn test_rituals_bhajans_and_narration() {
    let server = server(state());
    let (name, value) = login(&server, "g-mod", MODERATOR_EMAIL).await;

    let festival: Value = server
        .post("/api/festivals")
        .add_header(name.clone(), value.clone())
        .json(&festival_body("Diwali", "Hinduism", "2026-11-08"))
        .await
        .json();
    let festival_id = festival["id"].as_i64().unwrap();

    let response = server
        .post("/api/rituals")
        .add_header(name.clone(), value.clone())
        .json(&json!({
            "festivalId": festival_id,
            "title": "Lakshmi Puja",
            "description": "Prayer to Goddess Lakshmi",
            "content": "Evening puja",
            "materials": ["Flowers", "Ghee lamp"],
            "steps": "[\"Clean the altar\",\"Light the lamp\",\"Perform aarti\"]",
            "religion": "Hinduism",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let ritual: Value = response.json();
    assert_eq!(ritual["steps"].as_array().unwrap().len(), 3);
    let ritual_id = ritual["id"].as_i64().unwrap();

    let listed: Vec<Value> = server
        .get(&format!("/api/rituals/festival/{festival_id}"))
        .await
        .json();
    assert_eq!(listed.len(), 1);
    let by_religion: Vec<Value> = server
        .get("/api/rituals")
        .add_query_param("religion", "HINDUISM")
        .await
        .json();
    assert_eq!(by_religion.len(), 1);
    server.get("/api/rituals").await.assert_status(StatusCode::BAD_REQUEST);

    let script: Value = server
        .get(&format!("/api/rituals/{ritual_id}/narration"))
        .await
        .json();
    let segments = script["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 5);
    assert_eq!(segments[0]["kind"], "introduction");
    assert_eq!(segments[1]["text"], "You will need: Flowers, Ghee lamp.");
    assert_eq!(segments[4]["text"], "Step 3. Perform aarti");
    assert_eq!(script["totalSteps"], 3);

    let verified: Value = server
        .put(&format!("/api/rituals/{ritual_id}"))
        .add_header(name.clone(), value.clone())
        .json(&json!({ "verified": true }))
        .await
        .json();
    assert_eq!(verified["verified"], true);
    assert_eq!(verified["title"], "Lakshmi Puja");

    server.get("/api/rituals/404").await.assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/rituals/404/narration")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let bhajan = server
        .post("/api/bhajans")
        .add_header(name, value)
        .json(&json!({
            "title": "Om Jai Jagdish Hare",
            "youtubeUrl": "https://www.youtube.com/watch?v=TXLrJ4zCcbI",
            "type": "Aarti",
            "religion": "Hinduism",
            "duration": "5:30",
            "festivalId": festival_id,
        }))
        .await;
    bhajan.assert_status(StatusCode::CREATED);
    let bhajan: Value = bhajan.json();
    assert_eq!(bhajan["type"], "Aarti");

    let bhajans: Vec<Value> = server
        .get(&format!("/api/bhajans/festival/{festival_id}"))
        .await
        .json();
    assert_eq!(bhajans.len(), 1);
    let fetched: Value = server
        .get(&format!("/api/bhajans/{}", bhajan["id"]))
        .await
        .json();
    assert_eq!(fetched, bhajan);
}

#[tokio::test]
async fn test_catalog() {
    let server = server(state());
    let voices: Value = server.get("/api/voices").await.json();
    assert_eq!(voices["defaultVoiceId"], "21m00Tcm4TlvDq8ikWAM");
    assert_eq!(voices["voices"].as_array().unwrap().len(), 8);
    assert_eq!(voices["spiritualVoices"][3]["name"], "Priest Voice (Male)");

    let options: Value = server.get("/api/options").await.json();
    assert_eq!(options["religions"].as_array().unwrap().len(), 9);
    assert_eq!(options["reminderDays"][2], json!({ "value": 7, "label": "1 week before" }));
}
