mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, app_in, get, regenerate, ADMIN_TOKEN};

const SCHEDULE: &str = "\
SUNDAY 12 OCTOBER
HD9 GREEK & SPANISH
BR3 PORTUGUESE
19:00   AEK Athens x Panaitolikos | https://sportzonline.live/channels/hd/hd9.php
19:00   AEK Athens x Panaitolikos | https://sportzonline.live/channels/bra/br3.php
23:30   Late Night x Kickoff | https://sportzonline.live/channels/hd/hd1.php
18:00   ATP Shanghai: Final | https://sportzonline.live/channels/pt/sporttv2.php
-- copy/paste noise --
MONDAY
12:00   Formula 1: Practice | https://sportzonline.live/channels/hd/hd3.php
";

fn payload(text: &str) -> String {
    json!({ "scheduleText": text }).to_string()
}

#[tokio::test]
async fn regenerate_returns_parse_stats() {
    let app = app();
    let (status, body) = regenerate(&app.router, Some(ADMIN_TOKEN), &payload(SCHEDULE)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalMatches"], 5);
    assert_eq!(body["totalChannels"], 2);
    assert_eq!(body["matchesByDay"]["Sunday"], 4);
    assert_eq!(body["matchesByDay"]["Monday"], 1);
    assert_eq!(body["skippedLines"], 1);

    assert_eq!(app.store.current().await.revision, 1);
    assert!(app.store.file_path().exists());
}

#[tokio::test]
async fn regenerate_requires_admin() {
    let app = app();

    let (status, body) = regenerate(&app.router, None, &payload(SCHEDULE)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "not authenticated");

    let (status, _) = regenerate(&app.router, Some("wrong"), &payload(SCHEDULE)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(app.store.current().await.revision, 0);
}

#[tokio::test]
async fn regenerate_rejects_bad_payloads() {
    let app = app();

    let (status, body) = regenerate(&app.router, Some(ADMIN_TOKEN), "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = regenerate(&app.router, Some(ADMIN_TOKEN), "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = regenerate(&app.router, Some(ADMIN_TOKEN), &payload("   ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "scheduleText is required");
}

#[tokio::test]
async fn regenerate_reports_write_failures() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_in(dir);
    // Occupy the snapshot path with a directory so the final rename fails.
    std::fs::create_dir_all(app.store.file_path().join("occupied")).unwrap();

    let (status, body) = regenerate(&app.router, Some(ADMIN_TOKEN), &payload(SCHEDULE)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("failed to write"));
    assert_eq!(app.store.current().await.revision, 0);
}

#[tokio::test]
async fn day_view_groups_simulcasts_by_sport() {
    let app = app();
    regenerate(&app.router, Some(ADMIN_TOKEN), &payload(SCHEDULE)).await;

    let (status, body) = get(&app.router, "/api/schedule/days/sunday").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["day"], "Sunday");
    assert_eq!(body["channels"]["HD9"], "GREEK & SPANISH");

    let sections = body["sections"].as_array().unwrap();
    assert_eq!(sections[0]["sport"], "Football");
    assert_eq!(sections[1]["sport"], "Tennis");

    let aek = &sections[0]["matches"][0];
    assert_eq!(aek["name"], "AEK Athens x Panaitolikos");
    assert_eq!(aek["sources"].as_array().unwrap().len(), 2);
    assert_eq!(aek["sources"][0]["label"], "HD 9");
    assert_eq!(aek["sources"][1]["label"], "BR 3");
    assert_eq!(sections[1]["matches"][0]["sources"][0]["label"], "Sport TV 2");

    let (status, _) = get(&app.router, "/api/schedule/days/someday").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn live_view_uses_time_override() {
    let app = app();
    regenerate(&app.router, Some(ADMIN_TOKEN), &payload(SCHEDULE)).await;

    // Sunday 19:30: AEK and the ATP final are both running.
    let (status, body) = get(&app.router, "/api/schedule/live?at=2025-10-12T19:30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Monday 00:45: only Sunday's 23:30 kick-off carries over.
    let (_, body) = get(&app.router, "/api/schedule/live?at=2025-10-13T00:45:00").await;
    let sections = body.as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["matches"][0]["name"], "Late Night x Kickoff");

    let (status, _) = get(&app.router, "/api/schedule/live?at=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upcoming_scopes() {
    let app = app();
    regenerate(&app.router, Some(ADMIN_TOKEN), &payload(SCHEDULE)).await;

    let (status, body) = get(&app.router, "/api/schedule/upcoming?scope=today&at=2025-10-12T20:00").await;
    assert_eq!(status, StatusCode::OK);
    let today = body.as_array().unwrap();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0]["name"], "Late Night x Kickoff");
    assert_eq!(today[0]["startsInMinutes"], 210);

    let (_, body) = get(&app.router, "/api/schedule/upcoming?at=2025-10-12T20:00").await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "ATP Shanghai: Final",
            "AEK Athens x Panaitolikos",
            "AEK Athens x Panaitolikos",
            "Late Night x Kickoff",
            "Formula 1: Practice",
        ]
    );

    let (status, _) = get(&app.router, "/api/schedule/upcoming?scope=week").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn channel_lookup_is_case_insensitive() {
    let app = app();
    regenerate(&app.router, Some(ADMIN_TOKEN), &payload(SCHEDULE)).await;

    let (status, body) = get(&app.router, "/api/schedule/channels/Sunday/br3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["channel"], "BR3");
    assert_eq!(body["language"], "PORTUGUESE");

    let (status, _) = get(&app.router, "/api/schedule/channels/Monday/BR3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn snapshot_survives_restart() {
    let app = app();
    regenerate(&app.router, Some(ADMIN_TOKEN), &payload(SCHEDULE)).await;
    regenerate(&app.router, Some(ADMIN_TOKEN), &payload("FRIDAY\n20:00 A x B | https://s/hd1.php")).await;

    let restarted = app_in(app.data_dir);
    let (status, body) = get(&restarted.router, "/api/schedule").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revision"], 2);
    assert_eq!(body["stats"]["totalMatches"], 1);
    assert!(body["schedule"]["Sunday"].is_null());
    assert_eq!(body["schedule"]["Friday"][0]["name"], "A x B");
}

#[tokio::test]
async fn info_reports_server_url() {
    let app = app();
    let (status, body) = get(&app.router, "/api/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "http://127.0.0.1:23455");
}
