//! HTTP-level tests for subjects and attendance:
//! - Summary math on the dashboard cards
//! - Upsert overwrite semantics
//! - Per-user isolation
//! - Calendar view

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_subject, delete_auth, get_auth, mark, post_json_auth, put_json_auth, signup,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_subject_uses_defaults_and_reports_zero(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(&app, "s@test.com", "student").await;

    let response = post_json_auth(
        &app,
        "/api/v1/subjects",
        &user.token,
        json!({ "name": "  Physics " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["name"], "Physics");
    assert_eq!(created["data"]["threshold"], 75);
    assert_eq!(created["data"]["color"], "#6366f1");

    let list = body_json(get_auth(&app, "/api/v1/subjects", &user.token).await).await;
    let card = &list["data"][0];
    assert_eq!(card["summary"]["percentage"], 0);
    assert_eq!(card["summary"]["total_counted"], 0);
    assert_eq!(card["summary"]["is_below_threshold"], true);
    assert!(card["today_status"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subject_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(&app, "s@test.com", "student").await;

    for body in [
        json!({ "name": "P" }),
        json!({ "name": "Physics", "threshold": 101 }),
        json!({ "name": "Physics", "color": "blue" }),
    ] {
        let response = post_json_auth(&app, "/api/v1/subjects", &user.token, body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_excludes_off_days(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(&app, "s@test.com", "student").await;
    let subject = create_subject(&app, &user, "Maths").await;

    for (date, status) in [
        ("2025-03-03", "attended"),
        ("2025-03-04", "attended"),
        ("2025-03-05", "attended"),
        ("2025-03-06", "missed"),
        ("2025-03-07", "off"),
        ("2025-03-08", "off"),
    ] {
        assert_eq!(mark(&app, &user, subject, date, status).await.status(), StatusCode::OK);
    }

    let uri = format!("/api/v1/subjects/{subject}?today=2025-03-06");
    let json = body_json(get_auth(&app, &uri, &user.token).await).await;
    let summary = &json["data"]["summary"];
    assert_eq!(summary["attended_count"], 3);
    assert_eq!(summary["missed_count"], 1);
    assert_eq!(summary["off_count"], 2);
    assert_eq!(summary["total_counted"], 4);
    assert_eq!(summary["percentage"], 75);
    assert_eq!(summary["is_below_threshold"], false, "75 is not below 75");
    assert_eq!(json["data"]["today_status"], "missed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn marking_twice_overwrites(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(&app, "s@test.com", "student").await;
    let subject = create_subject(&app, &user, "Chemistry").await;

    let first = body_json(mark(&app, &user, subject, "2025-03-03", "attended").await).await;
    let second = body_json(mark(&app, &user, subject, "2025-03-03", "missed").await).await;
    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["status"], "missed");

    let list = body_json(get_auth(&app, "/api/v1/attendance", &user.token).await).await;
    let records = list["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["subject_name"], "Chemistry");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_status_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(&app, "s@test.com", "student").await;
    let subject = create_subject(&app, &user, "Biology").await;

    let response = mark(&app, &user, subject, "2025-03-03", "present").await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn users_cannot_touch_each_others_data(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = signup(&app, "alice@test.com", "student").await;
    let bob = signup(&app, "bob@test.com", "student").await;
    let subject = create_subject(&app, &alice, "History").await;
    let record = body_json(mark(&app, &alice, subject, "2025-03-03", "attended").await).await;
    let record_id = record["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/subjects/{subject}");
    assert_eq!(get_auth(&app, &uri, &bob.token).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        put_json_auth(&app, &uri, &bob.token, json!({ "name": "Mine now" }))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(delete_auth(&app, &uri, &bob.token).await.status(), StatusCode::NOT_FOUND);

    // Bob cannot mark attendance against Alice's subject.
    assert_eq!(
        mark(&app, &bob, subject, "2025-03-04", "missed").await.status(),
        StatusCode::NOT_FOUND
    );
    let record_uri = format!("/api/v1/attendance/{record_id}");
    assert_eq!(
        delete_auth(&app, &record_uri, &bob.token).await.status(),
        StatusCode::NOT_FOUND
    );

    let bobs = body_json(get_auth(&app, "/api/v1/subjects", &bob.token).await).await;
    assert!(bobs["data"].as_array().unwrap().is_empty());
    let bobs = body_json(get_auth(&app, "/api/v1/attendance", &bob.token).await).await;
    assert!(bobs["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete_subject(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(&app, "s@test.com", "student").await;
    let subject = create_subject(&app, &user, "Art").await;
    mark(&app, &user, subject, "2025-03-03", "attended").await;

    let uri = format!("/api/v1/subjects/{subject}");
    let updated = put_json_auth(
        &app,
        &uri,
        &user.token,
        json!({ "threshold": 90, "color": "#112233" }),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let json = body_json(updated).await;
    assert_eq!(json["data"]["name"], "Art");
    assert_eq!(json["data"]["threshold"], 90);

    assert_eq!(delete_auth(&app, &uri, &user.token).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get_auth(&app, &uri, &user.token).await.status(), StatusCode::NOT_FOUND);

    let records = body_json(get_auth(&app, "/api/v1/attendance", &user.token).await).await;
    assert!(records["data"].as_array().unwrap().is_empty(), "records cascade");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attendance_list_filters(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(&app, "s@test.com", "student").await;
    let maths = create_subject(&app, &user, "Maths").await;
    let music = create_subject(&app, &user, "Music").await;
    mark(&app, &user, maths, "2025-03-03", "attended").await;
    mark(&app, &user, maths, "2025-03-10", "missed").await;
    mark(&app, &user, music, "2025-03-10", "off").await;

    let ranged = body_json(
        get_auth(
            &app,
            "/api/v1/attendance?from=2025-03-04&to=2025-03-31",
            &user.token,
        )
        .await,
    )
    .await;
    assert_eq!(ranged["data"].as_array().unwrap().len(), 2);

    let uri = format!("/api/v1/attendance?subject_id={maths}");
    let by_subject = body_json(get_auth(&app, &uri, &user.token).await).await;
    assert_eq!(by_subject["data"].as_array().unwrap().len(), 2);

    let inverted = get_auth(
        &app,
        "/api/v1/attendance?from=2025-03-10&to=2025-03-01",
        &user.token,
    )
    .await;
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn calendar_groups_days_by_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = signup(&app, "s@test.com", "student").await;
    let maths = create_subject(&app, &user, "Maths").await;
    let music = create_subject(&app, &user, "Music").await;
    mark(&app, &user, maths, "2025-03-03", "attended").await;
    mark(&app, &user, music, "2025-03-03", "missed").await;
    mark(&app, &user, maths, "2025-03-05", "off").await;

    let json = body_json(
        get_auth(&app, "/api/v1/attendance/calendar?date=2025-03-03", &user.token).await,
    )
    .await;
    let data = &json["data"];
    assert_eq!(data["date"], "2025-03-03");
    assert_eq!(data["days"]["attended"], json!(["2025-03-03"]));
    assert_eq!(data["days"]["missed"], json!(["2025-03-03"]));
    assert_eq!(data["days"]["off"], json!(["2025-03-05"]));
    assert_eq!(data["records"].as_array().unwrap().len(), 2);
}
