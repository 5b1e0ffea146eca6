use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use veridrink::config::AppConfig;
use veridrink::state::build_state;
use veridrink::test_support::create_test_app;
use veridrink::LineStore;
use veridrink_test_support::problem_details::assert_problem_details_from_service_response;

use crate::common::{delete_as, post_as, state_with_templates, OWNER, STRANGER};
use crate::routes::{add_player, create_session};

async fn players_of<S>(app: &S, id: &str) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        Error = actix_web::Error,
    >,
{
    let req = test::TestRequest::get()
        .uri(&format!("/api/sessions/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["players"].clone()
}

#[actix_web::test]
async fn test_owner_adds_player_with_default_health() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;

    let req = post_as(OWNER, &format!("/api/sessions/{id}/players/Alice")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["players"], json!([{ "name": "Alice", "health": 3 }]));
}

#[actix_web::test]
async fn test_start_health_comes_from_config() {
    let config = AppConfig {
        player_start_health: 5,
        ..AppConfig::default()
    };
    let state = build_state()
        .with_config(config)
        .with_templates(LineStore::default())
        .build()
        .unwrap();
    let app = create_test_app(state).build().await.unwrap();
    let id = create_session(&app, OWNER).await;

    add_player(&app, OWNER, &id, "Bob", "male", "female").await;
    assert_eq!(players_of(&app, &id).await[0]["health"], 5);
}

#[actix_web::test]
async fn test_non_owner_cannot_add_or_remove() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;
    add_player(&app, OWNER, &id, "Alice", "female", "male").await;

    let req = post_as(STRANGER, &format!("/api/sessions/{id}/players/Mallory")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "NOT_SESSION_OWNER",
        StatusCode::FORBIDDEN,
        None,
    )
    .await;

    let req = delete_as(STRANGER, &format!("/api/sessions/{id}/players/Alice")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    assert_eq!(players_of(&app, &id).await, json!([{ "name": "Alice", "health": 3 }]));
}

#[actix_web::test]
async fn test_duplicate_player_is_conflict() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;
    add_player(&app, OWNER, &id, "Alice", "female", "male").await;

    let req = post_as(OWNER, &format!("/api/sessions/{id}/players/Alice")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "DUPLICATE_PLAYER",
        StatusCode::CONFLICT,
        Some("Alice"),
    )
    .await;
}

#[actix_web::test]
async fn test_blank_player_name_is_rejected() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;

    let req = post_as(OWNER, &format!("/api/sessions/{id}/players/%20%20")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_PLAYER_NAME",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn test_unknown_gender_is_bad_request() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;

    let req = post_as(OWNER, &format!("/api/sessions/{id}/players/Alice"))
        .set_json(json!({ "gender": "robot" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    assert_eq!(players_of(&app, &id).await, json!([]));
}

#[actix_web::test]
async fn test_remove_player_then_remove_again() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;
    add_player(&app, OWNER, &id, "Alice", "female", "male").await;
    add_player(&app, OWNER, &id, "Bob", "male", "female").await;

    let req = delete_as(OWNER, &format!("/api/sessions/{id}/players/Alice")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["players"], json!([{ "name": "Bob", "health": 3 }]));

    let req = delete_as(OWNER, &format!("/api/sessions/{id}/players/Alice")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "PLAYER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

#[actix_web::test]
async fn test_unknown_session_wins_over_ownership() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();

    let req = post_as(STRANGER, "/api/sessions/zzzzzz/players/Alice").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "SESSION_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}
