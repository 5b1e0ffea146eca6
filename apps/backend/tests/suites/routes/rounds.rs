use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use veridrink::test_support::create_test_app;
use veridrink_test_support::problem_details::assert_problem_details_from_service_response;

use crate::common::{post_as, state_with_templates, OWNER, STRANGER};
use crate::routes::{add_player, create_session};

#[actix_web::test]
async fn test_two_player_round_pairs_both_players() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;
    add_player(&app, OWNER, &id, "Alice", "female", "male").await;
    add_player(&app, OWNER, &id, "Bob", "male", "female").await;

    for _ in 0..6 {
        let req = post_as(OWNER, &format!("/api/sessions/{id}/rounds"))
            .set_json(json!({ "template": ":& and :@ kiss" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let text = body["text"].as_str().unwrap();
        assert!(
            text == "Alice and Bob kiss" || text == "Bob and Alice kiss",
            "unexpected round: {text}"
        );
    }
}

#[actix_web::test]
async fn test_overlapping_symbols_exhaust_two_player_roster() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;
    add_player(&app, OWNER, &id, "Alice", "female", "male").await;
    add_player(&app, OWNER, &id, "Bob", "male", "female").await;

    // `:@` rewrites the prefix of `:@o` first, leaving no partner for `:@o`.
    let req = post_as(OWNER, &format!("/api/sessions/{id}/rounds"))
        .set_json(json!({ "template": ":& and :@o kiss" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "NO_ELIGIBLE_PLAYERS",
        StatusCode::UNPROCESSABLE_ENTITY,
        Some(":@o"),
    )
    .await;
}

#[actix_web::test]
async fn test_round_falls_back_to_template_store() {
    let app = create_test_app(state_with_templates(&["Everybody drinks"]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;
    add_player(&app, OWNER, &id, "Alice", "female", "male").await;

    let req = post_as(STRANGER, &format!("/api/sessions/{id}/rounds")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["text"], "Everybody drinks");
}

#[actix_web::test]
async fn test_round_on_empty_roster_is_unprocessable() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;

    let req = post_as(OWNER, &format!("/api/sessions/{id}/rounds"))
        .set_json(json!({ "template": ":& drinks" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "EMPTY_ROSTER",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;
}

#[actix_web::test]
async fn test_round_without_eligible_players_is_unprocessable() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;
    add_player(&app, OWNER, &id, "Ann", "female", "female").await;
    add_player(&app, OWNER, &id, "Beth", "female", "female").await;

    let req = post_as(OWNER, &format!("/api/sessions/{id}/rounds"))
        .set_json(json!({ "template": ":& dares :@o" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "NO_ELIGIBLE_PLAYERS",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;
}

#[actix_web::test]
async fn test_round_without_templates_is_unavailable() {
    let app = create_test_app(state_with_templates(&[]))
        .build()
        .await
        .unwrap();
    let id = create_session(&app, OWNER).await;
    add_player(&app, OWNER, &id, "Alice", "female", "male").await;

    let req = post_as(OWNER, &format!("/api/sessions/{id}/rounds")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "TEMPLATES_UNAVAILABLE",
        StatusCode::SERVICE_UNAVAILABLE,
        None,
    )
    .await;
}
