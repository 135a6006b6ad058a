mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use memo_fiche::api::{create_router, AppState};
use memo_fiche::ContentLibrary;
use serde_json::{json, Value};

fn test_server() -> TestServer {
    let state = AppState {
        study_service: common::offline_service(),
    };
    TestServer::new(create_router(state)).expect("failed to start test server")
}

fn data(body: &Value) -> &Value {
    assert_eq!(body["success"], json!(true), "unexpected envelope: {body}");
    &body["data"]
}

#[tokio::test]
async fn initial_state_shows_the_welcome_gate_and_memo_view() {
    let server = test_server();

    let response = server.get("/api/state").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let state = data(&body);
    assert_eq!(state["started"], json!(false));
    assert_eq!(state["active_view"], json!("memo"));
    assert_eq!(state["flashcards"]["index"], json!(0));
    assert_eq!(state["quiz"]["completed"], json!(false));
    assert_eq!(state["glossary"]["entries"], json!([]));
}

#[tokio::test]
async fn content_endpoint_serves_the_bundled_datasets() {
    let server = test_server();

    let response = server.get("/api/content").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let content = data(&body);
    assert_eq!(content["memo_sections"].as_array().unwrap().len(), 6);
    assert_eq!(content["flashcards"].as_array().unwrap().len(), 7);
    assert_eq!(content["quiz"].as_array().unwrap().len(), 10);
    assert!(content["media"]["video_url"]
        .as_str()
        .unwrap()
        .contains("youtube"));
}

#[tokio::test]
async fn starting_the_session_is_idempotent() {
    let server = test_server();

    let response = server.post("/api/session/start").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(data(&body)["first_start"], json!(true));

    let response = server.post("/api/session/start").await;
    let body: Value = response.json();
    assert_eq!(data(&body)["first_start"], json!(false));
    assert_eq!(data(&body)["state"]["started"], json!(true));
}

#[tokio::test]
async fn switching_views_only_changes_the_active_tag() {
    let server = test_server();

    let response = server.post("/api/view").json(&json!({"view": "glossary"})).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(data(&body)["active_view"], json!("glossary"));

    let response = server.post("/api/view").json(&json!({"view": "podcast"})).await;
    let body: Value = response.json();
    assert_eq!(data(&body)["active_view"], json!("podcast"));
}

#[tokio::test]
async fn unknown_views_are_rejected() {
    let server = test_server();

    let response = server
        .post("/api/view")
        .json(&json!({"view": "settings"}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn memo_sections_toggle_and_out_of_range_indices_404() {
    let server = test_server();

    let response = server.post("/api/memo/2/toggle").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(data(&body)["expanded"], json!(true));
    assert_eq!(data(&body)["state"]["memo"]["expanded"], json!([2]));

    let response = server.post("/api/memo/2/toggle").await;
    let body: Value = response.json();
    assert_eq!(data(&body)["expanded"], json!(false));

    let response = server.post("/api/memo/99/toggle").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn memo_prose_is_served_as_plain_fragments_while_the_glossary_is_empty() {
    let server = test_server();

    let response = server.get("/api/memo").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let sections = data(&body).as_array().unwrap();
    assert_eq!(sections.len(), 6);
    for section in sections {
        let fragments = section["fragments"].as_array().unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0]["kind"], json!("text"));
    }
}

#[tokio::test]
async fn flashcards_flip_and_navigate_over_http() {
    let server = test_server();

    let response = server.post("/api/flashcards/flip").await;
    let body: Value = response.json();
    assert_eq!(data(&body)["flashcards"]["flipped"], json!(true));

    let response = server.post("/api/flashcards/next").await;
    let body: Value = response.json();
    assert_eq!(data(&body)["flashcards"]["index"], json!(1));
    assert_eq!(data(&body)["flashcards"]["flipped"], json!(false));

    let response = server.post("/api/flashcards/prev").await;
    let body: Value = response.json();
    assert_eq!(data(&body)["flashcards"]["index"], json!(0));

    let response = server.post("/api/flashcards/prev").await;
    let body: Value = response.json();
    assert_eq!(data(&body)["flashcards"]["index"], json!(6));
}

#[tokio::test]
async fn a_full_quiz_run_completes_with_a_perfect_score() {
    let server = test_server();
    let quiz = ContentLibrary::bundled().quiz;

    for item in &quiz {
        let response = server
            .post("/api/quiz/answer")
            .json(&json!({"option": item.correct_index}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(data(&body)["applied"], json!(true));
        assert_eq!(data(&body)["correct"], json!(true));

        server.post("/api/quiz/next").await;
    }

    let response = server.get("/api/state").await;
    let body: Value = response.json();
    let quiz_state = &data(&body)["quiz"];
    assert_eq!(quiz_state["completed"], json!(true));
    assert_eq!(quiz_state["score"], json!(quiz.len()));
    assert_eq!(quiz_state["result"]["band"], json!("excellent"));
    assert_eq!(
        quiz_state["result"]["message"],
        json!("🏆 Parfait ! Maîtrise excellente du sujet.")
    );
}

#[tokio::test]
async fn quiz_ignores_answer_changes_and_validates_option_indices() {
    let server = test_server();

    let response = server.post("/api/quiz/answer").json(&json!({"option": 0})).await;
    let body: Value = response.json();
    assert_eq!(data(&body)["applied"], json!(true));

    // First answer wins.
    let response = server.post("/api/quiz/answer").json(&json!({"option": 1})).await;
    let body: Value = response.json();
    assert_eq!(data(&body)["applied"], json!(false));
    assert_eq!(data(&body)["state"]["quiz"]["selected"], json!(0));

    let response = server.post("/api/quiz/answer").json(&json!({"option": 17})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quiz_reset_returns_to_the_first_question() {
    let server = test_server();

    server.post("/api/quiz/answer").json(&json!({"option": 1})).await;
    server.post("/api/quiz/next").await;

    let response = server.post("/api/quiz/reset").await;
    let body: Value = response.json();
    let quiz_state = &data(&body)["quiz"];
    assert_eq!(quiz_state["current"], json!(0));
    assert_eq!(quiz_state["selected"], Value::Null);
    assert_eq!(quiz_state["score"], json!(0));
    assert_eq!(quiz_state["completed"], json!(false));
}

#[tokio::test]
async fn blank_explain_requests_return_the_fixed_message() {
    let server = test_server();

    let response = server
        .post("/api/glossary/explain")
        .json(&json!({"term": "   "}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(data(&body)["source"], json!("input"));
    assert_eq!(
        data(&body)["explanation"],
        json!("Veuillez entrer un terme médical à expliquer.")
    );
}

#[tokio::test]
async fn explain_degrades_to_an_error_message_without_a_credential() {
    let server = test_server();

    let response = server
        .post("/api/glossary/explain")
        .json(&json!({"term": "Dyspareunie"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(data(&body)["source"], json!("error"));
    assert!(data(&body)["explanation"]
        .as_str()
        .unwrap()
        .starts_with("Erreur :"));

    // Error messages are never cached.
    let response = server.get("/api/glossary").await;
    let body: Value = response.json();
    assert_eq!(data(&body), &json!([]));
}

#[tokio::test]
async fn preload_without_a_credential_finishes_with_an_empty_glossary() {
    let server = test_server();

    let response = server.post("/api/glossary/preload").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(data(&body)["status"], json!("loaded"));
    assert_eq!(data(&body)["added"], json!(0));
    assert_eq!(data(&body)["state"]["glossary"]["preload_busy"], json!(false));
}
