//! HTTP surface tests: routing, status codes and error bodies.

mod common;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use common::{MockDocumentStore, MockStoreFactory};
use school_certificates::id_card::cache::{LocalCardCache, MemoryCardStorage};
use school_certificates::session::lock_for_mutation;
use school_certificates::{configure_api, AppState};

fn app_state(store: Arc<MockDocumentStore>) -> web::Data<AppState> {
    web::Data::new(AppState::with_parts(
        Arc::new(MockStoreFactory(store)),
        Arc::new(LocalCardCache::load(Arc::new(MemoryCardStorage::new()))),
        Duration::from_secs(60),
    ))
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .service(web::scope("/api").configure(configure_api)),
        )
        .await
    };
}

#[actix_web::test]
async fn requests_without_a_token_are_unauthorized() {
    let state = app_state(Arc::new(MockDocumentStore::new()));
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/institution/mode").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[actix_web::test]
async fn madrasah_mode_switches_language_and_tabs() {
    let state = app_state(Arc::new(MockDocumentStore::madrasah()));
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/institution/mode")
        .insert_header(("Authorization", "Bearer t1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["default_tab"], "appreciation");
    assert_eq!(body["lang"], "bn");
    assert!(body["suggestions"].is_object());
}

#[actix_web::test]
async fn incomplete_forms_are_rejected_with_field_details() {
    let store = Arc::new(MockDocumentStore::new());
    let state = app_state(store.clone());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/certificates/transfer")
        .insert_header(("Authorization", "Bearer t1"))
        .set_json(json!({ "status": "issued", "form": { "student_id": "S1" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(body["details"].as_array().map(Vec::len), Some(2));
    assert_eq!(store.create_calls(), 0);
}

#[actix_web::test]
async fn created_certificates_show_up_in_the_list() {
    let store = Arc::new(MockDocumentStore::new());
    let state = app_state(store.clone());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/certificates/transfer")
        .insert_header(("Authorization", "Bearer t1"))
        .set_json(json!({
            "status": "issued",
            "form": {
                "student_id": "S1",
                "student_name": "Rahim Uddin",
                "date_of_leaving": "2025-01-10",
                "reason_for_transfer": "Family relocation"
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], "issued");
    assert!(created["issue_date"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/certificates/transfer?search=rahim&status=issued")
        .insert_header(("Authorization", "Bearer t1"))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["id"], created["id"]);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/certificates/transfer/{}/status", created["id"].as_str().unwrap()))
        .insert_header(("Authorization", "Bearer t1"))
        .set_json(json!({ "status": "draft" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "InvalidTransition");
}

#[actix_web::test]
async fn a_second_submission_on_a_busy_session_conflicts() {
    let store = Arc::new(MockDocumentStore::new());
    let state = app_state(store.clone());
    let app = init_app!(state);
    let create = || {
        test::TestRequest::post()
            .uri("/api/certificates/bonafide")
            .insert_header(("Authorization", "Bearer t1"))
            .set_json(json!({
                "status": "draft",
                "form": { "student_id": "S1", "purpose": "Bank account", "academic_year": "2025" }
            }))
            .to_request()
    };

    let session = state.workspace("t1").await;
    let running = lock_for_mutation(&session).await.unwrap();
    let resp = test::call_service(&app, create()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Conflict");
    assert_eq!(store.create_calls(), 0);

    drop(running);
    let resp = test::call_service(&app, create()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(store.create_calls(), 1);
}

#[actix_web::test]
async fn branding_fallback_is_not_cached() {
    let store = Arc::new(MockDocumentStore::new());
    store.fail_institution(true);
    let state = app_state(store.clone());
    let app = init_app!(state);
    let branding = || {
        test::TestRequest::get()
            .uri("/api/branding")
            .insert_header(("Authorization", "Bearer t1"))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, branding()).await;
    assert_eq!(body["name"], "");
    let _: Value = test::call_and_read_body_json(&app, branding()).await;
    assert_eq!(store.institution_calls(), 2);

    store.fail_institution(false);
    let body: Value = test::call_and_read_body_json(&app, branding()).await;
    assert_eq!(body["name"], "Green Valley School");
    let _: Value = test::call_and_read_body_json(&app, branding()).await;
    assert_eq!(store.institution_calls(), 3);
}

#[actix_web::test]
async fn unknown_kinds_are_not_found() {
    let state = app_state(Arc::new(MockDocumentStore::new()));
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/certificates/diploma")
        .insert_header(("Authorization", "Bearer t1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn generating_cards_switches_to_the_generated_view() {
    let state = app_state(Arc::new(MockDocumentStore::new()));
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/id-cards")
        .insert_header(("Authorization", "Bearer t1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["view"], "main");

    let req = test::TestRequest::post()
        .uri("/api/id-cards")
        .insert_header(("Authorization", "Bearer t1"))
        .set_json(json!({ "card_type": "student", "person_ids": ["S1", "missing"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let cards: Value = test::read_body_json(resp).await;
    assert_eq!(cards.as_array().map(Vec::len), Some(1));
    assert_eq!(cards[0]["schoolBranding"]["name"], "Green Valley School");

    let req = test::TestRequest::get()
        .uri("/api/id-cards")
        .insert_header(("Authorization", "Bearer t1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["view"], "generated");
    assert_eq!(body["cards"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri("/api/id-cards/print")
        .insert_header(("Authorization", "Bearer t1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn printing_with_no_cards_is_a_bad_request() {
    let state = app_state(Arc::new(MockDocumentStore::new()));
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/id-cards/print")
        .insert_header(("Authorization", "Bearer t1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
