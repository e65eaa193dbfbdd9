//! Wiring tests for the assembled application.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use rstest::rstest;
use serde_json::Value;

use super::*;
use users_api::domain::{TRACE_ID_HEADER, UserId, UserRecord};
use users_api::outbound::memory::InMemoryUserStore;

fn deps(swagger: bool) -> AppDependencies {
    let mut record = UserRecord::new(UserId::new("u-1").expect("fixture id"));
    record.gender = Some("Male".to_owned());
    let store = Arc::new(InMemoryUserStore::new(vec![record]));
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    AppDependencies {
        health_state,
        http_state: build_http_state(store),
        swagger,
    }
}

#[rstest]
#[case("/api/users")]
#[case("/api/users?groupBy=colour")]
#[case("/health/ready")]
#[actix_web::test]
async fn responses_carry_cors_and_trace_headers(#[case] uri: &str) {
    let app = test::init_service(build_app(deps(false))).await;
    let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
    assert!(headers.contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn users_route_is_mounted_under_api() {
    let app = test::init_service(build_app(deps(false))).await;
    let response =
        test::call_service(&app, test::TestRequest::get().uri("/api/users").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("total").and_then(Value::as_u64), Some(1));
}

#[rstest]
#[actix_web::test]
async fn openapi_document_is_served_when_enabled() {
    let app = test::init_service(build_app(deps(true))).await;
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/info/title").and_then(Value::as_str),
        Some("Users API")
    );
}

#[rstest]
#[actix_web::test]
async fn docs_are_absent_when_disabled() {
    let app = test::init_service(build_app(deps(false))).await;
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn drain_fails_liveness_and_stops_the_server() {
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        std::net::SocketAddr::from(([127, 0, 0, 1], 0)),
        Arc::new(InMemoryUserStore::default()),
    );
    let server = create_server(health_state.clone(), config).expect("server should bind");
    let handle = server.handle();
    let running = actix_web::rt::spawn(server);

    drain(health_state.clone(), handle).await;

    running
        .await
        .expect("server task joins")
        .expect("server stops cleanly");
    assert!(!health_state.is_alive());

    let app = test::init_service(build_app(AppDependencies {
        health_state,
        http_state: build_http_state(Arc::new(InMemoryUserStore::default())),
        swagger: false,
    }))
    .await;
    let response =
        test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
