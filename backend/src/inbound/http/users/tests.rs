//! Handler tests for `GET /api/users` against a mocked query port.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockUsersQuery;
use crate::domain::{Error, UserId};
use crate::inbound::http::api_scope;

fn record(id: &str) -> UserRecord {
    UserRecord::new(UserId::new(id).expect("fixture id"))
}

async fn get_json(users: MockUsersQuery, uri: &str) -> (StatusCode, Value) {
    let state = HttpState::new(Arc::new(users));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(api_scope()),
    )
    .await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("json body");
    (status, value)
}

#[rstest]
#[case("/api/users", 1, 10)]
#[case("/api/users?page=2&limit=5", 2, 5)]
#[case("/api/users?page=abc&limit=0", 1, 10)]
#[case("/api/users?page=-4&limit=3", 1, 3)]
#[case("/api/users?groupBy=&page=3", 3, 10)]
#[actix_web::test]
async fn pagination_forwards_normalised_request(
    #[case] uri: &str,
    #[case] page: u32,
    #[case] limit: u32,
) {
    let mut users = MockUsersQuery::new();
    users
        .expect_list_users()
        .withf(move |request| request.page() == page && request.limit() == limit)
        .times(1)
        .returning(|request| Ok(Page::new(0, request, Vec::new())));
    users.expect_group_users().times(0);

    let (status, body) = get_json(users, uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "total": 0, "page": page, "limit": limit, "users": [] })
    );
}

#[rstest]
#[actix_web::test]
async fn pagination_body_uses_wire_names() {
    let mut users = MockUsersQuery::new();
    users.expect_list_users().times(1).returning(|request| {
        let mut first = record("u-1");
        first.name = Some("Ayu".to_owned());
        first.phone_number = Some("0812".to_owned());
        Ok(Page::new(11, request, vec![first, record("u-2")]))
    });

    let (status, body) = get_json(users, "/api/users?page=2&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "total": 11,
            "page": 2,
            "limit": 2,
            "users": [
                { "id": "u-1", "Name": "Ayu", "No_Telp": "0812" },
                { "id": "u-2" }
            ]
        })
    );
}

#[rstest]
#[actix_web::test]
async fn group_by_selects_grouping_mode() {
    let mut users = MockUsersQuery::new();
    users.expect_list_users().times(0);
    users
        .expect_group_users()
        .withf(|field| field.to_string() == "gender")
        .times(1)
        .returning(|_| {
            Ok(UserGroups {
                field: UserField::Gender,
                groups: vec![GroupCount::new("male", 2), GroupCount::new("female", 1)],
            })
        });

    let (status, body) = get_json(users, "/api/users?groupBy=gender&page=9").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "groupedBy": "gender",
            "groups": [
                { "value": "male", "count": 2 },
                { "value": "female", "count": 1 }
            ]
        })
    );
}

#[rstest]
#[case(Error::invalid_request("Invalid groupBy field: colour"), StatusCode::BAD_REQUEST)]
#[case(Error::internal("aggregate failed"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Error::service_unavailable("no servers"), StatusCode::SERVICE_UNAVAILABLE)]
#[actix_web::test]
async fn grouping_failures_render_error_body(#[case] error: Error, #[case] expected: StatusCode) {
    let message = error.message().to_owned();
    let mut users = MockUsersQuery::new();
    users
        .expect_group_users()
        .times(1)
        .return_once(move |_| Err(error));

    let (status, body) = get_json(users, "/api/users?groupBy=colour").await;

    assert_eq!(status, expected);
    assert_eq!(body.get("error").and_then(Value::as_str), Some(message.as_str()));
}

#[rstest]
fn user_response_omits_absent_attributes() {
    let mut user = record("u-7");
    user.age = Some(31);
    user.location_type = Some("Mall".to_owned());
    user.created_at = chrono::DateTime::from_timestamp_millis(1_710_000_000_000);

    let value = serde_json::to_value(UserResponse::from(user)).expect("serialise");

    assert_eq!(
        value,
        json!({
            "id": "u-7",
            "Age": 31,
            "Location_Type": "Mall",
            "createdAt": "2024-03-09T16:00:00.000Z"
        })
    );
}
