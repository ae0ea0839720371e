//! End-to-end REST behaviour through the assembled application.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use quickpoll::middleware::TRACE_ID_HEADER;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[actix_web::test]
async fn poll_lifecycle_over_rest() {
    let app = support::init_app(support::store()).await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/polls")
            .set_json(json!({ "question": "Best color?", "options": ["Red", "Blue"] }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(created).await;
    let id = created["poll"]["id"].as_str().expect("poll id").to_owned();

    let voted: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("/polls/{id}/vote"))
            .set_json(json!({ "optionIndex": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(voted["poll"]["votes"], json!([0, 1]));

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/polls").to_request(),
    )
    .await;
    assert_eq!(listed["polls"].as_array().map(Vec::len), Some(1));
    assert!(listed["polls"][0].get("votes").is_none());

    let closed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("/polls/{id}/close"))
            .to_request(),
    )
    .await;
    assert_eq!(closed["poll"]["closed"], true);

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/polls").to_request(),
    )
    .await;
    assert_eq!(listed, json!({ "polls": [] }));

    let rejected = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/polls/{id}/vote"))
            .set_json(json!({ "optionIndex": 0 }))
            .to_request(),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let fetched: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri(&format!("/polls/{id}")).to_request(),
    )
    .await;
    assert_eq!(fetched["poll"]["votes"], json!([0, 1]));
}

#[rstest]
#[actix_web::test]
async fn error_bodies_echo_the_trace_header() {
    let app = support::init_app(support::store()).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/polls/00000000-0000-0000-0000-000000000000")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("trace-id header")
        .to_owned();
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["traceId"].as_str(), Some(header.as_str()));
    assert_eq!(body["details"]["code"], "poll_not_found");
}

#[rstest]
#[case("/")]
#[case("/health/ready")]
#[case("/health/live")]
#[case("/ws-info")]
#[actix_web::test]
async fn operational_endpoints_respond(#[case] uri: &str) {
    let app = support::init_app(support::store()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK, "{uri}");
}

#[rstest]
#[actix_web::test]
async fn live_path_is_not_treated_as_a_poll_id() {
    let app = support::init_app(support::store()).await;

    // Without upgrade headers the socket route refuses the request rather
    // than reporting an unknown poll.
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/polls/live").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
