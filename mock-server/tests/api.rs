use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_state, AppState, ContactList, MessageDetails, MessageList, API_KEY};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authorized_get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/v3/messages?query=%28status%20IS%20delivered%29")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_bytes(resp).await.is_empty());
}

// --- message search ---

#[tokio::test]
async fn search_messages_returns_seeded_rows() {
    let resp = app()
        .oneshot(authorized_get("/v3/messages?limit=10&query=%28opens_count%3E0%29"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: MessageList = body_json(resp).await;
    assert_eq!(list.messages.len(), 3);
    assert_eq!(list.messages[0].msg_id, "msg-delivered-1");
}

#[tokio::test]
async fn search_messages_honours_limit() {
    let resp = app()
        .oneshot(authorized_get("/v3/messages?limit=1&query=%28opens_count%3E0%29"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: MessageList = body_json(resp).await;
    assert_eq!(list.messages.len(), 1);
}

#[tokio::test]
async fn search_messages_without_query_returns_400() {
    let resp = app().oneshot(authorized_get("/v3/messages?limit=5")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_messages_rejects_zero_limit() {
    let resp = app()
        .oneshot(authorized_get("/v3/messages?limit=0&query=x"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_messages_records_the_decoded_query() {
    let state = AppState::seeded();
    let resp = app_with_state(state.clone())
        .oneshot(authorized_get(
            "/v3/messages?query=%28unique_args%5B%27campaign_id%27%5D%3D42%29",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.received_queries().await, vec!["(unique_args['campaign_id']=42)"]);
}

// --- message details ---

#[tokio::test]
async fn get_message_returns_events() {
    let resp = app()
        .oneshot(authorized_get("/v3/messages/msg-bounced-2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let details: MessageDetails = body_json(resp).await;
    assert_eq!(details.message.status, "not_delivered");
    assert_eq!(details.events.len(), 2);
    assert_eq!(details.events[1].event_name, "bounced");
}

#[tokio::test]
async fn get_message_not_found() {
    let resp = app()
        .oneshot(authorized_get("/v3/messages/does-not-exist"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- contact search ---

#[tokio::test]
async fn search_contacts_returns_all_contacts() {
    let state = AppState::seeded();
    let resp = app_with_state(state.clone())
        .oneshot(json_request(
            "POST",
            "/v3/marketing/contacts/search",
            r#"{"query":"(email LIKE \"%@example.com\")"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: ContactList = body_json(resp).await;
    assert_eq!(list.contact_count, 2);
    assert_eq!(list.result[0].email, "ann@example.com");
    assert_eq!(
        state.received_queries().await,
        vec![r#"(email LIKE "%@example.com")"#]
    );
}

#[tokio::test]
async fn search_contacts_blank_query_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/v3/marketing/contacts/search", r#"{"query":"  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_contacts_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/v3/marketing/contacts/search", r#"{"filter":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- several calls on one service ---

#[tokio::test]
async fn queries_accumulate_across_calls() {
    use tower::Service;

    let state = AppState::seeded();
    let mut svc = app_with_state(state.clone()).into_service();

    for query in ["%28opens_count%3E0%29", "%28clicks_count%3E0%29"] {
        let resp = ServiceExt::ready(&mut svc)
            .await
            .unwrap()
            .call(authorized_get(&format!("/v3/messages?query={query}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(
        state.received_queries().await,
        vec!["(opens_count>0)", "(clicks_count>0)"]
    );
}
