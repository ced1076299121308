//! End-to-end search flow against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP using ureq. Validates that rendered filters reach
//! the server intact and that responses decode into the core DTOs.

use mailgrid_core::search::{
    ContactsFilterField, Criterion, EmailActivitiesFilterField as Field, Group, Predicate,
    UniqueArgCriterion,
};
use mailgrid_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, MailClient, MessageStatus};
use mock_server::{AppState, API_KEY};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => {
            let mut builder = agent.get(&req.url);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        (HttpMethod::Post, body) => {
            let mut builder = agent.post(&req.url);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Start the mock server on a random port and return its base URL.
fn start_server(state: AppState) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_state(listener, state).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn received_queries(state: &AppState) -> Vec<String> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(state.received_queries())
}

#[test]
fn search_flow() {
    let state = AppState::seeded();
    let client = MailClient::new(&start_server(state.clone()), API_KEY);

    // Step 1: search with a nested filter.
    let filter: Predicate<Field> = Group::any([
        Predicate::from(Group::all([
            Predicate::from(Criterion::is(Field::Status, MessageStatus::Delivered)),
            Criterion::greater_than(Field::OpensCount, 0).into(),
        ])),
        UniqueArgCriterion::<Field>::equal("campaign_id", 42).unwrap().into(),
    ])
    .into();
    let req = client.build_search_messages(&filter, 2).unwrap();
    let messages = client.parse_search_messages(execute(req)).unwrap();
    assert_eq!(messages.len(), 2, "limit should cap the page");
    assert_eq!(messages[0].status, MessageStatus::Delivered);
    assert_eq!(messages[1].status, MessageStatus::NotDelivered);

    // Step 2: the server saw exactly the rendered filter.
    assert_eq!(
        received_queries(&state),
        vec![filter.render().unwrap()],
    );
    assert_eq!(
        received_queries(&state)[0],
        "(((status IS delivered) AND (opens_count>0)) OR (unique_args['campaign_id']=42))"
    );

    // Step 3: fetch one message in detail.
    let msg_id = messages[1].msg_id.clone();
    let req = client.build_get_message(&msg_id).unwrap();
    let details = client.parse_get_message(execute(req)).unwrap();
    assert_eq!(details.msg_id, msg_id);
    assert_eq!(details.events.len(), 2);

    // Step 4: unknown message is NotFound.
    let req = client.build_get_message("missing").unwrap();
    let err = client.parse_get_message(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 5: contact search carries the filter in the JSON body.
    let contacts: Predicate<ContactsFilterField> =
        Criterion::like(ContactsFilterField::Email, "%@example.com").into();
    let req = client.build_search_contacts(&contacts).unwrap();
    let result = client.parse_search_contacts(execute(req)).unwrap();
    assert_eq!(result.contact_count, 2);
    assert_eq!(result.result.len(), 2);
    assert_eq!(
        received_queries(&state).last().map(String::as_str),
        Some(r#"(email LIKE "%@example.com")"#)
    );
}

#[test]
fn wrong_api_key_is_unauthorized() {
    let client = MailClient::new(&start_server(AppState::seeded()), "SG.wrong");

    let filter: Predicate<Field> = Criterion::is_not_null(Field::MsgId).into();
    let req = client.build_search_messages(&filter, 10).unwrap();
    let err = client.parse_search_messages(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { status: 401 }));
}
