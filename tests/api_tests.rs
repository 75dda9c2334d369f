//! Integration tests for septotrip-rs against a mock Septotrip server.
//!
//! Run with: cargo test --test api_tests
//!
//! Set `RUST_LOG=septotrip=trace` to see request logs.

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use septotrip::models::{
    LoginCredentials, NewFile, NewSpend, Patch, RegisterCredentials, StepId, TripId, TripUpdate,
    UserId,
};
use septotrip::prelude::*;
use septotrip::auth::RENEWED_TOKEN_HEADER;
use septotrip::FsResolver;

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Token store that records every token written back to it.
#[derive(Default)]
struct RecordingStore {
    initial: String,
    stored: Mutex<Vec<String>>,
    fail_writes: bool,
}

impl RecordingStore {
    fn with_token(token: &str) -> Arc<Self> {
        Arc::new(Self {
            initial: token.to_string(),
            ..Default::default()
        })
    }

    fn failing(token: &str) -> Arc<Self> {
        Arc::new(Self {
            initial: token.to_string(),
            fail_writes: true,
            ..Default::default()
        })
    }

    fn stored(&self) -> Vec<String> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenStore for RecordingStore {
    async fn get_token(&self) -> septotrip::Result<String> {
        Ok(self.initial.clone())
    }

    async fn store_token(&self, token: &str) -> septotrip::Result<()> {
        self.stored.lock().unwrap().push(token.to_string());
        if self.fail_writes {
            return Err(Error::TokenStore("keychain locked".into()));
        }
        Ok(())
    }
}

/// Create a client pointed at the mock server
async fn create_client(server: &MockServer, store: Arc<RecordingStore>) -> SeptotripClient {
    init_logging();
    let config = ClientConfig::new(server.uri()).expect("mock server uri");
    SeptotripClient::initialize_with_resolver(config, store, Arc::new(FsResolver))
        .await
        .expect("Failed to create client")
}

fn trip_json(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name, "isPublic": false, "authorId": 1 })
}

fn step_json(id: u64, order: u32) -> Value {
    json!({
        "id": id,
        "tripId": 42,
        "name": format!("Step {id}"),
        "latitude": 64.14,
        "longitude": -21.94,
        "order": order
    })
}

fn expect_api_error(result: septotrip::Result<impl std::fmt::Debug>, kind: ErrorKind) -> ApiError {
    match result {
        Err(Error::Api(err)) if err.kind == kind => err,
        other => panic!("Expected {kind} error, got {other:?}"),
    }
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_bearer_token_from_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips/me"))
        .and(header("Authorization", "Bearer saved-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([trip_json(42, "Iceland")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("saved-token")).await;
    let trips = client.trips().mine().await.expect("Failed to list trips");

    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].id, TripId::new(42));
}

#[tokio::test]
async fn test_empty_token_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("")).await;
    assert!(!client.session().is_authenticated().await);

    let trips = client.trips().public().await.unwrap();
    assert!(trips.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_renewed_token_is_adopted_and_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .insert_header(RENEWED_TOKEN_HEADER, "fresh-token"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/trips"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = RecordingStore::with_token("stale-token");
    let client = create_client(&server, store.clone()).await;

    client.trips().mine().await.unwrap();
    client.trips().public().await.unwrap();

    assert_eq!(store.stored(), vec!["fresh-token".to_string()]);
}

#[tokio::test]
async fn test_renewal_applies_to_error_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips/9"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "message": "Trip not found" }))
                .insert_header(RENEWED_TOKEN_HEADER, "fresh-token"),
        )
        .mount(&server)
        .await;

    let store = RecordingStore::with_token("stale-token");
    let client = create_client(&server, store.clone()).await;

    let result = client.trips().get(TripId::new(9)).await;
    expect_api_error(result, ErrorKind::InexistantResource);
    assert_eq!(store.stored(), vec!["fresh-token".to_string()]);
}

#[tokio::test]
async fn test_failing_token_store_does_not_fail_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .insert_header(RENEWED_TOKEN_HEADER, "fresh-token"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/points"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = RecordingStore::failing("stale-token");
    let client = create_client(&server, store.clone()).await;

    client.trips().mine().await.expect("store failure must not surface");
    client.points().mine().await.unwrap();
    assert_eq!(store.stored().len(), 1);
}

#[tokio::test]
async fn test_login_adopts_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "ada@example.com",
            "session": { "token": "login-token" },
            "message": "Logged in"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("Authorization", "Bearer login-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let store = RecordingStore::with_token("");
    let client = create_client(&server, store.clone()).await;

    let login = client
        .users()
        .login(&LoginCredentials {
            email: "ada@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .expect("Failed to log in");

    assert_eq!(login.email, "ada@example.com");
    assert!(client.session().is_authenticated().await);
    assert_eq!(store.stored(), vec!["login-token".to_string()]);

    let private = client.users().private().await.unwrap();
    assert_eq!(private.message, "ok");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "name": "InvalidPasswordError",
            "message": "Wrong password"
        })))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("")).await;
    let result = client
        .users()
        .login(&LoginCredentials {
            email: "ada@example.com".into(),
            password: "nope".into(),
        })
        .await;

    let err = expect_api_error(result, ErrorKind::InvalidPassword);
    assert_eq!(err.code, 400);
    assert_eq!(err.message, "Wrong password");
}

#[tokio::test]
async fn test_register_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Email already used" })),
        )
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("")).await;
    let result = client
        .users()
        .register(&RegisterCredentials {
            email: "ada@example.com".into(),
            password: "hunter2".into(),
            first_name: Some("Ada".into()),
            last_name: None,
        })
        .await;

    expect_api_error(result, ErrorKind::ResourceAlreadyExist);
}

// =============================================================================
// Status mapping
// =============================================================================

#[tokio::test]
async fn test_401_is_invalid_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("old")).await;
    let result = client.users().private().await;

    let err = expect_api_error(result, ErrorKind::InvalidToken);
    assert_eq!(err.code, 401);
    assert_eq!(err.message, "jwt expired");
    assert_eq!(err.name(), "InvalidTokenError");
}

#[tokio::test]
async fn test_403_is_unauthorized_even_on_raw_send() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/trips/42"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    let result = client.send("/trips/42", Method::Delete, None).await;

    let err = expect_api_error(result, ErrorKind::Unauthorized);
    assert_eq!(err.message, "Unknown API error");
}

#[tokio::test]
async fn test_400_depends_on_call_shape() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/steps/0"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "No id" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/trips"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "Bad body" })))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;

    let result = client.steps().delete(StepId::new(0)).await;
    expect_api_error(result, ErrorKind::NoIdProvided);

    let result = client
        .trips()
        .create(&septotrip::models::NewTrip {
            name: String::new(),
            description: None,
            start_date: None,
            end_date: None,
            is_public: false,
        })
        .await;
    let err = expect_api_error(result, ErrorKind::InvalidBody);
    assert_eq!(err.message, "Bad body");
}

#[tokio::test]
async fn test_unmapped_status_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips/42"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;

    match client.trips().get(TripId::new(42)).await {
        Err(err @ Error::Status { .. }) => {
            assert!(err.is_server_error());
            assert_eq!(err.status(), Some(500));
            if let Error::Status { body, .. } = err {
                assert_eq!(body, json!("boom"));
            }
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

// =============================================================================
// Payload validation
// =============================================================================

#[tokio::test]
async fn test_malformed_payload_never_reaches_caller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "42" })))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;

    match client.trips().get(TripId::new(42)).await {
        Err(Error::Decode { payload, .. }) => assert_eq!(payload, json!({ "id": "42" })),
        other => panic!("Expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_rejects_one_bad_element() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trips/42/steps"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([step_json(1, 0), { "id": 2 }])),
        )
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    let result = client.steps().list(TripId::new(42)).await;
    assert!(matches!(result, Err(Error::Decode { .. })));
}

// =============================================================================
// JSON bodies
// =============================================================================

#[tokio::test]
async fn test_absent_field_is_sent_as_null() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/trips/42"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "name": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip_json(42, "")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    let body = JsonBody::new().absent("name");
    let value = client.send("/trips/42", Method::Put, Some(body)).await.unwrap();

    assert_eq!(value["id"], json!(42));
}

#[tokio::test]
async fn test_trip_update_sends_only_touched_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/trips/42"))
        .and(body_json(json!({ "name": "Nordic loop", "description": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip_json(42, "Nordic loop")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    let trip = client
        .trips()
        .update(
            TripId::new(42),
            &TripUpdate {
                name: Patch::Set("Nordic loop".into()),
                description: Patch::Clear,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(trip.name, "Nordic loop");
}

#[tokio::test]
async fn test_reorder_step() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/steps/3/order"))
        .and(body_json(json!({ "newOrder": 0 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([step_json(3, 0), step_json(1, 1)])),
        )
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    let steps = client.steps().reorder(StepId::new(3), 0).await.unwrap();

    assert_eq!(steps[0].id, StepId::new(3));
    assert_eq!(steps[1].order, 1);
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/steps/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    client.steps().delete(StepId::new(3)).await.expect("Failed to delete step");
}

#[tokio::test]
async fn test_plain_text_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/steps/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Step deleted"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/trips/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not a trip"))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;

    let value = client.send("/steps/3", Method::Delete, None).await.unwrap();
    assert_eq!(value, json!("Step deleted"));
    client.steps().delete(StepId::new(3)).await.expect("Failed to delete step");

    match client.trips().get(TripId::new(42)).await {
        Err(Error::Decode { payload, .. }) => assert_eq!(payload, json!("not a trip")),
        other => panic!("Expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_spend_with_beneficiaries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trips/42/spents"))
        .and(body_json(json!({
            "tripId": 42,
            "title": "Ferry",
            "amount": 45.5,
            "beneficiaries": [1, 2]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "tripId": 42,
            "title": "Ferry",
            "amount": 45.5,
            "authorId": 1
        })))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    let spend = client
        .spends()
        .create(&NewSpend {
            trip_id: TripId::new(42),
            title: "Ferry".into(),
            amount: dec!(45.5),
            date: None,
            beneficiaries: vec![UserId::new(1), UserId::new(2)],
        })
        .await
        .unwrap();

    assert_eq!(spend.amount, dec!(45.5));
}

#[tokio::test]
async fn test_set_beneficiaries_sends_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/spents/5/beneficiaries"))
        .and(body_json(json!([1, 3])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "email": "ada@example.com" },
            { "id": 3, "email": "grace@example.com" }
        ])))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    let users = client
        .spends()
        .set_beneficiaries(SpendId::new(5), &[UserId::new(1), UserId::new(3)])
        .await
        .unwrap();

    assert_eq!(users.len(), 2);
}

// =============================================================================
// Multipart uploads
// =============================================================================

fn request_body(request: &Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}

#[tokio::test]
async fn test_file_upload_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trips/7/file"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11,
            "tripId": 7,
            "name": "notes.txt",
            "mimeType": "text/plain"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    let file = FileHandle::web("notes.txt", Some("text/plain"), b"hello".to_vec());
    let stored = client
        .files()
        .upload(
            &NewFile {
                trip_id: TripId::new(7),
                description: None,
            },
            file,
        )
        .await
        .expect("Failed to upload");

    assert_eq!(stored.name, "notes.txt");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = request_body(&requests[0]);
    assert!(body.contains("name=\"file\"; filename=\"notes.txt\""));
    assert!(body.contains("hello"));
    assert!(body.contains("name=\"tripId\"\r\n\r\n7\r\n"));
    assert!(!body.contains("name=\"description\""));
}

#[tokio::test]
async fn test_raw_upload_with_mixed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trips/7/file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    let fields = FormFields::new()
        .insert("caption", "Sunset")
        .insert("public", true)
        .insert("tripId", 7u64);
    let value = client
        .upload("/trips/7/file", Method::Post, fields)
        .await
        .unwrap();

    assert_eq!(value, json!({ "ok": true }));

    let requests = server.received_requests().await.unwrap();
    let body = request_body(&requests[0]);
    assert!(body.contains("name=\"caption\"\r\n\r\nSunset\r\n"));
    assert!(body.contains("name=\"public\"\r\n\r\ntrue\r\n"));
}

#[tokio::test]
async fn test_upload_maps_401_and_renews_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trips/7/file"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "jwt expired" }))
                .insert_header(RENEWED_TOKEN_HEADER, "fresh-token"),
        )
        .mount(&server)
        .await;

    let store = RecordingStore::with_token("stale-token");
    let client = create_client(&server, store.clone()).await;
    let result = client
        .files()
        .upload(
            &NewFile {
                trip_id: TripId::new(7),
                description: Some("receipt".into()),
            },
            FileHandle::web("receipt.pdf", None, b"%PDF".to_vec()),
        )
        .await;

    let err = expect_api_error(result, ErrorKind::InvalidToken);
    assert_eq!(err.message, "jwt expired");
    assert_eq!(store.stored(), vec!["fresh-token".to_string()]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].headers.get("authorization").and_then(|v| v.to_str().ok()),
        Some("Bearer stale-token")
    );
}

#[tokio::test]
async fn test_raw_upload_maps_403() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trips/7/file"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = create_client(&server, RecordingStore::with_token("abc")).await;
    let result = client
        .upload("/trips/7/file", Method::Post, FormFields::new().insert("tripId", 7u64))
        .await;

    expect_api_error(result, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_unreadable_mobile_file_fails_before_sending() {
    let server = MockServer::start().await;
    let client = create_client(&server, RecordingStore::with_token("abc")).await;

    let file = FileHandle::mobile("content://media/external/images/1", "a.jpg", "image/jpeg")
        .unwrap();
    let result = client
        .upload("/trips/7/file", Method::Post, FormFields::new().insert("file", file))
        .await;

    assert!(result.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}
