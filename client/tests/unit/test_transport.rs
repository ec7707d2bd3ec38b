//! Signed transport tests against a mock vendor API

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use clife::errors::ClientError;
use clife::http::client::HttpClient;
use clife::http::devices::{API_DEVICE_CONTROL, API_DEVICE_LIST, API_PROPERTY_LIST};
use clife::http::signing;
use clife::utils::sha256_base64;

use crate::common::{self, header, ACCESS_TOKEN, APP_ID, APP_SECRET};

async fn client(server: &MockServer, dir: &std::path::Path) -> HttpClient {
    let settings = common::settings(&server.uri(), dir);
    common::write_valid_token(&settings.token_file()).await;
    let tokens = common::token_manager(&settings, Arc::new(Utc::now)).await;
    common::http_client(&settings, tokens)
}

fn query(request: &Request) -> HashMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

fn assert_signed(request: &Request) {
    let date = header(request, "date");
    let to_sign = signing::signing_string(
        APP_ID,
        request.method.as_str(),
        signing::path_and_query(&request.url),
        date,
    );
    let signature = signing::compute_signature(APP_SECRET, &to_sign);
    assert_eq!(
        header(request, "authorization"),
        signing::authorization_header(&signature, APP_ID)
    );
    assert_eq!(header(request, "hi-params-encrypt"), APP_ID);
    assert_eq!(header(request, "content-type"), "application/json");
}

#[tokio::test]
async fn test_get_carries_system_params_and_signature() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let http = client(&server, tmp.path()).await;

    Mock::given(method("GET"))
        .and(path(API_PROPERTY_LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": 0,
            "properties": [{"propertyKey": "t_power", "propertyValueList": "0,1"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let properties = http.get_property_list("009", "199").await.unwrap();
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].property_key, "t_power");

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let params = query(request);

    assert_eq!(params["deviceTypeCode"], "009");
    assert_eq!(params["deviceFeatureCode"], "199");
    assert_eq!(params["version"], "8.1");
    assert_eq!(params["languageId"], "1");
    assert_eq!(params["timezone"], "UTC");
    assert_eq!(params["platformId"], "5");
    assert_eq!(params["appId"], APP_ID);
    assert_eq!(params["accessToken"], ACCESS_TOKEN);
    assert!(params["sourceId"].starts_with("td001002000"));
    assert_eq!(params["randStr"].len(), 32);
    assert!(params["timeStamp"].parse::<i64>().is_ok());

    assert_signed(request);
    assert_eq!(header(request, "accesstoken"), ACCESS_TOKEN);
    assert_eq!(
        header(request, "digest"),
        format!("SHA-256={}", signing::EMPTY_BODY_DIGEST)
    );
}

#[tokio::test]
async fn test_post_body_is_signed_and_digested() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let http = client(&server, tmp.path()).await;

    Mock::given(method("POST"))
        .and(path(API_DEVICE_CONTROL))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": 0,
            "kvMap": {"t_power": "1"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut properties = Map::new();
    properties.insert("t_power".into(), json!(1));
    let echoed = http.control_device("ABC123", &properties).await.unwrap();
    assert_eq!(echoed.get("t_power"), Some(&json!("1")));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let body: Value = serde_json::from_slice(&request.body).unwrap();

    assert_eq!(body["puid"], "ABC123");
    assert_eq!(body["properties"], json!({"t_power": 1}));
    assert_eq!(body["appId"], APP_ID);
    assert_eq!(body["platformId"], 5);
    assert!(body.get("accessToken").is_none());
    assert!(request.url.query().is_none());
    assert!(request.headers.get("accesstoken").is_none());

    assert_signed(request);
    assert_eq!(
        header(request, "digest"),
        format!("SHA-256={}", sha256_base64(&request.body))
    );
}

#[tokio::test]
async fn test_system_params_override_caller_fields() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let http = client(&server, tmp.path()).await;

    Mock::given(method("POST"))
        .and(path("/echo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultCode": "0"})))
        .mount(&server)
        .await;

    let mut fields = Map::new();
    fields.insert("appId".into(), json!("spoofed"));
    fields.insert("note".into(), json!("kept"));
    http.post("/echo", fields).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["appId"], APP_ID);
    assert_eq!(body["note"], "kept");
}

#[tokio::test]
async fn test_source_id_is_stable_per_client() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let http = client(&server, tmp.path()).await;

    Mock::given(method("GET"))
        .and(path(API_DEVICE_LIST))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"resultCode": 0, "deviceList": []})),
        )
        .expect(2)
        .mount(&server)
        .await;

    assert!(http.get_device_list().await.unwrap().is_empty());
    assert!(http.get_device_list().await.unwrap().is_empty());

    let requests = server.received_requests().await.unwrap();
    let first = query(&requests[0]);
    let second = query(&requests[1]);
    assert_eq!(first["sourceId"], second["sourceId"]);
    assert_eq!(first["sourceId"], http.source_id());
    assert_ne!(first["randStr"], second["randStr"]);
}

#[tokio::test]
async fn test_vendor_error_keeps_message() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let http = client(&server, tmp.path()).await;

    Mock::given(method("GET"))
        .and(path(API_DEVICE_LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": 1,
            "msg": "device offline",
        })))
        .mount(&server)
        .await;

    let err = http.get_device_list().await.unwrap_err();
    match err {
        ClientError::ApiError { message } => assert_eq!(message, "device offline"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let http = client(&server, tmp.path()).await;

    Mock::given(method("GET"))
        .and(path(API_DEVICE_LIST))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = http.get_device_list().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)), "{err:?}");
}

#[tokio::test]
async fn test_server_error_is_transport_error() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let http = client(&server, tmp.path()).await;

    Mock::given(method("GET"))
        .and(path(API_DEVICE_LIST))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = http.get_device_list().await.unwrap_err();
    assert!(matches!(err, ClientError::TransportError(_)), "{err:?}");
}

#[tokio::test]
async fn test_missing_session_fails_before_sending() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let settings = common::settings(&server.uri(), tmp.path());
    let tokens = common::token_manager(&settings, Arc::new(Utc::now)).await;
    let http = common::http_client(&settings, tokens);

    let err = http.get_device_list().await.unwrap_err();
    assert!(matches!(err, ClientError::NoCredentials));
    assert!(server.received_requests().await.unwrap().is_empty());
}
