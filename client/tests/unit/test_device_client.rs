//! Device client tests: discovery, status parsing and control

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::{json, Map, Value};
use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clife::cache::properties::PropertyListCache;
use clife::errors::ClientError;
use clife::filesys::dir::Dir;
use clife::http::devices::{
    API_DEVICE_CONTROL, API_DEVICE_LIST, API_HOUR_POWER, API_PROPERTY_LIST,
    API_QUERY_STATIC_DATA, API_SELF_CHECK,
};
use clife::schema::codec::StatusValue;
use clife::schema::registry::DeviceKind;
use clife::DeviceClient;

use crate::common;

fn split_ac() -> Value {
    json!({
        "wifiId": "wifi-1",
        "deviceId": "dev-1",
        "puid": "ABC123",
        "deviceNickName": "Living room",
        "deviceTypeCode": "009",
        "deviceFeatureCode": "199",
        "offlineState": 1,
        "statusList": {"t_power": "1", "t_work_mode": "2", "t_temp": 24}
    })
}

fn ok(payload: Value) -> ResponseTemplate {
    let mut body = payload.as_object().cloned().unwrap_or_default();
    body.insert("resultCode".into(), json!(0));
    ResponseTemplate::new(200).set_body_json(Value::Object(body))
}

async fn device_client(server: &MockServer, dir: &std::path::Path) -> DeviceClient {
    let settings = common::settings(&server.uri(), dir);
    common::write_valid_token(&settings.token_file()).await;
    let tokens = common::token_manager(&settings, Arc::new(Utc::now)).await;
    let http = Arc::new(common::http_client(&settings, tokens.clone()));
    DeviceClient::from_parts(
        http,
        tokens,
        PropertyListCache::in_memory(Duration::from_secs(3600)),
    )
}

async fn mount_devices(server: &MockServer, devices: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(API_DEVICE_LIST))
        .respond_with(ok(json!({"deviceList": devices})))
        .mount(server)
        .await;
}

async fn mount_properties(server: &MockServer, properties: Value, calls: u64) {
    Mock::given(method("GET"))
        .and(path(API_PROPERTY_LIST))
        .and(query_param("deviceTypeCode", "009"))
        .and(query_param("deviceFeatureCode", "199"))
        .respond_with(ok(json!({"properties": properties})))
        .expect(calls)
        .mount(server)
        .await;
}

async fn mount_static_and_self_check(server: &MockServer, failed: Value) {
    Mock::given(method("POST"))
        .and(path(API_QUERY_STATIC_DATA))
        .respond_with(ok(json!({"data": {"Temperature_unit_switch": "1"}})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(API_SELF_CHECK))
        .respond_with(ok(json!({"data": {"selfCheckFailedList": failed}})))
        .mount(server)
        .await;
}

fn basic_properties() -> Value {
    json!([
        {"propertyKey": "t_power", "propertyValueList": "0,1"},
        {"propertyKey": "t_work_mode", "propertyValueList": "0,1,2"},
        {"propertyKey": "t_temp", "propertyValueList": "16~32"},
    ])
}

#[tokio::test]
async fn test_discovery_parses_split_ac_status() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    mount_devices(&server, vec![split_ac()]).await;
    mount_properties(&server, basic_properties(), 1).await;
    mount_static_and_self_check(&server, json!([])).await;

    let client = device_client(&server, tmp.path()).await;
    let devices = client.list_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].puid, "ABC123");
    assert!(devices[0].is_online());

    let managed = client.device("dev-1").unwrap();
    assert_eq!(managed.schema.kind(), DeviceKind::SplitAc);
    assert!(!managed.schema.contains("f_power_consumption"));

    let status = client.get_device_status("dev-1").await.unwrap();
    assert_eq!(status["t_power"], StatusValue::Text("On".into()));
    assert_eq!(status["t_work_mode"], StatusValue::Text("Cool".into()));
    assert_eq!(status["t_temp"], StatusValue::Number(24.0));

    let static_data = client.static_data("dev-1").unwrap();
    assert_eq!(static_data["Temperature_unit_switch"], "1");
}

#[tokio::test]
async fn test_property_list_is_fetched_once() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    mount_devices(&server, vec![split_ac()]).await;
    mount_properties(&server, basic_properties(), 1).await;
    mount_static_and_self_check(&server, json!([])).await;

    let client = device_client(&server, tmp.path()).await;
    assert_ok!(client.list_devices().await);
    assert_ok!(client.list_devices().await);
    assert_eq!(client.devices().len(), 1);
}

#[tokio::test]
async fn test_control_returns_echoed_state() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    mount_devices(&server, vec![split_ac()]).await;
    mount_properties(&server, basic_properties(), 1).await;
    mount_static_and_self_check(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path(API_DEVICE_CONTROL))
        .respond_with(ok(json!({"kvMap": {"t_power": "1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = device_client(&server, tmp.path()).await;
    let mut properties = Map::new();
    properties.insert("t_power".into(), json!(1));

    // unknown puid triggers discovery first
    let echoed = client.control_device("ABC123", &properties).await.unwrap();
    assert_eq!(echoed, json!({"t_power": "1"}).as_object().cloned().unwrap());
    assert!(client.device_by_puid("ABC123").is_some());
}

#[tokio::test]
async fn test_invalid_write_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    mount_devices(&server, vec![split_ac()]).await;
    mount_properties(&server, basic_properties(), 1).await;
    mount_static_and_self_check(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path(API_DEVICE_CONTROL))
        .respond_with(ok(json!({"kvMap": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let client = device_client(&server, tmp.path()).await;
    client.list_devices().await.unwrap();

    let mut properties = Map::new();
    properties.insert("t_power".into(), json!(1));
    properties.insert("t_temp".into(), json!(95));
    let err = client.control_device("ABC123", &properties).await.unwrap_err();
    match err {
        ClientError::ValidationError(message) => assert!(message.contains("t_temp=95")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_device_is_not_found() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    mount_devices(&server, vec![]).await;

    let client = device_client(&server, tmp.path()).await;
    let err = client.get_device_status("missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_unsupported_type_is_skipped() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let fridge = json!({
        "deviceId": "dev-2",
        "puid": "FRIDGE",
        "deviceTypeCode": "015",
        "deviceFeatureCode": "100",
        "statusList": {}
    });
    mount_devices(&server, vec![split_ac(), fridge]).await;
    mount_properties(&server, basic_properties(), 1).await;
    mount_static_and_self_check(&server, json!([])).await;

    let client = device_client(&server, tmp.path()).await;
    let devices = client.list_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert!(client.device("dev-2").is_none());
}

#[tokio::test]
async fn test_failed_self_check_degrades_device_only() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    mount_devices(&server, vec![split_ac()]).await;
    mount_properties(&server, basic_properties(), 1).await;
    Mock::given(method("POST"))
        .and(path(API_SELF_CHECK))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = device_client(&server, tmp.path()).await;
    let devices = client.list_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert!(devices[0].failed_keys.is_empty());
    // static data was not mounted either, the device is still usable
    assert!(client.static_data("dev-1").is_none());
}

#[tokio::test]
async fn test_malformed_list_entries_are_skipped() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    mount_devices(
        &server,
        vec![split_ac(), json!("garbage"), json!(null), json!(7)],
    )
    .await;
    mount_properties(&server, basic_properties(), 1).await;
    mount_static_and_self_check(&server, json!([])).await;

    let client = device_client(&server, tmp.path()).await;
    let devices = client.list_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].puid, "ABC123");
}

#[tokio::test]
async fn test_one_device_failing_leaves_others_intact() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let dehumidifier = json!({
        "deviceId": "dev-2",
        "puid": "DEH1",
        "deviceTypeCode": "007",
        "deviceFeatureCode": "100",
        "statusList": {"t_power": "1"}
    });
    mount_devices(&server, vec![split_ac(), dehumidifier]).await;

    // split AC: property list and self-check fail
    Mock::given(method("GET"))
        .and(path(API_PROPERTY_LIST))
        .and(query_param("deviceTypeCode", "009"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(API_QUERY_STATIC_DATA))
        .respond_with(ok(json!({"data": {}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(API_SELF_CHECK))
        .and(body_partial_json(json!({"puid": "ABC123"})))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    // dehumidifier: metered, power fails, self-check reports a fault
    Mock::given(method("GET"))
        .and(path(API_PROPERTY_LIST))
        .and(query_param("deviceTypeCode", "007"))
        .respond_with(ok(json!({"properties": [
            {"propertyKey": "t_power", "propertyValueList": "0,1"},
            {"propertyKey": "f_power_display"},
        ]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(API_HOUR_POWER))
        .and(body_partial_json(json!({"puid": "DEH1"})))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(API_SELF_CHECK))
        .and(body_partial_json(json!({"puid": "DEH1"})))
        .respond_with(ok(json!({"data": {"selfCheckFailedList": [{"statusKey": "f_e_tank"}]}})))
        .mount(&server)
        .await;

    let client = device_client(&server, tmp.path()).await;
    let devices = client.list_devices().await.unwrap();
    assert_eq!(devices.len(), 2);

    let split = client.device("dev-1").unwrap();
    assert_eq!(split.schema.kind(), DeviceKind::SplitAc);
    assert!(split.schema.contains("t_work_mode"));
    assert!(!split.schema.contains("f_power_consumption"));
    assert!(split.record.failed_keys.is_empty());
    let status = client.get_device_status("dev-1").await.unwrap();
    assert_eq!(status["t_work_mode"], StatusValue::Text("Cool".into()));

    let dehumidifier = client.device("dev-2").unwrap();
    assert_eq!(dehumidifier.schema.kind(), DeviceKind::Dehumidifier);
    let keys: Vec<&str> = dehumidifier.schema.keys().collect();
    assert_eq!(keys, vec!["f_power_consumption", "t_power"]);
    assert_eq!(dehumidifier.record.failed_keys, vec!["f_e_tank".to_string()]);
    let status = client.get_device_status("dev-2").await.unwrap();
    assert_eq!(status["t_power"], StatusValue::Text("On".into()));
    assert!(!status.contains_key("f_power_consumption"));
}

#[tokio::test]
async fn test_self_check_failures_are_attached() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    mount_devices(&server, vec![split_ac()]).await;
    mount_properties(&server, basic_properties(), 1).await;
    mount_static_and_self_check(&server, json!([{"statusKey": "f_e_intemp"}])).await;

    let client = device_client(&server, tmp.path()).await;
    let devices = client.list_devices().await.unwrap();
    assert_eq!(devices[0].failed_keys, vec!["f_e_intemp".to_string()]);
}

#[tokio::test]
async fn test_metered_device_reports_last_hour() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    mount_devices(&server, vec![split_ac()]).await;
    mount_properties(
        &server,
        json!([
            {"propertyKey": "t_power", "propertyValueList": "0,1"},
            {"propertyKey": "t_temp", "propertyValueList": "16~32"},
            {"propertyKey": "f_power_display"},
        ]),
        1,
    )
    .await;
    mount_static_and_self_check(&server, json!([])).await;

    let hours: Map<String, Value> = (0..24).map(|h| (h.to_string(), json!("0.5"))).collect();
    Mock::given(method("POST"))
        .and(path(API_HOUR_POWER))
        .respond_with(ok(json!({"powerConsumption": hours})))
        .expect(1)
        .mount(&server)
        .await;

    let client = device_client(&server, tmp.path()).await;
    client.list_devices().await.unwrap();

    let schema = client.device_schema("dev-1").unwrap();
    assert!(schema.contains("f_power_consumption"));
    assert!(!schema.contains("t_work_mode"));

    let status = client.get_device_status("dev-1").await.unwrap();
    assert_eq!(status["f_power_consumption"], StatusValue::Number(0.5));
    assert!(!status.contains_key("t_work_mode"));
}

#[tokio::test]
async fn test_missing_session_aborts_discovery() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let settings = common::settings(&server.uri(), tmp.path());
    let tokens = common::token_manager(&settings, Arc::new(Utc::now)).await;
    let http = Arc::new(common::http_client(&settings, tokens.clone()));
    let client = DeviceClient::from_parts(
        http,
        tokens,
        PropertyListCache::in_memory(Duration::from_secs(3600)),
    );

    let err = client.list_devices().await.unwrap_err();
    assert!(err.requires_reauthentication());
}

#[tokio::test]
async fn test_logout_forgets_devices() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    mount_devices(&server, vec![split_ac()]).await;
    mount_properties(&server, basic_properties(), 1).await;
    mount_static_and_self_check(&server, json!([])).await;

    let settings = common::settings(&server.uri(), tmp.path());
    common::write_valid_token(&settings.token_file()).await;
    let tokens = common::token_manager(&settings, Arc::new(Utc::now)).await;
    let http = Arc::new(common::http_client(&settings, tokens.clone()));
    let cache_dir = Dir::new(settings.cache_dir()).subdir("properties");
    let client = DeviceClient::from_parts(
        http,
        tokens,
        PropertyListCache::new(cache_dir.clone(), Duration::from_secs(3600)),
    );

    client.list_devices().await.unwrap();
    assert!(cache_dir.file("009-199.json").exists().await);

    assert_ok!(client.logout().await);
    assert!(client.devices().is_empty());
    assert!(!client.token_manager().is_authenticated().await);
    assert!(!cache_dir.exists().await);
}
