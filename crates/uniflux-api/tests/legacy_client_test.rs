#![allow(clippy::unwrap_used, clippy::float_cmp)]
// Integration tests for `LegacyClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use uniflux_api::{ControllerPlatform, DecodeError, Error, LegacyClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(platform: ControllerPlatform) -> (MockServer, LegacyClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client =
        LegacyClient::new(base_url, "default".into(), platform, &TransportConfig::default())
            .unwrap();
    (server, client)
}

fn secret(raw: &str) -> secrecy::SecretString {
    raw.to_string().into()
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_stores_session_cookie() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({"username": "admin", "password": "hunter2"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "unifises=abc123; Path=/")
                .set_body_json(json!({"meta": {"rc": "ok"}, "data": []})),
        )
        .mount(&server)
        .await;

    assert!(!client.has_session());
    client.login("admin", &secret("hunter2")).await.unwrap();
    assert!(client.has_session());
}

#[tokio::test]
async fn test_login_failure() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(400).set_body_string("api.err.Invalid"))
        .mount(&server)
        .await;

    let result = client.login("admin", &secret("wrong")).await;

    match result {
        Err(ref err @ Error::Authentication { ref message }) => {
            assert!(message.contains("HTTP 400"), "got: {message}");
            assert!(err.is_auth_expired());
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unifi_os_paths() {
    let (server, client) = setup(ControllerPlatform::UnifiOs).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/proxy/network/api/s/default/stat/device"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"meta": {"rc": "ok"}, "data": [{"name": "udm"}]})),
        )
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    let devices = client.list_devices().await.unwrap();
    assert_eq!(devices[0].name, "udm");
}

async fn connect(server: &MockServer, platform: Option<ControllerPlatform>) -> LegacyClient {
    let base_url = Url::parse(&server.uri()).unwrap();
    LegacyClient::connect(base_url, "lab".into(), platform, &TransportConfig::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_connect_detects_unifi_os() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;

    let client = connect(&server, None).await;
    assert_eq!(client.platform(), ControllerPlatform::UnifiOs);
    assert_eq!(client.site(), "lab");
    assert_eq!(client.base_url().as_str(), format!("{}/", server.uri()));
}

#[tokio::test]
async fn test_connect_falls_back_to_classic() {
    let server = MockServer::start().await;

    let client = connect(&server, None).await;
    assert_eq!(client.platform(), ControllerPlatform::ClassicController);
}

#[tokio::test]
async fn test_connect_with_known_platform_skips_detection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = connect(&server, Some(ControllerPlatform::ClassicController)).await;
    assert_eq!(client.platform(), ControllerPlatform::ClassicController);
    assert!(!client.has_session());
}

// ── Device tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_decodes_flexible_fields() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    let envelope = json!({
        "meta": { "rc": "ok" },
        "data": [{
            "_id": "abc123",
            "mac": "aa:bb:cc:dd:ee:ff",
            "type": "udm",
            "name": "Dream Machine",
            "uptime": "3600",
            "adopted": true,
            "stat": { "gw": { "oid": "aa:bb:cc:dd:ee:ff", "wan-rx_bytes": 10 } },
            "port_table": [{ "port_idx": 1, "speed": "1000" }]
        }]
    });

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 1);
    let d = &devices[0];
    assert_eq!(d.id, "abc123");
    assert_eq!(d.device_type, "udm");
    assert_eq!(d.uptime.number(), 3600.0);
    assert!(d.adopted.value());
    assert_eq!(d.stat.gw.as_ref().unwrap().wan_rx_bytes.number(), 10.0);
    assert!(d.stat.sw.is_none());
    assert_eq!(d.port_table[0].speed.number(), 1000.0);
}

#[tokio::test]
async fn test_list_devices_reports_bad_field() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    let envelope = json!({
        "meta": { "rc": "ok" },
        "data": [{ "name": "ok" }, { "name": "bad", "uptime": {} }]
    });

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    match client.list_devices().await {
        Err(Error::Decode(err @ DecodeError::Field { .. })) => {
            assert_eq!(err.path(), Some("[1].uptime"));
        }
        other => panic!("expected Decode error, got: {other:?}"),
    }

    let raw = client.list_devices_raw().await.unwrap();
    assert_eq!(raw.len(), 2);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_expired() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_devices().await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("session expired"), "got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_legacy_api_error() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    let envelope = json!({
        "meta": { "rc": "error", "msg": "api.err.LoginRequired" },
        "data": []
    });

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    match client.list_devices().await {
        Err(Error::LegacyApi { ref message }) => {
            assert!(message.contains("LoginRequired"), "got: {message}");
        }
        other => panic!("expected LegacyApi error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unifi_os_error_body() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": {"code": 401, "message": "Unauthorized"}})),
        )
        .mount(&server)
        .await;

    assert!(matches!(
        client.list_devices_raw().await,
        Err(Error::Authentication { .. })
    ));
}

#[tokio::test]
async fn test_garbage_body() {
    let (server, client) = setup(ControllerPlatform::ClassicController).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    match client.list_devices_raw().await {
        Err(Error::Deserialization { body, .. }) => assert!(body.contains("<html>")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
