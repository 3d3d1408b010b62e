#![allow(clippy::unwrap_used)]
// Integration tests for `InventoryClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netdex_api::{DeviceQuery, Error, InventoryClient, PersonQuery, UpdateDeviceRequest};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, InventoryClient) {
    let server = MockServer::start().await;
    let client = InventoryClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn device_json(id: u64, mac: &str, name: &str, owner_id: Option<u64>) -> serde_json::Value {
    json!({
        "id": id,
        "mac_address": mac,
        "name": name,
        "note": "",
        "owner_id": owner_id,
        "is_primary": false,
        "first_seen": "2024-03-01T08:00:00Z",
        "last_seen": "2024-06-15T10:30:00Z"
    })
}

// ── Device tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_by_ids() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .and(query_param("ids", "1,2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            device_json(1, "aa:bb:cc:dd:ee:01", "nas", Some(7)),
            device_json(2, "aa:bb:cc:dd:ee:02", "", None),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let query = DeviceQuery {
        ids: Some(vec![1, 2]),
        ..DeviceQuery::default()
    };
    let devices = client.list_devices(&query).await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].name, "nas");
    assert_eq!(devices[0].owner_id, Some(7));
    assert_eq!(devices[1].owner_id, None);
}

#[tokio::test]
async fn test_list_devices_by_owner() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .and(query_param("owner_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([device_json(
            1,
            "aa:bb:cc:dd:ee:01",
            "nas",
            Some(7)
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let query = DeviceQuery {
        owner_id: Some(7),
        ..DeviceQuery::default()
    };
    let devices = client.list_devices(&query).await.unwrap();
    assert_eq!(devices.len(), 1);
}

#[tokio::test]
async fn test_get_device() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices/5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(device_json(5, "aa:bb:cc:dd:ee:05", "tv", None)),
        )
        .mount(&server)
        .await;

    let device = client.get_device(5).await.unwrap();
    assert_eq!(device.id, 5);
    assert_eq!(device.mac_address, "aa:bb:cc:dd:ee:05");
}

#[tokio::test]
async fn test_update_device_sends_all_editable_fields() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/devices/5"))
        .and(body_json(json!({
            "name": "living room tv",
            "note": "wall mounted",
            "owner_id": null,
            "is_primary": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_json(
            5,
            "aa:bb:cc:dd:ee:05",
            "living room tv",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let body = UpdateDeviceRequest {
        name: "living room tv",
        note: "wall mounted",
        owner_id: None,
        is_primary: true,
    };
    let device = client.update_device(5, &body).await.unwrap();
    assert_eq!(device.name, "living room tv");
}

// ── People / scans / vendor ─────────────────────────────────────────

#[tokio::test]
async fn test_list_people_by_ids() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/people"))
        .and(query_param("ids", "1,2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ada" },
            { "id": 2, "name": "Grace" }
        ])))
        .mount(&server)
        .await;

    let query = PersonQuery {
        ids: Some(vec![1, 2]),
    };
    let people = client.list_people(&query).await.unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[1].name, "Grace");
}

#[tokio::test]
async fn test_get_scan_preserves_discovery_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/scans/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "started_at": "2024-06-15T10:00:00Z",
            "discoveries": [
                { "id": 30, "device_id": 2, "hostname": "tv", "ip_address": "10.0.0.9" },
                { "id": 31, "device_id": 1, "hostname": null, "ip_address": "10.0.0.4" }
            ]
        })))
        .mount(&server)
        .await;

    let scan = client.get_scan(3).await.unwrap();
    assert_eq!(scan.finished_at, None);
    let ids: Vec<u64> = scan.discoveries.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![30, 31]);
    assert_eq!(scan.discoveries[1].hostname, None);
}

#[tokio::test]
async fn test_list_scans() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/scans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "started_at": "2024-06-14T10:00:00Z", "finished_at": "2024-06-14T10:01:00Z" },
            { "id": 2 }
        ])))
        .mount(&server)
        .await;

    let scans = client.list_scans().await.unwrap();
    assert_eq!(scans.len(), 2);
    assert!(scans[0].finished_at.is_some());
    assert!(scans[1].started_at.is_none());
}

#[tokio::test]
async fn test_lookup_vendor() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/vendor/aa:bb:cc:dd:ee:ff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("Acme Networks")))
        .mount(&server)
        .await;

    let vendor = client.lookup_vendor("aa:bb:cc:dd:ee:ff").await.unwrap();
    assert_eq!(vendor, "Acme Networks");
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices/99"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "message": "device 99 not found", "code": "not_found" })),
        )
        .mount(&server)
        .await;

    let err = client.get_device(99).await.unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
    assert_eq!(err.api_error_code(), Some("not_found"));
}

#[tokio::test]
async fn test_validation_failure_on_update() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/devices/5"))
        .respond_with(ResponseTemplate::new(422).set_body_string("owner 12 does not exist"))
        .mount(&server)
        .await;

    let body = UpdateDeviceRequest {
        name: "tv",
        note: "",
        owner_id: Some(12),
        is_primary: false,
    };
    match client.update_device(5, &body).await {
        Err(Error::Api {
            status, message, ..
        }) => {
            assert_eq!(status, 422);
            assert!(message.contains("owner 12"), "unexpected message: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/scans"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list_scans().await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("oops")),
        "expected Deserialization error, got: {result:?}"
    );
}
