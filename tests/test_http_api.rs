//! HTTP contract tests: the router served on a loopback port, spoken to over raw TCP

use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use transit_admin::infra::db::init_test_db;
use transit_admin::{build_router, AppState};

async fn spawn_app() -> SocketAddr {
    let app = build_router(AppState::new(init_test_db()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(b) = body {
        req.push_str("Content-Type: application/json\r\n");
        req.push_str(&format!("Content-Length: {}\r\n", b.len()));
    }
    req.push_str("\r\n");
    if let Some(b) = body {
        req.push_str(b);
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

async fn send_json(addr: SocketAddr, method: &str, path: &str, body: Option<Value>) -> (u16, Value) {
    let raw = body.map(|b| b.to_string());
    let (status, _, text) = send_raw(addr, method, path, raw.as_deref()).await;
    let value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).expect("json body")
    };
    (status, value)
}

async fn create_user(addr: SocketAddr, name: &str) -> i64 {
    let (status, body) = send_json(
        addr,
        "POST",
        "/api/users",
        Some(json!({"name": name, "contact_info": "555-0101", "address": "Depot"})),
    )
    .await;
    assert_eq!(status, 201);
    body["id"].as_i64().expect("user id")
}

#[tokio::test]
async fn issue_list_delete_pass_over_http() {
    let addr = spawn_app().await;
    let user_id = create_user(addr, "Alice").await;

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/bus-passes",
        Some(json!({"user_id": user_id, "pass_type": "Monthly", "issue_date": "2024-01-31"})),
    )
    .await;
    assert_eq!(status, 201);
    let pass_id = body["id"].as_i64().expect("pass id");
    assert!(body["message"].as_str().unwrap().contains("2024-02-29"));

    let (status, list) = send_json(addr, "GET", "/api/bus-passes", None).await;
    assert_eq!(status, 200);
    let passes = list.as_array().expect("array");
    assert_eq!(passes.len(), 1);
    assert_eq!(passes[0]["pass_id"], pass_id);
    assert_eq!(passes[0]["user_name"], "Alice");
    assert_eq!(passes[0]["contact_info"], "555-0101");
    assert_eq!(passes[0]["expiry_date"], "2024-02-29");
    assert_eq!(passes[0]["status"], "Active");

    let (status, body) = send_json(addr, "DELETE", &format!("/api/bus-passes/{pass_id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Bus pass deleted successfully");

    let (_, list) = send_json(addr, "GET", "/api/bus-passes", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn issuance_failures_are_flattened_to_500() {
    let addr = spawn_app().await;
    let user_id = create_user(addr, "Bob").await;

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/bus-passes",
        Some(json!({"user_id": 99999, "pass_type": "Weekly", "issue_date": "2024-01-01"})),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], "USER_NOT_FOUND");
    assert!(body["error"].as_str().unwrap().contains("99999"));

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/bus-passes",
        Some(json!({"user_id": user_id, "pass_type": "Daily", "issue_date": "2024-01-01"})),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/bus-passes",
        Some(json!({"user_id": user_id, "pass_type": "Weekly", "issue_date": "2024-01-01", "expiry_date": "2099-01-01"})),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _, _) = send_raw(addr, "POST", "/api/bus-passes", Some("{not json")).await;
    assert_eq!(status, 500);

    let (_, list) = send_json(addr, "GET", "/api/bus-passes", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_form_bodies_with_string_values_are_accepted() {
    let addr = spawn_app().await;
    let user_id = create_user(addr, "Farah").await;

    let body = format!(
        r#"{{"user_id":"{user_id}","pass_type":"Monthly","issue_date":"2024-01-31","expiry_date":"","status":"Active"}}"#
    );
    let (status, _, text) = send_raw(addr, "POST", "/api/bus-passes", Some(&body)).await;
    assert_eq!(status, 201, "{text}");
    let issued: Value = serde_json::from_str(&text).expect("json body");
    assert_eq!(issued["expiry_date"], "2024-02-29");

    let (status, route) = send_json(
        addr,
        "POST",
        "/api/routes",
        Some(json!({"route_name": "Loop", "start_stop": "A", "end_stop": "B", "total_distance": "7.5", "status": "Active"})),
    )
    .await;
    assert_eq!(status, 201);
    let route_id = route["id"].as_i64().unwrap();

    let (status, bus) = send_json(
        addr,
        "POST",
        "/api/buses",
        Some(json!({"route_id": route_id.to_string(), "registration_no": "FORM-1", "type": "Non-AC", "capacity": "40", "status": "Active"})),
    )
    .await;
    assert_eq!(status, 201);
    let (status, _) = send_json(
        addr,
        "POST",
        "/api/buses",
        Some(json!({"route_id": "", "registration_no": "FORM-2", "type": "AC", "capacity": "", "status": "Active"})),
    )
    .await;
    assert_eq!(status, 201);

    let (status, _) = send_json(
        addr,
        "POST",
        "/api/maintenance",
        Some(json!({"bus_id": bus["id"].as_i64().unwrap().to_string(), "contractor_id": "", "details": "Tyres",
                    "maintenance_date": "2024-03-01", "cost": "120.50", "entity_type": "Bus", "entity_id": ""})),
    )
    .await;
    assert_eq!(status, 201);

    let (_, buses) = send_json(addr, "GET", "/api/buses", None).await;
    let form_1 = buses
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["registration_no"] == "FORM-1")
        .expect("FORM-1 listed");
    assert_eq!(form_1["capacity"], 40);
    assert_eq!(form_1["route_name"], "Loop");

    let (_, stats) = send_json(addr, "GET", "/api/dashboard/stats", None).await;
    assert_eq!(stats["total_maintenance_cost"], 120.5);
    assert_eq!(stats["active_passes"], 1);

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/bus-passes",
        Some(json!({"user_id": "not-a-number", "pass_type": "Weekly"})),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn maintenance_for_unknown_bus_reports_bus_not_found() {
    let addr = spawn_app().await;
    let (status, body) = send_json(
        addr,
        "POST",
        "/api/maintenance",
        Some(json!({"bus_id": "77", "maintenance_date": "2024-03-01", "cost": "10"})),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], "BUS_NOT_FOUND");
}

#[tokio::test]
async fn deleting_unknown_pass_is_ok() {
    let addr = spawn_app().await;
    let (status, body) = send_json(addr, "DELETE", "/api/bus-passes/424242", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Bus pass deleted successfully");
}

#[tokio::test]
async fn single_record_lookups_return_404() {
    let addr = spawn_app().await;
    for path in ["/api/users/5", "/api/routes/5", "/api/bus-passes/5"] {
        let (status, body) = send_json(addr, "GET", path, None).await;
        assert_eq!(status, 404, "{path}");
        assert_eq!(body["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn crud_endpoints_round_trip() {
    let addr = spawn_app().await;

    let (status, route) = send_json(
        addr,
        "POST",
        "/api/routes",
        Some(json!({"route_name": "Ring", "start_stop": "A", "end_stop": "A", "total_distance": 12.0})),
    )
    .await;
    assert_eq!(status, 201);
    let route_id = route["id"].as_i64().unwrap();

    let (status, _) = send_json(
        addr,
        "POST",
        "/api/buses",
        Some(json!({"route_id": route_id, "registration_no": "RING-1", "type": "Hybrid", "capacity": 50})),
    )
    .await;
    assert_eq!(status, 201);

    let (status, stop) = send_json(
        addr,
        "POST",
        "/api/bus-stops",
        Some(json!({"name": "Plaza", "location": "Center", "facilities": "Bench"})),
    )
    .await;
    assert_eq!(status, 201);
    let (status, _) = send_json(
        addr,
        "POST",
        &format!("/api/routes/{route_id}/stops"),
        Some(json!({"stop_id": stop["id"], "stop_order": 1})),
    )
    .await;
    assert_eq!(status, 201);

    let (_, routes) = send_json(addr, "GET", "/api/routes", None).await;
    assert_eq!(routes[0]["route_name"], "Ring");
    assert_eq!(routes[0]["bus_count"], 1);
    assert_eq!(routes[0]["stop_count"], 1);

    let (_, buses) = send_json(addr, "GET", "/api/buses", None).await;
    assert_eq!(buses[0]["type"], "Hybrid");
    assert_eq!(buses[0]["route_name"], "Ring");

    let (status, body) = send_json(
        addr,
        "PUT",
        &format!("/api/routes/{route_id}"),
        Some(json!({"status": "Suspended"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Route updated successfully");
    let (_, fetched) = send_json(addr, "GET", &format!("/api/routes/{route_id}"), None).await;
    assert_eq!(fetched["status"], "Suspended");

    let (status, stats) = send_json(addr, "GET", "/api/dashboard/stats", None).await;
    assert_eq!(status, 200);
    assert_eq!(stats["total_routes"], 1);
    assert_eq!(stats["total_buses"], 1);
    assert_eq!(stats["total_bus_stops"], 1);
}

#[tokio::test]
async fn cors_preflight_and_headers() {
    let addr = spawn_app().await;
    let (status, head, _) = send_raw(addr, "OPTIONS", "/api/bus-passes", None).await;
    assert_eq!(status, 204);
    assert!(head
        .to_ascii_lowercase()
        .contains("access-control-allow-origin: *"));

    let (status, head, body) = send_raw(addr, "GET", "/healthz", None).await;
    assert_eq!(status, 200);
    assert!(head
        .to_ascii_lowercase()
        .contains("access-control-allow-origin: *"));
    assert!(body.contains("ok"));
}
