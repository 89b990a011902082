/// Web dashboard routing tests.
///
/// Requests go straight through `web::dispatch` with an `App` whose session
/// store lives in a temp dir. The REST API is either a local `tiny_http`
/// mock or an address nothing listens on.
use std::io::Read;
use std::thread;

use benchmarkinator::app::App;
use benchmarkinator::config::BenchmarkinatorConfig;
use benchmarkinator::web::{self, JsonResponse};
use serde_json::Value;
use tiny_http::{Method, Response, Server};

fn app_with_api(base_url: &str) -> App {
    let mut config = BenchmarkinatorConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_ms = 2_000;
    config.storage.path = std::env::temp_dir()
        .join(format!("benchmarkinator-web-{}", uuid::Uuid::new_v4()))
        .join("storage.json")
        .to_string_lossy()
        .into_owned();
    App::start(config).unwrap()
}

/// An API base URL with nothing listening behind it.
fn dead_api() -> String {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    format!("http://127.0.0.1:{port}/api")
}

/// A mock API answering every GET with `body` and echoing POSTs back.
fn mock_api(body: &'static str) -> String {
    mock_api_with_status(200, body)
}

/// Like [`mock_api`], but every response carries `status`.
fn mock_api_with_status(status: u16, body: &'static str) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut sent = String::new();
            let _ = request.as_reader().read_to_string(&mut sent);
            let reply = if *request.method() == Method::Get {
                body.to_string()
            } else {
                sent
            };
            let _ = request.respond(Response::from_string(reply).with_status_code(status));
        }
    });
    format!("http://{addr}/api")
}

fn call(app: &mut App, method: Method, url: &str, body: Option<&str>) -> (u16, Value) {
    read(web::dispatch(app, &method, url, body))
}

fn read(resp: JsonResponse) -> (u16, Value) {
    let status = resp.status_code().0;
    let mut text = String::new();
    resp.into_reader().read_to_string(&mut text).unwrap();
    (status, serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

fn login(app: &mut App) {
    let (status, _) = call(
        app,
        Method::Post,
        "/api/session/login",
        Some(r#"{"username": "admin", "password": "admin123"}"#),
    );
    assert_eq!(status, 200);
}

// ---------------------------------------------------------------------------
// Frontend and session
// ---------------------------------------------------------------------------

#[test]
fn index_serves_the_spa() {
    let mut app = app_with_api(&dead_api());
    let (status, body) = call(&mut app, Method::Get, "/", None);
    assert_eq!(status, 200);
    assert!(body.as_str().unwrap().contains("<title>Benchmarkinator</title>"));
}

#[test]
fn unknown_paths_are_404() {
    let mut app = app_with_api(&dead_api());
    let (status, body) = call(&mut app, Method::Get, "/api/nope", None);
    assert_eq!(status, 404);
    assert_eq!(body["error"], "not found");
}

#[test]
fn login_and_logout_round_trip() {
    let mut app = app_with_api(&dead_api());

    let (_, session) = call(&mut app, Method::Get, "/api/session", None);
    assert_eq!(session["is_authenticated"], false);
    assert_eq!(session["routes"][3]["route"], "results");
    assert_eq!(session["routes"][3]["accessible"], true);
    assert_eq!(session["routes"][0]["accessible"], false);

    let (status, body) = call(
        &mut app,
        Method::Post,
        "/api/session/login",
        Some(r#"{"username": "admin", "password": "admin123"}"#),
    );
    assert_eq!(status, 200);
    assert!(body["token"].as_str().unwrap().starts_with("web-token-"));
    assert_eq!(body["user"]["role"], "admin");

    let (_, session) = call(&mut app, Method::Get, "/api/session", None);
    assert_eq!(session["is_authenticated"], true);
    assert_eq!(session["user"]["username"], "admin");

    call(&mut app, Method::Post, "/api/session/logout", None);
    let (_, session) = call(&mut app, Method::Get, "/api/session", None);
    assert_eq!(session["is_authenticated"], false);
    assert_eq!(session["user"], Value::Null);
}

#[test]
fn wrong_password_is_401() {
    let mut app = app_with_api(&dead_api());
    let (status, body) = call(
        &mut app,
        Method::Post,
        "/api/session/login",
        Some(r#"{"username": "admin", "password": "nope"}"#),
    );
    assert_eq!(status, 401);
    assert_eq!(body["error"], "Invalid username or password");
    assert!(!app.session.is_authenticated());
}

#[test]
fn api_key_is_stored_and_cleared() {
    let mut app = app_with_api(&dead_api());
    let (_, session) = call(&mut app, Method::Get, "/api/session", None);
    assert_eq!(session["has_api_key"], false);

    let (status, body) = call(
        &mut app,
        Method::Post,
        "/api/session/api_key",
        Some(r#"{"api_key": "benchmarkinator-dev-key-2024"}"#),
    );
    assert_eq!(status, 200);
    assert_eq!(body["has_api_key"], true);
    assert_eq!(app.client().api_key(), Some("benchmarkinator-dev-key-2024"));

    let (_, body) = call(&mut app, Method::Post, "/api/session/api_key", Some(r#"{"api_key": ""}"#));
    assert_eq!(body["has_api_key"], false);
    assert_eq!(app.client().api_key(), None);
}

#[test]
fn theme_toggles_and_reports_class() {
    let mut app = app_with_api(&dead_api());
    let (_, body) = call(&mut app, Method::Post, "/api/session/theme", None);
    assert_eq!(body["dark_mode"], true);
    assert_eq!(body["theme_class"], "dark");
    let (_, body) = call(&mut app, Method::Post, "/api/session/theme", None);
    assert_eq!(body["theme_class"], "");
}

// ---------------------------------------------------------------------------
// Gating
// ---------------------------------------------------------------------------

#[test]
fn gated_views_reject_logged_out_sessions() {
    let mut app = app_with_api(&dead_api());
    for view in ["dashboard", "hardware", "benchmarks", "configurations"] {
        let (status, _) = call(&mut app, Method::Get, &format!("/api/views/{view}"), None);
        assert_eq!(status, 401, "{view}");
    }
}

#[test]
fn mutations_require_login() {
    let mut app = app_with_api(&dead_api());
    let (status, _) = call(&mut app, Method::Post, "/api/rest/ram", Some(r#"{"name": "DDR4"}"#));
    assert_eq!(status, 401);
    let (status, _) = call(&mut app, Method::Delete, "/api/rest/ram/1", None);
    assert_eq!(status, 401);
}

#[test]
fn results_view_is_public_and_survives_api_failure() {
    let mut app = app_with_api(&dead_api());
    let (status, body) = call(&mut app, Method::Get, "/api/views/results", None);
    assert_eq!(status, 200);
    assert_eq!(body["data"]["results"], serde_json::json!([]));
    assert_eq!(body["error"]["kind"], "error");
}

// ---------------------------------------------------------------------------
// Views and mutations against a mock API
// ---------------------------------------------------------------------------

#[test]
fn hardware_view_reports_missing_lookups() {
    let mut app = app_with_api(&mock_api("[]"));
    login(&mut app);

    let (status, body) = call(&mut app, Method::Get, "/api/views/hardware?tab=gpu", None);
    assert_eq!(status, 200);
    assert_eq!(body["data"]["tab"], "gpu");
    assert_eq!(
        body["data"]["missing_prerequisites"],
        serde_json::json!(["GPU brand", "GPU model", "VRAM type"])
    );
    assert_eq!(body["error"], Value::Null);

    let (status, _) = call(&mut app, Method::Get, "/api/views/hardware?tab=psu", None);
    assert_eq!(status, 400);
}

#[test]
fn create_checks_required_fields() {
    let mut app = app_with_api(&mock_api("[]"));
    login(&mut app);

    let (status, body) = call(&mut app, Method::Post, "/api/rest/cpu", Some(r#"{"model": "Athlon"}"#));
    assert_eq!(status, 422);
    let missing: Vec<&str> = body["missing"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(missing.contains(&"speed"));
    assert!(missing.contains(&"cpu_brand_id"));
}

#[test]
fn create_gpu_needs_its_lookup_tables() {
    let mut app = app_with_api(&mock_api("[]"));
    login(&mut app);

    let draft = r#"{"gpu_manufacturer_id": 1, "vram_size": 8, "gpu_brand_id": 1, "gpu_model_id": 1, "gpu_vram_type_id": 1}"#;
    let (status, body) = call(&mut app, Method::Post, "/api/rest/gpu", Some(draft));
    assert_eq!(status, 409);
    assert!(body["error"].as_str().unwrap().contains("GPU brand"));
}

#[test]
fn create_cpu_needs_brand_and_family() {
    let mut app = app_with_api(&mock_api("[]"));
    login(&mut app);

    let draft = r#"{"model": "K6-2", "speed": "450MHz", "core_count": 1, "cpu_brand_id": 1, "cpu_family_id": 1}"#;
    let (status, body) = call(&mut app, Method::Post, "/api/rest/cpu", Some(draft));
    assert_eq!(status, 409);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("CPU brand"));
    assert!(error.contains("CPU family"));
}

const STORED_CPU: &str =
    r#"{"id": 4, "model": "K6-2", "speed": "450MHz", "core_count": 1, "cpu_brand_id": 1, "cpu_family_id": 5}"#;

#[test]
fn update_overlays_the_stored_record() {
    let mut app = app_with_api(&mock_api(STORED_CPU));
    login(&mut app);

    let (status, body) = call(&mut app, Method::Put, "/api/rest/cpu/4", Some(r#"{"speed": "500MHz"}"#));
    assert_eq!(status, 200);
    assert_eq!(body["record"]["speed"], "500MHz");
    assert_eq!(body["record"]["model"], "K6-2");
    assert_eq!(body["record"]["cpu_family_id"], 5);
}

#[test]
fn changing_cpu_brand_requires_a_new_family() {
    let mut app = app_with_api(&mock_api(STORED_CPU));
    login(&mut app);

    let (status, body) = call(&mut app, Method::Put, "/api/rest/cpu/4", Some(r#"{"cpu_brand_id": 2}"#));
    assert_eq!(status, 422);
    assert_eq!(body["missing"], serde_json::json!(["cpu_family_id"]));

    let (status, body) = call(
        &mut app,
        Method::Put,
        "/api/rest/cpu/4",
        Some(r#"{"cpu_brand_id": 2, "cpu_family_id": 8}"#),
    );
    assert_eq!(status, 200);
    assert_eq!(body["record"]["cpu_brand_id"], 2);
    assert_eq!(body["record"]["cpu_family_id"], 8);
}

#[test]
fn update_of_a_missing_record_passes_the_404_through() {
    let mut app = app_with_api(&mock_api_with_status(404, r#"{"detail": "Not found"}"#));
    login(&mut app);

    let (status, body) = call(&mut app, Method::Put, "/api/rest/ram/9", Some(r#"{"name": "DDR5"}"#));
    assert_eq!(status, 404);
    assert_eq!(body["toast"]["kind"], "error");
}

#[test]
fn create_forwards_to_the_api() {
    let mut app = app_with_api(&mock_api("[]"));
    login(&mut app);

    let (status, body) = call(&mut app, Method::Post, "/api/rest/ram", Some(r#"{"name": "DDR4"}"#));
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["record"]["name"], "DDR4");
    assert_eq!(body["toast"]["kind"], "success");
}

#[test]
fn compare_requires_both_ids() {
    let mut app = app_with_api(&mock_api("[]"));
    let (status, _) = call(&mut app, Method::Get, "/api/compare?config_id_1=1", None);
    assert_eq!(status, 400);
}

#[test]
fn compare_without_shared_results_is_empty() {
    let mut app = app_with_api(&mock_api_with_status(404, r#"{"detail": "No results"}"#));
    let (status, body) = call(&mut app, Method::Get, "/api/compare?config_id_1=1&config_id_2=2", None);
    assert_eq!(status, 200);
    assert_eq!(body["entries"], serde_json::json!([]));
    assert_eq!(body["toast"], Value::Null);
}

#[test]
fn local_compare_pairs_fetched_results() {
    let mut app = app_with_api(&mock_api(
        r#"[
            {"id": 1, "benchmark_id": 3, "config_id": 1, "result": 200.0},
            {"id": 2, "benchmark_id": 3, "config_id": 2, "result": 150.0}
        ]"#,
    ));
    let (status, body) = call(
        &mut app,
        Method::Get,
        "/api/compare?config_id_1=1&config_id_2=2&local=1",
        None,
    );
    assert_eq!(status, 200);
    assert_eq!(body["entries"][0]["benchmark_id"], 3);
    assert_eq!(body["entries"][0]["percentage_change"], -25.0);
}
