//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a
//! [`JsonResponse`]. Gated views and every mutation answer 401 while the
//! session is logged out.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tiny_http::{Method, Response, StatusCode};

use super::{JsonResponse, content_type_json, error_response};
use crate::api::models::Id;
use crate::api::{ApiError, Endpoint};
use crate::app::App;
use crate::session::SessionError;
use crate::ui::nav::Route;
use crate::ui::toast::Toast;
use crate::views::hardware::{HardwareData, HardwareTab};
use crate::views::results::{ResultFilter, parse_date};
use crate::views::{self, forms, load_or_log};

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SessionResponse<'a> {
    is_authenticated: bool,
    user: Option<&'a crate::auth::User>,
    dark_mode: bool,
    theme_class: &'static str,
    has_api_key: bool,
    routes: Vec<RouteResponse>,
}

#[derive(Serialize)]
struct RouteResponse {
    route: Route,
    path: &'static str,
    label: &'static str,
    accessible: bool,
}

/// A page view payload. `error` is set when the fetch failed and `data` is
/// the empty view.
#[derive(Serialize)]
struct ViewResponse<T: Serialize> {
    view: Route,
    data: T,
    error: Option<Toast>,
}

#[derive(Deserialize)]
struct ApiKeyRequest {
    #[serde(default)]
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<JsonResponse> {
    json_status(200, data)
}

fn json_status<T: Serialize>(status: u16, data: &T) -> Result<JsonResponse> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status)))
}

fn login_required(what: &str) -> Result<JsonResponse> {
    Ok(error_response(401, &format!("{what} requires login")))
}

/// Extract one `key=value` query parameter.
fn query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    url.split_once('?')?.1.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key && !v.is_empty()).then_some(v)
    })
}

fn query_id(url: &str, key: &str) -> Option<Id> {
    query_param(url, key).and_then(|v| v.parse().ok())
}

/// Build a results filter from `benchmark`, `config`, `from` and `to`.
fn results_filter(url: &str) -> Result<ResultFilter, String> {
    let date = |key: &str| query_param(url, key).map(parse_date).transpose();
    Ok(ResultFilter {
        benchmark: query_id(url, "benchmark"),
        configuration: query_id(url, "config"),
        date_from: date("from")?,
        date_to: date("to")?,
    })
}

/// Split `gpu/vram_type/7` into the endpoint and an optional trailing id.
fn parse_rest_path(path: &str) -> Option<(Endpoint, Option<Id>)> {
    let path = path.trim_matches('/');
    if let Some((head, last)) = path.rsplit_once('/')
        && let Ok(id) = last.parse::<Id>()
    {
        return Endpoint::from_path(head).map(|e| (e, Some(id)));
    }
    Endpoint::from_path(path).map(|e| (e, None))
}

fn api_failure(e: &ApiError) -> Result<JsonResponse> {
    let status = match e {
        ApiError::Status { code, .. } if (400..500).contains(code) => *code,
        _ => 502,
    };
    // API failures stay on screen until dismissed.
    let toast = Toast::error(e.to_string()).with_duration(Duration::ZERO);
    json_status(status, &serde_json::json!({ "error": e.to_string(), "toast": toast }))
}

// ---------------------------------------------------------------------------
// Session handlers
// ---------------------------------------------------------------------------

/// `GET /api/session`: login state, theme and reachable routes.
pub fn get_session(app: &App) -> Result<JsonResponse> {
    let session = &app.session;
    let resp = SessionResponse {
        is_authenticated: session.is_authenticated(),
        user: session.user(),
        dark_mode: session.dark_mode(),
        theme_class: session.theme_class(),
        has_api_key: session.has_stored_api_key(),
        routes: Route::ALL
            .into_iter()
            .map(|route| RouteResponse {
                route,
                path: route.path(),
                label: route.label(),
                accessible: session.can_access(route),
            })
            .collect(),
    };
    json_response(&resp)
}

/// `POST /api/session/login`: body `{"username": .., "password": ..}`.
pub fn post_login(app: &mut App, body: &str) -> Result<JsonResponse> {
    let req: LoginRequest = serde_json::from_str(body).context("invalid JSON in login request")?;

    match app.session.login(&req.username, &req.password) {
        Ok(user) => {
            let user = user.clone();
            json_response(&serde_json::json!({
                "success": true,
                "token": app.session.token(),
                "user": user,
            }))
        }
        Err(SessionError::Auth(e)) => json_status(
            401,
            &serde_json::json!({ "success": false, "error": e.to_string() }),
        ),
        Err(e) => Err(e).context("failed to persist session"),
    }
}

/// `POST /api/session/logout`
pub fn post_logout(app: &mut App) -> Result<JsonResponse> {
    app.session.logout().context("failed to clear session store")?;
    json_response(&serde_json::json!({ "success": true }))
}

/// `POST /api/session/theme`: toggle dark mode.
pub fn post_theme(app: &mut App) -> Result<JsonResponse> {
    let dark_mode = app.session.toggle_dark_mode().context("failed to save theme")?;
    json_response(&serde_json::json!({
        "dark_mode": dark_mode,
        "theme_class": app.session.theme_class(),
    }))
}

/// `POST /api/session/api_key`: body `{"api_key": ..}`. A blank or absent
/// key clears the stored one.
pub fn post_api_key(app: &mut App, body: &str) -> Result<JsonResponse> {
    let req: ApiKeyRequest = serde_json::from_str(body).context("invalid JSON in API key request")?;
    app.session
        .set_api_key(req.api_key.as_deref())
        .context("failed to save API key")?;
    let has_api_key = app.session.has_stored_api_key();
    let message = if has_api_key { "API key saved" } else { "API key cleared" };
    json_response(&serde_json::json!({
        "success": true,
        "has_api_key": has_api_key,
        "toast": Toast::success(message),
    }))
}

// ---------------------------------------------------------------------------
// View handlers
// ---------------------------------------------------------------------------

fn view<T: Serialize>(route: Route, (data, error): (T, Option<ApiError>)) -> Result<JsonResponse> {
    json_response(&ViewResponse {
        view: route,
        data,
        error: error.map(|e| Toast::error(format!("Error fetching {}: {e}", route.label()))),
    })
}

/// `GET /api/views/{name}`: load one page view.
pub fn get_view(app: &App, name: &str, url: &str) -> Result<JsonResponse> {
    let Some(route) = Route::from_name(name) else {
        return Ok(error_response(404, &format!("unknown view '{name}'")));
    };
    if !app.session.can_access(route) {
        return login_required(route.label());
    }

    let client = app.client();
    match route {
        Route::Dashboard => {
            let (stats, error) = load_or_log("dashboard", views::dashboard::load(&client));
            let data = serde_json::json!({
                "cards": stats.cards(),
                "quick_actions": views::dashboard::QUICK_ACTIONS,
            });
            view(route, (data, error))
        }
        Route::Hardware => {
            let tab = match query_param(url, "tab").map(str::parse::<HardwareTab>).transpose() {
                Ok(tab) => tab.unwrap_or_default(),
                Err(e) => return Ok(error_response(400, &e)),
            };
            let loaded = match views::hardware::load(&client, tab) {
                Ok(data) => (data, None),
                Err(e) => {
                    tracing::error!(view = "hardware", error = %e, "failed to load view");
                    (HardwareData::empty(tab), Some(e))
                }
            };
            let missing = loaded.0.missing_prerequisites();
            let data = serde_json::json!({
                "tab": loaded.0.tab(),
                "items": loaded.0,
                "table": loaded.0.table(),
                "missing_prerequisites": missing,
            });
            view(route, (data, loaded.1))
        }
        Route::Benchmarks => {
            let (data, error) = load_or_log("benchmarks", views::benchmarks::load(&client));
            let data = serde_json::json!({
                "benchmarks": data.benchmarks,
                "targets": data.targets,
                "table": data.table(),
            });
            view(route, (data, error))
        }
        Route::Configurations => {
            let (data, error) =
                load_or_log("configurations", views::configurations::load(&client));
            let table = data.table();
            let data = serde_json::json!({ "collections": data, "table": table });
            view(route, (data, error))
        }
        Route::Results => {
            let filter = match results_filter(url) {
                Ok(filter) => filter,
                Err(e) => return Ok(error_response(400, &e)),
            };
            let (data, error) = load_or_log("results", views::results::load(&client));
            let payload = serde_json::json!({
                "results": data.filtered(&filter),
                "chart": data.chart(&filter),
                "table": data.table(&filter),
                "benchmarks": data.benchmarks,
                "configurations": data.configurations,
            });
            view(route, (payload, error))
        }
    }
}

/// `GET /api/compare?config_id_1=&config_id_2=[&local=1]`
pub fn get_compare(app: &App, url: &str) -> Result<JsonResponse> {
    let (Some(config_1), Some(config_2)) = (query_id(url, "config_id_1"), query_id(url, "config_id_2"))
    else {
        return Ok(error_response(400, "config_id_1 and config_id_2 are required"));
    };

    let client = app.client();
    let entries = if query_param(url, "local").is_some() {
        match views::results::load(&client) {
            Ok(data) => data.compare(config_1, config_2),
            Err(e) => return api_failure(&e),
        }
    } else {
        // The API answers 404 when either configuration has no results.
        match client.compare_configs(config_1, config_2) {
            Ok(entries) => entries,
            Err(ApiError::Status { code: 404, .. }) => Vec::new(),
            Err(e) => return api_failure(&e),
        }
    };

    json_response(&serde_json::json!({
        "config_id_1": config_1,
        "config_id_2": config_2,
        "entries": entries,
    }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// `POST /api/rest/{endpoint}`, `PUT|DELETE /api/rest/{endpoint}/{id}`.
///
/// A PUT body is overlaid on the stored record, so it may carry only the
/// changed fields.
pub fn mutate(app: &App, method: &Method, path: &str, body: Option<&str>) -> Result<JsonResponse> {
    if !app.session.is_authenticated() {
        return login_required("this action");
    }
    let Some((endpoint, id)) = parse_rest_path(path) else {
        return Ok(error_response(404, &format!("unknown endpoint '{path}'")));
    };
    let client = app.client();

    if *method == Method::Delete {
        let Some(id) = id else {
            return Ok(error_response(400, "DELETE requires an id"));
        };
        return match client.delete(endpoint, id) {
            Ok(()) => json_response(&serde_json::json!({
                "success": true,
                "toast": Toast::success(format!("Deleted {endpoint} {id}")),
            })),
            Err(e) => {
                tracing::error!(%endpoint, id, error = %e, "delete failed");
                api_failure(&e)
            }
        };
    }

    let edit: Value = serde_json::from_str(body.unwrap_or("{}"))
        .context("invalid JSON in record body")?;
    if !edit.is_object() {
        return Ok(error_response(400, "record must be a JSON object"));
    }
    let draft = match (method, id) {
        (&Method::Put, Some(id)) => {
            let stored = match client.get::<Value>(endpoint, id) {
                Ok(stored) => stored,
                Err(e) => return api_failure(&e),
            };
            match forms::merge_edit(endpoint, stored, &edit) {
                Ok(draft) => draft,
                Err(e) => return Ok(error_response(400, &format!("invalid {endpoint} record: {e}"))),
            }
        }
        _ => edit,
    };
    let missing = forms::missing_fields(endpoint, &draft);
    if !missing.is_empty() {
        return json_status(
            422,
            &serde_json::json!({
                "error": "Please fill in all required fields",
                "missing": missing,
                "toast": Toast::warning("Please fill in all required fields"),
            }),
        );
    }

    let result = match (method, id) {
        (&Method::Post, None) => {
            if let Some(resp) = prerequisite_check(app, endpoint)? {
                return Ok(resp);
            }
            client.create::<Value, Value>(endpoint, &draft)
        }
        (&Method::Put, Some(id)) => client.update::<Value, Value>(endpoint, id, &draft),
        _ => return Ok(error_response(405, "use POST on a collection or PUT on an item")),
    };

    match result {
        Ok(record) => json_response(&serde_json::json!({
            "success": true,
            "record": record,
            "toast": Toast::success(format!("Saved {endpoint}")),
        })),
        Err(e) => {
            tracing::error!(%endpoint, error = %e, "save failed");
            api_failure(&e)
        }
    }
}

/// CPUs, GPUs and motherboards need their lookup tables populated first.
fn prerequisite_check(app: &App, endpoint: Endpoint) -> Result<Option<JsonResponse>> {
    let tab = match endpoint {
        Endpoint::Cpu => HardwareTab::Cpu,
        Endpoint::Gpu => HardwareTab::Gpu,
        Endpoint::Motherboard => HardwareTab::Motherboard,
        _ => return Ok(None),
    };
    let data = match views::hardware::load(&app.client(), tab) {
        Ok(data) => data,
        Err(e) => return api_failure(&e).map(Some),
    };
    let missing = data.missing_prerequisites();
    if missing.is_empty() {
        return Ok(None);
    }
    let message = format!(
        "Please create at least one {} before adding {}.",
        missing.join(", "),
        tab.label()
    );
    json_status(
        409,
        &serde_json::json!({ "error": message, "toast": Toast::warning(&message) }),
    )
    .map(Some)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
