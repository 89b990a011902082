//! Embedded web dashboard for benchmarkinator.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page admin console with login gate, sidebar and dark mode
//! - JSON endpoints for the session, page views, comparison and mutations
//!
//! Launched via `benchmarkinator web` (default: `http://127.0.0.1:9747`).

mod api;
mod frontend;

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::app::App;

pub type JsonResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web dashboard server on the given address.
///
/// Blocks the current thread. Requests are handled one at a time against the
/// single session context; a failing handler yields a JSON error response.
pub fn serve(mut app: App, addr: &str) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("benchmarkinator dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if app.config.web.open_browser {
        let url = format!("http://{addr}");
        if let Err(e) = open_browser(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let resp = dispatch(&mut app, &method, &url, body.as_deref());
        let status = resp.status_code().0;
        let _ = request.respond(resp);

        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Route a request to its handler. Handler failures become a 500 JSON body.
pub fn dispatch(app: &mut App, method: &Method, url: &str, body: Option<&str>) -> JsonResponse {
    let path = url.split('?').next().unwrap_or(url);

    let result = match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        // Session
        (&Method::Get, "/api/session") => api::get_session(app),
        (&Method::Post, "/api/session/login") => api::post_login(app, body.unwrap_or("{}")),
        (&Method::Post, "/api/session/logout") => api::post_logout(app),
        (&Method::Post, "/api/session/theme") => api::post_theme(app),
        (&Method::Post, "/api/session/api_key") => api::post_api_key(app, body.unwrap_or("{}")),

        // Views
        (&Method::Get, "/api/compare") => api::get_compare(app, url),
        (&Method::Get, p) if p.starts_with("/api/views/") => {
            api::get_view(app, &p["/api/views/".len()..], url)
        }

        // Mutations
        (m @ (&Method::Post | &Method::Put | &Method::Delete), p) if p.starts_with("/api/rest/") => {
            api::mutate(app, m, &p["/api/rest/".len()..], body)
        }

        _ => Ok(not_found()),
    };

    result.unwrap_or_else(|e| {
        tracing::error!(%method, url, error = %e, "request failed");
        error_response(500, &e.to_string())
    })
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn serve_frontend() -> JsonResponse {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

fn not_found() -> JsonResponse {
    error_response(404, "not found")
}

/// A `{"error": ...}` body with the given status.
pub(crate) fn error_response(status: u16, message: &str) -> JsonResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
