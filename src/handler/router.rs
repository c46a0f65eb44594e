//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. The DOM component handler runs
//! first and on every method — the embedding web view may probe with HEAD —
//! then the remaining routes sit behind the usual method gate.

use crate::config::AppState;
use crate::dom::{DomOutcome, DomRequest};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let version = req.version();
    let uri = req.uri().clone();

    let response = route_request(&req, &state);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            remote_addr.to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version_label(version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(
            response.body().size_hint().exact().unwrap_or(0),
        )
        .unwrap_or(usize::MAX);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path, method and the DOM handler's outcome
fn route_request(
    req: &Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let is_head = *req.method() == Method::HEAD;
    let url = req.uri().to_string();
    let host = req
        .headers()
        .get(hyper::header::HOST)
        .and_then(|v| v.to_str().ok());

    // 1. DOM component host endpoint
    match state.dom.handle(&DomRequest { url: &url, host }) {
        Ok(DomOutcome::NotHandled) => {}
        Ok(DomOutcome::BadRequest { message }) => {
            logger::log_warning(&format!("Rejected DOM component request: {message}"));
            return http::build_bad_request_response(&message);
        }
        Ok(DomOutcome::Document { html }) => {
            return http::build_html_response(html, is_head);
        }
        Err(err) => {
            // Generic error path: nothing here masks bundler or resolution internals
            logger::log_error(&format!("DOM component request failed: {err}"));
            return http::build_500_response();
        }
    }

    // 2. Method gate for the remaining routes
    match req.method() {
        &Method::GET | &Method::HEAD => {}
        &Method::OPTIONS => return http::build_options_response(),
        other => {
            logger::log_warning(&format!("Method not allowed: {other}"));
            return http::build_405_response();
        }
    }

    // 3. Status probe used by client tooling to detect a running server
    if req.uri().path() == "/status" {
        return http::build_text_response("packager-status:running");
    }

    http::build_404_response()
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
