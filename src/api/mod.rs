// API module entry
// Expense create/list API over hyper

mod handlers;
mod response;
mod types;
mod validate;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

/// API route handler
///
/// Dispatches to handler functions based on request path and method.
/// Generic over the body type so tests can drive it with `Full<Bytes>`
/// requests; production uses `hyper::body::Incoming`.
pub async fn handle_request<B: Body>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    // Reject oversized bodies before reading them
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        log_request(&state, method.as_str(), &path, 413);
        return Ok(resp);
    }

    match (method, path.as_str()) {
        (Method::GET, "/expenses") => handlers::handle_list(state).await,
        (Method::POST, "/expenses") => handlers::handle_create(req, state).await,
        (other, "/expenses") => {
            log_request(&state, other.as_str(), &path, 405);
            Ok(response::method_not_allowed(&other))
        }
        (Method::GET, "/healthz") => {
            log_request(&state, "GET", &path, 200);
            Ok(response::health())
        }
        (other, _) => {
            log_request(&state, other.as_str(), &path, 404);
            Ok(response::not_found())
        }
    }
}

/// Write an access log line unless access logging is disabled
fn log_request(state: &AppState, method: &str, path: &str, status: u16) {
    if state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed)
    {
        logger::log_api_request(method, path, status);
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(response::payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
