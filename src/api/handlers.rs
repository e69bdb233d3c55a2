// Expense API handlers module

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;

use super::response::json_response;
use super::types::{ApiFailure, ApiSuccess, ExpenseInput};
use super::validate;
use crate::config::AppState;
use crate::logger;

/// GET /expenses - snapshot of all records in insertion order
pub async fn handle_list(state: Arc<AppState>) -> Result<Response<Full<Bytes>>, Infallible> {
    let store = state.store.read().await;
    super::log_request(&state, "GET", "/expenses", 200);
    json_response(StatusCode::OK, &ApiSuccess::new(store.all()))
}

/// POST /expenses - validate, insert, return the created record
///
/// Validation collects every field violation before responding; a 400
/// response implies no store mutation happened.
pub async fn handle_create<B: Body>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let input = read_input(req).await;

    match validate::validate(&input) {
        Ok(new_expense) => {
            let expense = state.store.write().await.insert(new_expense);
            super::log_request(&state, "POST", "/expenses", 201);
            json_response(StatusCode::CREATED, &ApiSuccess::new(&expense))
        }
        Err(errors) => {
            super::log_request(&state, "POST", "/expenses", 400);
            json_response(StatusCode::BAD_REQUEST, &ApiFailure::validation(errors))
        }
    }
}

/// Read and parse the request body
///
/// An absent, unreadable, or non-JSON body degrades to an empty input
/// object, which then fails validation with every field reported missing.
async fn read_input<B: Body>(req: Request<B>) -> ExpenseInput {
    let Ok(collected) = req.collect().await else {
        logger::log_warning("Failed to read request body");
        return ExpenseInput::default();
    };
    serde_json::from_slice(&collected.to_bytes()).unwrap_or_default()
}
