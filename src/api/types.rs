// API type definitions module
// Request input and JSON response envelopes for the expense API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validate::ValidationErrors;

/// Raw POST /expenses input before validation
///
/// Every field is optional; absent, null, and blank values are all treated
/// as missing by validation. Fields stay raw JSON values so a wrong-typed
/// value in one field cannot fail deserialization of the whole body, and
/// validation can judge each field on its own.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseInput {
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
}

/// Success envelope: `{"success":true,"data":...}`
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure envelope: `{"success":false,"error":...}` with an optional
/// per-field `details` map for validation failures
#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl ApiFailure {
    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            error: "Validation failed.".to_string(),
            details: Some(errors.into_details()),
        }
    }

    pub fn method_not_allowed(method: &hyper::Method) -> Self {
        Self {
            success: false,
            error: format!("Method {method} Not Allowed"),
            details: None,
        }
    }
}
