// Expense field validation module
// Collects every violation before responding; validation is not fail-fast

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use super::types::ExpenseInput;
use crate::store::NewExpense;

/// Accepted calendar date layouts for the `date` field.
/// The matched value is never normalized; the raw string is stored.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// A single per-field validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Ordered collection of field errors
///
/// Kept as a list rather than a map so the check order is preserved and the
/// type stays independent of any serialization format.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &str) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    /// Failed fields in check order
    #[allow(dead_code)]
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Convert into the wire-level `details` object (field -> message)
    pub fn into_details(self) -> Map<String, Value> {
        self.0
            .into_iter()
            .map(|e| (e.field.to_string(), Value::String(e.message)))
            .collect()
    }
}

/// Validate raw input and produce an insertable expense
///
/// All four rules are checked independently; every violation is collected
/// into the returned error list. On success the text fields come back
/// trimmed while `date` keeps the caller's exact string.
pub fn validate(input: &ExpenseInput) -> Result<NewExpense, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let description = non_blank(input_text(input.description.as_ref()).as_deref());
    if description.is_none() {
        errors.push("description", "Description is required.");
    }

    let amount = match parse_amount(input.amount.as_ref()) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push("amount", message);
            None
        }
    };

    let category = non_blank(input_text(input.category.as_ref()).as_deref());
    if category.is_none() {
        errors.push("category", "Category is required.");
    }

    let date = match input_text(input.date.as_ref()) {
        None => None,
        Some(raw) if raw.trim().is_empty() => None,
        Some(raw) => {
            if is_valid_date(raw.trim()) {
                Some(raw)
            } else {
                errors.push("date", "Date is not a valid date.");
                None
            }
        }
    };
    if date.is_none() && errors.message_for("date").is_none() {
        errors.push("date", "Date is required (e.g. 2024-01-01).");
    }

    if let (Some(amount), Some(description), Some(category), Some(date)) =
        (amount, description, category, date)
    {
        Ok(NewExpense {
            amount,
            description,
            category,
            date,
        })
    } else {
        Err(errors)
    }
}

/// Text view of a JSON value
///
/// Scalar values coerce to their string form, so a numeric or boolean
/// field still validates on its own merits. Arrays, objects, and null are
/// treated as missing.
fn input_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

/// Trimmed copy of a present, non-blank string
fn non_blank(value: Option<&str>) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Parse the amount field
///
/// Accepts JSON numbers and numeric strings (trimmed before parsing).
/// Distinguishes "required" (missing/null/blank) from "not a valid number"
/// (present but unparseable or non-finite).
fn parse_amount(value: Option<&Value>) -> Result<f64, &'static str> {
    match value {
        None | Some(Value::Null) => Err("Amount is required."),
        Some(Value::String(s)) if s.trim().is_empty() => Err("Amount is required."),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or("Amount must be a valid number."),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or("Amount must be a valid number."),
        Some(_) => Err("Amount must be a valid number."),
    }
}

/// Check a (trimmed) date string against the accepted layouts
fn is_valid_date(s: &str) -> bool {
    if DateTime::parse_from_rfc3339(s).is_ok() {
        return true;
    }
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(
        amount: Option<Value>,
        description: Option<&str>,
        category: Option<&str>,
        date: Option<&str>,
    ) -> ExpenseInput {
        ExpenseInput {
            amount,
            description: description.map(|s| json!(s)),
            category: category.map(|s| json!(s)),
            date: date.map(|s| json!(s)),
        }
    }

    #[test]
    fn test_valid_input_with_numeric_string_amount() {
        let result = validate(&input(
            Some(json!("12.5")),
            Some("Coffee"),
            Some("Food"),
            Some("2024-01-01"),
        ))
        .unwrap();
        assert!((result.amount - 12.5).abs() < f64::EPSILON);
        assert_eq!(result.description, "Coffee");
        assert_eq!(result.category, "Food");
        assert_eq!(result.date, "2024-01-01");
    }

    #[test]
    fn test_valid_input_with_json_number() {
        let result = validate(&input(
            Some(json!(5)),
            Some("Lunch"),
            Some("Food"),
            Some("2024-06-15"),
        ))
        .unwrap();
        assert!((result.amount - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let result = validate(&input(
            Some(json!(1)),
            Some("  Coffee  "),
            Some("  Food "),
            Some("2024-01-01"),
        ))
        .unwrap();
        assert_eq!(result.description, "Coffee");
        assert_eq!(result.category, "Food");
    }

    #[test]
    fn test_date_kept_verbatim_even_untrimmed() {
        let result = validate(&input(
            Some(json!(1)),
            Some("x"),
            Some("y"),
            Some(" 2024-01-01 "),
        ))
        .unwrap();
        assert_eq!(result.date, " 2024-01-01 ");
    }

    #[test]
    fn test_numeric_description_coerced_to_string() {
        let result = validate(&ExpenseInput {
            amount: Some(json!(5)),
            description: Some(json!(123)),
            category: Some(json!("Food")),
            date: Some(json!("2024-01-01")),
        })
        .unwrap();
        assert_eq!(result.description, "123");
    }

    #[test]
    fn test_boolean_category_coerced_to_string() {
        let result = validate(&ExpenseInput {
            amount: Some(json!(5)),
            description: Some(json!("x")),
            category: Some(json!(true)),
            date: Some(json!("2024-01-01")),
        })
        .unwrap();
        assert_eq!(result.category, "true");
    }

    #[test]
    fn test_wrong_typed_field_flags_only_that_field() {
        let errors = validate(&ExpenseInput {
            amount: Some(json!(5)),
            description: Some(json!([1, 2])),
            category: Some(json!("Food")),
            date: Some(json!("2024-01-01")),
        })
        .unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["description"]);
    }

    #[test]
    fn test_all_fields_invalid_collects_four_errors() {
        let errors = validate(&input(None, None, None, None)).unwrap_err();
        assert_eq!(errors.fields().count(), 4);
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["description", "amount", "category", "date"]);
    }

    #[test]
    fn test_blank_strings_treated_as_missing() {
        let errors = validate(&input(
            Some(json!("")),
            Some("   "),
            Some(""),
            Some(" "),
        ))
        .unwrap_err();
        assert_eq!(errors.fields().count(), 4);
        assert_eq!(errors.message_for("amount"), Some("Amount is required."));
        assert_eq!(
            errors.message_for("date"),
            Some("Date is required (e.g. 2024-01-01).")
        );
    }

    #[test]
    fn test_amount_required_vs_invalid_messages_differ() {
        let missing = validate(&input(None, Some("x"), Some("y"), Some("2024-01-01")))
            .unwrap_err();
        assert_eq!(missing.message_for("amount"), Some("Amount is required."));

        let invalid = validate(&input(
            Some(json!("abc")),
            Some("x"),
            Some("y"),
            Some("2024-01-01"),
        ))
        .unwrap_err();
        assert_eq!(
            invalid.message_for("amount"),
            Some("Amount must be a valid number.")
        );
    }

    #[test]
    fn test_amount_rejects_non_scalar_values() {
        let errors = validate(&input(
            Some(json!([1, 2])),
            Some("x"),
            Some("y"),
            Some("2024-01-01"),
        ))
        .unwrap_err();
        assert_eq!(
            errors.message_for("amount"),
            Some("Amount must be a valid number.")
        );
    }

    #[test]
    fn test_amount_rejects_non_finite_strings() {
        for bad in ["NaN", "inf", "-inf"] {
            let errors = validate(&input(
                Some(json!(bad)),
                Some("x"),
                Some("y"),
                Some("2024-01-01"),
            ))
            .unwrap_err();
            assert_eq!(
                errors.message_for("amount"),
                Some("Amount must be a valid number."),
                "expected rejection for {bad}"
            );
        }
    }

    #[test]
    fn test_date_required_vs_invalid_messages_differ() {
        let missing = validate(&input(Some(json!(1)), Some("x"), Some("y"), None))
            .unwrap_err();
        assert_eq!(
            missing.message_for("date"),
            Some("Date is required (e.g. 2024-01-01).")
        );

        let invalid = validate(&input(
            Some(json!(1)),
            Some("x"),
            Some("y"),
            Some("not-a-date"),
        ))
        .unwrap_err();
        assert_eq!(
            invalid.message_for("date"),
            Some("Date is not a valid date.")
        );
    }

    #[test]
    fn test_lenient_date_formats_accepted() {
        for date in [
            "2024-01-01",
            "2024/01/01",
            "01/31/2024",
            "January 1, 2024",
            "Jan 1 2024",
            "2024-01-01T10:30:00Z",
        ] {
            let result = validate(&input(Some(json!(1)), Some("x"), Some("y"), Some(date)));
            assert!(result.is_ok(), "expected {date} to be accepted");
            assert_eq!(result.unwrap().date, date);
        }
    }

    #[test]
    fn test_impossible_calendar_dates_rejected() {
        for date in ["2024-13-01", "2024-02-30", "99999"] {
            let errors = validate(&input(Some(json!(1)), Some("x"), Some("y"), Some(date)))
                .unwrap_err();
            assert_eq!(
                errors.message_for("date"),
                Some("Date is not a valid date."),
                "expected {date} to be rejected"
            );
        }
    }

    #[test]
    fn test_into_details_maps_fields_to_messages() {
        let errors = validate(&input(None, None, None, None)).unwrap_err();
        let details = errors.into_details();
        assert_eq!(details.len(), 4);
        assert_eq!(
            details.get("description").and_then(Value::as_str),
            Some("Description is required.")
        );
        assert_eq!(
            details.get("category").and_then(Value::as_str),
            Some("Category is required.")
        );
    }
}
