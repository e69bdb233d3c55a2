// Expense store module
// In-memory ordered collection of expense records with sequential id issuance

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// A single expense record as served over the wire
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Sequential identifier, issued as a decimal string starting at "1"
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    /// Stored verbatim as submitted; only validity is checked
    pub date: String,
    /// RFC 3339 UTC instant stamped at insertion time
    pub created_at: String,
}

/// Validated input ready for insertion (no id or timestamp yet)
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub date: String,
}

/// Ordered in-memory expense collection
///
/// Owns the id counter. Ids are strictly increasing in issuance order and
/// are never reused, even across `clear()`.
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    next_id: u64,
}

impl ExpenseStore {
    pub const fn new() -> Self {
        Self {
            expenses: Vec::new(),
            next_id: 1,
        }
    }

    /// Insert a validated expense, assigning the next id and stamping the
    /// creation time. Returns the stored record.
    pub fn insert(&mut self, new: NewExpense) -> Expense {
        let expense = Expense {
            id: self.next_id.to_string(),
            amount: new.amount,
            description: new.description,
            category: new.category,
            date: new.date,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.next_id += 1;
        self.expenses.push(expense.clone());
        expense
    }

    /// Snapshot of all records in insertion order
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    /// Remove all records. The id counter is deliberately left untouched so
    /// previously issued ids are never reused.
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.expenses.clear();
    }
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(description: &str) -> NewExpense {
        NewExpense {
            amount: 12.5,
            description: description.to_string(),
            category: "Food".to_string(),
            date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_ids_sequential_from_one() {
        let mut store = ExpenseStore::new();
        let first = store.insert(sample("a")).id;
        let second = store.insert(sample("b")).id;
        let third = store.insert(sample("c")).id;
        assert_eq!(first, "1");
        assert_eq!(second, "2");
        assert_eq!(third, "3");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = ExpenseStore::new();
        store.insert(sample("first"));
        store.insert(sample("second"));
        store.insert(sample("third"));

        let descriptions: Vec<&str> = store
            .all()
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_clear_does_not_reset_counter() {
        let mut store = ExpenseStore::new();
        store.insert(sample("a"));
        store.insert(sample("b"));
        store.clear();
        assert!(store.all().is_empty());

        let id = store.insert(sample("c")).id;
        assert_eq!(id, "3");
    }

    #[test]
    fn test_insert_stamps_created_at() {
        let mut store = ExpenseStore::new();
        let expense = store.insert(sample("a"));
        // RFC 3339 with millisecond precision, e.g. 2024-01-01T00:00:00.000Z
        assert!(expense.created_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&expense.created_at).is_ok());
    }

    #[test]
    fn test_date_stored_verbatim() {
        let mut store = ExpenseStore::new();
        let expense = store.insert(NewExpense {
            amount: 1.0,
            description: "x".to_string(),
            category: "y".to_string(),
            date: " 01/02/2024 ".to_string(),
        });
        assert_eq!(expense.date, " 01/02/2024 ");
    }

    #[test]
    fn test_wire_shape_uses_camel_case() {
        let mut store = ExpenseStore::new();
        let expense = store.insert(sample("a"));
        let json = serde_json::to_value(&expense).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
