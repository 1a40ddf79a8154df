use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// One sales transaction: column name to string-or-number value. No schema is
/// enforced; any record may be missing any field.
pub type Record = Map<String, Value>;

/// Per-dataset shape summary shown alongside previews and cleaning output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataStats {
    /// (row count, column count)
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    /// Count of missing or empty-string cells per column
    pub null_counts: HashMap<String, usize>,
}

/// The in-memory collection of sales records backing all queries.
///
/// A dataset is always replaced wholesale: upload and clean swap in a new
/// value, they never merge into an existing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names taken from the first record, in insertion order.
    pub fn columns(&self) -> Vec<String> {
        self.records
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// First `n` records unchanged (the identity "preview" view).
    pub fn head(&self, n: usize) -> Vec<Record> {
        self.records.iter().take(n).cloned().collect()
    }

    pub fn stats(&self) -> DataStats {
        let columns = self.columns();
        let mut null_counts: HashMap<String, usize> = HashMap::new();
        for col in &columns {
            let missing = self
                .records
                .iter()
                .filter(|row| match row.get(col) {
                    None | Some(Value::Null) => true,
                    Some(Value::String(s)) => s.is_empty(),
                    Some(_) => false,
                })
                .count();
            null_counts.insert(col.clone(), missing);
        }
        DataStats {
            shape: (self.records.len(), columns.len()),
            columns,
            null_counts,
        }
    }

    /// The built-in Raymond Shivajinagar sample transactions loaded at startup.
    pub fn sample() -> Self {
        let rows = vec![
            json!({
                "transaction_id": "TXN001",
                "date_of_sale": "2024-01-15",
                "brand": "RAYMOND",
                "product_name": "Premium Business Suit",
                "category": "Formal Wear",
                "sub_category": "Suits",
                "size": "42",
                "color": "Navy Blue",
                "price": 18999,
                "discount_percent": 10,
                "final_price": 17099,
                "quantity": 1,
                "payment_mode": "Credit Card",
                "store_location": "Shivajinagar",
                "sales_channel": "Store",
                "customer_gender": "Male",
                "return_status": 0,
                "rating": 5,
                "delivery_days": 0
            }),
            json!({
                "transaction_id": "TXN002",
                "date_of_sale": "2024-01-16",
                "brand": "RAYMOND",
                "product_name": "Silk Sherwani",
                "category": "Ethnic Wear",
                "sub_category": "Wedding Wear",
                "size": "40",
                "color": "Gold",
                "price": 24999,
                "discount_percent": 5,
                "final_price": 23749,
                "quantity": 1,
                "payment_mode": "Cash",
                "store_location": "Shivajinagar",
                "sales_channel": "Store",
                "customer_gender": "Male",
                "return_status": 0,
                "rating": 5,
                "delivery_days": 0
            }),
            json!({
                "transaction_id": "TXN003",
                "date_of_sale": "2024-01-17",
                "brand": "RAYMOND",
                "product_name": "Cotton Formal Shirt",
                "category": "Formal Wear",
                "sub_category": "Shirts",
                "size": "L",
                "color": "White",
                "price": 2499,
                "discount_percent": 15,
                "final_price": 2124,
                "quantity": 2,
                "payment_mode": "UPI",
                "store_location": "Shivajinagar",
                "sales_channel": "Store",
                "customer_gender": "Male",
                "return_status": 0,
                "rating": 4,
                "delivery_days": 0
            }),
            json!({
                "transaction_id": "TXN004",
                "date_of_sale": "2024-01-18",
                "brand": "RAYMOND",
                "product_name": "Premium Chinos",
                "category": "Casual Wear",
                "sub_category": "Trousers",
                "size": "34",
                "color": "Khaki",
                "price": 3999,
                "discount_percent": 20,
                "final_price": 3199,
                "quantity": 1,
                "payment_mode": "Debit Card",
                "store_location": "Shivajinagar",
                "sales_channel": "Store",
                "customer_gender": "Male",
                "return_status": 1,
                "return_reason": "Size Issue",
                "rating": 3,
                "delivery_days": 0
            }),
            json!({
                "transaction_id": "TXN005",
                "date_of_sale": "2024-01-19",
                "brand": "RAYMOND",
                "product_name": "Bandhgala Jacket",
                "category": "Ethnic Wear",
                "sub_category": "Jackets",
                "size": "42",
                "color": "Black",
                "price": 12999,
                "discount_percent": 8,
                "final_price": 11959,
                "quantity": 1,
                "payment_mode": "Credit Card",
                "store_location": "Shivajinagar",
                "sales_channel": "Store",
                "customer_gender": "Male",
                "return_status": 0,
                "rating": 5,
                "delivery_days": 0
            }),
        ];

        let records = rows
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();

        Self { records }
    }
}

/// Integer coercion for arithmetic fields. Accepts numbers directly and takes
/// the longest leading integer prefix of strings; anything else contributes 0.
pub fn coerce_int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i
            } else {
                n.as_f64().map(|f| f as i64).unwrap_or(0)
            }
        }
        Some(Value::String(s)) => int_prefix(s),
        _ => 0,
    }
}

/// Float coercion with the same fallback-to-zero rule as [`coerce_int`].
pub fn coerce_float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => float_prefix(s),
        _ => 0.0,
    }
}

/// Whether a flag field equals 1 (number 1, or a string whose full numeric
/// value is 1).
pub fn is_flag_set(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_or(false, |v| v == 1.0),
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

/// Grouping key for a record field. Missing, null, empty-string, and zero
/// values all fold into the "Unknown" group rather than erroring.
pub fn group_key(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => "Unknown".to_string(),
    }
}

fn int_prefix(s: &str) -> i64 {
    let t = s.trim();
    let mut end = 0;
    for (i, c) in t.char_indices() {
        let valid = c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'));
        if !valid {
            break;
        }
        end = i + c.len_utf8();
    }
    t[..end].parse().unwrap_or(0)
}

fn float_prefix(s: &str) -> f64 {
    let t = s.trim();
    let mut end = 0;
    for (i, c) in t.char_indices() {
        if t[..i + c.len_utf8()].parse::<f64>().is_ok() {
            end = i + c.len_utf8();
        }
    }
    let parsed: f64 = t[..end].parse().unwrap_or(0.0);
    if parsed.is_nan() {
        0.0
    } else {
        parsed
    }
}
