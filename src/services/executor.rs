use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::models::record::{coerce_float, coerce_int, group_key, is_flag_set, Record};

/// How many records the identity "preview" fallback returns.
const PREVIEW_ROWS: usize = 5;

/// Run a query string against the dataset.
///
/// This is not a SQL engine. The lowercased query is checked against a fixed
/// ordered pattern list; the first hit decides the aggregation. No hit is not
/// an error, it yields the first-5-rows preview. An `Err` here means the
/// aggregation itself had nothing to select from; the query service converts
/// that into the canned error result rather than propagating it.
pub fn execute(query: &str, records: &[Record]) -> Result<Vec<Record>> {
    let q = query.to_lowercase();

    if q.contains("most sold") || q.contains("sum(quantity)") {
        top_products_by_quantity(records)
    } else if q.contains("revenue") || q.contains("sum(final_price") {
        top_brand_by_revenue(records)
    } else if q.contains("return") && q.contains("category") {
        returns_by_category(records)
    } else if q.contains("avg") && q.contains("delivery") {
        average_delivery_days(records)
    } else if q.contains("payment_mode") {
        top_payment_mode(records)
    } else {
        Ok(records.iter().take(PREVIEW_ROWS).cloned().collect())
    }
}

fn top_products_by_quantity(records: &[Record]) -> Result<Vec<Record>> {
    let groups = group_sum(records, "product_name", |row| {
        coerce_int(row.get("quantity")) as f64
    });
    let (product, total) = top_entry(groups)?;
    Ok(vec![row([
        ("product_name", Value::from(product)),
        ("total_sold", Value::from(total as i64)),
    ])])
}

fn top_brand_by_revenue(records: &[Record]) -> Result<Vec<Record>> {
    let groups = group_sum(records, "brand", |r| {
        coerce_float(r.get("final_price")) * coerce_int(r.get("quantity")) as f64
    });
    let (brand, revenue) = top_entry(groups)?;
    Ok(vec![row([
        ("brand", Value::from(brand)),
        ("revenue", Value::from(revenue)),
    ])])
}

fn returns_by_category(records: &[Record]) -> Result<Vec<Record>> {
    let returned: Vec<&Record> = records
        .iter()
        .filter(|r| is_flag_set(r.get("return_status")))
        .collect();
    let mut groups: Vec<(String, f64)> = Vec::new();
    for record in returned {
        accumulate(&mut groups, group_key(record.get("category")), 1.0);
    }

    // A dataset without returns is a valid answer, not a failure.
    let entry = match top_entry(groups) {
        Ok((category, count)) => row([
            ("category", Value::from(category)),
            ("return_count", Value::from(count as i64)),
        ]),
        Err(_) => row([
            ("category", Value::from("No returns")),
            ("return_count", Value::from(0)),
        ]),
    };
    Ok(vec![entry])
}

fn average_delivery_days(records: &[Record]) -> Result<Vec<Record>> {
    if records.is_empty() {
        return Err(anyhow!("cannot average over an empty dataset"));
    }
    let total: i64 = records
        .iter()
        .map(|r| coerce_int(r.get("delivery_days")))
        .sum();
    let avg = total as f64 / records.len() as f64;
    Ok(vec![row([("avg_delivery_time", Value::from(avg))])])
}

fn top_payment_mode(records: &[Record]) -> Result<Vec<Record>> {
    let mut groups: Vec<(String, f64)> = Vec::new();
    for record in records {
        accumulate(&mut groups, group_key(record.get("payment_mode")), 1.0);
    }
    let (mode, count) = top_entry(groups)?;
    Ok(vec![row([
        ("payment_mode", Value::from(mode)),
        ("count", Value::from(count as i64)),
    ])])
}

/// Sum `value_of` per grouping key, keys kept in first-seen dataset order.
fn group_sum<F>(records: &[Record], key_field: &str, value_of: F) -> Vec<(String, f64)>
where
    F: Fn(&Record) -> f64,
{
    let mut groups: Vec<(String, f64)> = Vec::new();
    for record in records {
        let key = group_key(record.get(key_field));
        let value = value_of(record);
        accumulate(&mut groups, key, value);
    }
    groups
}

fn accumulate(groups: &mut Vec<(String, f64)>, key: String, value: f64) {
    match groups.iter_mut().find(|(k, _)| *k == key) {
        Some((_, total)) => *total += value,
        None => groups.push((key, value)),
    }
}

/// Top-1 group. Strictly-greater comparison keeps the first-seen group on
/// ties, which is the documented tie-break.
fn top_entry(groups: Vec<(String, f64)>) -> Result<(String, f64)> {
    let mut best: Option<(String, f64)> = None;
    for (key, total) in groups {
        match &best {
            Some((_, best_total)) if total <= *best_total => {}
            _ => best = Some((key, total)),
        }
    }
    best.ok_or_else(|| anyhow!("no groups to select from"))
}

fn row<const N: usize>(fields: [(&str, Value); N]) -> Record {
    let mut record = Record::new();
    for (key, value) in fields {
        record.insert(key.to_string(), value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Dataset;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn unmatched_query_falls_back_to_preview() {
        let ds = Dataset::sample();
        let rows = execute("asdkfj not a real query", &ds.records).expect("preview");
        assert_eq!(rows.len(), 5);
        assert_eq!(rows, ds.head(5));
    }

    #[test]
    fn preview_of_empty_dataset_is_empty_not_an_error() {
        let rows = execute("show me something", &[]).expect("empty preview");
        assert!(rows.is_empty());
    }

    #[test]
    fn revenue_groups_by_brand_and_takes_the_top() {
        let records = vec![
            record(json!({"brand": "Raymond", "final_price": 100, "quantity": 2})),
            record(json!({"brand": "Other", "final_price": 50, "quantity": 1})),
        ];
        let rows = execute("which brand had the highest revenue", &records).expect("revenue");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["brand"], "Raymond");
        assert_eq!(rows[0]["revenue"], json!(200.0));
    }

    #[test]
    fn unparseable_quantity_contributes_zero() {
        let records = vec![
            record(json!({"product_name": "Shirt", "quantity": "N/A"})),
            record(json!({"product_name": "Suit", "quantity": 1})),
        ];
        let rows = execute("what is the most sold product", &records).expect("most sold");
        assert_eq!(rows[0]["product_name"], "Suit");
        assert_eq!(rows[0]["total_sold"], json!(1));
    }

    #[test]
    fn most_sold_sums_string_quantities() {
        let records = vec![
            record(json!({"product_name": "Shirt", "quantity": "2"})),
            record(json!({"product_name": "Shirt", "quantity": 1})),
            record(json!({"product_name": "Suit", "quantity": "2"})),
        ];
        let rows = execute("most sold product?", &records).expect("most sold");
        assert_eq!(rows[0]["product_name"], "Shirt");
        assert_eq!(rows[0]["total_sold"], json!(3));
    }

    #[test]
    fn ties_resolve_to_first_seen_group() {
        let records = vec![
            record(json!({"product_name": "Suit", "quantity": 2})),
            record(json!({"product_name": "Shirt", "quantity": 2})),
        ];
        let rows = execute("most sold", &records).expect("most sold");
        assert_eq!(rows[0]["product_name"], "Suit");
    }

    #[test]
    fn returns_by_category_counts_flagged_rows() {
        let ds = Dataset::sample();
        let rows = execute("which category has the most returns", &ds.records).expect("returns");
        assert_eq!(rows[0]["category"], "Casual Wear");
        assert_eq!(rows[0]["return_count"], json!(1));
    }

    #[test]
    fn no_returns_yields_placeholder_row() {
        let records = vec![record(
            json!({"category": "Formal Wear", "return_status": 0}),
        )];
        let rows = execute("returns by category", &records).expect("returns");
        assert_eq!(rows[0]["category"], "No returns");
        assert_eq!(rows[0]["return_count"], json!(0));
    }

    #[test]
    fn average_delivery_over_sample_is_zero() {
        let ds = Dataset::sample();
        let rows = execute("what is the avg delivery time", &ds.records).expect("avg");
        assert_eq!(rows[0]["avg_delivery_time"], json!(0.0));
    }

    #[test]
    fn payment_mode_counts_and_ties_keep_first_seen() {
        let ds = Dataset::sample();
        let rows = execute("which payment_mode is most used", &ds.records).expect("payment");
        // Credit Card appears twice (rows 1 and 5); every other mode once.
        assert_eq!(rows[0]["payment_mode"], "Credit Card");
        assert_eq!(rows[0]["count"], json!(2));
    }

    #[test]
    fn missing_group_key_lands_in_unknown_not_a_panic() {
        let records = vec![
            record(json!({"quantity": 2})),
            record(json!({"product_name": null, "quantity": 1})),
        ];
        let rows = execute("most sold", &records).expect("most sold");
        assert_eq!(rows[0]["product_name"], "Unknown");
        assert_eq!(rows[0]["total_sold"], json!(3));
    }

    #[test]
    fn aggregates_over_empty_dataset_are_contained_errors() {
        assert!(execute("most sold", &[]).is_err());
        assert!(execute("highest revenue", &[]).is_err());
        assert!(execute("avg delivery", &[]).is_err());
        assert!(execute("payment_mode", &[]).is_err());
    }
}
