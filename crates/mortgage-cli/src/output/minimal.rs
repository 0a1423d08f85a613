use serde_json::Value;

/// Key answer fields, most specific first.
const PRIORITY_KEYS: [&str; 5] = [
    "periodic_payment",
    "premium",
    "interpreted_price",
    "valid",
    "periodic_payment_difference",
];

/// Print just the key answer value from the output.
///
/// Stress tests print one payment per line; otherwise the first priority
/// key present wins, falling back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        if let Some(Value::Array(points)) = map.get("points") {
            for point in points {
                if let Some(payment) = point.get("periodic_payment") {
                    println!("{}", format_minimal(payment));
                }
            }
            return;
        }

        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
