use serde_json::{Map, Value};
use std::io;

/// Keys whose array value is the natural CSV body for a result.
const ROW_KEYS: [&str; 3] = ["schedule", "years", "points"];

/// Write output as CSV to stdout. Results carrying a schedule, yearly
/// summary or stress points are written as one row per entry; anything else
/// as field,value.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match body {
        Value::Object(result) => match find_rows(result) {
            Some(rows) => write_array_csv(&mut wtr, rows),
            None => write_fields(&mut wtr, result),
        },
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(body)]);
        }
    }

    let _ = wtr.flush();
}

fn find_rows(result: &Map<String, Value>) -> Option<&[Value]> {
    ROW_KEYS.iter().find_map(|key| match result.get(*key) {
        Some(Value::Array(rows)) if !rows.is_empty() => Some(rows.as_slice()),
        _ => None,
    })
}

fn write_fields(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
