use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables: scalar fields first, then one table per list
/// (schedule, stress points), then nested scenarios.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => {
                print_result(result, 0);
                print_envelope_notes(map);
            }
            None => print_result(value, 0),
        },
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value, depth: usize) {
    let Value::Object(map) = result else {
        println!("{}", format_value(result));
        return;
    };

    print_fields(map);

    for (key, val) in map {
        match val {
            Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
                println!("\n{}:", heading(key, depth));
                print_rows(rows);
            }
            Value::Object(_) => {
                println!("\n{}:", heading(key, depth));
                print_result(val, depth + 1);
            }
            _ => {}
        }
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if is_nested(val) {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(rows) => rows.first().is_some_and(Value::is_object),
        _ => false,
    }
}

fn heading(key: &str, depth: usize) -> String {
    format!("{}{}", "  ".repeat(depth), key.replace('_', " "))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
