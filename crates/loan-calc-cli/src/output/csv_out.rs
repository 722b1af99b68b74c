use serde_json::Value;
use std::io::{self, Write};

use super::{format_scalar, result_of, PERIODS_KEY};

/// Write output as CSV to stdout.
///
/// A schedule is written one row per month; any other result is written as
/// two-column `field,value` records.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_csv<W: Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    let result = result_of(value);

    match result {
        Value::Object(map) => match map.get(PERIODS_KEY) {
            Some(Value::Array(periods)) => write_rows(&mut wtr, periods)?,
            _ => {
                wtr.write_record(["field", "value"])?;
                for (key, val) in map {
                    wtr.write_record([key.as_str(), &format_scalar(val)])?;
                }
            }
        },
        Value::Array(arr) => write_rows(&mut wtr, arr)?,
        _ => wtr.write_record([&format_scalar(result)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([&format_scalar(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_scalar).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_field_value_rows() {
        let out = render(&json!({"result": {"rounded_payment": "125"}}));
        assert_eq!(out, "field,value\nrounded_payment,125\n");
    }

    #[test]
    fn test_schedule_rows() {
        let out = render(&json!({
            "result": {
                "monthly_payment": "500.00",
                "periods": [
                    {"month": 1, "payment": "500.00"},
                    {"month": 2, "payment": "500.00"}
                ]
            }
        }));
        assert_eq!(out, "month,payment\n1,500.00\n2,500.00\n");
    }
}
