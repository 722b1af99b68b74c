use serde_json::Value;

use super::{format_scalar, result_of};

/// Print just the key answer from the output.
///
/// Every loan computation carries a `summary` sentence, e.g.
/// "The conventional loan payment is 237.24"; anything else falls back to
/// the first well-known amount and then the first field.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = result_of(value);

    let priority_keys = [
        "summary",
        "rounded_payment",
        "monthly_payment",
        "rounded_balance",
        "remaining_balance",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_scalar(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_scalar(val));
        }
    }

    format_scalar(result_obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_summary() {
        let value = json!({
            "result": {
                "monthly_payment": "237.238",
                "summary": "The conventional loan payment is 237.24"
            }
        });
        assert_eq!(minimal_line(&value), "The conventional loan payment is 237.24");
    }

    #[test]
    fn test_falls_back_to_payment() {
        let value = json!({"result": {"monthly_rate": "0.01", "rounded_payment": "125"}});
        assert_eq!(minimal_line(&value), "125");
    }
}
