//! Field coercion for self-describing HCDP records, which serve numbers as
//! JSON numbers or strings interchangeably.

use serde_json::Value;

pub(crate) fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_and_numbers_coerce() {
        assert_eq!(coerce_string(&json!("USC00519397")), Some("USC00519397".to_string()));
        assert_eq!(coerce_string(&json!(1094)), Some("1094".to_string()));
        assert_eq!(coerce_string(&json!(null)), None);

        assert_eq!(coerce_f64(&json!(21.3)), Some(21.3));
        assert_eq!(coerce_f64(&json!("-157.85")), Some(-157.85));
        assert_eq!(coerce_f64(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(coerce_f64(&json!("mauka")), None);
        assert_eq!(coerce_f64(&json!([1.0])), None);
    }
}
