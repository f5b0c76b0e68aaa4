use serde_json::Value;

pub struct ValueUtil;

impl ValueUtil {
    /// Coerces a stored attribute value into an `f64`.
    ///
    /// Numbers pass through, strings are parsed as decimals (surrounding
    /// whitespace allowed). Booleans, nulls, containers and non-finite
    /// results are rejected so the response body always stays valid JSON.
    pub fn to_decimal(value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;

        parsed.is_finite().then_some(parsed)
    }

    /// Short rendering of a value for log lines and error messages.
    pub fn describe(value: &Value) -> String {
        const MAX: usize = 64;
        let mut text = value.to_string();
        if text.len() > MAX {
            let cut = (0..=MAX).rev().find(|i| text.is_char_boundary(*i)).unwrap_or(0);
            text.truncate(cut);
            text.push('…');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_decimal_strings_coerce() {
        assert_eq!(ValueUtil::to_decimal(&json!(0.3)), Some(0.3));
        assert_eq!(ValueUtil::to_decimal(&json!(2)), Some(2.0));
        assert_eq!(ValueUtil::to_decimal(&json!(" -1.25 ")), Some(-1.25));
        assert_eq!(ValueUtil::to_decimal(&json!("1e3")), Some(1000.0));
    }

    #[test]
    fn non_decimal_values_are_rejected() {
        assert_eq!(ValueUtil::to_decimal(&json!("dummy0")), None);
        assert_eq!(ValueUtil::to_decimal(&json!("")), None);
        assert_eq!(ValueUtil::to_decimal(&json!("NaN")), None);
        assert_eq!(ValueUtil::to_decimal(&json!("inf")), None);
        assert_eq!(ValueUtil::to_decimal(&json!(true)), None);
        assert_eq!(ValueUtil::to_decimal(&Value::Null), None);
        assert_eq!(ValueUtil::to_decimal(&json!([1.0])), None);
    }

    #[test]
    fn describe_truncates_long_values() {
        let long = json!("a".repeat(200));
        let text = ValueUtil::describe(&long);
        assert!(text.chars().count() <= 65);
        assert!(text.ends_with('…'));
        assert_eq!(ValueUtil::describe(&json!(1.5)), "1.5");
    }
}
