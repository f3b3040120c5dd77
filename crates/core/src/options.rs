use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ConfigError;

/// Raw, untyped notification options as supplied by the user.
///
/// Values are kept as JSON values so that options coming from TOML files,
/// JSON documents, or programmatic maps all share one representation.
pub type RawOptions = BTreeMap<String, Value>;

/// Read a boolean option, falling back to `default` when the key is absent.
///
/// Accepts JSON booleans and the strings `"true"` / `"false"`
/// (case-insensitive, surrounding whitespace ignored).
pub(crate) fn bool_option(
    options: &RawOptions,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(mismatch(key, "boolean")),
        },
        Some(_) => Err(mismatch(key, "boolean")),
    }
}

/// Read an optional string option.
pub(crate) fn string_option(
    options: &RawOptions,
    key: &'static str,
) -> Result<Option<String>, ConfigError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(mismatch(key, "string")),
    }
}

/// Read an optional numeric option.
///
/// Accepts JSON numbers and strings that parse as a finite float.
pub(crate) fn number_option(
    options: &RawOptions,
    key: &'static str,
) -> Result<Option<f64>, ConfigError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| mismatch(key, "number")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| mismatch(key, "number")),
        Some(_) => Err(mismatch(key, "number")),
    }
}

fn mismatch(key: &'static str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch { key, expected }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn opts(key: &str, value: Value) -> RawOptions {
        let mut map = RawOptions::new();
        map.insert(key.to_owned(), value);
        map
    }

    #[test]
    fn bool_absent_uses_default() {
        let map = RawOptions::new();
        assert!(!bool_option(&map, "k", false).unwrap());
        assert!(bool_option(&map, "k", true).unwrap());
    }

    #[test]
    fn bool_null_uses_default() {
        let map = opts("k", Value::Null);
        assert!(!bool_option(&map, "k", false).unwrap());
    }

    #[test]
    fn bool_from_string() {
        assert!(bool_option(&opts("k", json!("TRUE")), "k", false).unwrap());
        assert!(bool_option(&opts("k", json!(" true ")), "k", false).unwrap());
        assert!(!bool_option(&opts("k", json!("False")), "k", true).unwrap());
    }

    #[test]
    fn bool_rejects_number_and_junk() {
        let err = bool_option(&opts("k", json!(1)), "k", false).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TypeMismatch {
                key: "k",
                expected: "boolean"
            }
        );
        assert!(bool_option(&opts("k", json!("yes")), "k", false).is_err());
    }

    #[test]
    fn string_rejects_non_string() {
        assert_eq!(
            string_option(&opts("k", json!("x")), "k").unwrap().as_deref(),
            Some("x")
        );
        assert!(string_option(&opts("k", json!(true)), "k").is_err());
        assert!(string_option(&opts("k", json!(["a"])), "k").is_err());
    }

    #[test]
    fn number_accepts_int_float_and_numeric_string() {
        assert_eq!(number_option(&opts("k", json!(15)), "k").unwrap(), Some(15.0));
        assert_eq!(number_option(&opts("k", json!(12.5)), "k").unwrap(), Some(12.5));
        assert_eq!(
            number_option(&opts("k", json!(" 7.25 ")), "k").unwrap(),
            Some(7.25)
        );
    }

    #[test]
    fn number_rejects_non_numeric() {
        assert!(number_option(&opts("k", json!("abc")), "k").is_err());
        assert!(number_option(&opts("k", json!("NaN")), "k").is_err());
        assert!(number_option(&opts("k", json!(false)), "k").is_err());
    }
}
