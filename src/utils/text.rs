//! Small string helpers used when formatting device output.

use regex::Regex;
use serde_json::Value;

/// Length in characters of the longest string, `None` for an empty list
///
/// # Examples
/// ```
/// use libbart::utils::text::max_length;
///
/// assert_eq!(max_length(&["Gi0/1", "TenGigE0/0/0/1", "lo0"]), Some(14));
/// assert_eq!(max_length::<&str>(&[]), None);
/// ```
pub fn max_length<S: AsRef<str>>(items: &[S]) -> Option<usize> {
    items.iter().map(|s| s.as_ref().chars().count()).max()
}

/// Find the shortest run of a repeated character in `text`.
///
/// `minimal_recurring("\n", "\n\n\nabc_abc\n\nabc_abc_abc\n\n\n\n")` returns
/// `"\n\n"`. Only the last character of a multi-character `character` is
/// repeated, so `"ab"` matches `ab`, `abb`, `abbb` and so on. If nothing
/// matches, `character` itself is returned.
pub fn minimal_recurring(character: &str, text: &str) -> String {
    let Some(last) = character.chars().last() else {
        return String::new();
    };
    let head = &character[..character.len() - last.len_utf8()];

    let pattern = format!("{}(?:{})+", regex::escape(head), regex::escape(&last.to_string()));
    let runs = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            log::warn!("Cannot build run pattern for {:?}: {}", character, err);
            return character.to_string();
        }
    };

    runs.find_iter(text)
        .map(|m| m.as_str())
        .min_by_key(|run| run.len())
        .unwrap_or(character)
        .to_string()
}

/// Check if a string holds a non-negative integer (ASCII digits only)
pub fn is_int_str(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Check if a value is an integer or a string of digits.
///
/// # Examples
/// ```
/// use libbart::utils::text::is_int;
/// use serde_json::json;
///
/// assert!(is_int(&json!(42)));
/// assert!(is_int(&json!("42")));
/// assert!(!is_int(&json!("4.2")));
/// assert!(!is_int(&json!(4.2)));
/// ```
pub fn is_int(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => is_int_str(s),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_max_length() {
        let names = vec!["a".to_string(), "abc".to_string(), "ab".to_string()];
        assert_eq!(max_length(&names), Some(3));
        assert_eq!(max_length(&["äöü", "ab"]), Some(3));
    }

    #[test]
    fn test_minimal_recurring() {
        assert_eq!(minimal_recurring("\n", "\n\n\nabc_abc\n\nabc_abc_abc\n\n\n\n"), "\n\n");
        assert_eq!(minimal_recurring("-", "a--b---c"), "--");
        assert_eq!(minimal_recurring("*", "a***b*c"), "*");
        assert_eq!(minimal_recurring("\n", "no newline"), "\n");
    }

    #[test]
    fn test_minimal_recurring_repeats_last_char_only() {
        assert_eq!(minimal_recurring("ab", "abab"), "ab");
        assert_eq!(minimal_recurring("ab", "abbb_abb"), "abb");
        assert_eq!(minimal_recurring("ab", "aaa"), "ab");
        assert_eq!(minimal_recurring("", "text"), "");
    }

    #[test]
    fn test_is_int() {
        assert!(is_int(&json!(0)));
        assert!(is_int(&json!(-7)));
        assert!(is_int(&json!("0123")));
        assert!(!is_int(&json!("")));
        assert!(!is_int(&json!("-1")));
        assert!(!is_int(&json!("12a")));
        assert!(!is_int(&json!(true)));
        assert!(!is_int(&json!(null)));
        assert!(!is_int(&json!([1])));
    }
}
