//! Scalar coercion policy shared by matching and sorting.
//!
//! One precise rule set, applied everywhere a value crosses types:
//!
//! - **Text form**: strings as-is; numbers in their JSON display form;
//!   `true` / `false`; `null`. Arrays and objects have no text form.
//! - **Numeric form**: numbers as `f64`; strings that parse fully as `f64`
//!   after trimming ASCII whitespace; `true` is 1, `false` is 0. `null`,
//!   arrays, and objects have no numeric form.
//! - **Loose equality**: strict equality first; otherwise numeric forms when
//!   both sides have one; otherwise text forms when both sides are non-null
//!   scalars. `null` loose-equals only `null`.

use std::borrow::Cow;

use serde_json::Value;

pub fn text_form(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text)),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(true) => Some(Cow::Borrowed("true")),
        Value::Bool(false) => Some(Cow::Borrowed("false")),
        Value::Null => Some(Cow::Borrowed("null")),
        Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn numeric_form(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim_matches(|c: char| c.is_ascii_whitespace())
            .parse()
            .ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    if a.is_null() || b.is_null() {
        return false;
    }
    if let (Some(x), Some(y)) = (numeric_form(a), numeric_form(b)) {
        return x == y;
    }
    match (text_form(a), text_form(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Text used for ordering. Non-scalar values fall back to their compact JSON
/// rendering so the order stays total.
pub(crate) fn sort_text(value: &Value) -> String {
    match text_form(value) {
        Some(text) => text.into_owned(),
        None => value.to_string(),
    }
}
