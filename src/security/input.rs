//! Form input validation and sanitization.
//!
//! Shape checks only: the email rule is not RFC 5322 and the phone rule
//! does not know about country codes.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern compiles"));

/// `local@domain.tld` shape: one `@`, a dot after it, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Optional leading `+`, then at least 10 digits, spaces, `-`, `(` or `)`.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Trim and drop every `<` and `>`. Other characters are kept in order.
pub fn sanitize_input(input: &str) -> String {
    input.trim().chars().filter(|c| !matches!(c, '<' | '>')).collect()
}

/// Sanitize a JSON value from a form: strings go through
/// [`sanitize_input`], every other value is returned unchanged.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_input(&s)),
        other => other,
    }
}
