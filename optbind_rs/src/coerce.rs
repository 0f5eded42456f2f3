//! Conversion of raw text into the values bindings expect.

/// Config-file literals that turn a flag on (compared after uppercasing).
pub const TRUTHY: &[&str] = &["YES", "ON", "TRUE"];

/// Config-file literals that turn a flag off (compared after uppercasing).
pub const FALSY: &[&str] = &["NO", "OFF", "FALSE"];

/// Interpret a config-file flag value. `None` means the literal is outside
/// both vocabularies.
pub fn parse_bool(value: &str) -> Option<bool> {
    let upper = value.to_ascii_uppercase();
    if TRUTHY.contains(&upper.as_str()) {
        Some(true)
    } else if FALSY.contains(&upper.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Leading-integer parse: optional whitespace, optional sign, then as many
/// digits as follow. Anything unparsable yields 0; out-of-range values
/// saturate.
///
/// ```
/// use optbind::coerce::leading_int;
///
/// assert_eq!(leading_int("  42abc"), 42);
/// assert_eq!(leading_int("-7"), -7);
/// assert_eq!(leading_int("abc"), 0);
/// ```
pub fn leading_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    value
}

/// Strict integer parse: the whole (trimmed) text must be a decimal integer.
pub fn strict_int(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// Integer coercion honouring the strictness setting.
pub fn parse_int(text: &str, strict: bool) -> Option<i64> {
    if strict {
        strict_int(text)
    } else {
        Some(leading_int(text))
    }
}
