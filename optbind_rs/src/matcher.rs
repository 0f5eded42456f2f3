//! Lookup of the descriptor an argv token or config key refers to.
//!
//! Both lookups scan the option table in registration order and return the
//! index of the first match, so duplicate names resolve to the earliest entry.

use crate::registry::OptSpec;

/// How an argv token names an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenForm<'t> {
    /// `-x`: everything after the single dash.
    Short(&'t str),
    /// `--name`: everything after the two dashes.
    Long(&'t str),
}

/// Classify a dash-led token. The token is long when its second character is
/// also a dash, short otherwise.
pub fn classify(token: &str) -> TokenForm<'_> {
    let rest = token.strip_prefix('-').unwrap_or(token);
    match rest.strip_prefix('-') {
        Some(long) => TokenForm::Long(long),
        None => TokenForm::Short(rest),
    }
}

/// Find the option named by an argv token (`-x` or `--name`).
///
/// A short token must be exactly one character after the dash: `-xVALUE`
/// does not match `-x`. A long token must equal the long name exactly.
pub fn match_argv_token(token: &str, specs: &[OptSpec]) -> Option<usize> {
    match classify(token) {
        TokenForm::Short(rest) => {
            let mut chars = rest.chars();
            let (Some(name), None) = (chars.next(), chars.next()) else {
                return None;
            };
            specs.iter().position(|spec| spec.short == Some(name))
        }
        TokenForm::Long(name) => specs
            .iter()
            .position(|spec| spec.long.as_deref() == Some(name)),
    }
}

/// Find the option whose long name equals a config-file key.
pub fn match_config_key(key: &str, specs: &[OptSpec]) -> Option<usize> {
    specs
        .iter()
        .position(|spec| spec.long.as_deref() == Some(key))
}
