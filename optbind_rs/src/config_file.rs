//! Config-file engine: `key = value` lines matched against long names.
//!
//! ```text
//! # comment
//! ; also a comment
//! name = Alice
//! count=3
//! verbose
//! debug = off
//! ```
//!
//! A bare key sets a flag. No inline comments, quoting, escapes or
//! continuation lines. Keys and values are trimmed;
//! the value is everything after the first `=`.

use std::io::BufRead;

use crate::error::{Error, Result};
use crate::matcher::match_config_key;
use crate::session::Session;
use crate::settings::ParserSettings;
use crate::term::{Bounded, read_line_bounded};

/// What a single line holds once comments and blanks are filtered out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'l> {
    Skip,
    Entry { key: &'l str, value: Option<&'l str> },
}

/// Classify one line (without its terminator).
///
/// An empty value (`key =`) counts as no value.
pub fn split_line<'l>(line: &'l str, settings: &ParserSettings) -> Line<'l> {
    let probe = if settings.trim_before_comment {
        line.trim_start()
    } else {
        line
    };
    if line.trim().is_empty() || probe.starts_with(['#', ';']) {
        return Line::Skip;
    }

    match line.split_once('=') {
        Some((key, value)) => {
            let value = value.trim();
            Line::Entry {
                key: key.trim(),
                value: (!value.is_empty()).then_some(value),
            }
        }
        None => Line::Entry {
            key: line.trim(),
            value: None,
        },
    }
}

pub(crate) fn parse<R: BufRead + ?Sized>(session: &mut Session<'_, '_>, reader: &mut R) -> Result<()> {
    let max_line_len = session.settings.max_line_len;
    let mut line_no = 0;

    while let Some(read) = read_line_bounded(reader, max_line_len)? {
        line_no += 1;
        let line = match read {
            Bounded::Line(line) => line,
            Bounded::TooLong { max } => {
                return Err(session.fail(Error::LineTooLong { line: line_no, max }));
            }
        };

        let (key, value) = match split_line(&line, session.settings) {
            Line::Skip => {
                tracing::trace!(line = line_no, "skipping comment or blank line");
                continue;
            }
            Line::Entry { key, value } => (key, value),
        };

        let Some(idx) = match_config_key(key, session.usage.options) else {
            return Err(session.fail(Error::UnknownOption(key.to_string())));
        };
        tracing::debug!(line = line_no, key, kind = ?session.kind(idx), "matched config key");

        if let Err(err) = session.apply(idx, key, value.map(str::to_string)) {
            return Err(session.fail(err));
        }
    }
    Ok(())
}
