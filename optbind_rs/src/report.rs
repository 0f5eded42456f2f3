//! Help text and error reporting.
//!
//! Everything the user sees goes to stderr. The default error handler prints
//! a one-line diagnosis followed by the full help; hosts can replace it with
//! their own [`ErrorHandler`] on the [`App`](crate::App).

use std::io::{self, Write};

use strsim::levenshtein;

use crate::error::Error;
use crate::registry::OptSpec;

/// Host-installed replacement for [`default_error_handler`].
pub type ErrorHandler<'a> = Box<dyn FnMut(&Usage<'_>, &Error) + 'a>;

/// Maximum edit distance for a "did you mean" hint.
const SUGGESTION_DISTANCE: usize = 2;

/// Read-only view of an application handed to callbacks and error handlers.
#[derive(Debug, Clone, Copy)]
pub struct Usage<'u> {
    pub program_name: &'u str,
    pub description: Option<&'u str>,
    pub options: &'u [OptSpec],
}

impl Usage<'_> {
    /// Write the banner and one line per option, in registration order.
    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        if let Some(description) = self.description {
            writeln!(out, "{}: {}", self.program_name, description)?;
        }
        writeln!(out, "Usage: {} <options>", self.program_name)?;
        writeln!(out, "Options:")?;
        for spec in self.options {
            writeln!(out, "{}", option_line(spec))?;
        }
        Ok(())
    }

    pub fn help_text(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Closest registered long name for an unknown token, if one is near enough.
    pub fn suggest(&self, token: &str) -> Option<&str> {
        let name = match token.strip_prefix("--") {
            Some(long) => long,
            None if token.starts_with('-') => return None,
            None => token,
        };
        if name.is_empty() {
            return None;
        }
        let mut best: Option<(&str, usize)> = None;
        for long in self.options.iter().filter_map(|spec| spec.long.as_deref()) {
            let distance = levenshtein(name, long);
            if distance > SUGGESTION_DISTANCE {
                continue;
            }
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((long, distance));
            }
        }
        best.map(|(long, _)| long)
    }
}

/// `-x --name\tdescription`; a missing short form is padded with blanks.
fn option_line(spec: &OptSpec) -> String {
    let short = spec
        .short
        .map(|c| format!("-{c}"))
        .unwrap_or_else(|| "  ".to_string());
    format!(
        "{} {}\t{}",
        short,
        spec.long_flag(),
        spec.description.as_deref().unwrap_or("")
    )
}

// ============================================================================
// Built-in handlers
// ============================================================================

/// Print the help to stderr. Bound to `-h/--help` by `App::add_help`.
pub fn auto_help(usage: &Usage<'_>, _token: &str) {
    let _ = usage.render(&mut io::stderr().lock());
}

/// Print the diagnosis for `err` and then the help to stderr.
pub fn default_error_handler(usage: &Usage<'_>, err: &Error) {
    let _ = write_error_report(usage, err, &mut io::stderr().lock());
}

/// Body of [`default_error_handler`], writer-agnostic.
pub fn write_error_report(usage: &Usage<'_>, err: &Error, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "ERROR: {err}")?;
    if let Error::UnknownOption(token) = err {
        if let Some(name) = usage.suggest(token) {
            let shown = if token.starts_with("--") {
                format!("--{name}")
            } else {
                name.to_string()
            };
            writeln!(out, "Did you mean '{shown}'?")?;
        }
        writeln!(out)?;
    }
    usage.render(out)
}

/// Route a parse failure to the installed handler, or the default one.
pub(crate) fn report(usage: &Usage<'_>, handler: Option<&mut ErrorHandler<'_>>, err: &Error) {
    tracing::debug!(error = %err, "reporting parse failure");
    match handler {
        Some(handler) => handler(usage, err),
        None => default_error_handler(usage, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OptKind;

    fn specs() -> Vec<OptSpec> {
        vec![
            OptSpec {
                short: Some('v'),
                long: Some("verbose".into()),
                description: Some("print more".into()),
                kind: OptKind::Flag,
            },
            OptSpec {
                short: None,
                long: Some("count".into()),
                description: None,
                kind: OptKind::Integer,
            },
            OptSpec {
                short: Some('q'),
                long: None,
                description: Some("quiet".into()),
                kind: OptKind::Flag,
            },
        ]
    }

    #[test]
    fn test_help_layout() {
        let options = specs();
        let usage = Usage {
            program_name: "demo",
            description: Some("does things"),
            options: &options,
        };
        assert_eq!(
            usage.help_text(),
            "demo: does things\n\
             Usage: demo <options>\n\
             Options:\n\
             -v --verbose\tprint more\n   \
             --count\t\n\
             -q \tquiet\n"
        );
    }

    #[test]
    fn test_help_without_description() {
        let usage = Usage {
            program_name: "demo",
            description: None,
            options: &[],
        };
        assert_eq!(usage.help_text(), "Usage: demo <options>\nOptions:\n");
    }

    #[test]
    fn test_suggest_close_long_name() {
        let options = specs();
        let usage = Usage {
            program_name: "demo",
            description: None,
            options: &options,
        };
        assert_eq!(usage.suggest("--verbos"), Some("verbose"));
        assert_eq!(usage.suggest("cont"), Some("count"));
        assert_eq!(usage.suggest("--zzzzzz"), None);
        assert_eq!(usage.suggest("-z"), None);
        assert_eq!(usage.suggest("--"), None);
    }

    #[test]
    fn test_error_report_unknown_option() {
        let options = specs();
        let usage = Usage {
            program_name: "demo",
            description: None,
            options: &options,
        };
        let mut out = Vec::new();
        write_error_report(&usage, &Error::UnknownOption("--verbos".into()), &mut out)
            .expect("write report");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("ERROR: Wrong or invalid option '--verbos'\n"));
        assert!(text.contains("Did you mean '--verbose'?\n\n"));
        assert!(text.contains("Usage: demo <options>"));
    }

    #[test]
    fn test_error_report_argument_required() {
        let options = specs();
        let usage = Usage {
            program_name: "demo",
            description: None,
            options: &options,
        };
        let mut out = Vec::new();
        write_error_report(&usage, &Error::ArgumentRequired("--count".into()), &mut out)
            .expect("write report");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("ERROR: Option '--count' requires an argument\nUsage:"));
    }

    #[test]
    fn test_report_prefers_installed_handler() {
        let options = specs();
        let usage = Usage {
            program_name: "demo",
            description: None,
            options: &options,
        };
        let mut seen = Vec::new();
        {
            let mut handler: ErrorHandler<'_> = Box::new(|_: &Usage<'_>, err: &Error| {
                seen.push(err.token().unwrap_or_default().to_string())
            });
            report(&usage, Some(&mut handler), &Error::UnknownOption("-z".into()));
        }
        assert_eq!(seen, vec!["-z".to_string()]);
    }
}
