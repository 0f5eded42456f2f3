//! Argument-vector engine.
//!
//! Single left-to-right pass starting after the program name. Tokens that do
//! not start with `-` are skipped; every dash-led token must name a
//! registered option. Integer, string and secret options take the next token
//! as their value, whatever it looks like. The first failure is reported and
//! ends the pass; bindings already written stay written.

use std::path::Path;

use crate::error::{Error, Result};
use crate::matcher::match_argv_token;
use crate::registry::OptKind;
use crate::secret::wipe;
use crate::session::Session;

/// Basename of `argv[0]`.
pub fn program_name(arg0: &str) -> String {
    Path::new(arg0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg0.to_string())
}

/// The process arguments as owned strings. Tokens that are not valid UTF-8
/// are converted lossily rather than aborting the program.
pub fn os_args() -> Vec<String> {
    std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

pub(crate) fn parse(session: &mut Session<'_, '_>, args: &mut [String]) -> Result<()> {
    let mut i = 1;
    while i < args.len() {
        if !args[i].starts_with('-') {
            tracing::trace!(index = i, "skipping non-option token");
            i += 1;
            continue;
        }

        let token = args[i].clone();
        let Some(idx) = match_argv_token(&token, session.usage.options) else {
            return Err(session.fail(Error::UnknownOption(token)));
        };
        let kind = session.kind(idx);
        tracing::debug!(token = %token, ?kind, "matched option");

        let value = if kind.takes_value() {
            if i + 1 >= args.len() {
                return Err(session.fail(Error::ArgumentRequired(token)));
            }
            i += 1;
            Some(capture(&mut args[i], kind))
        } else {
            None
        };

        if let Err(err) = session.apply(idx, &token, value) {
            return Err(session.fail(err));
        }
        i += 1;
    }
    Ok(())
}

/// Take the value token. Secrets are copied out and the source is zeroed.
fn capture(arg: &mut String, kind: OptKind) -> String {
    let value = arg.clone();
    if kind == OptKind::Secret {
        wipe(arg);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_is_basename() {
        assert_eq!(program_name("/usr/local/bin/tool"), "tool");
        assert_eq!(program_name("tool"), "tool");
        assert_eq!(program_name("./bin/tool"), "tool");
        assert_eq!(program_name(""), "");
    }

    #[test]
    fn test_capture_wipes_only_secrets() {
        let mut plain = String::from("alice");
        assert_eq!(capture(&mut plain, OptKind::String), "alice");
        assert_eq!(plain, "alice");

        let mut secret = String::from("secret123");
        assert_eq!(capture(&mut secret, OptKind::Secret), "secret123");
        assert!(secret.bytes().all(|b| b == 0));
    }
}
