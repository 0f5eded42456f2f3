//! State shared by the argv and config-file engines for one parse call:
//! the usage view, the bindings to write, the error route and the settings.

use crate::coerce::{parse_bool, parse_int};
use crate::error::{Error, Result};
use crate::registry::{Binding, OptKind};
use crate::report::{ErrorHandler, Usage, report};
use crate::secret::SecretString;
use crate::settings::ParserSettings;

pub(crate) struct Session<'s, 'a> {
    pub usage: Usage<'s>,
    pub bindings: &'s mut [Binding<'a>],
    pub on_error: &'s mut Option<ErrorHandler<'a>>,
    pub settings: &'s ParserSettings,
}

impl Session<'_, '_> {
    pub fn kind(&self, idx: usize) -> OptKind {
        self.usage.options[idx].kind
    }

    /// Report a parse failure through the installed handler and hand it back
    /// for the caller to return.
    pub fn fail(&mut self, err: Error) -> Error {
        report(&self.usage, self.on_error.as_mut(), &err);
        err
    }

    /// Write `value` into the binding at `idx`, or invoke its callback.
    ///
    /// `token` is what the user typed (argv token or config key) and is used
    /// for callbacks and diagnostics. A flag with no value is set; a flag with
    /// a value must use the boolean vocabulary. Errors are not reported here.
    pub fn apply(&mut self, idx: usize, token: &str, value: Option<String>) -> Result<()> {
        let strict = self.settings.strict_integers;
        let required = || Error::ArgumentRequired(token.to_string());
        let bad_value = |value: &str| Error::BadValue {
            key: token.to_string(),
            value: value.to_string(),
        };

        match &mut self.bindings[idx] {
            Binding::Flag(cell) => {
                **cell = match value {
                    None => true,
                    Some(raw) => parse_bool(&raw).ok_or_else(|| bad_value(&raw))?,
                };
            }
            Binding::Integer(cell) => {
                let raw = value.ok_or_else(required)?;
                **cell = parse_int(&raw, strict).ok_or_else(|| bad_value(&raw))?;
            }
            Binding::Text(cell) => {
                **cell = Some(value.ok_or_else(required)?);
            }
            Binding::Secret(cell) => {
                **cell = Some(SecretString::from(value.ok_or_else(required)?));
            }
            Binding::Callback(callback) => callback(&self.usage, token),
        }
        Ok(())
    }
}
