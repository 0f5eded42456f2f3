//! Error type shared by registration and both parsing engines.

use std::io;

use thiserror::Error;

/// Everything that can go wrong while registering options or parsing input.
///
/// Parse failures (`UnknownOption`, `ArgumentRequired`, `BadValue`,
/// `LineTooLong`) are routed through the reporter before they are returned,
/// so by the time the host sees one the user has already been told.
#[derive(Error, Debug)]
pub enum Error {
    /// The argv token or config key matches no registered option.
    #[error("Wrong or invalid option '{0}'")]
    UnknownOption(String),

    /// An integer/string/secret option was given without its value.
    #[error("Option '{0}' requires an argument")]
    ArgumentRequired(String),

    /// A value could not be coerced to the option's type.
    #[error("Bad value '{value}' for option '{key}'")]
    BadValue { key: String, value: String },

    /// A config line exceeded the configured maximum length.
    #[error("Line {line} exceeds the maximum length of {max} bytes")]
    LineTooLong { line: usize, max: usize },

    /// A descriptor was registered without any usable name.
    #[error("Option has neither a short nor a long name")]
    Unnamed,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid settings: {0}")]
    Settings(#[from] toml::de::Error),
}

impl Error {
    /// The token or key the failure is about, if it has one.
    pub fn token(&self) -> Option<&str> {
        match self {
            Error::UnknownOption(token) | Error::ArgumentRequired(token) => Some(token),
            Error::BadValue { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether this error comes from user input (and so goes through the reporter).
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Error::UnknownOption(_)
                | Error::ArgumentRequired(_)
                | Error::BadValue { .. }
                | Error::LineTooLong { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Report an unrecoverable condition and end the process.
///
/// Used only where the library cannot continue at all (the registry failing
/// to grow). Everything else is returned as an [`Error`].
pub(crate) fn fatal(msg: &str) -> ! {
    eprintln!("Assertion failed: {msg}");
    std::process::exit(255)
}
