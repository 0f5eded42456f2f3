//! Secret string values and in-place wiping of their sources.

use std::fmt;
use std::sync::atomic::{Ordering, compiler_fence};

/// An owned secret (password, token) captured from argv, a config file or a prompt.
///
/// The bytes are zeroed when the value is dropped and `Debug` never prints them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the secret text.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(***)")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        wipe(&mut self.0);
    }
}

/// Overwrite every byte of `text` with NUL, keeping its length.
///
/// The string stays allocated at the same address, so whatever aliased the
/// original buffer (a process listing, a core dump) now sees zeros.
pub fn wipe(text: &mut String) {
    // SAFETY: an all-NUL byte sequence is valid UTF-8.
    unsafe { text.as_bytes_mut() }.fill(0);
    compiler_fence(Ordering::SeqCst);
}
