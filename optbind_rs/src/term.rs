//! Thin terminal helpers: line reading and password prompting.

use std::io::{self, BufRead, Read, Write};

use crate::secret::{SecretString, wipe};

/// Read one line, without its `\n` / `\r\n` terminator.
/// Returns `Ok(None)` at end of stream. The buffer grows as needed.
pub fn read_line_from<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Result of [`read_line_bounded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bounded {
    Line(String),
    /// The line is longer than `max` bytes; only `max + 2` bytes were consumed.
    TooLong { max: usize },
}

/// Read one line, buffering at most `max` bytes plus a `\r\n` terminator.
/// With no limit this is [`read_line_from`].
pub fn read_line_bounded<R: BufRead + ?Sized>(
    reader: &mut R,
    max: Option<usize>,
) -> io::Result<Option<Bounded>> {
    let Some(max) = max else {
        return Ok(read_line_from(reader)?.map(Bounded::Line));
    };

    let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(2);
    let mut buf = Vec::new();
    if Read::take(&mut *reader, limit).read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    if buf.len() > max {
        return Ok(Some(Bounded::TooLong { max }));
    }
    let line =
        String::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(Some(Bounded::Line(line)))
}

/// Read one line from stdin.
pub fn read_line() -> io::Result<Option<String>> {
    read_line_from(&mut io::stdin().lock())
}

// ============================================================================
// Echo control
// ============================================================================

/// Turns terminal echo off for stdin while alive and restores the previous
/// mode on drop, whatever path the scope exits by.
///
/// When stdin is not a terminal the guard does nothing.
pub struct EchoGuard {
    #[cfg(unix)]
    saved: Option<libc::termios>,
}

impl EchoGuard {
    #[cfg(unix)]
    pub fn disable() -> io::Result<Self> {
        let fd = libc::STDIN_FILENO;
        // SAFETY: termios is plain data; tcgetattr fills it or fails.
        let mut tio: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut tio) } != 0 {
            // Not a tty (pipe, file): nothing to hide, nothing to restore.
            return Ok(Self { saved: None });
        }
        let saved = tio;
        tio.c_lflag &= !libc::ECHO;
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &tio) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self { saved: Some(saved) })
    }

    #[cfg(not(unix))]
    pub fn disable() -> io::Result<Self> {
        Ok(Self {})
    }

    /// Whether echo was actually turned off.
    #[cfg(unix)]
    pub fn is_active(&self) -> bool {
        self.saved.is_some()
    }

    #[cfg(not(unix))]
    pub fn is_active(&self) -> bool {
        false
    }

    #[cfg(unix)]
    fn restore(&mut self) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        // SAFETY: restoring attributes previously read from the same fd.
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &saved) } != 0 {
            tracing::warn!(
                "failed to restore terminal echo: {}",
                io::Error::last_os_error()
            );
        }
    }

    #[cfg(not(unix))]
    fn restore(&mut self) {}
}

impl Drop for EchoGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Prompt on stdout and read a secret from stdin with echo disabled.
pub fn ask_password(prompt: &str) -> io::Result<SecretString> {
    ask_password_from(prompt, &mut io::stdin().lock(), &mut io::stdout())
}

/// [`ask_password`] over explicit streams.
pub fn ask_password_from<R, W>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<SecretString>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(output, "{prompt} ")?;
    output.flush()?;
    let line = {
        let _echo = EchoGuard::disable()?;
        read_line_from(input)?
    };
    writeln!(output)?;
    let mut line = line.unwrap_or_default();
    let secret = SecretString::new(line.trim());
    wipe(&mut line);
    Ok(secret)
}
