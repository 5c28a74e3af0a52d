use std::io::{self, BufRead, Write};

use crate::domain::customer::{CustomerError, ValidationError};
use crate::files::FileError;

/// Failures while driving the menu. `Eof` ends the session cleanly; domain
/// and file errors are shown to the operator and the loop continues.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("input closed")]
    Eof,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShellError {
    /// Errors that end the session instead of being reported.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Eof | ShellError::Io(_))
    }
}

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> Result<(), ShellError> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Trimmed line; `Eof` when the reader is exhausted.
    pub fn text(&mut self, message: &str) -> Result<String, ShellError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::Eof);
        }
        Ok(line.trim().to_string())
    }

    /// `None` for a blank answer.
    pub fn optional(&mut self, message: &str) -> Result<Option<String>, ShellError> {
        let value = self.text(message)?;
        Ok((!value.is_empty()).then_some(value))
    }

    /// Re-asks until the answer parses as a whole number.
    pub fn number(&mut self, message: &str) -> Result<u64, ShellError> {
        loop {
            match self.text(message)?.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("You must enter a whole number.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_retries_until_valid() {
        let mut prompter = Prompter::new("abc\n-1\n42\n".as_bytes(), Vec::new());
        assert_eq!(prompter.number("ID: ").unwrap(), 42);

        let out = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(out.matches("You must enter a whole number.").count(), 2);
    }

    #[test]
    fn test_optional_blank_is_none() {
        let mut prompter = Prompter::new("   \nvalue \n".as_bytes(), Vec::new());
        assert_eq!(prompter.optional("x: ").unwrap(), None);
        assert_eq!(prompter.optional("x: ").unwrap(), Some("value".to_string()));
    }

    #[test]
    fn test_eof_is_reported() {
        let mut prompter = Prompter::new("".as_bytes(), Vec::new());
        let err = prompter.text("x: ").unwrap_err();
        assert!(matches!(err, ShellError::Eof));
        assert!(err.is_fatal());
    }
}
