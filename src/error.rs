//! This module implements `DateError`.

use std::borrow::Cow;
use std::fmt;

/// `DateError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// TypeError
    Type,
    /// RangeError
    Range,
    /// A malformed format or parse pattern.
    Pattern,
    /// Implementation error
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Type => "TypeError",
            Self::Range => "RangeError",
            Self::Pattern => "InvalidPatternError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for the crate's hard failures.
///
/// Data problems never surface here: they produce an invalid
/// [`Instant`](crate::Instant) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl DateError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a type error.
    #[inline]
    #[must_use]
    pub const fn r#type() -> Self {
        Self::new(ErrorKind::Type)
    }

    /// Create an invalid pattern error.
    #[inline]
    #[must_use]
    pub const fn pattern() -> Self {
        Self::new(ErrorKind::Pattern)
    }

    /// Create an assertion error.
    #[inline]
    #[must_use]
    pub(crate) fn assert() -> Self {
        Self::new(ErrorKind::Assert).with_message("Implementation error: assertion failed.")
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl std::error::Error for DateError {}
