//! Error types for transliteration.
//!
//! Two shapes are provided:
//!
//! - [`ErrorKind`] is a plain status code. It includes [`ErrorKind::None`] so it
//!   can be returned from the return-code calling convention and stored as a
//!   session's last error.
//! - [`Error`] is the failure value carried by `Result`. It never represents
//!   success, and carries the location of the failure where one exists.

use core::fmt;

/// Outcome code of a transliteration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorKind {
    /// Not an error.
    #[default]
    None,
    /// No [`Language`](crate::Language) was selected before the call.
    LanguageUnset,
    /// Encode: a code unit is not supported under the active validation policy.
    InvalidWord,
    /// Decode: malformed escape, unknown discriminator, or truncated stream.
    InvalidByte,
    /// UTF-8/UTF-16 conversion failed.
    ConvertFailed,
    /// A raw policy word had both the Ignore and the Append bit set for some class.
    ValidatePolicyMisconfigured,
}

impl ErrorKind {
    /// Number of distinct codes.
    pub const COUNT: usize = 6;

    const MESSAGES: [&'static str; Self::COUNT] = [
        "not an error",
        "language not set",
        "invalid word",
        "invalid byte",
        "conversion failed",
        "validation policy misconfigured",
    ];

    /// Static human-readable message for this code.
    #[inline]
    pub fn message(self) -> &'static str {
        Self::MESSAGES[self as usize]
    }

    /// `true` for [`ErrorKind::None`].
    #[inline]
    pub fn is_ok(self) -> bool {
        self == Self::None
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A failed transliteration, conversion or policy installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No language was selected.
    LanguageUnset,
    /// The code unit at `offset` is outside both letter tables and the
    /// validation policy rejects it.
    InvalidWord {
        /// Index of the rejected code unit in the input.
        offset: usize,
        /// The rejected code unit.
        word: u16,
    },
    /// The byte at `offset` cannot be decoded.
    ///
    /// `byte` is `None` when the input ended inside an escape sequence; in that
    /// case `offset` equals the input length.
    InvalidByte {
        /// Index of the offending byte (or the input length on truncation).
        offset: usize,
        /// The offending byte, if any.
        byte: Option<u8>,
    },
    /// The input was not valid UTF-8 (or UTF-16) starting at `offset`.
    ConvertFailed {
        /// Index of the first invalid unit.
        offset: usize,
    },
    /// Classes (as a bitmask over class indices) with both flags set.
    ValidatePolicyMisconfigured {
        /// Bit `i` set means class `i` is misconfigured.
        classes: u32,
    },
}

impl Error {
    /// The status code for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LanguageUnset => ErrorKind::LanguageUnset,
            Self::InvalidWord { .. } => ErrorKind::InvalidWord,
            Self::InvalidByte { .. } => ErrorKind::InvalidByte,
            Self::ConvertFailed { .. } => ErrorKind::ConvertFailed,
            Self::ValidatePolicyMisconfigured { .. } => ErrorKind::ValidatePolicyMisconfigured,
        }
    }

    /// Position in the input the error refers to, when there is one.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            Self::InvalidWord { offset, .. }
            | Self::InvalidByte { offset, .. }
            | Self::ConvertFailed { offset } => Some(offset),
            Self::LanguageUnset | Self::ValidatePolicyMisconfigured { .. } => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LanguageUnset => f.write_str(ErrorKind::LanguageUnset.message()),
            Self::InvalidWord { offset, word } => {
                write!(f, "invalid word U+{:04X} at offset {}", word, offset)
            }
            Self::InvalidByte {
                offset,
                byte: Some(byte),
            } => write!(f, "invalid byte 0x{:02X} at offset {}", byte, offset),
            Self::InvalidByte { offset, byte: None } => {
                write!(f, "invalid byte: truncated escape at offset {}", offset)
            }
            Self::ConvertFailed { offset } => {
                write!(f, "conversion failed at offset {}", offset)
            }
            Self::ValidatePolicyMisconfigured { classes } => {
                write!(
                    f,
                    "validation policy misconfigured (classes {:#010x})",
                    classes
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<Error> for ErrorKind {
    fn from(err: Error) -> Self {
        err.kind()
    }
}

impl<T> From<Result<T, Error>> for ErrorKind {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(_) => ErrorKind::None,
            Err(err) => err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_cover_every_kind() {
        let kinds = [
            ErrorKind::None,
            ErrorKind::LanguageUnset,
            ErrorKind::InvalidWord,
            ErrorKind::InvalidByte,
            ErrorKind::ConvertFailed,
            ErrorKind::ValidatePolicyMisconfigured,
        ];
        assert_eq!(kinds.len(), ErrorKind::COUNT);
        assert_eq!(ErrorKind::None.message(), "not an error");
        assert_eq!(ErrorKind::LanguageUnset.message(), "language not set");
        assert_eq!(ErrorKind::InvalidWord.to_string(), "invalid word");
        for kind in kinds {
            assert!(!kind.message().is_empty());
        }
    }

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(Error::LanguageUnset.kind(), ErrorKind::LanguageUnset);
        let err = Error::InvalidWord {
            offset: 3,
            word: 0x41,
        };
        assert_eq!(ErrorKind::from(err), ErrorKind::InvalidWord);
        assert_eq!(err.offset(), Some(3));
        assert_eq!(
            Error::ValidatePolicyMisconfigured { classes: 1 }.offset(),
            None
        );
    }

    #[test]
    fn test_result_to_kind() {
        let ok: Result<(), Error> = Ok(());
        assert_eq!(ErrorKind::from(ok), ErrorKind::None);
        let err: Result<(), Error> = Err(Error::InvalidByte {
            offset: 1,
            byte: None,
        });
        assert_eq!(ErrorKind::from(err), ErrorKind::InvalidByte);
    }

    #[test]
    fn test_display() {
        let err = Error::InvalidWord {
            offset: 2,
            word: 0x263A,
        };
        assert_eq!(err.to_string(), "invalid word U+263A at offset 2");
        let err = Error::InvalidByte {
            offset: 0,
            byte: Some(b'k'),
        };
        assert_eq!(err.to_string(), "invalid byte 0x6B at offset 0");
        let err = Error::InvalidByte {
            offset: 1,
            byte: None,
        };
        assert_eq!(
            err.to_string(),
            "invalid byte: truncated escape at offset 1"
        );
    }
}
