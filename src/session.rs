//! Per-context transliteration state and calling conventions.
//!
//! A [`Session`] holds the active [`Language`], the active
//! [`ValidationPolicy`] and the last error recorded by the session-capturing
//! calls. It is an ordinary owned value: create one per thread, task, or
//! request, and pass it where transliteration happens. Nothing is stored in
//! globals, so state never leaks between contexts. A session that is reused
//! across requests keeps its settings; call [`Session::reset`] (or set the
//! language and policy explicitly) at the start of each request.
//!
//! Every direction offers four calling conventions over one engine:
//!
//! | Convention        | Encode                                     | Failure surfaces as              |
//! |-------------------|--------------------------------------------|----------------------------------|
//! | return-code       | [`encode_into`](Session::encode_into)      | returned [`ErrorKind`]           |
//! | output-pair       | [`encode_with`](Session::encode_with)      | `&mut ErrorKind` out-parameter   |
//! | session-capturing | [`encode`](Session::encode)                | [`last_error`](Session::last_error) |
//! | constructing      | [`Encoded::new`]                           | `Err(Error)`                     |
//!
//! ```
//! use cyrtrans::{ErrorKind, Language, Session};
//!
//! let mut session = Session::new(Language::Ukrainian);
//! let word: Vec<u16> = "Ґанок".encode_utf16().collect();
//!
//! let encoded = session.encode(&word);
//! assert_eq!(session.last_error(), ErrorKind::None);
//! assert_eq!(encoded.as_slice(), b"JQanok");
//!
//! let decoded = session.decode(b"JQanok");
//! assert_eq!(decoded.as_slice(), &word[..]);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::convert;
use crate::decode::{decode_raw, Decoded};
use crate::encode::{encode_raw, Encoded};
use crate::error::{Error, ErrorKind};
use crate::language::Language;
use crate::validate::{CharacterClass, ClassFlag, ValidationPolicy};

/// Transliteration state for one execution context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    language: Language,
    policy: ValidationPolicy,
    last_error: ErrorKind,
}

impl Session {
    /// Session with `language` selected and the default (rejecting) policy.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Active language.
    #[inline]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Select the active language.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Active validation policy.
    #[inline]
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Install a whole policy.
    ///
    /// Records [`ErrorKind::ValidatePolicyMisconfigured`] as the last error if
    /// some class has both flags set, and [`ErrorKind::None`] otherwise. The
    /// policy is installed either way.
    pub fn set_policy(&mut self, policy: ValidationPolicy) -> ErrorKind {
        self.last_error = if policy.is_consistent() {
            ErrorKind::None
        } else {
            ErrorKind::ValidatePolicyMisconfigured
        };
        self.policy = policy;
        self.last_error
    }

    /// Install a raw 64-bit policy word. See [`set_policy`](Self::set_policy).
    pub fn set_policy_bits(&mut self, bits: u64) -> ErrorKind {
        self.set_policy(ValidationPolicy::from_bits(bits))
    }

    /// Set one class's flag in the active policy.
    pub fn set_class(&mut self, class: CharacterClass, flag: ClassFlag) {
        self.policy.set(class, flag);
    }

    /// Outcome of the last session-capturing call or policy install.
    #[inline]
    pub fn last_error(&self) -> ErrorKind {
        self.last_error
    }

    /// Reset the last error to [`ErrorKind::None`].
    pub fn clear_error(&mut self) {
        self.last_error = ErrorKind::None;
    }

    /// Back to the initial state: language unset, rejecting policy, no error.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // =========================================================================
    // Return-code convention
    // =========================================================================

    /// Encode into a caller-owned buffer.
    ///
    /// `out` is replaced on success and untouched on failure. If it had spare
    /// capacity on entry, the result keeps spare capacity too.
    pub fn encode_into(&self, out: &mut Vec<u8>, input: &[u16]) -> ErrorKind {
        encode_raw(self.language, &self.policy, out, input).into()
    }

    /// Decode into a caller-owned buffer. See [`encode_into`](Self::encode_into).
    pub fn decode_into(&self, out: &mut Vec<u16>, input: &[u8]) -> ErrorKind {
        decode_raw(self.language, out, input).into()
    }

    // =========================================================================
    // Output-pair convention
    // =========================================================================

    /// Encode, writing the outcome to `code`. Returns an empty buffer on failure.
    pub fn encode_with(&self, input: &[u16], code: &mut ErrorKind) -> Encoded {
        let result = Encoded::new(self, input);
        Self::split(result, code)
    }

    /// Decode, writing the outcome to `code`. Returns an empty buffer on failure.
    pub fn decode_with(&self, input: &[u8], code: &mut ErrorKind) -> Decoded {
        let result = Decoded::new(self, input);
        Self::split(result, code)
    }

    // =========================================================================
    // Session-capturing convention
    // =========================================================================

    /// Encode, recording the outcome in [`last_error`](Self::last_error).
    /// Returns an empty buffer on failure.
    pub fn encode(&mut self, input: &[u16]) -> Encoded {
        let result = Encoded::new(self, input);
        Self::split(result, &mut self.last_error)
    }

    /// Decode, recording the outcome in [`last_error`](Self::last_error).
    /// Returns an empty buffer on failure.
    pub fn decode(&mut self, input: &[u8]) -> Decoded {
        let result = Decoded::new(self, input);
        Self::split(result, &mut self.last_error)
    }

    // =========================================================================
    // UTF-8 helpers
    // =========================================================================

    /// Encode a UTF-8 string.
    pub fn encode_str(&self, input: &str) -> Result<Encoded, Error> {
        let wide: Vec<u16> = input.encode_utf16().collect();
        Encoded::new(self, &wide)
    }

    /// Decode ASCII bytes into a UTF-8 string.
    pub fn decode_str(&self, input: &[u8]) -> Result<String, Error> {
        let decoded = Decoded::new(self, input)?;
        convert::to_bytes(decoded.as_slice())
    }

    fn split<T: Default>(result: Result<T, Error>, code: &mut ErrorKind) -> T {
        match result {
            Ok(value) => {
                *code = ErrorKind::None;
                value
            }
            Err(err) => {
                *code = err.kind();
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_default_session() {
        let session = Session::default();
        assert_eq!(session.language(), Language::Unset);
        assert_eq!(session.policy(), &ValidationPolicy::NONE);
        assert_eq!(session.last_error(), ErrorKind::None);
    }

    #[test]
    fn test_return_code() {
        let session = Session::new(Language::Russian);
        let mut out = Vec::new();
        assert_eq!(session.encode_into(&mut out, &words("Ёж")), ErrorKind::None);
        assert_eq!(out, b"JIjz");

        let mut wide = Vec::new();
        assert_eq!(session.decode_into(&mut wide, &out), ErrorKind::None);
        assert_eq!(wide, words("Ёж"));

        assert_eq!(session.decode_into(&mut wide, b"jk"), ErrorKind::InvalidByte);
        assert_eq!(wide, words("Ёж"));
    }

    #[test]
    fn test_output_pair() {
        let session = Session::new(Language::Ukrainian);
        let mut code = ErrorKind::LanguageUnset;
        let encoded = session.encode_with(&words("Є"), &mut code);
        assert_eq!(code, ErrorKind::None);
        assert_eq!(encoded.as_slice(), b"JE");

        let encoded = session.encode_with(&words("Є?"), &mut code);
        assert_eq!(code, ErrorKind::InvalidWord);
        assert!(encoded.is_empty());

        let decoded = session.decode_with(b"JE", &mut code);
        assert_eq!(code, ErrorKind::None);
        assert_eq!(decoded.as_slice(), &words("Є")[..]);
    }

    #[test]
    fn test_session_capturing() {
        let mut session = Session::default();
        let encoded = session.encode(&words("Ж"));
        assert!(encoded.is_empty());
        assert_eq!(session.last_error(), ErrorKind::LanguageUnset);

        session.set_language(Language::Russian);
        let encoded = session.encode(&words("Ж"));
        assert_eq!(encoded.as_slice(), b"JZ");
        assert_eq!(session.last_error(), ErrorKind::None);

        let decoded = session.decode(b"jx");
        assert!(decoded.is_empty());
        assert_eq!(session.last_error(), ErrorKind::InvalidByte);

        session.clear_error();
        assert_eq!(session.last_error(), ErrorKind::None);
    }

    #[test]
    fn test_set_policy_bits_records_misconfiguration() {
        let mut session = Session::new(Language::Russian);
        let both = CharacterClass::Space.bit() as u64;
        let code = session.set_policy_bits(both | (both << 32));
        assert_eq!(code, ErrorKind::ValidatePolicyMisconfigured);
        assert_eq!(session.last_error(), ErrorKind::ValidatePolicyMisconfigured);
        // Stored anyway.
        assert_eq!(session.policy().to_bits(), both | (both << 32));

        assert_eq!(
            session.set_policy_bits(ValidationPolicy::IGNORE_ALL_BITS),
            ErrorKind::None
        );
        assert_eq!(session.last_error(), ErrorKind::None);
    }

    #[test]
    fn test_set_class() {
        let mut session = Session::new(Language::Russian);
        session.set_class(CharacterClass::Space, ClassFlag::Append);
        assert_eq!(session.encode_str("да да").unwrap().as_slice(), b"da da");
        session.set_class(CharacterClass::Space, ClassFlag::Zeroed);
        assert_eq!(
            session.encode_str("да да"),
            Err(Error::InvalidWord {
                offset: 2,
                word: b' ' as u16
            })
        );
    }

    #[test]
    fn test_reset() {
        let mut session = Session::new(Language::Ukrainian);
        session.set_policy(ValidationPolicy::APPEND_ALL);
        session.encode(&words("?"));
        session.reset();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_str_helpers() {
        let session = Session::new(Language::Ukrainian);
        let encoded = session.encode_str("Київ").unwrap();
        assert_eq!(encoded.to_str(), Some("Kujiv"));
        assert_eq!(session.decode_str(b"Kujiv").unwrap(), "Київ");
    }
}
