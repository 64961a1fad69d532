//! Cyrillic → ASCII encoding.
//!
//! Each UTF-16 code unit is looked up in the plain table, then in the mixed
//! table. Anything else is handed to the [`ValidationPolicy`], which rejects,
//! drops, or appends it in raw form:
//!
//! - ASCII Latin letters get a case marker: `X` before an upper-case letter,
//!   `x` before a lower-case one (`A` → `XA`);
//! - everything else is written byte-wise, high byte first when non-zero.
//!
//! The raw form is one-way: the decoder has no rule that turns `XA` back into
//! `A`.
//!
//! ```
//! use cyrtrans::{Encoded, Language, Session};
//!
//! let session = Session::new(Language::Russian);
//! let word: Vec<u16> = "Жук".encode_utf16().collect();
//! let encoded = Encoded::new(&session, &word).unwrap();
//! assert_eq!(encoded.as_slice(), b"JZyk");
//! ```

use alloc::vec::Vec;
use core::ops::Deref;

use crate::error::Error;
use crate::language::Language;
use crate::session::Session;
use crate::table;
use crate::validate::{ClassAction, PolicyMode, ValidationPolicy};

/// Encode `input` into `out`.
///
/// On success `out` is replaced by the encoded bytes. If `out` had no spare
/// capacity on entry (`len == capacity`, which includes a fresh `Vec`), the
/// result is shrunk to fit; otherwise its spare capacity is kept for reuse.
///
/// On failure `out` is left untouched.
pub fn encode_raw(
    language: Language,
    policy: &ValidationPolicy,
    out: &mut Vec<u8>,
    input: &[u16],
) -> Result<(), Error> {
    if !language.is_set() {
        return Err(Error::LanguageUnset);
    }
    let ukrainian = language.is_ukrainian();
    let mode = policy.mode();

    let mut tmp = Vec::with_capacity(input.len());
    for (offset, &word) in input.iter().enumerate() {
        if let Some(spelling) = table::plain(word) {
            tmp.extend_from_slice(spelling.as_bytes());
            continue;
        }
        if let Some(spelling) = table::mixed(word, ukrainian) {
            tmp.extend_from_slice(spelling.as_bytes());
            continue;
        }

        let action = match mode {
            PolicyMode::Reject => ClassAction::Reject,
            PolicyMode::IgnoreAll => ClassAction::Ignore,
            PolicyMode::AppendAll => ClassAction::Append,
            PolicyMode::Flags => policy.word_action(word),
        };
        match action {
            ClassAction::Reject => {
                tracing::trace!(offset, word, "encode rejected code unit");
                return Err(Error::InvalidWord { offset, word });
            }
            ClassAction::Ignore => {}
            ClassAction::Append => append_raw(&mut tmp, word),
        }
    }

    if out.len() == out.capacity() {
        tmp.shrink_to_fit();
    }
    *out = tmp;
    Ok(())
}

/// Raw form of a code unit outside the letter tables.
#[inline]
fn append_raw(out: &mut Vec<u8>, word: u16) {
    let [high, low] = word.to_be_bytes();
    if high == 0 && low.is_ascii_alphabetic() {
        out.push(if low.is_ascii_uppercase() { b'X' } else { b'x' });
        out.push(low);
        return;
    }
    if high != 0 {
        out.push(high);
    }
    out.push(low);
}

/// Owned result of encoding.
///
/// Usually ASCII; bytes 0x80-0xFF appear only when the validation policy
/// appends extended or wide code units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Encoded {
    data: Vec<u8>,
}

impl Encoded {
    /// Encode `input` under `session`'s language and policy.
    pub fn new(session: &Session, input: &[u16]) -> Result<Self, Error> {
        let mut data = Vec::new();
        encode_raw(session.language(), session.policy(), &mut data, input)?;
        Ok(Self { data })
    }

    /// Read-only view of the bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The bytes as `&str`, if they are all ASCII.
    pub fn to_str(&self) -> Option<&str> {
        if self.data.is_ascii() {
            core::str::from_utf8(&self.data).ok()
        } else {
            None
        }
    }

    /// Pointer to the first byte, for interop.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    /// Mutable pointer to the first byte, for interop.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.data.as_mut_ptr()
    }

    /// Mutable access to the owned storage.
    #[inline]
    pub fn data_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Move the storage out, leaving this buffer empty.
    #[inline]
    pub fn take(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.data)
    }

    /// Consume the buffer and return its storage.
    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Number of bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if there are no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Deref for Encoded {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Encoded> for Vec<u8> {
    fn from(encoded: Encoded) -> Self {
        encoded.data
    }
}
