//! ASCII → Cyrillic decoding.
//!
//! Decoding is a small state machine over the input bytes:
//!
//! | State         | Byte        | Next                 | Consumed | Emits             |
//! |---------------|-------------|----------------------|----------|-------------------|
//! | Default       | `j`         | LowerEscape          | yes      |                   |
//! | Default       | `J`         | UpperEscape          | yes      |                   |
//! | Default       | Latin       | Default              | yes      | one letter        |
//! | LowerEscape   | `x`         | LowerExtended        | yes      |                   |
//! | LowerEscape   | other       | Pusher(0)            | no       |                   |
//! | UpperEscape   | `X`         | UpperExtended        | yes      |                   |
//! | UpperEscape   | other       | Pusher(1)            | no       |                   |
//! | LowerExtended | any         | Pusher(2)            | no       |                   |
//! | UpperExtended | any         | Pusher(3)            | no       |                   |
//! | Pusher(t)     | discrim.    | Default              | yes      | one letter        |
//!
//! Transitions that do not consume re-feed the same byte to the next state, so
//! `j` + discriminator and `jx` + discriminator both end in exactly one letter.
//! Input may only end in `Default`.
//!
//! ```
//! use cyrtrans::{Decoded, Language, Session};
//!
//! let session = Session::new(Language::Russian);
//! let decoded = Decoded::new(&session, b"JZyk").unwrap();
//! assert_eq!(decoded.to_utf8().unwrap(), "Жук");
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Deref;

use crate::convert;
use crate::error::Error;
use crate::language::Language;
use crate::session::Session;
use crate::table;

/// Decoder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    LowerEscape,
    UpperEscape,
    LowerExtended,
    UpperExtended,
    /// Expecting the discriminator of escape table 0..4.
    Pusher(u8),
}

/// Result of feeding one byte to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Transition {
    next: State,
    consumed: bool,
    emit: Option<u16>,
}

impl Transition {
    #[inline]
    fn consume(next: State) -> Self {
        Self {
            next,
            consumed: true,
            emit: None,
        }
    }

    #[inline]
    fn refeed(next: State) -> Self {
        Self {
            next,
            consumed: false,
            emit: None,
        }
    }

    #[inline]
    fn emit(word: u16) -> Self {
        Self {
            next: State::Default,
            consumed: true,
            emit: Some(word),
        }
    }
}

impl State {
    /// Feed `byte` to this state. `None` means the byte is not accepted here.
    #[inline]
    fn step(self, byte: u8, ukrainian: bool) -> Option<Transition> {
        match self {
            State::Default => match byte {
                b'j' => Some(Transition::consume(State::LowerEscape)),
                b'J' => Some(Transition::consume(State::UpperEscape)),
                _ => table::default_letter(byte).map(Transition::emit),
            },
            State::LowerEscape => Some(match byte {
                b'x' => Transition::consume(State::LowerExtended),
                _ => Transition::refeed(State::Pusher(0)),
            }),
            State::UpperEscape => Some(match byte {
                b'X' => Transition::consume(State::UpperExtended),
                _ => Transition::refeed(State::Pusher(1)),
            }),
            State::LowerExtended => Some(Transition::refeed(State::Pusher(2))),
            State::UpperExtended => Some(Transition::refeed(State::Pusher(3))),
            State::Pusher(t) => {
                table::escape_letter(t as usize, byte, ukrainian).map(Transition::emit)
            }
        }
    }
}

/// Decode `input` into `out`.
///
/// Capacity handling and failure behaviour match
/// [`encode_raw`](crate::encode::encode_raw): `out` is replaced on success,
/// shrunk to fit when it had no spare capacity on entry, and left untouched on
/// failure.
pub fn decode_raw(language: Language, out: &mut Vec<u16>, input: &[u8]) -> Result<(), Error> {
    if !language.is_set() {
        return Err(Error::LanguageUnset);
    }
    let ukrainian = language.is_ukrainian();

    let mut tmp = Vec::with_capacity(input.len());
    let mut state = State::Default;
    let mut pos = 0;
    while pos < input.len() {
        let byte = input[pos];
        let Some(transition) = state.step(byte, ukrainian) else {
            tracing::trace!(offset = pos, byte, "decode rejected byte");
            return Err(Error::InvalidByte {
                offset: pos,
                byte: Some(byte),
            });
        };
        if let Some(word) = transition.emit {
            tmp.push(word);
        }
        state = transition.next;
        if transition.consumed {
            pos += 1;
        }
    }

    if state != State::Default {
        tracing::trace!(offset = input.len(), "decode input ends inside an escape");
        return Err(Error::InvalidByte {
            offset: input.len(),
            byte: None,
        });
    }

    if out.len() == out.capacity() {
        tmp.shrink_to_fit();
    }
    *out = tmp;
    Ok(())
}

/// Owned result of decoding, as UTF-16 code units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Decoded {
    data: Vec<u16>,
}

impl Decoded {
    /// Decode `input` under `session`'s language.
    pub fn new(session: &Session, input: &[u8]) -> Result<Self, Error> {
        let mut data = Vec::new();
        decode_raw(session.language(), &mut data, input)?;
        Ok(Self { data })
    }

    /// Read-only view of the code units.
    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    /// Convert to a UTF-8 `String`.
    pub fn to_utf8(&self) -> Result<String, Error> {
        convert::to_bytes(&self.data)
    }

    /// Pointer to the first code unit, for interop.
    #[inline]
    pub fn as_ptr(&self) -> *const u16 {
        self.data.as_ptr()
    }

    /// Mutable pointer to the first code unit, for interop.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u16 {
        self.data.as_mut_ptr()
    }

    /// Mutable access to the owned storage.
    #[inline]
    pub fn data_mut(&mut self) -> &mut Vec<u16> {
        &mut self.data
    }

    /// Move the storage out, leaving this buffer empty.
    #[inline]
    pub fn take(&mut self) -> Vec<u16> {
        core::mem::take(&mut self.data)
    }

    /// Consume the buffer and return its storage.
    #[inline]
    pub fn into_inner(self) -> Vec<u16> {
        self.data
    }

    /// Number of code units.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if there are no code units.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Deref for Decoded {
    type Target = [u16];

    fn deref(&self) -> &[u16] {
        &self.data
    }
}

impl AsRef<[u16]> for Decoded {
    fn as_ref(&self) -> &[u16] {
        &self.data
    }
}

impl From<Decoded> for Vec<u16> {
    fn from(decoded: Decoded) -> Self {
        decoded.data
    }
}
