//! UTF-8 ↔ UTF-16 conversion at the API boundary.
//!
//! The engines work on UTF-16 code units (encode input, decode output). These
//! helpers prepare and unpack those buffers; failures surface as
//! [`Error::ConvertFailed`] with the offset of the first bad unit.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::Error;

/// Convert UTF-16 code units to a UTF-8 `String`.
///
/// Fails on an unpaired surrogate; `offset` is its index in `wide`.
pub fn to_bytes(wide: &[u16]) -> Result<String, Error> {
    let mut out = String::with_capacity(wide.len() * 2);
    let mut offset = 0;
    for unit in char::decode_utf16(wide.iter().copied()) {
        match unit {
            Ok(ch) => {
                out.push(ch);
                offset += ch.len_utf16();
            }
            Err(_) => return Err(Error::ConvertFailed { offset }),
        }
    }
    Ok(out)
}

/// Convert UTF-8 bytes to UTF-16 code units.
///
/// Fails on invalid UTF-8; `offset` is the byte index where validity ends.
pub fn to_wide(bytes: &[u8]) -> Result<Vec<u16>, Error> {
    let text = core::str::from_utf8(bytes).map_err(|e| Error::ConvertFailed {
        offset: e.valid_up_to(),
    })?;
    Ok(text.encode_utf16().collect())
}
