//! # Cyrtrans
//!
//! Round-trip transliteration between Cyrillic (Russian or Ukrainian) and
//! 7-bit ASCII.
//!
//! Every Cyrillic letter of either alphabet maps to a short, case-marked ASCII
//! spelling, and decoding that spelling under the same dialect gives back the
//! original text exactly. Characters outside the letter tables are handled by
//! a per-session [`ValidationPolicy`].
//!
//! ## Module Organization
//!
//! - [`table`] - Static letter tables for both directions
//! - [`encode`] - Cyrillic → ASCII ([`Encoded`], [`encode_raw`])
//! - [`decode`] - ASCII → Cyrillic state machine ([`Decoded`], [`decode_raw`])
//! - [`validate`] - Character classes and the validation policy
//! - [`session`] - Per-context state and calling conventions
//! - [`config`] - Declarative session configuration
//! - [`convert`] - UTF-8 ↔ UTF-16 helpers
//!
//! ## Quick Start
//!
//! ```
//! use cyrtrans::{CharacterClass, ClassFlag, Language, Session};
//!
//! let mut session = Session::new(Language::Russian);
//! let encoded = session.encode_str("Съешь").unwrap();
//! assert_eq!(encoded.as_slice(), b"Sjqewq");
//! assert_eq!(session.decode_str(b"Sjqewq").unwrap(), "Съешь");
//!
//! // Spaces are rejected until the policy says otherwise.
//! assert!(session.encode_str("же ещё").is_err());
//! session.set_class(CharacterClass::Space, ClassFlag::Append);
//! assert_eq!(session.encode_str("же ещё").unwrap().as_slice(), b"jze ejwji");
//! ```
//!
//! ## Features
//!
//! - `std` (default) - `std::error::Error` impls
//! - `serde` - Serialization of languages, classes, policies and configs
//! - `cli` - The `cyrtrans` command-line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

// =============================================================================
// Core modules
// =============================================================================

/// Error codes and detailed errors.
pub mod error;

/// Dialect selection.
pub mod language;

/// Static letter tables.
pub mod table;

pub mod validate;

// =============================================================================
// Engines
// =============================================================================

pub mod decode;
pub mod encode;

// =============================================================================
// Context and configuration
// =============================================================================

pub mod config;
pub mod convert;
pub mod session;

// =============================================================================
// Public re-exports
// =============================================================================

pub use config::{ClassOverride, PolicyPreset, SessionConfig};
pub use decode::{decode_raw, Decoded};
pub use encode::{encode_raw, Encoded};
pub use error::{Error, ErrorKind};
pub use language::Language;
pub use session::Session;
pub use validate::{CharacterClass, ClassAction, ClassFlag, ValidationPolicy};
