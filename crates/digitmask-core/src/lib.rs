//! Shared types for masked digit input.
//!
//! A [`format::Format`] describes how a phone-number-like value is displayed:
//! literal mask text interleaved with editable digit slots. The value itself is
//! always a bare digit string ([`value::RawValue`]); the mask is reapplied on
//! every render and never leaks into the value.
//!
//! # Modules
//!
//! - [`token`] -- Format tokens (literal text or a digit slot)
//! - [`format`] -- Validated, immutable token sequences and the `#` pattern syntax
//! - [`value`] -- Digit-only raw values bounded by a format's capacity
//! - [`segment`] -- Render plan types produced by the engine
//! - [`preset`] -- Built-in regional phone formats

pub mod format;
pub mod preset;
pub mod segment;
pub mod token;
pub mod value;

/// Error type for format construction.
///
/// A format that fails to build is never produced, so a `Format` in hand is
/// always usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("format has no digit slots; no digit could ever be entered")]
    NoDigitSlots,
    #[error("pattern ends with a dangling escape character")]
    DanglingEscape,
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

/// Error type for building a [`value::RawValue`] from caller-supplied text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RawValueError {
    #[error("value has {len} digits but the format holds only {capacity}")]
    TooLong { len: usize, capacity: usize },
    #[error("non-digit character {ch:?} at position {position}")]
    NonDigit { ch: char, position: usize },
}
