// RawValue: the bare digit string exchanged with the host.

use std::fmt;

use crate::RawValueError;
use crate::format::Format;

/// A string of ASCII digits no longer than the capacity of the format it was
/// validated against.
///
/// Never contains mask characters. Each accepted edit produces a whole new
/// `RawValue`; there is no in-place mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawValue(String);

impl RawValue {
    /// The empty value, valid for every format.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Validate `text` against `format`.
    ///
    /// Length is checked before content, so `"12a"` against a two-slot format
    /// reports [`RawValueError::TooLong`].
    pub fn new(text: impl Into<String>, format: &Format) -> Result<Self, RawValueError> {
        let text = text.into();
        let len = text.chars().count();
        if len > format.capacity() {
            return Err(RawValueError::TooLong {
                len,
                capacity: format.capacity(),
            });
        }
        if let Some((position, ch)) = text.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(RawValueError::NonDigit { ch, position });
        }
        Ok(Self(text))
    }

    /// The digits as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits. Digits are ASCII, so bytes and chars agree.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `index`-th digit, if entered.
    pub fn digit(&self, index: usize) -> Option<char> {
        self.0.as_bytes().get(index).map(|&b| char::from(b))
    }

    /// Whether every slot of `format` is filled.
    pub fn is_full(&self, format: &Format) -> bool {
        self.len() >= format.capacity()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RawValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RawValue> for String {
    fn from(value: RawValue) -> Self {
        value.0
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
