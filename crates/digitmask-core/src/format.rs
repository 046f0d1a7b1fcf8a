// Format: validated, immutable sequence of format tokens.
//
// Pattern syntax accepted by `Format::parse`:
//   '#'   one digit slot
//   '\x'  the literal character x (used for '#' and '\')
//   other characters are literal; runs of them merge into one Literal token

use std::fmt;
use std::str::FromStr;

use crate::FormatError;
use crate::token::FormatToken;

/// Pattern character that stands for one digit slot.
pub const SLOT_CHAR: char = '#';

/// Pattern character that makes the next character literal.
pub const ESCAPE_CHAR: char = '\\';

/// An ordered sequence of [`FormatToken`]s with at least one digit slot.
///
/// The capacity (number of digit slots) is counted once at construction.
/// There is no way to mutate a `Format` after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Format {
    tokens: Vec<FormatToken>,
    capacity: usize,
}

impl Format {
    /// Build a format from tokens.
    ///
    /// Returns [`FormatError::NoDigitSlots`] if no token is a digit slot.
    pub fn new(tokens: Vec<FormatToken>) -> Result<Self, FormatError> {
        let capacity = tokens.iter().filter(|t| t.is_digit_slot()).count();
        if capacity == 0 {
            return Err(FormatError::NoDigitSlots);
        }
        Ok(Self { tokens, capacity })
    }

    /// Build a format whose tokens are known to hold a digit slot.
    pub(crate) fn from_tokens_unchecked(tokens: Vec<FormatToken>) -> Self {
        let capacity = tokens.iter().filter(|t| t.is_digit_slot()).count();
        debug_assert!(capacity > 0);
        Self { tokens, capacity }
    }

    /// Parse a `#` pattern such as `"+7 (###)###-##-##"`.
    pub fn parse(pattern: &str) -> Result<Self, FormatError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars();

        while let Some(ch) = chars.next() {
            match ch {
                SLOT_CHAR => {
                    if !literal.is_empty() {
                        tokens.push(FormatToken::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(FormatToken::DigitSlot);
                }
                ESCAPE_CHAR => match chars.next() {
                    Some(escaped) => literal.push(escaped),
                    None => return Err(FormatError::DanglingEscape),
                },
                _ => literal.push(ch),
            }
        }
        if !literal.is_empty() {
            tokens.push(FormatToken::Literal(literal));
        }

        Self::new(tokens)
    }

    /// The tokens in display order.
    #[inline]
    pub fn tokens(&self) -> &[FormatToken] {
        &self.tokens
    }

    /// Number of digit slots, i.e. the maximum raw value length.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tokens (literals and slots).
    #[inline]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Format indices of the digit slots, in order.
    pub fn slot_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_digit_slot())
            .map(|(i, _)| i)
    }

    /// Format index of the `n`-th digit slot (0-based), if it exists.
    pub fn nth_slot(&self, n: usize) -> Option<usize> {
        self.slot_indices().nth(n)
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Vec<FormatToken>> for Format {
    type Error = FormatError;

    fn try_from(tokens: Vec<FormatToken>) -> Result<Self, Self::Error> {
        Self::new(tokens)
    }
}

/// Writes the format back in `#` pattern syntax.
impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                FormatToken::DigitSlot => write!(f, "{SLOT_CHAR}")?,
                FormatToken::Literal(text) => {
                    for ch in text.chars() {
                        if ch == SLOT_CHAR || ch == ESCAPE_CHAR {
                            write!(f, "{ESCAPE_CHAR}")?;
                        }
                        write!(f, "{ch}")?;
                    }
                }
            }
        }
        Ok(())
    }
}
