// Format tokens: literal mask text or an editable digit slot.

/// A single element of a [`Format`](crate::format::Format).
///
/// Matching on this enum is always exhaustive, so a new token kind (an
/// optional digit, say) is a compile-time-checked change everywhere a format
/// is walked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatToken {
    /// Fixed, non-editable display text such as `"+7 ("` or `"-"`.
    /// May be empty. Never consumes a digit.
    Literal(String),

    /// One editable position. Consumes exactly one digit of the raw value,
    /// in order.
    DigitSlot,
}

impl FormatToken {
    /// Create a literal token.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Whether this token consumes a digit.
    #[inline]
    pub fn is_digit_slot(&self) -> bool {
        matches!(self, Self::DigitSlot)
    }

    /// The literal text, or `None` for a digit slot.
    pub fn literal_text(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            Self::DigitSlot => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_constructor() {
        let t = FormatToken::literal("+7 (");
        assert_eq!(t, FormatToken::Literal("+7 (".to_string()));
        assert_eq!(t.literal_text(), Some("+7 ("));
        assert!(!t.is_digit_slot());
    }

    #[test]
    fn digit_slot_has_no_text() {
        assert!(FormatToken::DigitSlot.is_digit_slot());
        assert_eq!(FormatToken::DigitSlot.literal_text(), None);
    }

    #[test]
    fn empty_literal_is_allowed() {
        let t = FormatToken::literal("");
        assert_eq!(t.literal_text(), Some(""));
    }
}
