// Digit-to-slot assignment shared by rendering and cursor placement.
//
// One left-to-right walk over the format with a countdown initialized to the
// number of entered digits. Each digit slot seen while the countdown is
// positive is filled (and decrements it); the first slot seen at zero is the
// cursor. Rendering and cursor placement both read from this single result,
// so they cannot disagree about which slot is next.

use digitmask_core::format::Format;
use digitmask_core::token::FormatToken;

/// Role of one format position for a given number of entered digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// A literal token; consumes nothing.
    Literal,
    /// A digit slot holding the digit at this index of the raw value.
    Filled(usize),
    /// A digit slot that would hold the digit at this index once typed.
    Empty(usize),
}

impl SlotState {
    /// Index into the raw value this slot maps to, for digit slots.
    pub fn digit_index(self) -> Option<usize> {
        match self {
            SlotState::Literal => None,
            SlotState::Filled(i) | SlotState::Empty(i) => Some(i),
        }
    }
}

/// Per-position slot states plus the cursor slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    states: Vec<SlotState>,
    cursor_slot: Option<usize>,
}

impl SlotAssignment {
    /// One state per format token, in format order.
    #[inline]
    pub fn states(&self) -> &[SlotState] {
        &self.states
    }

    /// State at a format index.
    pub fn state(&self, format_index: usize) -> Option<SlotState> {
        self.states.get(format_index).copied()
    }

    /// Format index of the first unfilled slot, `None` when every slot is filled.
    #[inline]
    pub fn cursor_slot(&self) -> Option<usize> {
        self.cursor_slot
    }
}

/// Assign the first `filled` digits of a raw value to the slots of `format`.
///
/// A `filled` count larger than the capacity fills every slot and reports no
/// cursor; the extra digits have nowhere to go.
pub fn assign_slots(format: &Format, filled: usize) -> SlotAssignment {
    let mut states = Vec::with_capacity(format.token_count());
    let mut remaining = filled;
    let mut digit_index = 0;
    let mut cursor_slot = None;

    for (index, token) in format.tokens().iter().enumerate() {
        match token {
            FormatToken::Literal(_) => states.push(SlotState::Literal),
            FormatToken::DigitSlot => {
                if remaining == 0 {
                    if cursor_slot.is_none() {
                        cursor_slot = Some(index);
                    }
                    states.push(SlotState::Empty(digit_index));
                } else {
                    remaining -= 1;
                    states.push(SlotState::Filled(digit_index));
                }
                digit_index += 1;
            }
        }
    }

    SlotAssignment {
        states,
        cursor_slot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(pattern: &str) -> Format {
        Format::parse(pattern).unwrap()
    }

    #[test]
    fn empty_value_cursor_on_first_slot() {
        let a = assign_slots(&fmt("+7 (###)"), 0);
        assert_eq!(a.cursor_slot(), Some(1));
        assert_eq!(
            a.states(),
            &[
                SlotState::Literal,
                SlotState::Empty(0),
                SlotState::Empty(1),
                SlotState::Empty(2),
                SlotState::Literal,
            ]
        );
    }

    #[test]
    fn cursor_skips_literals() {
        // "(##)-##": slots at 1, 2, 4, 5; ")-" is a single literal
        let a = assign_slots(&fmt("(##)-##"), 2);
        assert_eq!(a.cursor_slot(), Some(4));
        assert_eq!(a.state(2), Some(SlotState::Filled(1)));
        assert_eq!(a.state(3), Some(SlotState::Literal));
        assert_eq!(a.state(4), Some(SlotState::Empty(2)));
    }

    #[test]
    fn full_value_has_no_cursor() {
        let a = assign_slots(&fmt("##-##"), 4);
        assert_eq!(a.cursor_slot(), None);
        assert!(
            a.states()
                .iter()
                .all(|s| !matches!(s, SlotState::Empty(_)))
        );
    }

    #[test]
    fn overfull_value_fills_everything() {
        let a = assign_slots(&fmt("##"), 5);
        assert_eq!(a.cursor_slot(), None);
        assert_eq!(a.states(), &[SlotState::Filled(0), SlotState::Filled(1)]);
    }

    #[test]
    fn digit_indices_follow_slot_order() {
        let a = assign_slots(&fmt("#-#-#"), 1);
        let indices: Vec<_> = a.states().iter().filter_map(|s| s.digit_index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn cursor_is_nth_slot_for_every_length() {
        let f = fmt("+33 # ## ## ## ##");
        for len in 0..f.capacity() {
            assert_eq!(assign_slots(&f, len).cursor_slot(), f.nth_slot(len), "len {len}");
        }
        assert_eq!(assign_slots(&f, f.capacity()).cursor_slot(), None);
    }

    #[test]
    fn state_out_of_range() {
        assert_eq!(assign_slots(&fmt("#"), 0).state(1), None);
    }
}
