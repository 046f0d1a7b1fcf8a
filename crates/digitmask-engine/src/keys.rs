// Keystrokes mapped onto whole-value proposals.
//
// Typing appends to the raw value, so the typed digit lands in the cursor slot
// of the previous render. Backspace drops the last digit, which empties the
// slot just before the cursor. Every key becomes a full proposed value and goes
// through `accept_edit_with`.

use digitmask_core::format::Format;
use digitmask_core::value::RawValue;

use crate::accept::{EditOutcome, InputPolicy, accept_edit_with};

/// An editing action from the host's input mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditKey {
    /// A typed character; digits or anything else.
    Char(char),
    /// Delete the last entered digit.
    Backspace,
    /// Delete every digit.
    Clear,
    /// Pasted text, appended after the current digits.
    Paste(String),
}

/// The whole value `key` proposes when applied to `current`.
///
/// Backspace on an empty value proposes the empty value.
pub fn propose(current: &RawValue, key: &EditKey) -> String {
    let mut next = current.as_str().to_string();
    match key {
        EditKey::Char(ch) => next.push(*ch),
        EditKey::Backspace => {
            next.pop();
        }
        EditKey::Clear => next.clear(),
        EditKey::Paste(text) => next.push_str(text),
    }
    next
}

/// Apply `key` to `current` and run the proposal through acceptance.
pub fn apply_key(
    format: &Format,
    policy: InputPolicy,
    current: &RawValue,
    key: &EditKey,
) -> EditOutcome {
    let proposed = propose(current, key);
    accept_edit_with(format, policy, current, &proposed)
}
