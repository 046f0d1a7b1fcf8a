// Input acceptance: decide whether a proposed raw value replaces the current one.
//
// A proposal is always a whole replacement value, never a delta. It is
// accepted or rejected as a unit: no truncation, no partial acceptance. A
// rejection is an ordinary outcome (typing past the last slot, typing a
// letter), not an error.

use std::fmt;
use std::str::FromStr;

use digitmask_core::RawValueError;
use digitmask_core::format::Format;
use digitmask_core::value::RawValue;

/// How non-digit characters in a proposal are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputPolicy {
    /// Any non-digit rejects the whole proposal.
    #[default]
    Strict,
    /// Non-digits are dropped first (pasting `"+7 (999) 123"` yields
    /// `"7999123"`). The length check still applies to what remains.
    StripNonDigits,
}

/// Error returned when parsing an unknown [`InputPolicy`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown input policy: {0} (expected \"strict\" or \"strip\")")]
pub struct UnknownPolicy(pub String);

impl FromStr for InputPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(InputPolicy::Strict),
            "strip" | "strip-non-digits" => Ok(InputPolicy::StripNonDigits),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Why a proposal was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// More digits than the format has slots.
    TooLong { len: usize, capacity: usize },
    /// A character other than `0`-`9`.
    NonDigit { ch: char, position: usize },
}

impl From<RawValueError> for RejectReason {
    fn from(e: RawValueError) -> Self {
        match e {
            RawValueError::TooLong { len, capacity } => RejectReason::TooLong { len, capacity },
            RawValueError::NonDigit { ch, position } => RejectReason::NonDigit { ch, position },
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TooLong { len, capacity } => {
                write!(f, "{len} digits exceed capacity {capacity}")
            }
            RejectReason::NonDigit { ch, position } => {
                write!(f, "non-digit {ch:?} at position {position}")
            }
        }
    }
}

/// Result of an edit attempt.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The new canonical value; the host swaps it in.
    Accepted(RawValue),
    /// The host keeps its current value.
    Rejected(RejectReason),
}

impl EditOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, EditOutcome::Accepted(_))
    }

    /// The accepted value, if any.
    pub fn accepted(&self) -> Option<&RawValue> {
        match self {
            EditOutcome::Accepted(v) => Some(v),
            EditOutcome::Rejected(_) => None,
        }
    }

    /// The value the host should hold after this edit.
    pub fn resolve(self, current: &RawValue) -> RawValue {
        match self {
            EditOutcome::Accepted(v) => v,
            EditOutcome::Rejected(_) => current.clone(),
        }
    }

    pub fn into_result(self) -> Result<RawValue, RejectReason> {
        match self {
            EditOutcome::Accepted(v) => Ok(v),
            EditOutcome::Rejected(r) => Err(r),
        }
    }
}

/// Accept `proposed` under [`InputPolicy::Strict`].
///
/// Accepted iff it has at most `format.capacity()` characters and every one is
/// an ASCII digit. The accepted value is `proposed` verbatim.
pub fn accept_edit(format: &Format, current: &RawValue, proposed: &str) -> EditOutcome {
    accept_edit_with(format, InputPolicy::Strict, current, proposed)
}

/// Accept `proposed` under the given policy.
pub fn accept_edit_with(
    format: &Format,
    policy: InputPolicy,
    current: &RawValue,
    proposed: &str,
) -> EditOutcome {
    let candidate = match policy {
        InputPolicy::Strict => proposed.to_string(),
        InputPolicy::StripNonDigits => proposed.chars().filter(char::is_ascii_digit).collect(),
    };

    match RawValue::new(candidate, format) {
        Ok(value) => {
            tracing::trace!(current = %current, accepted = %value, "edit accepted");
            EditOutcome::Accepted(value)
        }
        Err(e) => {
            let reason = RejectReason::from(e);
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "edit rejected",
                current = %current,
                proposed = ?proposed,
                policy = ?policy,
                reason = %reason
            );
            EditOutcome::Rejected(reason)
        }
    }
}
