// Built-in regional phone formats.
//
// Presets are shortcuts for constructing a `Format`; any caller-built format
// works the same way everywhere.

use std::fmt;
use std::str::FromStr;

use crate::FormatError;
use crate::format::Format;
use crate::token::FormatToken;

/// A named, built-in phone number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// `+7 (XXX)XXX-XX-XX`, 10 digits grouped 3-3-2-2.
    Russia,
    /// `+1 (XXX)XXX-XXXX`, 10 digits with an area code.
    UnitedStates,
    /// `+1 (XXX)XXX-XXXX ext. X`, 11 digits: a US number plus a one-digit extension.
    UnitedStatesExtension,
    /// `+33 X XX XX XX XX`, 9 digits in pairs after the leading digit.
    France,
}

impl Preset {
    /// Every preset, in listing order.
    pub const ALL: [Preset; 4] = [
        Preset::Russia,
        Preset::UnitedStates,
        Preset::UnitedStatesExtension,
        Preset::France,
    ];

    /// Short code accepted by [`FromStr`].
    pub fn code(self) -> &'static str {
        match self {
            Preset::Russia => "ru",
            Preset::UnitedStates => "us",
            Preset::UnitedStatesExtension => "us-ext",
            Preset::France => "fr",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Russia => "Russia",
            Preset::UnitedStates => "United States",
            Preset::UnitedStatesExtension => "United States (extension)",
            Preset::France => "France",
        }
    }

    /// Literal and slot group layout as `(literal, slots)` pairs.
    fn layout(self) -> &'static [(&'static str, usize)] {
        match self {
            Preset::Russia => &[("+7 (", 3), (")", 3), ("-", 2), ("-", 2)],
            Preset::UnitedStates => &[("+1 (", 3), (")", 3), ("-", 4)],
            Preset::UnitedStatesExtension => {
                &[("+1 (", 3), (")", 3), ("-", 4), (" ext. ", 1)]
            }
            Preset::France => &[("+33 ", 1), (" ", 2), (" ", 2), (" ", 2), (" ", 2)],
        }
    }

    /// Build the format for this preset.
    pub fn format(self) -> Format {
        let mut tokens = Vec::new();
        for &(literal, slots) in self.layout() {
            tokens.push(FormatToken::literal(literal));
            tokens.extend(std::iter::repeat_n(FormatToken::DigitSlot, slots));
        }
        // Every layout has at least one slot group.
        Format::from_tokens_unchecked(tokens)
    }
}

impl FromStr for Preset {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| FormatError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<Preset> for Format {
    fn from(preset: Preset) -> Self {
        preset.format()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacities() {
        assert_eq!(Preset::Russia.format().capacity(), 10);
        assert_eq!(Preset::UnitedStates.format().capacity(), 10);
        assert_eq!(Preset::UnitedStatesExtension.format().capacity(), 11);
        assert_eq!(Preset::France.format().capacity(), 9);
    }

    #[test]
    fn patterns() {
        assert_eq!(Preset::Russia.format().to_string(), "+7 (###)###-##-##");
        assert_eq!(Preset::UnitedStates.format().to_string(), "+1 (###)###-####");
        assert_eq!(
            Preset::UnitedStatesExtension.format().to_string(),
            "+1 (###)###-#### ext. #"
        );
        assert_eq!(Preset::France.format().to_string(), "+33 # ## ## ## ##");
    }

    #[test]
    fn preset_matches_parsed_pattern() {
        for preset in Preset::ALL {
            let built = preset.format();
            let parsed = Format::parse(&built.to_string()).unwrap();
            assert_eq!(built, parsed, "{preset}");
        }
    }

    #[test]
    fn parse_codes() {
        assert_eq!("ru".parse::<Preset>(), Ok(Preset::Russia));
        assert_eq!(" US ".parse::<Preset>(), Ok(Preset::UnitedStates));
        assert_eq!("us-ext".parse::<Preset>(), Ok(Preset::UnitedStatesExtension));
        assert_eq!("fr".parse::<Preset>(), Ok(Preset::France));
    }

    #[test]
    fn unknown_code() {
        assert_eq!(
            "de".parse::<Preset>(),
            Err(FormatError::UnknownPreset("de".to_string()))
        );
    }

    #[test]
    fn russia_token_layout() {
        let f = Preset::Russia.format();
        assert_eq!(f.token_count(), 14);
        assert_eq!(f.tokens()[0], FormatToken::literal("+7 ("));
        assert_eq!(f.nth_slot(0), Some(1));
        assert_eq!(f.nth_slot(9), Some(13));
    }
}
