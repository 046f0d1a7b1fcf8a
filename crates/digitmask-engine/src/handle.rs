// MaskedInput: host-side state container for one masked field.
//
// Holds the format, the current raw value and the presentation flags, and
// routes every edit through the pure engine functions. Hosts that keep their
// own state (a reactive store, a UI model) can skip this type and call
// `derive_render_plan` / `accept_edit_with` directly; the behavior is the same.
//
// Each accepted edit replaces the whole value; a rejected edit leaves it
// untouched.

use digitmask_core::RawValueError;
use digitmask_core::format::Format;
use digitmask_core::segment::{RenderPlan, Segment};
use digitmask_core::value::RawValue;

use crate::accept::{InputPolicy, RejectReason, accept_edit_with};
use crate::keys::{EditKey, apply_key};
use crate::render::derive_render_plan;
use crate::style::{Palette, Rgb};

/// One masked digit field: format, value, policy and presentation flags.
#[derive(Debug, Clone)]
pub struct MaskedInput {
    format: Format,
    value: RawValue,
    policy: InputPolicy,
    palette: Palette<Rgb>,
    enabled: bool,
    focused: bool,
}

impl MaskedInput {
    /// Create an empty, enabled, unfocused field.
    pub fn new(format: Format) -> Self {
        Self {
            format,
            value: RawValue::empty(),
            policy: InputPolicy::default(),
            palette: Palette::default(),
            enabled: true,
            focused: false,
        }
    }

    /// Create a field holding `initial`, validated against `format`.
    pub fn with_value(format: Format, initial: &str) -> Result<Self, RawValueError> {
        let value = RawValue::new(initial, &format)?;
        Ok(Self {
            value,
            ..Self::new(format)
        })
    }

    pub fn with_policy(mut self, policy: InputPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_palette(mut self, palette: Palette<Rgb>) -> Self {
        self.palette = palette;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn format(&self) -> &Format {
        &self.format
    }

    /// The current raw digits.
    pub fn value(&self) -> &RawValue {
        &self.value
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    pub fn palette(&self) -> &Palette<Rgb> {
        &self.palette
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Offer a whole replacement value. On acceptance the value is swapped in.
    pub fn propose(&mut self, proposed: &str) -> Result<&RawValue, RejectReason> {
        let value = accept_edit_with(&self.format, self.policy, &self.value, proposed)
            .into_result()?;
        self.value = value;
        Ok(&self.value)
    }

    /// Apply a keystroke.
    pub fn press(&mut self, key: &EditKey) -> Result<&RawValue, RejectReason> {
        let value = apply_key(&self.format, self.policy, &self.value, key).into_result()?;
        self.value = value;
        Ok(&self.value)
    }

    /// Replace the value from host state (e.g. restoring a saved screen).
    pub fn set_value(&mut self, value: &str) -> Result<(), RawValueError> {
        self.value = RawValue::new(value, &self.format)?;
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render plan for the current value.
    pub fn render(&self) -> RenderPlan<'_> {
        derive_render_plan(&self.format, &self.value)
    }

    /// Display text for the current value.
    pub fn text(&self, placeholder: char) -> String {
        self.render().to_text(placeholder)
    }

    /// Text color for a segment, honoring the enabled flag.
    pub fn segment_color(&self, segment: &Segment<'_>) -> Rgb {
        *self.palette.segment_color(segment, self.enabled)
    }

    /// Divider color under the slot at `format_index`.
    pub fn divider_color(&self, format_index: usize) -> Rgb {
        let cursor = self.render().cursor_slot();
        *self.palette.divider_color(format_index, cursor, self.focused)
    }

    // =========================================================================
    // Option setters
    // =========================================================================

    pub fn set_policy(&mut self, policy: InputPolicy) {
        self.policy = policy;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use digitmask_core::preset::Preset;

    use super::*;

    #[test]
    fn typing_session() {
        let mut input = MaskedInput::new(Preset::Russia.format());
        for ch in "999".chars() {
            input.press(&EditKey::Char(ch)).unwrap();
        }
        assert_eq!(input.value().as_str(), "999");
        assert_eq!(input.text('_'), "+7 (999)___-__-__");

        let err = input.press(&EditKey::Char('a')).unwrap_err();
        assert!(matches!(err, RejectReason::NonDigit { ch: 'a', .. }));
        assert_eq!(input.value().as_str(), "999");

        input.press(&EditKey::Backspace).unwrap();
        assert_eq!(input.value().as_str(), "99");
    }

    #[test]
    fn propose_rejects_too_long() {
        let mut input = MaskedInput::with_value(Preset::France.format(), "612345678").unwrap();
        assert!(input.propose("6123456789").is_err());
        assert_eq!(input.value().as_str(), "612345678");
        assert!(input.render().is_full());
    }

    #[test]
    fn with_value_validates() {
        assert!(MaskedInput::with_value(Preset::France.format(), "12a").is_err());
        assert!(MaskedInput::with_value(Preset::France.format(), "1234567890").is_err());
    }

    #[test]
    fn strip_policy_on_paste() {
        let mut input =
            MaskedInput::new(Preset::UnitedStates.format()).with_policy(InputPolicy::StripNonDigits);
        input
            .press(&EditKey::Paste("(212) 555-0199".into()))
            .unwrap();
        assert_eq!(input.text('_'), "+1 (212)555-0199");
    }

    #[test]
    fn divider_follows_cursor_and_focus() {
        let mut input = MaskedInput::with_value(Preset::Russia.format(), "9").unwrap();
        // cursor on the second slot, format index 2
        assert_eq!(input.divider_color(2), Rgb::LIGHT_GRAY);
        input.set_focused(true);
        assert_eq!(input.divider_color(2), Rgb::BLUE);
        assert_eq!(input.divider_color(1), Rgb::LIGHT_GRAY);
    }

    #[test]
    fn disabled_colors() {
        let mut input = MaskedInput::new(Preset::Russia.format());
        input.set_enabled(false);
        assert!(!input.is_enabled());
        let plan = input.render();
        assert_eq!(input.segment_color(&plan.segments()[0]), Rgb::LIGHT_GRAY);
        assert_eq!(input.segment_color(&plan.segments()[1]), Rgb::LIGHT_GRAY);
    }

    #[test]
    fn set_value_replaces_whole_value() {
        let mut input = MaskedInput::new(Preset::Russia.format());
        input.set_value("123").unwrap();
        assert_eq!(input.value().as_str(), "123");
        assert!(input.set_value("x").is_err());
        assert_eq!(input.value().as_str(), "123");
    }
}
