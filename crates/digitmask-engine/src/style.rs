// Color selection for mask text, digits and slot dividers.
//
// Pure lookup; the palette holds no state. The color type is generic so a
// host can plug in its own (terminal colors, GPU colors); `Rgb` is the default.

use digitmask_core::segment::Segment;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const LIGHT_GRAY: Rgb = Rgb::new(0xCC, 0xCC, 0xCC);
    pub const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colors for every part of a masked field, with disabled variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Palette<C = Rgb> {
    pub mask: C,
    pub disabled_mask: C,
    pub editable_digit: C,
    pub disabled_editable_digit: C,
    pub divider: C,
    pub focused_divider: C,
}

impl Default for Palette<Rgb> {
    fn default() -> Self {
        Self {
            mask: Rgb::BLACK,
            disabled_mask: Rgb::LIGHT_GRAY,
            editable_digit: Rgb::BLACK,
            disabled_editable_digit: Rgb::LIGHT_GRAY,
            divider: Rgb::LIGHT_GRAY,
            focused_divider: Rgb::BLUE,
        }
    }
}

impl<C> Palette<C> {
    /// Color for literal mask text.
    pub fn mask_color(&self, enabled: bool) -> &C {
        if enabled { &self.mask } else { &self.disabled_mask }
    }

    /// Color for entered digits.
    pub fn editable_color(&self, enabled: bool) -> &C {
        if enabled {
            &self.editable_digit
        } else {
            &self.disabled_editable_digit
        }
    }

    /// Divider under the slot at `format_index`: highlighted only when it is
    /// the cursor slot and the field has focus.
    pub fn divider_color(
        &self,
        format_index: usize,
        cursor_slot: Option<usize>,
        focused: bool,
    ) -> &C {
        if focused && cursor_slot == Some(format_index) {
            &self.focused_divider
        } else {
            &self.divider
        }
    }

    /// Text color for a segment.
    pub fn segment_color(&self, segment: &Segment<'_>, enabled: bool) -> &C {
        match segment {
            Segment::Literal(_) => self.mask_color(enabled),
            Segment::Digit(_) => self.editable_color(enabled),
        }
    }
}
