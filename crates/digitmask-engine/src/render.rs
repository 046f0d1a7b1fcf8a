// Render plan derivation: (format, raw value) -> segments + cursor slot.

use digitmask_core::format::Format;
use digitmask_core::segment::{RenderPlan, Segment};
use digitmask_core::token::FormatToken;
use digitmask_core::value::RawValue;

use crate::assignment::{SlotState, assign_slots};

/// Derive the render plan for `value` displayed through `format`.
///
/// Emits one segment per format token. Digits are consumed strictly left to
/// right; once the value runs out, every remaining slot is empty. The cursor
/// slot comes from the same slot assignment as the digits.
pub fn derive_render_plan<'f>(format: &'f Format, value: &RawValue) -> RenderPlan<'f> {
    let assignment = assign_slots(format, value.len());

    let segments = format
        .tokens()
        .iter()
        .zip(assignment.states())
        .map(|(token, state)| match (token, state) {
            (FormatToken::Literal(text), _) => Segment::Literal(text.as_str()),
            (FormatToken::DigitSlot, SlotState::Filled(i)) => Segment::Digit(value.digit(*i)),
            (FormatToken::DigitSlot, _) => Segment::Digit(None),
        })
        .collect();

    tracing::trace!(
        format = %format,
        value = %value,
        cursor_slot = ?assignment.cursor_slot(),
        "derived render plan"
    );

    RenderPlan::new(segments, assignment.cursor_slot())
}

/// Format index where the next typed digit lands, or `None` when `value` fills
/// every slot.
pub fn cursor_slot(format: &Format, value: &RawValue) -> Option<usize> {
    assign_slots(format, value.len()).cursor_slot()
}

/// Display text for `value`, with empty slots drawn as `placeholder`.
pub fn render_text(format: &Format, value: &RawValue, placeholder: char) -> String {
    derive_render_plan(format, value).to_text(placeholder)
}

#[cfg(test)]
mod tests {
    use digitmask_core::preset::Preset;

    use super::*;

    fn raw(format: &Format, s: &str) -> RawValue {
        RawValue::new(s, format).unwrap()
    }

    #[test]
    fn empty_value_renders_all_slots_empty() {
        let f = Preset::Russia.format();
        let plan = derive_render_plan(&f, &RawValue::empty());
        assert_eq!(plan.segments().len(), f.token_count());
        assert_eq!(plan.filled_count(), 0);
        assert_eq!(plan.cursor_slot(), Some(1));
        assert_eq!(plan.to_text('_'), "+7 (___)___-__-__");
    }

    #[test]
    fn partial_value() {
        let f = Preset::Russia.format();
        let plan = derive_render_plan(&f, &raw(&f, "9991"));
        assert_eq!(plan.to_text('_'), "+7 (999)1__-__-__");
        assert_eq!(plan.cursor_slot(), Some(6));
        assert_eq!(plan.segments()[5], Segment::Digit(Some('1')));
        assert_eq!(plan.segments()[6], Segment::Digit(None));
    }

    #[test]
    fn full_value_has_no_cursor() {
        let f = Preset::Russia.format();
        let plan = derive_render_plan(&f, &raw(&f, "9991234567"));
        assert_eq!(plan.to_text('_'), "+7 (999)123-45-67");
        assert_eq!(plan.cursor_slot(), None);
        assert!(plan.is_full());
    }

    #[test]
    fn literal_segments_borrow_format_text() {
        let f = Format::parse("ext. #").unwrap();
        let plan = derive_render_plan(&f, &RawValue::empty());
        assert_eq!(plan.segments(), &[Segment::Literal("ext. "), Segment::Digit(None)]);
    }

    #[test]
    fn empty_literal_still_gets_a_segment() {
        let f = Format::new(vec![
            FormatToken::literal(""),
            FormatToken::DigitSlot,
        ])
        .unwrap();
        let plan = derive_render_plan(&f, &raw(&f, "5"));
        assert_eq!(plan.segments(), &[Segment::Literal(""), Segment::Digit(Some('5'))]);
    }

    #[test]
    fn idempotent() {
        let f = Preset::France.format();
        let v = raw(&f, "61234");
        assert_eq!(derive_render_plan(&f, &v), derive_render_plan(&f, &v));
    }

    #[test]
    fn value_from_larger_format_fills_and_stops() {
        let long = Preset::UnitedStatesExtension.format();
        let short = Format::parse("##").unwrap();
        let v = raw(&long, "12345");
        let plan = derive_render_plan(&short, &v);
        assert_eq!(plan.to_text('_'), "12");
        assert_eq!(plan.cursor_slot(), None);
    }

    #[test]
    fn cursor_slot_matches_plan() {
        let f = Preset::UnitedStates.format();
        for s in ["", "2", "212", "2125", "2125550199"] {
            let v = raw(&f, s);
            assert_eq!(cursor_slot(&f, &v), derive_render_plan(&f, &v).cursor_slot(), "{s}");
        }
    }

    #[test]
    fn render_text_helper() {
        let f = Preset::France.format();
        assert_eq!(render_text(&f, &raw(&f, "612"), '_'), "+33 6 12 __ __ __");
    }
}
