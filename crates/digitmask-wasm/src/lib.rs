// WASM bindings for masked digit input.
//
// Provides a `WasmMaskedInput` class exported via wasm-bindgen that wraps
// the `MaskedInput` from digitmask-engine. Render plans are serialized to
// JavaScript values using serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   const field = WasmMaskedInput.fromPreset("ru");
//   field.type("9");              // => true
//   field.paste("991234");        // => true
//   field.text("_");              // => "+7 (999)123-4_-__"
//   field.render();               // => { segments: [{ kind: "literal", text: "+7 (" }, ...], cursorSlot: 10 }
//   field.propose("99x");         // => false, field.lastRejection() => "non-digit 'x' at position 2"
//   field.backspace();
//   field.terminate();            // optional cleanup

use serde::Serialize;
use wasm_bindgen::prelude::*;

use digitmask_core::format::Format;
use digitmask_core::preset::Preset;
use digitmask_core::segment::{RenderPlan, Segment};
use digitmask_engine::accept::{InputPolicy, RejectReason};
use digitmask_engine::handle::MaskedInput;
use digitmask_engine::keys::EditKey;

// ============================================================================
// Serde-serializable DTO types for JS interop
// ============================================================================

/// Serializable representation of one displayed segment.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsSegment {
    kind: &'static str,
    text: String,
    color: String,
}

/// Serializable representation of a render plan.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsRenderPlan {
    segments: Vec<JsSegment>,
    cursor_slot: Option<usize>,
    divider_colors: Vec<String>,
    is_full: bool,
}

/// Serializable representation of a built-in preset.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsPreset {
    code: &'static str,
    name: &'static str,
    pattern: String,
    capacity: usize,
}

// ============================================================================
// Conversion helpers
// ============================================================================

fn segment_kind(segment: &Segment<'_>) -> &'static str {
    match segment {
        Segment::Literal(_) => "literal",
        Segment::Digit(Some(_)) => "filled",
        Segment::Digit(None) => "empty",
    }
}

fn plan_dto(input: &MaskedInput, plan: &RenderPlan<'_>) -> JsRenderPlan {
    let segments = plan
        .segments()
        .iter()
        .map(|s| JsSegment {
            kind: segment_kind(s),
            text: match *s {
                Segment::Literal(text) => text.to_string(),
                Segment::Digit(d) => d.map(String::from).unwrap_or_default(),
            },
            color: input.segment_color(s).to_hex(),
        })
        .collect();
    let divider_colors = (0..plan.segments().len())
        .map(|i| input.divider_color(i).to_hex())
        .collect();
    JsRenderPlan {
        segments,
        cursor_slot: plan.cursor_slot(),
        divider_colors,
        is_full: plan.is_full(),
    }
}

fn parse_policy(strip_non_digits: bool) -> InputPolicy {
    if strip_non_digits {
        InputPolicy::StripNonDigits
    } else {
        InputPolicy::Strict
    }
}

fn first_char(placeholder: &str) -> char {
    placeholder.chars().next().unwrap_or('_')
}

// ============================================================================
// WasmMaskedInput
// ============================================================================

/// Masked digit input field for WebAssembly.
///
/// Holds the raw digits and renders them through a fixed format. Rejected
/// edits leave the value unchanged; the reason is kept for `lastRejection`.
#[wasm_bindgen]
pub struct WasmMaskedInput {
    input: MaskedInput,
    last_rejection: Option<RejectReason>,
}

#[wasm_bindgen]
impl WasmMaskedInput {
    /// Create a field from a `#` pattern, e.g. `"+7 (###)###-##-##"`.
    #[wasm_bindgen(constructor)]
    pub fn new(pattern: &str, strip_non_digits: Option<bool>) -> Result<WasmMaskedInput, JsError> {
        let format = Format::parse(pattern).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self::from_format(format, strip_non_digits.unwrap_or(false)))
    }

    /// Create a field from a built-in preset code (`ru`, `us`, `us-ext`, `fr`).
    #[wasm_bindgen(js_name = "fromPreset")]
    pub fn from_preset(code: &str, strip_non_digits: Option<bool>) -> Result<WasmMaskedInput, JsError> {
        let preset = code.parse::<Preset>().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self::from_format(preset.format(), strip_non_digits.unwrap_or(false)))
    }

    /// List the built-in presets as `{ code, name, pattern, capacity }` objects.
    pub fn presets() -> Result<JsValue, JsError> {
        let presets: Vec<JsPreset> = Preset::ALL
            .iter()
            .map(|p| {
                let format = p.format();
                JsPreset {
                    code: p.code(),
                    name: p.name(),
                    pattern: format.to_string(),
                    capacity: format.capacity(),
                }
            })
            .collect();
        serde_wasm_bindgen::to_value(&presets).map_err(|e| JsError::new(&e.to_string()))
    }

    /// The format as a `#` pattern.
    pub fn pattern(&self) -> String {
        self.input.format().to_string()
    }

    /// Number of digit slots.
    pub fn capacity(&self) -> usize {
        self.input.format().capacity()
    }

    /// Current raw digits.
    pub fn value(&self) -> String {
        self.input.value().to_string()
    }

    /// Replace the value outright. Throws if it does not fit the format.
    #[wasm_bindgen(js_name = "setValue")]
    pub fn set_value(&mut self, value: &str) -> Result<(), JsError> {
        self.input.set_value(value).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Offer a whole new raw value. Returns whether it was accepted.
    pub fn propose(&mut self, proposed: &str) -> bool {
        let result = self.input.propose(proposed).map(|_| ());
        self.record(result)
    }

    /// Type one character. Returns whether it was accepted.
    #[wasm_bindgen(js_name = "type")]
    pub fn type_char(&mut self, ch: char) -> bool {
        self.press(&EditKey::Char(ch))
    }

    /// Paste text after the current digits. Returns whether it was accepted.
    pub fn paste(&mut self, text: &str) -> bool {
        self.press(&EditKey::Paste(text.to_string()))
    }

    /// Delete the last digit.
    pub fn backspace(&mut self) -> bool {
        self.press(&EditKey::Backspace)
    }

    /// Delete every digit.
    pub fn clear(&mut self) -> bool {
        self.press(&EditKey::Clear)
    }

    /// Why the most recent edit was rejected, or `undefined` if it was accepted.
    #[wasm_bindgen(js_name = "lastRejection")]
    pub fn last_rejection(&self) -> Option<String> {
        self.last_rejection.as_ref().map(ToString::to_string)
    }

    /// Display text with empty slots drawn as the first character of `placeholder`.
    pub fn text(&self, placeholder: &str) -> String {
        self.input.text(first_char(placeholder))
    }

    /// Format position of the next digit, or `undefined` when full.
    #[wasm_bindgen(js_name = "cursorSlot")]
    pub fn cursor_slot(&self) -> Option<usize> {
        self.input.render().cursor_slot()
    }

    /// Segment-by-segment render plan with colors.
    pub fn render(&self) -> Result<JsValue, JsError> {
        let plan = self.input.render();
        serde_wasm_bindgen::to_value(&plan_dto(&self.input, &plan))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Digits of every filled slot, in order.
    pub fn digits(&self) -> js_sys::Array {
        self.input
            .value()
            .as_str()
            .chars()
            .map(|d| JsValue::from_str(d.encode_utf8(&mut [0; 4])))
            .collect()
    }

    #[wasm_bindgen(js_name = "setEnabled")]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.input.set_enabled(enabled);
    }

    #[wasm_bindgen(js_name = "setFocused")]
    pub fn set_focused(&mut self, focused: bool) {
        self.input.set_focused(focused);
    }

    #[wasm_bindgen(js_name = "setStripNonDigits")]
    pub fn set_strip_non_digits(&mut self, strip: bool) {
        self.input.set_policy(parse_policy(strip));
    }

    /// Release resources held by this instance.
    ///
    /// After calling this method, the instance should not be used.
    pub fn terminate(self) {}
}

impl WasmMaskedInput {
    fn from_format(format: Format, strip_non_digits: bool) -> Self {
        Self {
            input: MaskedInput::new(format).with_policy(parse_policy(strip_non_digits)),
            last_rejection: None,
        }
    }

    fn press(&mut self, key: &EditKey) -> bool {
        let result = self.input.press(key).map(|_| ());
        self.record(result)
    }

    fn record(&mut self, result: Result<(), RejectReason>) -> bool {
        match result {
            Ok(()) => {
                self.last_rejection = None;
                true
            }
            Err(reason) => {
                self.last_rejection = Some(reason);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_dto_carries_kinds_and_colors() {
        let mut input = MaskedInput::new(Preset::Russia.format());
        input.set_focused(true);
        input.propose("9").unwrap();
        let plan = input.render();
        let dto = plan_dto(&input, &plan);

        assert_eq!(dto.segments.len(), 14);
        assert_eq!(dto.segments[0], JsSegment {
            kind: "literal",
            text: "+7 (".to_string(),
            color: "#000000".to_string(),
        });
        assert_eq!(dto.segments[1].kind, "filled");
        assert_eq!(dto.segments[1].text, "9");
        assert_eq!(dto.segments[2].kind, "empty");
        assert_eq!(dto.segments[2].text, "");
        assert_eq!(dto.cursor_slot, Some(2));
        assert_eq!(dto.divider_colors[2], "#0000ff");
        assert_eq!(dto.divider_colors[1], "#cccccc");
        assert!(!dto.is_full);
    }

    #[test]
    fn rejection_is_recorded_and_cleared() {
        let mut field = WasmMaskedInput::from_format(Preset::UnitedStates.format(), false);
        assert!(field.type_char('5'));
        assert!(!field.type_char('x'));
        assert_eq!(field.value(), "5");
        assert!(field.last_rejection().is_some());
        assert!(field.backspace());
        assert_eq!(field.last_rejection(), None);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn strip_policy_accepts_formatted_paste() {
        let mut field = WasmMaskedInput::from_format(Preset::UnitedStates.format(), true);
        assert!(field.paste("(555) 123-4567"));
        assert_eq!(field.value(), "5551234567");
        assert_eq!(field.text("_"), "+1 (555)123-4567");
        assert_eq!(field.cursor_slot(), None);
    }

    #[test]
    fn placeholder_falls_back_to_underscore() {
        assert_eq!(first_char(""), '_');
        assert_eq!(first_char("*x"), '*');
    }
}
