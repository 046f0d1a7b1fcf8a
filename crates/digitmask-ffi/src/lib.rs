// FFI functions are inherently unsafe; callers must ensure pointer validity.
// Safety contracts are documented per-function in the public API comments.
#![allow(clippy::missing_safety_doc)]

// digitmask-ffi: C-compatible FFI layer for masked digit input.
//
// Exposes a stable C ABI over formats, the stateless accept/render operations
// and the stateful `MaskedInput` field.
//
// Memory management rules:
// - Opaque `Format` pointer: created by `digitmask_format_parse` or
//   `digitmask_format_preset`, freed by `digitmask_format_free`.
// - Opaque `MaskedInput` pointer: created by `digitmask_input_new`, freed by
//   `digitmask_input_free`.
// - Returned strings: caller must free with `digitmask_free_str`.
// - Returned render plans: caller must free with `digitmask_free_render_plan`.
// - All input strings are UTF-8 encoded, null-terminated C strings.

use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;

use digitmask_core::format::Format;
use digitmask_core::preset::Preset;
use digitmask_core::segment::{RenderPlan, Segment};
use digitmask_core::value::RawValue;
use digitmask_engine::accept::{EditOutcome, InputPolicy, accept_edit_with};
use digitmask_engine::handle::MaskedInput;
use digitmask_engine::keys::EditKey;
use digitmask_engine::render::derive_render_plan;

/// Segment kind: literal text from the format.
pub const DIGITMASK_SEGMENT_LITERAL: c_int = 0;
/// Segment kind: digit slot holding a digit.
pub const DIGITMASK_SEGMENT_FILLED: c_int = 1;
/// Segment kind: digit slot still waiting for a digit.
pub const DIGITMASK_SEGMENT_EMPTY: c_int = 2;

/// `cursor_slot` value when every slot is filled.
pub const DIGITMASK_CURSOR_NONE: isize = -1;
/// `cursor_slot` value when the arguments were invalid.
pub const DIGITMASK_CURSOR_ERROR: isize = -2;

// ── Formats ─────────────────────────────────────────────────────

/// Parse a `#` pattern into a format.
///
/// Returns an opaque pointer on success, NULL on failure.
/// On failure, if `error_out` is non-NULL, it receives a heap-allocated error
/// string that the caller must free with `digitmask_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_format_parse(
    pattern: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut Format {
    let Some(pattern) = cstr_to_str(pattern) else {
        set_error(error_out, "pattern is null or not UTF-8");
        return ptr::null_mut();
    };
    match Format::parse(pattern) {
        Ok(format) => Box::into_raw(Box::new(format)),
        Err(e) => {
            set_error(error_out, &e.to_string());
            ptr::null_mut()
        }
    }
}

/// Build the format of a built-in preset (`ru`, `us`, `us-ext`, `fr`).
///
/// Error reporting follows `digitmask_format_parse`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_format_preset(
    code: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut Format {
    let Some(code) = cstr_to_str(code) else {
        set_error(error_out, "preset code is null or not UTF-8");
        return ptr::null_mut();
    };
    match code.parse::<Preset>() {
        Ok(preset) => Box::into_raw(Box::new(preset.format())),
        Err(e) => {
            set_error(error_out, &e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a format created by `digitmask_format_parse` or `digitmask_format_preset`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_format_free(format: *mut Format) {
    if !format.is_null() {
        drop(unsafe { Box::from_raw(format) });
    }
}

/// Number of digit slots in the format. Returns 0 for NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_format_capacity(format: *const Format) -> usize {
    unsafe { format.as_ref() }.map_or(0, Format::capacity)
}

/// The format written back as a `#` pattern. Caller frees with `digitmask_free_str`.
/// Returns NULL for a NULL format.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_format_pattern(format: *const Format) -> *mut c_char {
    let Some(format) = (unsafe { format.as_ref() }) else {
        return ptr::null_mut();
    };
    str_to_c(&format.to_string())
}

// ── Stateless operations ────────────────────────────────────────

/// Decide whether `proposed` replaces `current`.
///
/// `strip_non_digits` non-zero drops non-digit characters before validation
/// instead of rejecting them.
///
/// Returns the new raw value (caller frees with `digitmask_free_str`), or NULL
/// when the edit is rejected. On rejection, if `reason_out` is non-NULL, it
/// receives a heap-allocated reason string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_accept_edit(
    format: *const Format,
    current: *const c_char,
    proposed: *const c_char,
    strip_non_digits: c_int,
    reason_out: *mut *mut c_char,
) -> *mut c_char {
    let Some(format) = (unsafe { format.as_ref() }) else {
        set_error(reason_out, "format is null");
        return ptr::null_mut();
    };
    let Some(current) = cstr_to_str(current) else {
        set_error(reason_out, "current value is null or not UTF-8");
        return ptr::null_mut();
    };
    let Some(proposed) = cstr_to_str(proposed) else {
        set_error(reason_out, "proposed value is null or not UTF-8");
        return ptr::null_mut();
    };
    let current = match RawValue::new(current, format) {
        Ok(v) => v,
        Err(e) => {
            set_error(reason_out, &format!("invalid current value: {e}"));
            return ptr::null_mut();
        }
    };

    let policy = if strip_non_digits != 0 {
        InputPolicy::StripNonDigits
    } else {
        InputPolicy::Strict
    };
    match accept_edit_with(format, policy, &current, proposed) {
        EditOutcome::Accepted(value) => str_to_c(value.as_str()),
        EditOutcome::Rejected(reason) => {
            set_error(reason_out, &reason.to_string());
            ptr::null_mut()
        }
    }
}

/// Render `value` through `format`, drawing empty slots as `placeholder`
/// (a Unicode scalar value).
///
/// Returns NULL if any argument is invalid. Caller frees with `digitmask_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_render(
    format: *const Format,
    value: *const c_char,
    placeholder: u32,
) -> *mut c_char {
    let Some(format) = (unsafe { format.as_ref() }) else {
        return ptr::null_mut();
    };
    let Some(placeholder) = char::from_u32(placeholder) else {
        return ptr::null_mut();
    };
    let Some(value) = raw_value(format, value) else {
        return ptr::null_mut();
    };
    str_to_c(&derive_render_plan(format, &value).to_text(placeholder))
}

/// Format position of the next digit to be entered.
///
/// Returns `DIGITMASK_CURSOR_NONE` when every slot is filled and
/// `DIGITMASK_CURSOR_ERROR` when the arguments are invalid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_cursor_slot(format: *const Format, value: *const c_char) -> isize {
    let Some(format) = (unsafe { format.as_ref() }) else {
        return DIGITMASK_CURSOR_ERROR;
    };
    let Some(value) = raw_value(format, value) else {
        return DIGITMASK_CURSOR_ERROR;
    };
    cursor_to_c(digitmask_engine::render::cursor_slot(format, &value))
}

// ── Render plans ────────────────────────────────────────────────

/// One displayed segment.
#[repr(C)]
pub struct DigitmaskSegment {
    /// One of the `DIGITMASK_SEGMENT_*` constants.
    pub kind: c_int,
    /// Literal text, the digit, or an empty string for an empty slot.
    pub text: *mut c_char,
}

/// Render plan result.
#[repr(C)]
pub struct DigitmaskRenderPlan {
    pub segments: *mut DigitmaskSegment,
    pub count: usize,
    /// Format position of the cursor, or `DIGITMASK_CURSOR_NONE`.
    pub cursor_slot: isize,
}

/// Derive the segment-by-segment plan for `value`.
///
/// Caller must free with `digitmask_free_render_plan`. Returns a plan with
/// count=0 and `cursor_slot` = `DIGITMASK_CURSOR_ERROR` on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_render_plan(
    format: *const Format,
    value: *const c_char,
) -> DigitmaskRenderPlan {
    let Some(format) = (unsafe { format.as_ref() }) else {
        return error_plan();
    };
    let Some(value) = raw_value(format, value) else {
        return error_plan();
    };
    plan_to_c(&derive_render_plan(format, &value))
}

/// Free a plan returned by `digitmask_render_plan` or `digitmask_input_render`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_free_render_plan(plan: DigitmaskRenderPlan) {
    if plan.segments.is_null() || plan.count == 0 {
        return;
    }
    let segments = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(plan.segments, plan.count)) };
    for s in segments.iter() {
        free_c_str(s.text);
    }
}

// ── Masked input field ──────────────────────────────────────────

/// Create an input field over a copy of `format` with an empty value.
/// Returns NULL if `format` is NULL. Free with `digitmask_input_free`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_new(format: *const Format, strip_non_digits: c_int) -> *mut MaskedInput {
    let Some(format) = (unsafe { format.as_ref() }) else {
        return ptr::null_mut();
    };
    let policy = if strip_non_digits != 0 {
        InputPolicy::StripNonDigits
    } else {
        InputPolicy::Strict
    };
    Box::into_raw(Box::new(MaskedInput::new(format.clone()).with_policy(policy)))
}

/// Free an input field created by `digitmask_input_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_free(input: *mut MaskedInput) {
    if !input.is_null() {
        drop(unsafe { Box::from_raw(input) });
    }
}

/// Type one character (a Unicode scalar value).
/// Returns 1 if accepted, 0 if rejected, -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_type(input: *mut MaskedInput, ch: u32) -> c_int {
    let Some(ch) = char::from_u32(ch) else {
        return -1;
    };
    unsafe { press(input, &EditKey::Char(ch)) }
}

/// Delete the last digit. Returns 1 if accepted, -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_backspace(input: *mut MaskedInput) -> c_int {
    unsafe { press(input, &EditKey::Backspace) }
}

/// Delete every digit. Returns 1 if accepted, -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_clear(input: *mut MaskedInput) -> c_int {
    unsafe { press(input, &EditKey::Clear) }
}

/// Paste text after the current digits.
/// Returns 1 if accepted, 0 if rejected, -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_paste(input: *mut MaskedInput, text: *const c_char) -> c_int {
    let Some(text) = cstr_to_str(text) else {
        return -1;
    };
    unsafe { press(input, &EditKey::Paste(text.to_string())) }
}

/// Current raw value. Caller frees with `digitmask_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_value(input: *const MaskedInput) -> *mut c_char {
    let Some(input) = (unsafe { input.as_ref() }) else {
        return ptr::null_mut();
    };
    str_to_c(input.value().as_str())
}

/// Current display text. Caller frees with `digitmask_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_text(input: *const MaskedInput, placeholder: u32) -> *mut c_char {
    let Some(input) = (unsafe { input.as_ref() }) else {
        return ptr::null_mut();
    };
    let Some(placeholder) = char::from_u32(placeholder) else {
        return ptr::null_mut();
    };
    str_to_c(&input.text(placeholder))
}

/// Current render plan. Caller frees with `digitmask_free_render_plan`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_render(input: *const MaskedInput) -> DigitmaskRenderPlan {
    let Some(input) = (unsafe { input.as_ref() }) else {
        return error_plan();
    };
    plan_to_c(&input.render())
}

/// Enable or disable the field (affects colors only).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_set_enabled(input: *mut MaskedInput, enabled: c_int) {
    if let Some(input) = unsafe { input.as_mut() } {
        input.set_enabled(enabled != 0);
    }
}

/// Mark the field focused or unfocused (affects divider color only).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_set_focused(input: *mut MaskedInput, focused: c_int) {
    if let Some(input) = unsafe { input.as_mut() } {
        input.set_focused(focused != 0);
    }
}

/// Color of the segment at `format_index` as 0xRRGGBB, or -1 when the index
/// is out of range.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_input_segment_color(input: *const MaskedInput, format_index: usize) -> i64 {
    let Some(input) = (unsafe { input.as_ref() }) else {
        return -1;
    };
    let plan = input.render();
    let Some(segment) = plan.segments().get(format_index) else {
        return -1;
    };
    let c = input.segment_color(segment);
    (i64::from(c.r) << 16) | (i64::from(c.g) << 8) | i64::from(c.b)
}

// ── Memory ──────────────────────────────────────────────────────

/// Free a heap-allocated C string returned by digitmask functions.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn digitmask_free_str(s: *mut c_char) {
    free_c_str(s);
}

// ── Internal helpers ────────────────────────────────────────────

fn cstr_to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

fn str_to_c(s: &str) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

fn set_error(out: *mut *mut c_char, msg: &str) {
    if !out.is_null() {
        unsafe {
            *out = str_to_c(msg);
        }
    }
}

fn free_c_str(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

fn raw_value(format: &Format, value: *const c_char) -> Option<RawValue> {
    RawValue::new(cstr_to_str(value)?, format).ok()
}

fn cursor_to_c(cursor: Option<usize>) -> isize {
    cursor
        .and_then(|i| isize::try_from(i).ok())
        .unwrap_or(DIGITMASK_CURSOR_NONE)
}

unsafe fn press(input: *mut MaskedInput, key: &EditKey) -> c_int {
    let Some(input) = (unsafe { input.as_mut() }) else {
        return -1;
    };
    match input.press(key) {
        Ok(_) => 1,
        Err(_) => 0,
    }
}

fn error_plan() -> DigitmaskRenderPlan {
    DigitmaskRenderPlan {
        segments: ptr::null_mut(),
        count: 0,
        cursor_slot: DIGITMASK_CURSOR_ERROR,
    }
}

fn plan_to_c(plan: &RenderPlan<'_>) -> DigitmaskRenderPlan {
    let segments: Box<[DigitmaskSegment]> = plan
        .segments()
        .iter()
        .map(|s| match *s {
            Segment::Literal(text) => DigitmaskSegment {
                kind: DIGITMASK_SEGMENT_LITERAL,
                text: str_to_c(text),
            },
            Segment::Digit(Some(d)) => DigitmaskSegment {
                kind: DIGITMASK_SEGMENT_FILLED,
                text: str_to_c(d.encode_utf8(&mut [0; 4])),
            },
            Segment::Digit(None) => DigitmaskSegment {
                kind: DIGITMASK_SEGMENT_EMPTY,
                text: str_to_c(""),
            },
        })
        .collect();
    let count = segments.len();
    let segments = if count == 0 {
        ptr::null_mut()
    } else {
        Box::into_raw(segments).cast::<DigitmaskSegment>()
    };
    DigitmaskRenderPlan {
        segments,
        count,
        cursor_slot: cursor_to_c(plan.cursor_slot()),
    }
}
