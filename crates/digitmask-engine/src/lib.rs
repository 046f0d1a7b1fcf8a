//! Format-driven input engine for masked digit fields.
//!
//! Every operation is a pure function of a [`Format`](digitmask_core::format::Format)
//! and a [`RawValue`](digitmask_core::value::RawValue), plus a proposed edit:
//!
//! - [`assignment`] -- Which digit lands in which slot, and where the cursor is
//! - [`render`] -- Render plan derivation (feature `render`)
//! - [`accept`] -- Accept or reject a proposed raw value (feature `edit`)
//! - [`keys`] -- Keystrokes and backspace mapped onto proposed values (feature `edit`)
//! - [`style`] -- Color selection for mask, digits and dividers (feature `style`)
//! - [`handle`] -- Optional host-side state container (feature `handle`)
//!
//! The host owns the raw value. After each accepted edit it swaps in the new
//! value and derives a fresh render plan; nothing is cached between calls.

pub mod assignment;

#[cfg(feature = "edit")]
pub mod accept;
#[cfg(feature = "handle")]
pub mod handle;
#[cfg(feature = "edit")]
pub mod keys;
#[cfg(feature = "render")]
pub mod render;
#[cfg(feature = "style")]
pub mod style;
