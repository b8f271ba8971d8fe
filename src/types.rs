//! Shared primitive types used across the conveyor library.

// An item travelling on a belt is represented by a plain integer.
pub type ItemValue = i64;

/*
 * The width of a single slot field when a belt is rendered as text.
 */
pub const SLOT_WIDTH: usize = 2;

/// Marker rendered in place of an empty slot.
pub const EMPTY_MARKER: char = 'X';
