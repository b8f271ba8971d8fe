//! Error types for conveyor construction and insertion.

use std::fmt;

use thiserror::Error;

/// Result type for conveyor operations.
pub type Result<T> = std::result::Result<T, ConveyorError>;

/// A junction declared at a position the named belt never reaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfBounds {
    pub position: usize,
    pub belt: String,
    pub length: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position {} on belt {} (length {})",
            self.position, self.belt, self.length
        )
    }
}

/// Errors raised while declaring, building or feeding a conveyor system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConveyorError {
    /// A belt was registered with fewer than one slot.
    #[error("belt {belt} must have at least one slot, got length {length}")]
    InvalidLength { belt: String, length: usize },

    /// A belt name was registered twice.
    #[error("belt {0} is already registered")]
    DuplicateBelt(String),

    /// One or more referenced belts were never registered.
    #[error("unknown belts: {}", .0.join(", "))]
    UnknownBelt(Vec<String>),

    /// One or more junctions sit past the end of a belt they name.
    #[error("out-of-bounds junctions: {}", join_display(.0))]
    OutOfBoundsPosition(Vec<OutOfBounds>),
}

fn join_display(items: &[OutOfBounds]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_list_every_offender() {
        let unknown = ConveyorError::UnknownBelt(vec!["C".into(), "D".into()]);
        assert_eq!(unknown.to_string(), "unknown belts: C, D");

        let bounds = ConveyorError::OutOfBoundsPosition(vec![
            OutOfBounds {
                position: 3,
                belt: "A".into(),
                length: 3,
            },
            OutOfBounds {
                position: 7,
                belt: "B".into(),
                length: 5,
            },
        ]);
        assert_eq!(
            bounds.to_string(),
            "out-of-bounds junctions: position 3 on belt A (length 3), position 7 on belt B (length 5)"
        );
    }
}
