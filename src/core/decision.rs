//! # Swipe Decision
//!
//! Runs once per gesture, at release. Only the horizontal offset is
//! consulted; vertical drag is cosmetic.
//!
//! ```text
//!   dx >  threshold·W   →  Right
//!   dx < -threshold·W   →  Left
//!   otherwise           →  SnapBack
//! ```

use std::fmt;

use crate::core::geometry::Offset;

/// Fraction of the viewport width a release must pass to count as a swipe.
pub const DEFAULT_THRESHOLD: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Where a card swiped this way ends up: one viewport width off to the
    /// side, vertically back at rest.
    pub fn exit_target(self, viewport_width: f64) -> Offset {
        Offset::new(self.sign() * viewport_width, 0.0)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// What a release resolves to. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Left,
    Right,
    SnapBack,
}

impl SwipeOutcome {
    pub fn direction(self) -> Option<Direction> {
        match self {
            SwipeOutcome::Left => Some(Direction::Left),
            SwipeOutcome::Right => Some(Direction::Right),
            SwipeOutcome::SnapBack => None,
        }
    }
}

/// Classify a release at horizontal offset `dx`.
///
/// Comparisons are strict: a release exactly on the threshold snaps back.
pub fn classify(dx: f64, viewport_width: f64, threshold: f64) -> SwipeOutcome {
    let limit = threshold * viewport_width;
    if dx > limit {
        SwipeOutcome::Right
    } else if dx < -limit {
        SwipeOutcome::Left
    } else {
        SwipeOutcome::SnapBack
    }
}
