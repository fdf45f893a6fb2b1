//! # Actions
//!
//! Everything that can happen to a deck becomes an `Action`.
//! Pointer goes down on the top card? `Action::GestureStart`.
//! A frame passes? `Action::Tick(dt)`.
//!
//! `Deck::update()` applies an action and returns an `Effect` describing what
//! changed, so the host can react (start a layout animation, redraw, log).
//!
//! ```text
//! Deck + Action  →  update()  →  Effect
//! ```
//!
//! The one input that is not an action is replacing the item list, since it
//! carries the list itself: see `Deck::set_data`.

use std::time::Duration;

use crate::core::decision::Direction;
use crate::core::geometry::Offset;
use crate::core::gesture::PointerId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// A pointer went down on the active card.
    GestureStart { pointer: PointerId },
    /// Cumulative displacement since the gesture started.
    GestureMove { pointer: PointerId, delta: Offset },
    /// The pointer lifted with this final displacement.
    GestureRelease { pointer: PointerId, delta: Offset },
    /// The gesture was interrupted; treated as a release where it stands.
    GestureCancel,
    /// Swipe the active card away without a drag.
    Swipe(Direction),
    /// Advance running transitions.
    Tick(Duration),
    /// The viewport width changed.
    Resize { width: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Applied; nothing for the host to do beyond redrawing.
    None,
    /// Refused: not settled, wrong pointer, nothing to swipe, bad input.
    Ignored,
    SnapBackStarted,
    ExitStarted(Direction),
    SnapBackDone,
    /// A forced exit finished. The callback for `direction` has run with the
    /// item at `position`, and the index now points past it.
    Swiped { direction: Direction, position: usize },
}
