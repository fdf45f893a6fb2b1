//! # Gesture Tracker
//!
//! Owns the active card's offset and the pointer currently dragging it.
//!
//! ```text
//! begin(p)      claim pointer p, offset ← (0,0)
//! sample(p, d)  offset ← d          (cumulative since begin; unfiltered)
//! release(p, d) offset ← d, pointer freed, caller decides what happens next
//! ```
//!
//! The two transitions that follow a release live here too, since they
//! animate the same value: [`GestureTracker::snap_back`] and
//! [`GestureTracker::force_exit`]. Their completion comes back out of
//! [`GestureTracker::tick`].

use std::time::Duration;

use log::{debug, trace};

use crate::core::animation::{AnimatedXY, Easing, SpringConfig, interpolate};
use crate::core::decision::Direction;
use crate::core::geometry::Offset;

/// Identifies one pointer (mouse button, touch contact) for the life of a
/// gesture.
pub type PointerId = u64;

/// The transitions the active card can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    SnapBack,
    ForceExit(Direction),
}

/// How drag distance maps to card tilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationConfig {
    /// Tilt at the edge of the input domain, in degrees.
    pub max_deg: f64,
    /// Input domain half-width, in viewport widths.
    pub span: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            max_deg: 120.0,
            span: 1.5,
        }
    }
}

/// Tilt for a horizontal offset: linear over `[-span·W, 0, span·W]` onto
/// `[-max, 0, max]`, clamped beyond. Purely visual.
pub fn rotation_deg(dx: f64, viewport_width: f64, config: RotationConfig) -> f64 {
    let edge = config.span * viewport_width;
    if edge <= 0.0 {
        return 0.0;
    }
    interpolate(
        dx,
        [-edge, 0.0, edge],
        [-config.max_deg, 0.0, config.max_deg],
    )
}

#[derive(Debug, Default)]
pub struct GestureTracker {
    pointer: Option<PointerId>,
    position: AnimatedXY<Transition>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Offset {
        self.position.value()
    }

    /// Pointer holding the active card, if a drag is in progress.
    pub fn pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }

    /// The transition in flight, if any.
    pub fn transition(&self) -> Option<Transition> {
        self.position.running()
    }

    /// No drag and no transition: a new gesture may start.
    pub fn is_settled(&self) -> bool {
        self.pointer.is_none() && !self.position.is_animating()
    }

    /// Claim `pointer` for a new gesture. Fails unless settled.
    pub fn begin(&mut self, pointer: PointerId) -> bool {
        if !self.is_settled() {
            trace!("gesture begin from pointer {pointer} refused: not settled");
            return false;
        }
        self.pointer = Some(pointer);
        self.position.set_value(Offset::ZERO);
        debug!("gesture started (pointer {pointer})");
        true
    }

    /// Apply a move sample. Samples from any pointer but the owner are dropped.
    pub fn sample(&mut self, pointer: PointerId, delta: Offset) -> bool {
        if self.pointer != Some(pointer) {
            return false;
        }
        self.position.set_value(delta);
        true
    }

    /// End the gesture at `delta`. Returns the final offset if `pointer`
    /// owned the gesture.
    pub fn release(&mut self, pointer: PointerId, delta: Offset) -> Option<Offset> {
        if self.pointer != Some(pointer) {
            return None;
        }
        self.pointer = None;
        self.position.set_value(delta);
        debug!("gesture released at ({:.1}, {:.1})", delta.dx, delta.dy);
        Some(delta)
    }

    /// End the gesture where it currently is (pointer cancel, focus loss).
    pub fn cancel(&mut self) -> Option<Offset> {
        let pointer = self.pointer?;
        let at = self.offset();
        self.release(pointer, at)
    }

    /// Spring back to rest.
    pub fn snap_back(&mut self, spring: SpringConfig) {
        self.position.spring_to(Offset::ZERO, spring, Transition::SnapBack);
    }

    /// Carry the card fully off-screen in `direction` over `duration`.
    pub fn force_exit(&mut self, direction: Direction, viewport_width: f64, duration: Duration) {
        self.position.timing_to(
            direction.exit_target(viewport_width),
            duration,
            Easing::EaseInOut,
            Transition::ForceExit(direction),
        );
    }

    /// Advance the running transition. Returns it on the frame it lands.
    pub fn tick(&mut self, dt: Duration) -> Option<Transition> {
        self.position.tick(dt)
    }

    /// Drop any drag or transition and return to rest. Returns the aborted
    /// transition, if there was one.
    pub fn reset(&mut self) -> Option<Transition> {
        self.pointer = None;
        self.position.set_value(Offset::ZERO)
    }
}
