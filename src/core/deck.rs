//! # Deck
//!
//! The one stateful object: a list, an index into it, and the tracker that
//! owns the active card's offset.
//!
//! ```text
//! Deck<T>
//! ├── data: Arc<[T]>           // caller's list, identity-compared
//! ├── index: usize             // only persistent state; never decreases per list
//! ├── tracker: GestureTracker  // pointer + offset + running transition
//! ├── viewport_width: f64      // W
//! ├── settings: DeckSettings   // threshold, exit duration, spring, stack style
//! └── handlers: SwipeHandlers  // on_swipe_left / on_swipe_right
//! ```
//!
//! Lifecycle of one swipe:
//!
//! ```text
//! GestureStart → GestureMove* → GestureRelease
//!                                  │
//!              ┌───────────────────┴──────────────┐
//!          |dx| > t·W                          otherwise
//!       force_exit (timed)                 snap_back (spring)
//!              │ Tick* completes                  │ Tick* completes
//!   callback(item) → offset (0,0) → index+1     offset (0,0)
//! ```
//!
//! Index only moves on a completed forced exit. Replacing the list with a
//! different `Arc` aborts anything in flight and restarts at 0.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::core::action::{Action, Effect};
use crate::core::animation::SpringConfig;
use crate::core::decision::{self, DEFAULT_THRESHOLD, Direction};
use crate::core::geometry::Offset;
use crate::core::gesture::{GestureTracker, Transition};
use crate::core::item::Item;
use crate::core::stack::{self, CardRenderer, DeckView, Rendered, StackStyle};

/// Duration of the forced exit transition.
pub const DEFAULT_OUT_DURATION: Duration = Duration::from_millis(250);

/// Tunables for a deck. Defaults match the stock swipe feel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckSettings {
    /// Fraction of the viewport width a release must pass.
    pub threshold: f64,
    pub out_duration: Duration,
    pub spring: SpringConfig,
    pub style: StackStyle,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            out_duration: DEFAULT_OUT_DURATION,
            spring: SpringConfig::default(),
            style: StackStyle::default(),
        }
    }
}

type Handler<T> = Box<dyn FnMut(&T)>;

/// Per-direction notifications. Unset handlers are no-ops.
pub struct SwipeHandlers<T> {
    on_swipe_left: Handler<T>,
    on_swipe_right: Handler<T>,
}

impl<T> Default for SwipeHandlers<T> {
    fn default() -> Self {
        Self {
            on_swipe_left: Box::new(|_| {}),
            on_swipe_right: Box::new(|_| {}),
        }
    }
}

impl<T> SwipeHandlers<T> {
    fn notify(&mut self, direction: Direction, item: &T) {
        match direction {
            Direction::Left => (self.on_swipe_left)(item),
            Direction::Right => (self.on_swipe_right)(item),
        }
    }
}

pub struct Deck<T: Item> {
    data: Arc<[T]>,
    index: usize,
    tracker: GestureTracker,
    viewport_width: f64,
    settings: DeckSettings,
    handlers: SwipeHandlers<T>,
}

impl<T: Item> Deck<T> {
    pub fn new(data: Arc<[T]>, viewport_width: f64, settings: DeckSettings) -> Self {
        info!(
            "Deck created with {} items (viewport width {viewport_width})",
            data.len()
        );
        Self {
            data,
            index: 0,
            tracker: GestureTracker::new(),
            viewport_width,
            settings,
            handlers: SwipeHandlers::default(),
        }
    }

    pub fn on_swipe_left(mut self, handler: impl FnMut(&T) + 'static) -> Self {
        self.handlers.on_swipe_left = Box::new(handler);
        self
    }

    pub fn on_swipe_right(mut self, handler: impl FnMut(&T) + 'static) -> Self {
        self.handlers.on_swipe_right = Box::new(handler);
        self
    }

    pub fn data(&self) -> &Arc<[T]> {
        &self.data
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn offset(&self) -> Offset {
        self.tracker.offset()
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn settings(&self) -> &DeckSettings {
        &self.settings
    }

    pub fn active_item(&self) -> Option<&T> {
        self.data.get(self.index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.data.len()
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// True while a snap-back or forced exit is running.
    pub fn is_animating(&self) -> bool {
        self.tracker.transition().is_some()
    }

    /// Replace the list. Only a different `Arc` counts as a new list; the
    /// same allocation passed again is a no-op even if its contents differ.
    ///
    /// A new list aborts any drag or transition without firing a callback
    /// and restarts at index 0.
    pub fn set_data(&mut self, data: Arc<[T]>) -> bool {
        if Arc::ptr_eq(&self.data, &data) {
            return false;
        }
        if let Some(aborted) = self.tracker.reset() {
            warn!("List replaced during {aborted:?}; transition aborted");
        }
        info!(
            "List replaced ({} -> {} items), index {} -> 0",
            self.data.len(),
            data.len(),
            self.index
        );
        self.data = data;
        self.index = 0;
        true
    }

    pub fn update(&mut self, action: Action) -> Effect {
        match action {
            Action::GestureStart { pointer } => {
                if self.is_exhausted() || !self.tracker.begin(pointer) {
                    return Effect::Ignored;
                }
                Effect::None
            }
            Action::GestureMove { pointer, delta } => {
                if self.tracker.sample(pointer, delta) {
                    Effect::None
                } else {
                    Effect::Ignored
                }
            }
            Action::GestureRelease { pointer, delta } => match self.tracker.release(pointer, delta) {
                Some(at) => self.decide(at),
                None => Effect::Ignored,
            },
            Action::GestureCancel => match self.tracker.cancel() {
                Some(at) => self.decide(at),
                None => Effect::Ignored,
            },
            Action::Swipe(direction) => {
                if self.is_exhausted() || !self.tracker.is_settled() {
                    return Effect::Ignored;
                }
                debug!("Programmatic swipe {direction} at index {}", self.index);
                self.tracker
                    .force_exit(direction, self.viewport_width, self.settings.out_duration);
                Effect::ExitStarted(direction)
            }
            Action::Tick(dt) => match self.tracker.tick(dt) {
                Some(Transition::SnapBack) => Effect::SnapBackDone,
                Some(Transition::ForceExit(direction)) => self.complete_swipe(direction),
                None => Effect::None,
            },
            Action::Resize { width } => {
                if !(width.is_finite() && width > 0.0) {
                    warn!("Ignoring invalid viewport width {width}");
                    return Effect::Ignored;
                }
                self.viewport_width = width;
                Effect::None
            }
        }
    }

    /// Classify a release and start the matching transition.
    fn decide(&mut self, at: Offset) -> Effect {
        let outcome = decision::classify(at.dx, self.viewport_width, self.settings.threshold);
        debug!(
            "Release at dx={:.1} (limit ±{:.1}) → {outcome:?}",
            at.dx,
            self.settings.threshold * self.viewport_width
        );
        match outcome.direction() {
            Some(direction) => {
                self.tracker
                    .force_exit(direction, self.viewport_width, self.settings.out_duration);
                Effect::ExitStarted(direction)
            }
            None => {
                self.tracker.snap_back(self.settings.spring);
                Effect::SnapBackStarted
            }
        }
    }

    /// Forced exit landed: notify with the dismissed item, then advance.
    fn complete_swipe(&mut self, direction: Direction) -> Effect {
        let position = self.index;
        match self.data.get(position) {
            Some(item) => {
                info!("Swiped {direction}: item {:?} at {position}", item.id());
                self.handlers.notify(direction, item);
            }
            None => warn!("Swipe completed with no item at {position}"),
        }
        self.tracker.reset();
        self.index += 1;
        Effect::Swiped {
            direction,
            position,
        }
    }

    /// The render-time partition for the current state.
    pub fn view(&self) -> DeckView<'_, T> {
        stack::derive(
            &self.data,
            self.index,
            self.tracker.offset(),
            self.viewport_width,
            &self.settings.style,
        )
    }

    pub fn render<R: CardRenderer<T>>(&self, renderer: &mut R) -> Rendered<T::Id, R::Output> {
        self.view().render(renderer)
    }
}
