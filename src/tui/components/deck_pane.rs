//! # DeckPane Component
//!
//! The card stack: paints every layer the deck renders and turns mouse
//! drags on the top card into gesture actions.
//!
//! ## Architecture
//!
//! `DeckPane` is a transient component (created each frame) that wraps
//! `&'a mut DeckPaneState` (persistent state) and `&'a Deck<Card>` (props).
//!
//! The render pass records where the active card sits at rest, so the next
//! mouse press can be hit-tested against it. Gestures only start on a
//! settled card, so the rest rect is always the right target.
//!
//! ## Stack settle
//!
//! When a swipe completes, every remaining card moves up one step. The pane
//! eases that change with its own spring (`settle`), purely cosmetic.

use std::time::Duration;

use log::trace;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};

use crate::core::animation::{AnimatedXY, SpringConfig};
use crate::core::decision::{self, Direction};
use crate::core::gesture::PointerId;
use crate::core::item::Card;
use crate::core::stack::Rendered;
use crate::core::{Action, Deck, Offset};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::card::{TerminalCards, Tone, paint_card};
use crate::tui::event::TuiEvent;

/// Columns left free on each side of a card.
const H_MARGIN: u16 = 2;
/// Tallest a card gets, however much room there is.
const MAX_CARD_HEIGHT: u16 = 14;
/// Smallest usable card (borders + one line).
const MIN_CARD_HEIGHT: u16 = 3;

/// Persistent state for the deck pane. Lives in `TuiState`.
pub struct DeckPaneState {
    /// Active card's rest rect from the last render (None when exhausted)
    pub active_rect: Option<Rect>,
    /// Pointer and screen position where the current drag began
    pub drag_origin: Option<(PointerId, u16, u16)>,
    /// Cosmetic slide applied to the whole stack after an advance
    pub settle: AnimatedXY<()>,
}

impl Default for DeckPaneState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckPaneState {
    pub fn new() -> Self {
        Self {
            active_rect: None,
            drag_origin: None,
            settle: AnimatedXY::default(),
        }
    }

    /// Start the stack-settle animation after an advance.
    pub fn start_settle(&mut self, step: f64) {
        self.settle.set_value(Offset::new(0.0, step));
        self.settle.spring_to(Offset::ZERO, SpringConfig::default(), ());
    }

    pub fn tick(&mut self, dt: Duration) {
        self.settle.tick(dt);
    }

    pub fn is_animating(&self) -> bool {
        self.settle.is_animating()
    }

    /// Forget any drag in progress (the deck aborted it).
    pub fn clear_drag(&mut self) {
        self.drag_origin = None;
    }
}

impl EventHandler for DeckPaneState {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        match *event {
            TuiEvent::PointerDown { pointer, col, row } => {
                if self.drag_origin.is_some() {
                    return None;
                }
                let on_card = self
                    .active_rect
                    .is_some_and(|r| r.contains(Position::new(col, row)));
                if !on_card {
                    return None;
                }
                self.drag_origin = Some((pointer, col, row));
                Some(Action::GestureStart { pointer })
            }
            TuiEvent::PointerDrag { pointer, col, row } => {
                let (owner, ox, oy) = self.drag_origin?;
                if owner != pointer {
                    return None;
                }
                Some(Action::GestureMove {
                    pointer,
                    delta: delta_from(ox, oy, col, row),
                })
            }
            TuiEvent::PointerUp { pointer, col, row } => {
                let (owner, ox, oy) = self.drag_origin?;
                if owner != pointer {
                    return None;
                }
                self.drag_origin = None;
                Some(Action::GestureRelease {
                    pointer,
                    delta: delta_from(ox, oy, col, row),
                })
            }
            TuiEvent::FocusLost => {
                self.drag_origin.take()?;
                Some(Action::GestureCancel)
            }
            TuiEvent::SwipeLeft => Some(Action::Swipe(Direction::Left)),
            TuiEvent::SwipeRight => Some(Action::Swipe(Direction::Right)),
            _ => None,
        }
    }
}

fn delta_from(ox: u16, oy: u16, col: u16, row: u16) -> Offset {
    Offset::new(
        f64::from(col) - f64::from(ox),
        f64::from(row) - f64::from(oy),
    )
}

/// Rest rect of the active card inside `area`, leaving `stack_room` rows
/// beneath it for the queued cards to peek out.
pub fn card_rect(area: Rect, stack_room: u16) -> Rect {
    let width = area.width.saturating_sub(H_MARGIN * 2);
    let height = area
        .height
        .saturating_sub(stack_room)
        .min(MAX_CARD_HEIGHT)
        .max(MIN_CARD_HEIGHT.min(area.height));
    Rect::new(area.x + H_MARGIN.min(area.width), area.y, width, height)
}

/// Transient render wrapper for the deck.
pub struct DeckPane<'a> {
    deck: &'a Deck<Card>,
    state: &'a mut DeckPaneState,
}

impl<'a> DeckPane<'a> {
    pub fn new(deck: &'a Deck<Card>, state: &'a mut DeckPaneState) -> Self {
        Self { deck, state }
    }

    /// Tone for the active card given where it is being dragged.
    fn active_tone(&self, offset: Offset) -> Tone {
        let settings = self.deck.settings();
        match decision::classify(offset.dx, self.deck.viewport_width(), settings.threshold).direction() {
            Some(direction) => Tone::Leaning(direction),
            None => Tone::Active,
        }
    }
}

impl Component for DeckPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.deck.render(&mut TerminalCards) {
            Rendered::NoMoreCards(face) => {
                self.state.active_rect = None;
                let [centered] = Layout::vertical([Constraint::Length(2)])
                    .flex(Flex::Center)
                    .areas(area);
                frame.render_widget(face, centered);
            }
            Rendered::Cards(layers) => {
                let deepest = layers
                    .iter()
                    .map(|l| if l.interactive { 0.0 } else { l.offset.dy })
                    .fold(0.0_f64, f64::max);
                let stack_room = (deepest.ceil() as u16).min(area.height / 3);
                let rest = card_rect(area, stack_room);
                let settle = self.state.settle.value();

                for layer in layers {
                    let tone = if layer.interactive {
                        self.state.active_rect = Some(rest);
                        self.active_tone(layer.offset)
                    } else {
                        Tone::Queued
                    };
                    trace!(
                        "paint card {} at ({:.1}, {:.1}) rot {:.1}",
                        layer.id,
                        layer.offset.dx,
                        layer.offset.dy,
                        layer.rotation_deg
                    );
                    paint_card(
                        frame.buffer_mut(),
                        area,
                        rest,
                        layer.offset + settle,
                        layer.rotation_deg,
                        layer.content.with_tone(tone),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeckSettings;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn deck_of(titles: &[&str]) -> Deck<Card> {
        let cards: Arc<[Card]> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| Card::new(i.to_string(), *t, format!("{t} body")))
            .collect();
        Deck::new(cards, 40.0, DeckSettings::default())
    }

    fn draw(deck: &Deck<Card>, state: &mut DeckPaneState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|f| DeckPane::new(deck, state).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_top_card_and_records_rect() {
        let deck = deck_of(&["Alpha", "Beta", "Gamma"]);
        let mut state = DeckPaneState::new();
        let text = draw(&deck, &mut state);

        assert!(text.contains("Alpha"));
        assert!(text.contains("Alpha body"));
        let rect = state.active_rect.expect("active card rect");
        assert_eq!(rect.x, H_MARGIN);
        assert_eq!(rect.width, 40 - 2 * H_MARGIN);
    }

    #[test]
    fn test_exhausted_renders_placeholder_only() {
        let deck = deck_of(&[]);
        let mut state = DeckPaneState::new();
        state.active_rect = Some(Rect::new(0, 0, 1, 1));
        let text = draw(&deck, &mut state);

        assert!(text.contains("No more cards"));
        assert!(state.active_rect.is_none());
    }

    #[test]
    fn test_press_outside_card_is_ignored() {
        let mut state = DeckPaneState::new();
        state.active_rect = Some(Rect::new(2, 0, 36, 8));
        let event = TuiEvent::PointerDown {
            pointer: 0,
            col: 39,
            row: 10,
        };
        assert_eq!(state.handle_event(&event), None);
        assert!(state.drag_origin.is_none());
    }

    #[test]
    fn test_drag_produces_cumulative_deltas() {
        let mut state = DeckPaneState::new();
        state.active_rect = Some(Rect::new(2, 0, 36, 8));

        let down = TuiEvent::PointerDown {
            pointer: 0,
            col: 10,
            row: 4,
        };
        assert_eq!(state.handle_event(&down), Some(Action::GestureStart { pointer: 0 }));

        let drag = TuiEvent::PointerDrag {
            pointer: 0,
            col: 25,
            row: 2,
        };
        assert_eq!(
            state.handle_event(&drag),
            Some(Action::GestureMove {
                pointer: 0,
                delta: Offset::new(15.0, -2.0)
            })
        );

        let foreign = TuiEvent::PointerDrag {
            pointer: 1,
            col: 0,
            row: 0,
        };
        assert_eq!(state.handle_event(&foreign), None);

        let up = TuiEvent::PointerUp {
            pointer: 0,
            col: 3,
            row: 4,
        };
        assert_eq!(
            state.handle_event(&up),
            Some(Action::GestureRelease {
                pointer: 0,
                delta: Offset::new(-7.0, 0.0)
            })
        );
        assert!(state.drag_origin.is_none());
    }

    #[test]
    fn test_focus_lost_cancels_only_active_drag() {
        let mut state = DeckPaneState::new();
        assert_eq!(state.handle_event(&TuiEvent::FocusLost), None);

        state.drag_origin = Some((0, 5, 5));
        assert_eq!(state.handle_event(&TuiEvent::FocusLost), Some(Action::GestureCancel));
        assert!(state.drag_origin.is_none());
    }

    #[test]
    fn test_keys_map_to_programmatic_swipes() {
        let mut state = DeckPaneState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::SwipeLeft),
            Some(Action::Swipe(Direction::Left))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::SwipeRight),
            Some(Action::Swipe(Direction::Right))
        );
    }

    #[test]
    fn test_card_rect_leaves_stack_room() {
        let area = Rect::new(0, 1, 40, 20);
        let rect = card_rect(area, 3);
        assert_eq!(rect, Rect::new(2, 1, 36, MAX_CARD_HEIGHT));

        let small = Rect::new(0, 0, 40, 6);
        assert_eq!(card_rect(small, 2).height, 4);
        assert_eq!(card_rect(small, 6).height, MIN_CARD_HEIGHT);
    }

    #[test]
    fn test_settle_animation_runs_and_finishes() {
        let mut state = DeckPaneState::new();
        state.start_settle(1.0);
        assert!(state.is_animating());
        assert_eq!(state.settle.value(), Offset::new(0.0, 1.0));
        state.tick(Duration::from_secs(5));
        assert!(!state.is_animating());
        assert_eq!(state.settle.value(), Offset::ZERO);
    }
}
