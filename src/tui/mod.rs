//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the deck, and
//! translates mouse and keyboard events into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. It plays
//! the host's part for the core deck: pointer source, frame clock, card
//! drawing, and the layout animation after each advance.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (exit, snap-back, stack settle): ticks and draws every
//!   ~16ms so transitions land on time.
//! - **Idle**: sleeps up to 250ms, only redraws on events or resize.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::cell::RefCell;
use std::io::stdout;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture};
use crossterm::execute;

use crate::core::cards;
use crate::core::config::ResolvedConfig;
use crate::core::item::Card;
use crate::core::{Action, Deck, Direction, Effect};
use crate::tui::component::EventHandler;
use crate::tui::components::DeckPaneState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Titles swiped each way, recorded by the deck's handlers.
#[derive(Debug, Default)]
pub struct SwipeTally {
    pub liked: Vec<String>,
    pub passed: Vec<String>,
}

/// TUI-specific presentation state (not part of core deck logic)
pub struct TuiState {
    pub pane: DeckPaneState,
    pub tally: Rc<RefCell<SwipeTally>>,
    pub status_message: String,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            pane: DeckPaneState::new(),
            tally: Rc::default(),
            status_message: String::from("Drag a card or use the arrow keys"),
        }
    }
}

/// Build a deck whose handlers feed the tally.
pub fn build_deck(
    data: Arc<[Card]>,
    viewport_width: f64,
    config: &ResolvedConfig,
    tally: &Rc<RefCell<SwipeTally>>,
) -> Deck<Card> {
    let liked = Rc::clone(tally);
    let passed = Rc::clone(tally);
    Deck::new(data, viewport_width, config.settings)
        .on_swipe_right(move |card: &Card| {
            info!("Liked {} ({})", card.title, card.id);
            liked.borrow_mut().liked.push(card.title.clone());
        })
        .on_swipe_left(move |card: &Card| {
            info!("Passed {} ({})", card.title, card.id);
            passed.borrow_mut().passed.push(card.title.clone());
        })
}

/// Fresh copy of the deck's source list. Always a new allocation, so the
/// deck treats it as a new list.
fn reload_data(config: &ResolvedConfig) -> Result<Arc<[Card]>, cards::CardsError> {
    match &config.deck_file {
        Some(path) => cards::load_cards(path),
        None => Ok(cards::sample_cards()),
    }
}

/// Apply one event. Returns false when the app should quit.
fn handle_event(
    event: TuiEvent,
    deck: &mut Deck<Card>,
    tui: &mut TuiState,
    config: &ResolvedConfig,
) -> bool {
    match event {
        TuiEvent::Quit => return false,
        // Resize just needs a redraw; width is synced before each frame
        TuiEvent::Resize => {}
        TuiEvent::Reload => match reload_data(config) {
            Ok(data) => {
                deck.set_data(data);
                tui.pane.clear_drag();
                tui.status_message = format!("Reloaded {} cards", deck.data().len());
            }
            Err(e) => {
                warn!("Reload failed: {e}");
                tui.status_message = format!("Reload failed: {e}");
            }
        },
        other => {
            if let Some(action) = tui.pane.handle_event(&other) {
                apply(deck, tui, action);
            }
        }
    }
    true
}

/// Run an action through the deck and react to the effect.
fn apply(deck: &mut Deck<Card>, tui: &mut TuiState, action: Action) {
    let effect = deck.update(action);
    if !matches!(action, Action::Tick(_)) {
        debug!("{action:?} -> {effect:?}");
    }
    match effect {
        Effect::Ignored if matches!(action, Action::GestureStart { .. }) => {
            // Deck refused the gesture; don't track the drag either
            tui.pane.clear_drag();
        }
        Effect::Swiped { direction, .. } => {
            tui.pane.start_settle(deck.settings().style.offset_step);
            let tally = tui.tally.borrow();
            let last = match direction {
                Direction::Right => tally.liked.last().map(|t| format!("Liked: {t}")),
                Direction::Left => tally.passed.last().map(|t| format!("Passed: {t}")),
            };
            drop(tally);
            if let Some(status) = last {
                tui.status_message = status;
            }
        }
        _ => {}
    }
}

/// Frame deltas for ticking transitions. Only time between consecutive
/// animating frames counts; the first animating frame after idle ticks by
/// zero, so a transition never absorbs the wait before it started.
#[derive(Debug, Default)]
struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    fn tick(&mut self, now: Instant, animating: bool) -> Option<Duration> {
        if !animating {
            self.last = None;
            return None;
        }
        let dt = self.last.map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        Some(dt)
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
        info!("Terminal modes enabled (mouse capture, focus change)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableFocusChange, DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig, data: Arc<[Card]>) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    let mut tui = TuiState::new();
    let width = f64::from(ui::deck_area(terminal.get_frame().area()).width);
    let mut deck = build_deck(data, width, &config, &tui.tally);

    let mut clock = FrameClock::default();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        // Keep the viewport width in step with the terminal
        let area = ui::deck_area(terminal.get_frame().area());
        let width = f64::from(area.width);
        if width > 0.0 && width != deck.viewport_width() {
            deck.update(Action::Resize { width });
            needs_redraw = true;
        }

        let animating = deck.is_animating() || tui.pane.is_animating();
        if let Some(dt) = clock.tick(Instant::now(), animating) {
            apply(&mut deck, &mut tui, Action::Tick(dt));
            tui.pane.tick(dt);
            needs_redraw = true;
        }

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &deck, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if animating || deck.is_dragging() {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        let first_event = match poll_event_timeout(timeout) {
            Ok(event) => event,
            Err(e) => break Err(e),
        };
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        let pending = std::iter::from_fn(|| poll_event_immediate().ok().flatten());
        for event in first_event.into_iter().chain(pending) {
            if !handle_event(event, &mut deck, &mut tui, &config) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break Ok(());
        }
    };

    let tally = tui.tally.borrow();
    info!(
        "Exiting: {} liked, {} passed, stopped at {}/{}",
        tally.liked.len(),
        tally.passed.len(),
        deck.index(),
        deck.data().len()
    );
    drop(tally);

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeckSettings;
    use crate::core::Offset;
    use ratatui::layout::Rect;

    fn test_config() -> ResolvedConfig {
        ResolvedConfig {
            deck_file: None,
            settings: DeckSettings::default(),
        }
    }

    fn settle(deck: &mut Deck<Card>, tui: &mut TuiState) {
        for _ in 0..200 {
            apply(deck, tui, Action::Tick(FRAME_INTERVAL));
            if !deck.is_animating() {
                return;
            }
        }
        panic!("deck never settled");
    }

    #[test]
    fn test_handlers_feed_tally_and_status() {
        let config = test_config();
        let mut tui = TuiState::new();
        let mut deck = build_deck(cards::sample_cards(), 80.0, &config, &tui.tally);

        assert!(handle_event(TuiEvent::SwipeRight, &mut deck, &mut tui, &config));
        settle(&mut deck, &mut tui);
        assert!(handle_event(TuiEvent::SwipeLeft, &mut deck, &mut tui, &config));
        settle(&mut deck, &mut tui);

        let tally = tui.tally.borrow();
        assert_eq!(tally.liked, vec!["Ramen Night".to_string()]);
        assert_eq!(tally.passed, vec!["Ridge Trail".to_string()]);
        assert_eq!(tui.status_message, "Passed: Ridge Trail");
        assert_eq!(deck.index(), 2);
        assert!(tui.pane.is_animating(), "advance starts the stack settle");
    }

    #[test]
    fn test_mouse_drag_swipes_through_pane() {
        let config = test_config();
        let mut tui = TuiState::new();
        let mut deck = build_deck(cards::sample_cards(), 80.0, &config, &tui.tally);
        tui.pane.active_rect = Some(Rect::new(2, 1, 76, 14));

        let events = [
            TuiEvent::PointerDown { pointer: 0, col: 30, row: 5 },
            TuiEvent::PointerDrag { pointer: 0, col: 45, row: 6 },
            TuiEvent::PointerUp { pointer: 0, col: 55, row: 6 },
        ];
        for event in events {
            handle_event(event, &mut deck, &mut tui, &config);
        }
        assert!(deck.is_animating());
        assert_eq!(deck.offset(), Offset::new(25.0, 1.0));
        settle(&mut deck, &mut tui);
        assert_eq!(tui.tally.borrow().liked.len(), 1);
    }

    #[test]
    fn test_reload_resets_index() {
        let config = test_config();
        let mut tui = TuiState::new();
        let mut deck = build_deck(cards::sample_cards(), 80.0, &config, &tui.tally);

        handle_event(TuiEvent::SwipeRight, &mut deck, &mut tui, &config);
        settle(&mut deck, &mut tui);
        assert_eq!(deck.index(), 1);

        handle_event(TuiEvent::Reload, &mut deck, &mut tui, &config);
        assert_eq!(deck.index(), 0);
        assert_eq!(tui.status_message, "Reloaded 6 cards");
    }

    #[test]
    fn test_refused_gesture_clears_drag() {
        let config = test_config();
        let mut tui = TuiState::new();
        let mut deck = build_deck(cards::sample_cards(), 80.0, &config, &tui.tally);
        tui.pane.active_rect = Some(Rect::new(2, 1, 76, 14));

        handle_event(TuiEvent::SwipeLeft, &mut deck, &mut tui, &config);
        handle_event(
            TuiEvent::PointerDown { pointer: 0, col: 30, row: 5 },
            &mut deck,
            &mut tui,
            &config,
        );
        assert!(tui.pane.drag_origin.is_none());
    }

    #[test]
    fn test_frame_clock_ignores_idle_time() {
        let t0 = Instant::now();
        let mut clock = FrameClock::default();

        assert_eq!(clock.tick(t0, false), None);
        // Transition started after 240ms idle: none of that wait counts
        let start = t0 + Duration::from_millis(240);
        assert_eq!(clock.tick(start, true), Some(Duration::ZERO));
        assert_eq!(clock.tick(start + FRAME_INTERVAL, true), Some(FRAME_INTERVAL));

        // Back to idle, then a long gap before the next transition
        assert_eq!(clock.tick(start + Duration::from_millis(400), false), None);
        assert_eq!(clock.tick(start + Duration::from_secs(5), true), Some(Duration::ZERO));
    }

    #[test]
    fn test_key_swipe_after_idle_runs_full_exit() {
        let config = test_config();
        let mut tui = TuiState::new();
        let mut deck = build_deck(cards::sample_cards(), 80.0, &config, &tui.tally);
        let mut clock = FrameClock::default();

        let t0 = Instant::now();
        assert_eq!(clock.tick(t0, deck.is_animating()), None);
        handle_event(TuiEvent::SwipeRight, &mut deck, &mut tui, &config);

        // Frames 16ms apart, first one 240ms after the idle pass
        let mut now = t0 + Duration::from_millis(240);
        let mut elapsed = Duration::ZERO;
        while deck.is_animating() {
            let dt = clock.tick(now, true).expect("animating frame ticks");
            elapsed += dt;
            apply(&mut deck, &mut tui, Action::Tick(dt));
            now += FRAME_INTERVAL;
            assert!(elapsed <= Duration::from_secs(1), "exit never finished");
        }

        assert!(elapsed >= deck.settings().out_duration);
        assert_eq!(deck.index(), 1);
    }

    #[test]
    fn test_quit_stops_loop() {
        let config = test_config();
        let mut tui = TuiState::new();
        let mut deck = build_deck(cards::sample_cards(), 80.0, &config, &tui.tally);
        assert!(!handle_event(TuiEvent::Quit, &mut deck, &mut tui, &config));
    }
}
