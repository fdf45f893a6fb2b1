//! # StatusBar Component
//!
//! Top line showing deck progress and the swipe tally.
//!
//! ## Stateless Component
//!
//! StatusBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```rust,ignore
//! let mut bar = StatusBar::new(2, 6, 1, 0, "Liked: Ramen Night".to_string());
//! bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Exhausted**: `"Swipedeck | done (6) | ♥ 4  ✕ 2 | <status>"`
//! 2. **In progress**: `"Swipedeck | 3/6 | ♥ 1  ✕ 1 | <status>"`
//! 3. The status segment is dropped when empty.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct StatusBar {
    /// Deck index (0-based position of the active card)
    pub index: usize,
    pub total: usize,
    pub liked: usize,
    pub passed: usize,
    /// Transient status (e.g., "Liked: Ramen Night")
    pub status_message: String,
}

impl StatusBar {
    pub fn new(index: usize, total: usize, liked: usize, passed: usize, status_message: String) -> Self {
        Self {
            index,
            total,
            liked,
            passed,
            status_message,
        }
    }

    fn text(&self) -> String {
        let progress = if self.index >= self.total {
            format!("done ({})", self.total)
        } else {
            format!("{}/{}", self.index + 1, self.total)
        };
        let mut text = format!(
            "Swipedeck | {progress} | ♥ {}  ✕ {}",
            self.liked, self.passed
        );
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
