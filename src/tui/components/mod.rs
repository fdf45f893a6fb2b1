//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `StatusBar`: Top line with progress and the swipe tally
//! - `CardWidget`: One card face, styled by tone
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `DeckPane`: The card stack; turns drags on the top card into gestures
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props", not by reaching into global
//! state:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! DeckPane::new(&deck, &mut tui.pane).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── card.rs        (card face, placement, tilt)
//! ├── deck_pane.rs   (stack painter + gesture input)
//! └── status_bar.rs  (top line)
//! ```

pub mod card;
pub mod deck_pane;
mod status_bar;

pub use card::{CardWidget, TerminalCards, Tone};
pub use deck_pane::{DeckPane, DeckPaneState};
pub use status_bar::StatusBar;
