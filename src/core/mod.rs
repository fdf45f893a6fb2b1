//! # Core Deck Logic
//!
//! This module contains the swipe-deck behaviour.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Deck (state)         │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • derive() (render)    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    Web     │      │   Tests    │
//!     │  Adapter   │      │  Adapter   │      │ (headless) │
//!     │ (ratatui)  │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`deck`]: The `Deck` struct: index, list, tracker, handlers
//! - [`action`]: The `Action` enum, everything that can happen to a deck
//! - [`gesture`]: Pointer ownership and the active card's offset
//! - [`decision`]: Release → left / right / snap back
//! - [`stack`]: `(items, index, offset)` → what is on screen
//! - [`animation`]: Spring and timed transitions
//!
//! [`cards`] and [`config`] are the exceptions to "no I/O": they load
//! deck files and settings for the binary.

pub mod action;
pub mod animation;
pub mod cards;
pub mod config;
pub mod deck;
pub mod decision;
pub mod geometry;
pub mod gesture;
pub mod item;
pub mod stack;

// Re-export commonly used types for convenience
pub use action::{Action, Effect};
pub use deck::{Deck, DeckSettings};
pub use decision::Direction;
pub use geometry::Offset;
pub use item::{Card, Item};
