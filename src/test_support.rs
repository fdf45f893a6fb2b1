//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::core::decision::Direction;
use crate::core::deck::{Deck, DeckSettings};
use crate::core::item::Item;

/// A minimal item: numeric id plus a letter to assert on.
#[derive(Debug, Clone, PartialEq)]
pub struct Letter {
    pub id: u32,
    pub name: char,
}

impl Item for Letter {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// A fresh list (new allocation every call) with ids starting at 1.
pub fn letters(names: &[char]) -> Arc<[Letter]> {
    names
        .iter()
        .enumerate()
        .map(|(i, &name)| Letter {
            id: i as u32 + 1,
            name,
        })
        .collect()
}

pub type SwipeLog = Rc<RefCell<Vec<(Direction, char)>>>;

pub struct RecordingDeck {
    pub deck: Deck<Letter>,
    pub log: SwipeLog,
}

/// Deck over A, B, C whose handlers record every notification.
pub fn recording_deck(viewport_width: f64) -> RecordingDeck {
    let log: SwipeLog = Rc::default();
    let left = Rc::clone(&log);
    let right = Rc::clone(&log);
    let deck = Deck::new(letters(&['A', 'B', 'C']), viewport_width, DeckSettings::default())
        .on_swipe_left(move |item: &Letter| left.borrow_mut().push((Direction::Left, item.name)))
        .on_swipe_right(move |item: &Letter| right.borrow_mut().push((Direction::Right, item.name)));
    RecordingDeck { deck, log }
}
