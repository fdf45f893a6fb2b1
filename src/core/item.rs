//! # Items
//!
//! The deck never looks inside an item. It only needs a stable identity for
//! keying rendered layers, and the item's position in the list it was given.

use std::fmt::Debug;
use std::hash::Hash;

/// A value that can sit in a deck.
pub trait Item {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;
}

/// The card type used by the terminal app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl Card {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
        }
    }
}

impl Item for Card {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}
