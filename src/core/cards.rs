//! # Card Files
//!
//! Decks are JSON arrays of cards. `id` is optional in the file; cards
//! without one get a UUID so every card has a unique identity.
//!
//! ```json
//! [
//!   { "title": "Ramen", "body": "Tonkotsu, extra egg", "tags": ["food"] },
//!   { "id": "hike-1", "title": "Hike", "body": "Ridge trail at dawn" }
//! ]
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use serde::Deserialize;

use crate::core::item::Card;

#[derive(Debug)]
pub enum CardsError {
    Io(io::Error),
    Parse(serde_json::Error),
    DuplicateId(String),
}

impl fmt::Display for CardsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardsError::Io(e) => write!(f, "deck file I/O error: {e}"),
            CardsError::Parse(e) => write!(f, "deck file parse error: {e}"),
            CardsError::DuplicateId(id) => write!(f, "duplicate card id: {id}"),
        }
    }
}

impl std::error::Error for CardsError {}

/// On-disk shape: like `Card` but with the id optional.
#[derive(Debug, Deserialize)]
struct CardEntry {
    id: Option<String>,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a JSON deck.
pub fn parse_cards(json: &str) -> Result<Arc<[Card]>, CardsError> {
    let entries: Vec<CardEntry> = serde_json::from_str(json).map_err(CardsError::Parse)?;

    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = entry
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        if !seen.insert(id.clone()) {
            return Err(CardsError::DuplicateId(id));
        }
        cards.push(Card {
            id,
            title: entry.title,
            body: entry.body,
            tags: entry.tags,
        });
    }
    debug!("Parsed {} cards", cards.len());
    Ok(cards.into())
}

/// Load a JSON deck from disk.
pub fn load_cards(path: &Path) -> Result<Arc<[Card]>, CardsError> {
    let contents = fs::read_to_string(path).map_err(CardsError::Io)?;
    let cards = parse_cards(&contents)?;
    info!("Loaded {} cards from {}", cards.len(), path.display());
    Ok(cards)
}

/// The deck shown when no file is given.
pub fn sample_cards() -> Arc<[Card]> {
    const SAMPLES: &[(&str, &str, &str, &[&str])] = &[
        ("ramen", "Ramen Night", "Tonkotsu broth, soft egg, extra nori.", &["food"]),
        ("ridge", "Ridge Trail", "Six miles, one big climb, a view worth it.", &["outdoors"]),
        ("vinyl", "Record Fair", "Crates of jazz and a coffee stand.", &["music"]),
        ("pottery", "Pottery Class", "Two hours at the wheel. Aprons provided.", &["craft"]),
        ("kayak", "Kayak Rental", "Calm water, early start, bring sunscreen.", &["outdoors"]),
        ("board", "Board Games", "Long table, short rules, many snacks.", &["social"]),
    ];

    SAMPLES
        .iter()
        .map(|(id, title, body, tags)| Card {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}
