//! # Stack Derivation
//!
//! Maps `(items, index, offset)` to what is on screen. Recomputed from
//! scratch every render; nothing here holds state.
//!
//! ```text
//! items:    [ A ][ B ][ C ][ D ]
//! index:           ^
//!            gone  active queued...
//! ```
//!
//! - positions `< index` are dropped (already dismissed)
//! - position `== index` is the only interactive card
//! - positions `> index` are queued, pushed down by `depth · offset_step`
//! - `index >= len` is the exhausted state

use crate::core::geometry::Offset;
use crate::core::gesture::{RotationConfig, rotation_deg};
use crate::core::item::Item;

/// Cosmetic layout parameters for the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackStyle {
    /// Vertical shift per step of distance from the active card.
    pub offset_step: f64,
    /// Cap on derived queued cards. `None` keeps all of them.
    pub max_visible: Option<usize>,
    pub rotation: RotationConfig,
}

impl Default for StackStyle {
    fn default() -> Self {
        Self {
            offset_step: 1.0,
            max_visible: None,
            rotation: RotationConfig::default(),
        }
    }
}

/// The card under the pointer.
#[derive(Debug, PartialEq)]
pub struct ActiveCard<'a, T> {
    pub item: &'a T,
    pub position: usize,
    pub offset: Offset,
    pub rotation_deg: f64,
}

/// A card waiting beneath the active one.
#[derive(Debug, PartialEq)]
pub struct QueuedCard<'a, T> {
    pub item: &'a T,
    pub position: usize,
    /// `position - index`, always at least 1.
    pub depth: usize,
    pub offset: Offset,
}

/// The render-time partition of a deck.
#[derive(Debug, PartialEq)]
pub struct DeckView<'a, T> {
    pub active: Option<ActiveCard<'a, T>>,
    /// Nearest first. Paint in reverse so nearer cards cover farther ones.
    pub queued: Vec<QueuedCard<'a, T>>,
    pub exhausted: bool,
}

/// Partition `data` around `index`.
pub fn derive<'a, T>(
    data: &'a [T],
    index: usize,
    offset: Offset,
    viewport_width: f64,
    style: &StackStyle,
) -> DeckView<'a, T> {
    let Some(active_item) = data.get(index) else {
        return DeckView {
            active: None,
            queued: Vec::new(),
            exhausted: true,
        };
    };

    let active = ActiveCard {
        item: active_item,
        position: index,
        offset,
        rotation_deg: rotation_deg(offset.dx, viewport_width, style.rotation),
    };

    let limit = style.max_visible.filter(|&n| n > 0).unwrap_or(usize::MAX);
    let queued = data[index + 1..]
        .iter()
        .enumerate()
        .take(limit)
        .map(|(i, item)| {
            let depth = i + 1;
            QueuedCard {
                item,
                position: index + depth,
                depth,
                offset: Offset::new(0.0, depth as f64 * style.offset_step),
            }
        })
        .collect();

    DeckView {
        active: Some(active),
        queued,
        exhausted: false,
    }
}

/// Host-supplied drawing of card contents.
pub trait CardRenderer<T> {
    type Output;

    fn render_card(&mut self, item: &T) -> Self::Output;

    fn render_no_more_cards(&mut self) -> Self::Output;
}

/// One drawn card, positioned.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayer<K, R> {
    pub id: K,
    pub position: usize,
    pub offset: Offset,
    pub rotation_deg: f64,
    /// Only the active card receives gestures.
    pub interactive: bool,
    pub content: R,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<K, R> {
    NoMoreCards(R),
    /// Back to front: the active card comes last.
    Cards(Vec<CardLayer<K, R>>),
}

impl<K, R> Rendered<K, R> {
    pub fn interactive_count(&self) -> usize {
        match self {
            Rendered::NoMoreCards(_) => 0,
            Rendered::Cards(layers) => layers.iter().filter(|l| l.interactive).count(),
        }
    }
}

impl<T: Item> DeckView<'_, T> {
    /// Run the host renderer over the partition, in paint order.
    pub fn render<R: CardRenderer<T>>(&self, renderer: &mut R) -> Rendered<T::Id, R::Output> {
        let Some(active) = &self.active else {
            return Rendered::NoMoreCards(renderer.render_no_more_cards());
        };

        let mut layers: Vec<CardLayer<T::Id, R::Output>> = self
            .queued
            .iter()
            .rev()
            .map(|card| CardLayer {
                id: card.item.id(),
                position: card.position,
                offset: card.offset,
                rotation_deg: 0.0,
                interactive: false,
                content: renderer.render_card(card.item),
            })
            .collect();

        layers.push(CardLayer {
            id: active.item.id(),
            position: active.position,
            offset: active.offset,
            rotation_deg: active.rotation_deg,
            interactive: true,
            content: renderer.render_card(active.item),
        });

        Rendered::Cards(layers)
    }
}
