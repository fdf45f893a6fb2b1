//! # Card Component
//!
//! Draws one card's face, and places it on screen at an offset and tilt.
//!
//! ## Placement
//!
//! A card is first rendered into its own off-screen buffer at rest size, then
//! copied onto the frame cell by cell. That lets a card slide partly out of
//! the deck area and get clipped cleanly, with borders intact on the visible
//! side.
//!
//! Terminals cannot rotate text, so tilt is drawn as a horizontal shear:
//! each row shifts by `-(row - mid) · sin(θ) · CELL_ASPECT`. A clockwise tilt
//! pushes the top right and the bottom left, which reads as a lean.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::Offset;
use crate::core::decision::Direction;
use crate::core::item::Card;
use crate::core::stack::CardRenderer;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// How a card should look this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Beneath the active card.
    Queued,
    /// On top, not past the threshold.
    Active,
    /// On top and past the threshold: releasing now swipes this way.
    Leaning(Direction),
    /// The exhausted placeholder.
    Empty,
}

/// A rendered card face. Built by [`TerminalCards`], styled by the pane.
#[derive(Debug, Clone, PartialEq)]
pub struct CardWidget {
    pub title: String,
    pub lines: Vec<Line<'static>>,
    pub tone: Tone,
}

impl CardWidget {
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    fn border_style(&self) -> Style {
        match self.tone {
            Tone::Queued => Style::default().fg(Color::DarkGray),
            Tone::Active => Style::default().fg(Color::White),
            Tone::Leaning(Direction::Right) => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            Tone::Leaning(Direction::Left) => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            Tone::Empty => Style::default().fg(Color::DarkGray),
        }
    }

    fn stamp(&self) -> Option<&'static str> {
        match self.tone {
            Tone::Leaning(Direction::Right) => Some(" LIKE "),
            Tone::Leaning(Direction::Left) => Some(" NOPE "),
            _ => None,
        }
    }
}

impl Widget for CardWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.tone == Tone::Empty {
            Paragraph::new(self.lines)
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        }

        let border_style = self.border_style();
        let max_title = area.width.saturating_sub(4) as usize;
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(truncate(&self.title, max_title), border_style))
            .padding(Padding::horizontal(1));
        if let Some(stamp) = self.stamp() {
            block = block.title_bottom(Line::from(stamp).style(border_style).right_aligned());
        }

        let inner = block.inner(area);
        // Opaque background so cards beneath don't bleed through
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.reset();
                }
            }
        }
        block.render(area, buf);

        let text_style = if self.tone == Tone::Queued {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        Paragraph::new(self.lines)
            .style(text_style)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// Truncate to `max_width` display columns, adding "…" if cut.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    // One column is reserved for the ellipsis
    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// The app's card renderer: faces for `Card`, plus the exhausted placeholder.
#[derive(Debug, Default)]
pub struct TerminalCards;

impl CardRenderer<Card> for TerminalCards {
    type Output = CardWidget;

    fn render_card(&mut self, item: &Card) -> CardWidget {
        let mut lines = vec![Line::from(item.body.clone())];
        if !item.tags.is_empty() {
            let tags = item
                .tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(tags, Style::default().fg(Color::Cyan))));
        }
        CardWidget {
            title: item.title.clone(),
            lines,
            tone: Tone::Active,
        }
    }

    fn render_no_more_cards(&mut self) -> CardWidget {
        CardWidget {
            title: String::new(),
            lines: vec![
                Line::from(Span::styled(
                    "No more cards",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "press r to start over",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            tone: Tone::Empty,
        }
    }
}

/// Paint `widget` as a card whose rest position is `rest`, displaced by
/// `offset` and sheared by `rotation_deg`, clipped to `clip`.
pub fn paint_card(
    buf: &mut Buffer,
    clip: Rect,
    rest: Rect,
    offset: Offset,
    rotation_deg: f64,
    widget: CardWidget,
) {
    if rest.is_empty() {
        return;
    }
    let mut card_buf = Buffer::empty(Rect::new(0, 0, rest.width, rest.height));
    widget.render(card_buf.area, &mut card_buf);

    let shear = rotation_deg.to_radians().sin() * CELL_ASPECT;
    let mid = (f64::from(rest.height) - 1.0) / 2.0;
    let origin_x = f64::from(rest.x) + offset.dx.round();
    let origin_y = f64::from(rest.y) + offset.dy.round();

    for row in 0..rest.height {
        let shift = (-(f64::from(row) - mid) * shear).round();
        let y = origin_y + f64::from(row);
        for col in 0..rest.width {
            let x = origin_x + f64::from(col) + shift;
            let Some((x, y)) = clip_point(clip, x, y) else {
                continue;
            };
            if let (Some(src), Some(dst)) = (card_buf.cell((col, row)), buf.cell_mut((x, y))) {
                *dst = src.clone();
            }
        }
    }
}

fn clip_point(clip: Rect, x: f64, y: f64) -> Option<(u16, u16)> {
    let inside = x >= f64::from(clip.left())
        && x < f64::from(clip.right())
        && y >= f64::from(clip.top())
        && y < f64::from(clip.bottom());
    inside.then(|| (x as u16, y as u16))
}
