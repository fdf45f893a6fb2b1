use crate::core::Deck;
use crate::core::item::Card;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{DeckPane, StatusBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

const HELP_TEXT: &str = " drag the card  ←/h nope  →/l like  r reload  q quit ";

fn split(frame_area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame_area)
}

/// The region cards are drawn in. Its width is the deck's viewport width.
pub fn deck_area(frame_area: Rect) -> Rect {
    let [_status, main, _help] = split(frame_area);
    main
}

pub fn draw_ui(frame: &mut Frame, deck: &Deck<Card>, tui: &mut TuiState) {
    let [status_area, main_area, help_area] = split(frame.area());

    let (liked, passed) = {
        let tally = tui.tally.borrow();
        (tally.liked.len(), tally.passed.len())
    };
    StatusBar::new(
        deck.index(),
        deck.data().len(),
        liked,
        passed,
        tui.status_message.clone(),
    )
    .render(frame, status_area);

    DeckPane::new(deck, &mut tui.pane).render(frame, main_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}
