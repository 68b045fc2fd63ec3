use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static LINES: &[&str] = &[
    "TAB             Switch home tab",
    "j, DOWN         Next entry / period",
    "k, UP           Previous entry / period",
    "h, LEFT         Previous day",
    "l, RIGHT        Next day",
    "ENTER           Open entry's calendar",
    "f               Toggle favorite",
    "m               Toggle week/month view",
    "0, HOME         Jump to today",
    "g               Input date to jump to",
    "ESC             Back",
    "?               Show this help",
    "q               Quit",
    "",
    "Press the Any Key to dismiss.",
];

/// Centered command-list overlay, drawn with the app's base style.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter(LINES.iter().copied().map(Line::raw));
        // Two extra rows/columns for the border, plus a one-column gutter on
        // each side so the box does not touch the calendar digits.
        let height = clamp_dim(text.height() + 2, area.height);
        let width = clamp_dim(text.width() + 2, area.width);
        let [box_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [box_area] = Layout::vertical([height]).flex(Flex::Center).areas(box_area);
        let gutter_area = Rect {
            x: box_area.x.saturating_sub(1),
            width: box_area.width.saturating_add(2),
            ..box_area
        };
        Clear.render(gutter_area, buf);
        Block::new().style(self.0).render(gutter_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(box_area, buf);
    }
}

fn clamp_dim(wanted: usize, available: u16) -> u16 {
    u16::try_from(wanted).unwrap_or(u16::MAX).min(available)
}
