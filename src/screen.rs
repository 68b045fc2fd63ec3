use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Paragraph, Widget},
};

/// Clamped text placement relative to `area`.  Routing through a Paragraph
/// truncates anything that would spill past the right edge, provided the
/// Rect handed to it stays inside the frame.
pub(crate) fn print_at(buf: &mut Buffer, area: Rect, x: u16, y: u16, s: &str, style: Style) {
    if y < area.height && x < area.width {
        let text = Text::styled(s, style);
        let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        Paragraph::new(text).render(
            Rect {
                x: area.x + x,
                y: area.y + y,
                width: (area.width - x).min(width),
                height: 1,
            },
            buf,
        );
    }
}
