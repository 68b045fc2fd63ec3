use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const HEADER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub(crate) const TODAY_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const FIRST_CELL_STYLE: Style = Style::new()
    .fg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

pub(crate) const ADJACENT_MONTH_STYLE: Style = Style::new().fg(Color::DarkGray);

pub(crate) const SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) const FAVORITE_STYLE: Style = Style::new().fg(Color::LightYellow);

pub(crate) const TAB_ACTIVE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub(crate) const TAB_IDLE_STYLE: Style = Style::new().fg(Color::DarkGray);

pub(crate) mod datepick {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = Style::new().fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
}
