use super::grid::{build_grid, DateGrid, DayCell, FirstWeekday, Granularity, GridSource};
use crate::screen::print_at;
use crate::theme::{
    ADJACENT_MONTH_STYLE, FIRST_CELL_STYLE, HEADER_STYLE, TODAY_STYLE, WEEKDAY_STYLE,
};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::StatefulWidget};
use std::iter::successors;
use thiserror::Error;
use time::{Date, Month, Weekday};

/// Anchor state behind the calendar pane.  The grid cache is dropped on
/// every anchor or granularity change and rebuilt on the next draw;
/// container resizes only ever change cell dimensions, never grid contents.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GridState {
    today: Date,
    anchor: Date,
    granularity: Granularity,
    first_weekday: FirstWeekday,
    grid: Option<DateGrid>,
}

impl GridState {
    pub(crate) fn new(today: Date) -> GridState {
        GridState {
            today,
            anchor: today,
            granularity: Granularity::default(),
            first_weekday: FirstWeekday::default(),
            grid: None,
        }
    }

    pub(crate) fn with_anchor(mut self, date: Date) -> GridState {
        self.anchor = date;
        self
    }

    pub(crate) fn with_granularity(mut self, granularity: Granularity) -> GridState {
        self.granularity = granularity;
        self
    }

    pub(crate) fn with_first_weekday(mut self, first_weekday: FirstWeekday) -> GridState {
        self.first_weekday = first_weekday;
        self
    }

    pub(crate) fn anchor(&self) -> Date {
        self.anchor
    }

    pub(crate) fn granularity(&self) -> Granularity {
        self.granularity
    }

    fn ensure_grid(&mut self) -> &DateGrid {
        let (anchor, granularity, first_weekday) =
            (self.anchor, self.granularity, self.first_weekday);
        self.grid
            .get_or_insert_with(|| build_grid(anchor, granularity, first_weekday))
    }

    pub(crate) fn jump_to(&mut self, date: Date) {
        self.anchor = date;
        self.grid = None;
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.jump_to(self.today);
    }

    pub(crate) fn toggle_granularity(&mut self) {
        self.granularity = self.granularity.toggled();
        self.grid = None;
    }

    pub(crate) fn next_day(&mut self) -> Result<(), OutOfRangeError> {
        let next = self.anchor.next_day().ok_or(OutOfRangeError)?;
        self.jump_to(next);
        Ok(())
    }

    pub(crate) fn previous_day(&mut self) -> Result<(), OutOfRangeError> {
        let prev = self.anchor.previous_day().ok_or(OutOfRangeError)?;
        self.jump_to(prev);
        Ok(())
    }

    /// Moves the anchor one grid period forwards: a week in week view, a
    /// month (day-of-month clamped) in month view.
    pub(crate) fn forward_period(&mut self) -> Result<(), OutOfRangeError> {
        let next = match self.granularity {
            Granularity::Week => successors(Some(self.anchor), |&d| d.next_day()).nth(7),
            Granularity::Month => shift_month(self.anchor, true),
        };
        self.jump_to(next.ok_or(OutOfRangeError)?);
        Ok(())
    }

    pub(crate) fn backward_period(&mut self) -> Result<(), OutOfRangeError> {
        let prev = match self.granularity {
            Granularity::Week => successors(Some(self.anchor), |&d| d.previous_day()).nth(7),
            Granularity::Month => shift_month(self.anchor, false),
        };
        self.jump_to(prev.ok_or(OutOfRangeError)?);
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("date out of supported range")]
pub(crate) struct OutOfRangeError;

fn shift_month(date: Date, forwards: bool) -> Option<Date> {
    let (year, month) = if forwards {
        match date.month() {
            Month::December => (date.year().checked_add(1)?, Month::January),
            m => (date.year(), m.next()),
        }
    } else {
        match date.month() {
            Month::January => (date.year().checked_sub(1)?, Month::December),
            m => (date.year(), m.previous()),
        }
    };
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).ok()
}

/// Header sizing, passed in explicitly by whoever builds the pane.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum SizeClass {
    Compact,
    #[default]
    Regular,
}

impl SizeClass {
    fn header_lines(self) -> u16 {
        match self {
            SizeClass::Compact => 2,
            SizeClass::Regular => 3,
        }
    }
}

/// Renders a `GridState`: a month/year header over the day cells.  Week
/// grids fill a two-column, four-row slot layout (cells sized width/2 by
/// height/4); month grids use seven columns under a weekday rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarPane {
    size_class: SizeClass,
}

impl CalendarPane {
    pub(crate) fn new(size_class: SizeClass) -> CalendarPane {
        CalendarPane { size_class }
    }
}

impl StatefulWidget for CalendarPane {
    type State = GridState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let today = state.today;
        let first_weekday = state.first_weekday;
        let grid = state.ensure_grid();
        let header_height = self.size_class.header_lines().min(area.height);
        if let Some((month, year)) = grid.dominant_month() {
            let label = format!("{month} {year}");
            let x = area
                .width
                .saturating_sub(u16::try_from(label.len()).unwrap_or(u16::MAX))
                / 2;
            print_at(buf, area, x, 0, &label, HEADER_STYLE);
        }
        let grid_area = Rect {
            y: area.y + header_height,
            height: area.height - header_height,
            ..area
        };
        match grid.granularity() {
            Granularity::Week => render_week(buf, grid_area, grid, today),
            Granularity::Month => render_month(buf, grid_area, grid, today, first_weekday),
        }
    }
}

fn render_week(buf: &mut Buffer, area: Rect, grid: &DateGrid, today: Date) {
    let cell_w = area.width / 2;
    let cell_h = area.height / 4;
    if cell_w == 0 || cell_h == 0 {
        return;
    }
    let dominant = grid.dominant_month().map(|(month, _)| month);
    for i in 0..grid.item_count() {
        let Some(cell) = grid.item_at(i) else {
            break;
        };
        let col = u16::try_from(i % 2).unwrap_or(u16::MAX);
        let row = u16::try_from(i / 2).unwrap_or(u16::MAX);
        let label = if cell.is_first {
            format!(
                "{} {:>2} {}",
                weekday_label(cell.date.weekday()),
                cell.day,
                month_label(cell.month)
            )
        } else {
            format!("{} {:>2}", weekday_label(cell.date.weekday()), cell.day)
        };
        print_at(
            buf,
            area,
            col * cell_w,
            row * cell_h,
            &label,
            cell_style(cell, today, dominant),
        );
    }
}

fn render_month(
    buf: &mut Buffer,
    area: Rect,
    grid: &DateGrid,
    today: Date,
    first_weekday: FirstWeekday,
) {
    let cell_w = area.width / 7;
    if cell_w == 0 || area.height < 2 {
        return;
    }
    let mut wd = match first_weekday {
        FirstWeekday::Sunday => Weekday::Sunday,
        FirstWeekday::Monday => Weekday::Monday,
    };
    for col in 0..7u16 {
        let rule = format!(" {:2} ", &weekday_label(wd)[..2]);
        print_at(buf, area, col * cell_w, 0, &rule, WEEKDAY_STYLE);
        wd = wd.next();
    }
    let rows = u16::try_from(grid.week_rows()).unwrap_or(u16::MAX).max(1);
    let cell_h = ((area.height - 1) / rows).max(1);
    let dominant = grid.dominant_month().map(|(month, _)| month);
    for i in 0..grid.item_count() {
        let Some(cell) = grid.item_at(i) else {
            break;
        };
        let col = u16::try_from(i % 7).unwrap_or(u16::MAX);
        let row = u16::try_from(i / 7).unwrap_or(u16::MAX);
        let label = if cell.date == today {
            format!("[{:2}]", cell.day)
        } else {
            format!(" {:2} ", cell.day)
        };
        print_at(
            buf,
            area,
            col * cell_w,
            1 + row * cell_h,
            &label,
            cell_style(cell, today, dominant),
        );
    }
}

// Emphasis precedence: today, then the grid's first cell, then days padded
// in from an adjacent month.
fn cell_style(cell: DayCell, today: Date, dominant: Option<Month>) -> Style {
    if cell.date == today {
        TODAY_STYLE
    } else if cell.is_first {
        FIRST_CELL_STYLE
    } else if dominant.is_some_and(|month| month != cell.month) {
        ADJACENT_MONTH_STYLE
    } else {
        Style::new()
    }
}

fn weekday_label(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

fn month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
