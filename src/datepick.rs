use crate::theme::{
    datepick::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;

/// Digits of a full `[-]YYYY-MM-DD` entry.
const DIGITS: usize = 8;

/// Modal date-entry box for changing the calendar's anchor date.
///
/// ```text
/// .................
/// .┌─ Go to… ────┐.
/// .│             │.
/// .│ -YYYY-MM-DD │.
/// .│             │.
/// .│   [ENTER]   │.
/// .└─────────────┘.
/// .................
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DatePicker;

impl StatefulWidget for DatePicker {
    type State = DatePickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Go to… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DatePickerState {
    negative: bool,
    digits: [Option<u8>; DIGITS],
    pos: usize,
}

impl DatePickerState {
    pub(crate) fn new() -> DatePickerState {
        DatePickerState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Styling a span and wrapping it in a line keeps the underline
            // off the centering padding around "[ENTER]".
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == DIGITS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            if self.negative { "-" } else { " " },
            BASE_STYLE,
        )];
        for (i, dg) in self.digits.iter().enumerate() {
            if i == 4 || i == 6 {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            let fallback = match i {
                0..4 => "Y",
                4..6 => "M",
                _ => "D",
            };
            spans.push(match dg {
                Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                None => Span::styled(fallback, UNFILLED_CELL_STYLE),
            });
        }
        Line::from_iter(spans)
    }

    pub(crate) fn handle_input(&mut self, input: DatePickerInput) -> DatePickerOutput {
        match (input, self.pos) {
            (DatePickerInput::Negative, 0) => {
                self.negative = !self.negative;
                DatePickerOutput::Ok
            }
            (DatePickerInput::Positive, 0) => {
                self.negative = false;
                DatePickerOutput::Ok
            }
            (DatePickerInput::Digit(d), 0..DIGITS) => {
                self.digits[self.pos] = Some(d);
                self.pos += 1;
                DatePickerOutput::Ok
            }
            (DatePickerInput::Backspace, 1..) => {
                self.pos -= 1;
                self.digits[self.pos] = None;
                DatePickerOutput::Ok
            }
            (DatePickerInput::Enter, DIGITS) => match self.to_date() {
                Some(date) => DatePickerOutput::Accept(date),
                None => DatePickerOutput::Invalid,
            },
            _ => DatePickerOutput::Invalid,
        }
    }

    fn to_date(self) -> Option<time::Date> {
        let number = |range: std::ops::Range<usize>| {
            self.digits[range]
                .iter()
                .try_fold(0i32, |acc, dg| Some(acc * 10 + i32::from((*dg)?)))
        };
        let mut year = number(0..4)?;
        if self.negative {
            year = -year;
        }
        let month = time::Month::try_from(u8::try_from(number(4..6)?).ok()?).ok()?;
        let day = u8::try_from(number(6..8)?).ok()?;
        time::Date::from_calendar_date(year, month, day).ok()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DatePickerInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DatePickerOutput {
    Ok,
    Invalid,
    Accept(time::Date),
}
