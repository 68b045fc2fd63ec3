use crate::diary::{DiaryEntry, HomeTab, Journal};
use crate::screen::print_at;
use crate::theme::{
    ADJACENT_MONTH_STYLE, FAVORITE_STYLE, SELECTION_STYLE, TAB_ACTIVE_STYLE, TAB_IDLE_STYLE,
};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Span, widgets::StatefulWidget};
use time::Date;

/// The home screen: the active tab's entry list over a minimal tab row.
/// Pure view; all mutation goes through `Journal` from the event loop.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct HomePane;

impl StatefulWidget for HomePane {
    type State = Journal;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.height < 2 {
            return;
        }
        let list_height = usize::from(area.height - 2);
        let entries = state.visible_entries();
        if entries.is_empty() {
            let message = match state.tab() {
                HomeTab::Diary => "No diaries yet.",
                HomeTab::Favorites => "No favorite diaries yet.",
            };
            print_at(buf, area, 0, 0, message, ADJACENT_MONTH_STYLE);
        }
        for (row, entry) in entries.into_iter().take(list_height).enumerate() {
            let selected = row == state.selected();
            draw_entry(buf, area, row, entry, selected);
        }
        draw_tab_row(buf, area, state.tab());
    }
}

fn draw_entry(buf: &mut Buffer, area: Rect, row: usize, entry: &DiaryEntry, selected: bool) {
    let y = u16::try_from(row).unwrap_or(u16::MAX);
    let marker = if selected { "> " } else { "  " };
    let line = format!("{marker}{}  {}", ymd(entry.date), entry.title);
    let style = if selected {
        SELECTION_STYLE
    } else {
        Style::new()
    };
    print_at(buf, area, 0, y, &line, style);
    if entry.favorite {
        // Columns, not bytes: titles are not always ASCII.
        let x = u16::try_from(Span::raw(line.as_str()).width() + 1).unwrap_or(u16::MAX);
        print_at(buf, area, x, y, "*", FAVORITE_STYLE);
    }
}

fn draw_tab_row(buf: &mut Buffer, area: Rect, active: HomeTab) {
    let y = area.height - 1;
    let style = |tab: HomeTab| {
        if tab == active {
            TAB_ACTIVE_STYLE
        } else {
            TAB_IDLE_STYLE
        }
    };
    let diary = format!(" {} ", HomeTab::Diary.title());
    print_at(buf, area, 0, y, &diary, style(HomeTab::Diary));
    let divider_x = u16::try_from(diary.len()).unwrap_or(u16::MAX);
    print_at(buf, area, divider_x, y, "│", Style::new());
    print_at(
        buf,
        area,
        divider_x + 1,
        y,
        &format!(" {} ", HomeTab::Favorites.title()),
        style(HomeTab::Favorites),
    );
}

// time's Display for Date is not stability-guaranteed, so the list formats
// dates itself.
fn ymd(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
