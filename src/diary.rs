use time::Date;

/// One diary entry.  Kept entirely in memory; persistence is a host
/// concern, not this UI layer's.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DiaryEntry {
    pub(crate) title: String,
    pub(crate) date: Date,
    pub(crate) favorite: bool,
}

impl DiaryEntry {
    pub(crate) fn new<S: Into<String>>(title: S, date: Date) -> DiaryEntry {
        DiaryEntry {
            title: title.into(),
            date,
            favorite: false,
        }
    }

    pub(crate) fn favorite(mut self) -> DiaryEntry {
        self.favorite = true;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum HomeTab {
    #[default]
    Diary,
    Favorites,
}

impl HomeTab {
    pub(crate) fn toggled(self) -> HomeTab {
        match self {
            HomeTab::Diary => HomeTab::Favorites,
            HomeTab::Favorites => HomeTab::Diary,
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            HomeTab::Diary => "Diary",
            HomeTab::Favorites => "Favorites",
        }
    }
}

/// Entry collection plus the home screen's cursor.  The selection tracks a
/// position within the rows visible on the active tab, so switching tabs
/// re-clamps it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Journal {
    entries: Vec<DiaryEntry>,
    tab: HomeTab,
    selected: usize,
}

impl Journal {
    pub(crate) fn new(entries: Vec<DiaryEntry>) -> Journal {
        Journal {
            entries,
            tab: HomeTab::default(),
            selected: 0,
        }
    }

    pub(crate) fn tab(&self) -> HomeTab {
        self.tab
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    /// Indices into the entry list for the rows the active tab shows.
    fn visible(&self) -> Vec<usize> {
        match self.tab {
            HomeTab::Diary => (0..self.entries.len()).collect(),
            HomeTab::Favorites => self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.favorite)
                .map(|(i, _)| i)
                .collect(),
        }
    }

    pub(crate) fn visible_entries(&self) -> Vec<&DiaryEntry> {
        self.visible()
            .into_iter()
            .filter_map(|i| self.entries.get(i))
            .collect()
    }

    pub(crate) fn selected_entry(&self) -> Option<&DiaryEntry> {
        let index = *self.visible().get(self.selected)?;
        self.entries.get(index)
    }

    pub(crate) fn switch_tab(&mut self) {
        self.tab = self.tab.toggled();
        self.clamp_selection();
    }

    pub(crate) fn select_next(&mut self) -> bool {
        if self.selected + 1 < self.visible().len() {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn select_previous(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    /// Flips the selected entry's favorite flag.  On the Favorites tab the
    /// row disappears, so the cursor is re-clamped.
    pub(crate) fn toggle_favorite(&mut self) -> bool {
        let Some(&index) = self.visible().get(self.selected) else {
            return false;
        };
        if let Some(entry) = self.entries.get_mut(index) {
            entry.favorite = !entry.favorite;
        }
        self.clamp_selection();
        true
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Seed content; there is no entry-creation flow in this UI layer.
    pub(crate) fn sample(today: Date) -> Journal {
        let day = |n: usize| {
            std::iter::successors(Some(today), |&d| d.previous_day())
                .nth(n)
                .unwrap_or(Date::MIN)
        };
        Journal::new(vec![
            DiaryEntry::new("Morning pages", today),
            DiaryEntry::new("Reading log", day(1)).favorite(),
            DiaryEntry::new("Trip planning", day(3)),
            DiaryEntry::new("Weekly review", day(6)).favorite(),
            DiaryEntry::new("Sketchbook notes", day(9)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn journal() -> Journal {
        Journal::new(vec![
            DiaryEntry::new("a", date!(2021 - 02 - 01)),
            DiaryEntry::new("b", date!(2021 - 02 - 02)).favorite(),
            DiaryEntry::new("c", date!(2021 - 02 - 03)),
            DiaryEntry::new("d", date!(2021 - 02 - 04)).favorite(),
        ])
    }

    #[test]
    fn selection_moves_and_clamps() {
        let mut j = journal();
        assert!(!j.select_previous());
        assert!(j.select_next());
        assert!(j.select_next());
        assert!(j.select_next());
        assert!(!j.select_next(), "cursor stops at the last row");
        assert_eq!(j.selected_entry().map(|e| e.title.as_str()), Some("d"));
    }

    #[test]
    fn favorites_tab_filters() {
        let mut j = journal();
        j.switch_tab();
        assert_eq!(j.tab(), HomeTab::Favorites);
        let titles = j
            .visible_entries()
            .iter()
            .map(|e| e.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, ["b", "d"]);
    }

    #[test]
    fn tab_switch_clamps_selection() {
        let mut j = journal();
        j.select_next();
        j.select_next();
        j.select_next();
        j.switch_tab();
        assert_eq!(j.selected(), 1);
        assert_eq!(j.selected_entry().map(|e| e.title.as_str()), Some("d"));
    }

    #[test]
    fn unfavoriting_reclamps_on_favorites_tab() {
        let mut j = journal();
        j.switch_tab();
        j.select_next();
        assert!(j.toggle_favorite(), "drop d from favorites");
        assert_eq!(j.selected(), 0);
        assert_eq!(j.selected_entry().map(|e| e.title.as_str()), Some("b"));
    }

    #[test]
    fn empty_favorites_has_no_selection() {
        let mut j = Journal::new(vec![DiaryEntry::new("a", date!(2021 - 02 - 01))]);
        j.switch_tab();
        assert_eq!(j.selected_entry(), None);
        assert!(!j.toggle_favorite());
    }
}
