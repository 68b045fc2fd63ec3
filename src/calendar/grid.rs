use std::iter::successors;
use time::{Date, Month, Weekday};

const DAYS_IN_WEEK: usize = 7;

/// Week boundary alignment for grid computation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum FirstWeekday {
    #[default]
    Sunday,
    Monday,
}

impl FirstWeekday {
    /// Zero-based column of `wd` in a week starting on `self`.
    pub(crate) fn index0(self, wd: Weekday) -> usize {
        match self {
            FirstWeekday::Sunday => wd.number_days_from_sunday().into(),
            FirstWeekday::Monday => wd.number_days_from_monday().into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Granularity {
    #[default]
    Week,
    Month,
}

impl Granularity {
    pub(crate) fn toggled(self) -> Granularity {
        match self {
            Granularity::Week => Granularity::Month,
            Granularity::Month => Granularity::Week,
        }
    }
}

/// One cell of a calendar grid.  Immutable once built.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) date: Date,
    pub(crate) day: u8,
    pub(crate) month: Month,
    pub(crate) is_first: bool,
}

/// Ordered day-cell sequence for one week or one month view, chronological
/// ascending.  Week grids hold exactly seven cells; month grids are padded
/// with adjacent-month days to a multiple of seven.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DateGrid {
    cells: Vec<DayCell>,
    granularity: Granularity,
}

impl DateGrid {
    pub(crate) fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The month holding the majority of the grid's cells, with its year;
    /// the header label is drawn from this.  Computed as the median cell's
    /// month: a week splits across at most two months, so the median is the
    /// majority, and a month grid's median always lands inside the unpadded
    /// month.
    pub(crate) fn dominant_month(&self) -> Option<(Month, i32)> {
        self.cells
            .get(self.cells.len() / 2)
            .map(|cell| (cell.month, cell.date.year()))
    }

    pub(crate) fn week_rows(&self) -> usize {
        self.cells.len().div_ceil(DAYS_IN_WEEK)
    }
}

/// The two accessors a grid-rendering view needs.  An out-of-range index is
/// answered with `None`, never a panic.
pub(crate) trait GridSource {
    fn item_count(&self) -> usize;
    fn item_at(&self, index: usize) -> Option<DayCell>;
}

impl GridSource for DateGrid {
    fn item_count(&self) -> usize {
        self.cells.len()
    }

    fn item_at(&self, index: usize) -> Option<DayCell> {
        self.cells.get(index).copied()
    }
}

/// Builds the ordered cell sequence for the grid containing `anchor`.
///
/// Pure calendar arithmetic: same inputs, same grid.  Week grids cover the
/// week of the anchor; month grids cover the anchor's month padded at both
/// ends to full weeks.  A grid that would run past the last representable
/// date is slid backwards so it stays full.
pub(crate) fn build_grid(
    anchor: Date,
    granularity: Granularity,
    first_weekday: FirstWeekday,
) -> DateGrid {
    let (start, len) = match granularity {
        Granularity::Week => (week_start(anchor, first_weekday), DAYS_IN_WEEK),
        Granularity::Month => {
            let first = anchor
                .replace_day(1)
                .expect("day 1 is valid in every month");
            let start = week_start(first, first_weekday);
            let lead = first_weekday.index0(first.weekday());
            let month_len = usize::from(anchor.month().length(anchor.year()));
            let len = (lead + month_len).div_ceil(DAYS_IN_WEEK) * DAYS_IN_WEEK;
            (start, len)
        }
    };
    let start = if successors(Some(start), |&d| d.next_day())
        .nth(len - 1)
        .is_some()
    {
        start
    } else {
        // We are near the end of time, so the window came up short.  Fill
        // towards the past.
        successors(Some(Date::MAX), |&d| d.previous_day())
            .nth(len - 1)
            .unwrap_or(Date::MIN)
    };
    let cells = successors(Some(start), |&d| d.next_day())
        .take(len)
        .enumerate()
        .map(|(i, date)| DayCell {
            date,
            day: date.day(),
            month: date.month(),
            is_first: i == 0,
        })
        .collect();
    DateGrid { cells, granularity }
}

fn week_start(date: Date, first_weekday: FirstWeekday) -> Date {
    let back = first_weekday.index0(date.weekday());
    successors(Some(date), |&d| d.previous_day())
        .nth(back)
        .unwrap_or(Date::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn assert_well_formed(grid: &DateGrid) {
        let cells = (0..grid.item_count())
            .map(|i| grid.item_at(i).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            cells.iter().filter(|c| c.is_first).count(),
            1,
            "exactly one first cell"
        );
        assert!(cells[0].is_first, "first cell is index 0");
        for pair in cells.windows(2) {
            assert_eq!(
                pair[0].date.next_day(),
                Some(pair[1].date),
                "cells are consecutive days"
            );
        }
    }

    #[test]
    fn week_of_monday_anchor_sunday_start() {
        let grid = build_grid(date!(2021 - 02 - 01), Granularity::Week, FirstWeekday::Sunday);
        assert_eq!(grid.item_count(), 7);
        assert_well_formed(&grid);
        let first = grid.item_at(0).unwrap();
        assert_eq!(first.date, date!(2021 - 01 - 31));
        assert!(first.is_first);
        assert_eq!(first.month, Month::January);
        let second = grid.item_at(1).unwrap();
        assert_eq!(second.date, date!(2021 - 02 - 01));
        assert_eq!(second.month, Month::February);
        assert_eq!(second.day, 1);
        assert_eq!(
            grid.item_at(6).unwrap().date,
            date!(2021 - 02 - 06),
            "week ends the following Saturday"
        );
    }

    #[test]
    fn week_of_monday_anchor_monday_start() {
        let grid = build_grid(date!(2021 - 02 - 01), Granularity::Week, FirstWeekday::Monday);
        assert_eq!(grid.item_count(), 7);
        assert_well_formed(&grid);
        assert_eq!(grid.item_at(0).unwrap().date, date!(2021 - 02 - 01));
        assert_eq!(grid.item_at(6).unwrap().date, date!(2021 - 02 - 07));
    }

    #[test]
    fn week_anchor_inside_week() {
        let grid = build_grid(date!(2023 - 11 - 16), Granularity::Week, FirstWeekday::Sunday);
        assert_eq!(grid.item_at(0).unwrap().date, date!(2023 - 11 - 12));
        assert_eq!(grid.item_at(6).unwrap().date, date!(2023 - 11 - 18));
    }

    #[test]
    fn month_grid_padded_to_full_weeks() {
        let grid = build_grid(date!(2021 - 02 - 15), Granularity::Month, FirstWeekday::Sunday);
        assert_eq!(grid.item_count(), 35);
        assert_well_formed(&grid);
        assert_eq!(grid.item_at(0).unwrap().date, date!(2021 - 01 - 31));
        assert_eq!(grid.item_at(34).unwrap().date, date!(2021 - 03 - 06));
        assert_eq!(grid.dominant_month(), Some((Month::February, 2021)));
    }

    #[test]
    fn month_grid_without_leading_pad() {
        // August 2021 starts on a Sunday.
        let grid = build_grid(date!(2021 - 08 - 20), Granularity::Month, FirstWeekday::Sunday);
        assert_eq!(grid.item_count(), 35);
        assert_eq!(grid.item_at(0).unwrap().date, date!(2021 - 08 - 01));
        assert_eq!(grid.item_at(34).unwrap().date, date!(2021 - 09 - 04));
    }

    #[test]
    fn month_grid_six_weeks() {
        // May 2021, Sunday start: the 1st is a Saturday, so 6 + 31 days pad
        // out to 42 cells.
        let grid = build_grid(date!(2021 - 05 - 01), Granularity::Month, FirstWeekday::Sunday);
        assert_eq!(grid.item_count(), 42);
        assert_well_formed(&grid);
        assert_eq!(grid.item_at(0).unwrap().date, date!(2021 - 04 - 25));
        assert_eq!(grid.item_at(41).unwrap().date, date!(2021 - 06 - 05));
    }

    #[test]
    fn month_length_covers_month() {
        for anchor in [
            date!(2020 - 02 - 29),
            date!(2021 - 12 - 31),
            date!(2024 - 01 - 01),
        ] {
            let grid = build_grid(anchor, Granularity::Month, FirstWeekday::Monday);
            assert_eq!(grid.item_count() % 7, 0);
            assert!(
                grid.item_count() >= usize::from(anchor.month().length(anchor.year())),
                "grid covers the whole month"
            );
            assert_well_formed(&grid);
        }
    }

    #[test]
    fn idempotent() {
        let a = build_grid(date!(2021 - 02 - 01), Granularity::Month, FirstWeekday::Sunday);
        let b = build_grid(date!(2021 - 02 - 01), Granularity::Month, FirstWeekday::Sunday);
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_bounds_index_is_none() {
        let grid = build_grid(date!(2021 - 02 - 01), Granularity::Week, FirstWeekday::Sunday);
        assert_eq!(grid.item_at(7), None);
        assert_eq!(grid.item_at(usize::MAX), None);
    }

    #[test]
    fn week_grid_at_end_of_time() {
        let grid = build_grid(Date::MAX, Granularity::Week, FirstWeekday::Sunday);
        assert_eq!(grid.item_count(), 7);
        assert_well_formed(&grid);
        assert_eq!(
            grid.item_at(6).unwrap().date,
            Date::MAX,
            "window slides back to end on the last representable date"
        );
    }

    #[test]
    fn month_grid_at_end_of_time() {
        let grid = build_grid(Date::MAX, Granularity::Month, FirstWeekday::Sunday);
        assert_eq!(grid.item_count() % 7, 0, "whole weeks only");
        assert_well_formed(&grid);
        assert_eq!(grid.item_at(grid.item_count() - 1).unwrap().date, Date::MAX);
        assert_eq!(grid.dominant_month(), Some((Month::December, 9999)));
    }

    #[test]
    fn dominant_month_of_split_week() {
        // Jan 31 + Feb 1..=6: February holds six of the seven cells.
        let grid = build_grid(date!(2021 - 02 - 01), Granularity::Week, FirstWeekday::Sunday);
        assert_eq!(grid.dominant_month(), Some((Month::February, 2021)));
    }
}
