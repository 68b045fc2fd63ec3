mod grid;
mod widget;
pub(crate) use self::grid::{FirstWeekday, Granularity};
pub(crate) use self::widget::{CalendarPane, GridState, SizeClass};
