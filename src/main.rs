mod app;
mod calendar;
mod datepick;
mod diary;
mod help;
mod home;
mod screen;
mod theme;
use crate::app::App;
use crate::calendar::{CalendarPane, FirstWeekday, Granularity, GridState, SizeClass};
use crate::diary::Journal;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        anchor: Option<Date>,
        granularity: Granularity,
        first_weekday: FirstWeekday,
        size_class: SizeClass,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut anchor = None;
        let mut granularity = Granularity::Week;
        let mut first_weekday = FirstWeekday::Sunday;
        let mut size_class = SizeClass::Regular;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("monthly") => granularity = Granularity::Month,
                Arg::Long("monday") => first_weekday = FirstWeekday::Monday,
                Arg::Long("compact") => size_class = SizeClass::Compact,
                Arg::Value(value) if anchor.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => anchor = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            anchor,
            granularity,
            first_weekday,
            size_class,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                anchor,
                granularity,
                first_weekday,
                size_class,
            } => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let mut grid = GridState::new(today)
                        .with_granularity(granularity)
                        .with_first_weekday(first_weekday);
                    if let Some(date) = anchor {
                        grid = grid.with_anchor(date);
                    }
                    let app = App::new(
                        Journal::sample(today),
                        grid,
                        CalendarPane::new(size_class),
                    );
                    app.run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: daybook [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Terminal diary planner with tabbed entry lists and a weekly/monthly");
                println!("calendar; the optional date sets the calendar's starting anchor");
                println!();
                println!("Options:");
                println!("  -m, --monthly     Open the calendar in month view");
                println!("      --monday      Start weeks on Monday instead of Sunday");
                println!("      --compact     Use the compact calendar header");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
