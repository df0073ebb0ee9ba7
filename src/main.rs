mod app;
mod dialog;
mod help;
mod input;
mod monthview;
mod theme;
use crate::app::App;
use crate::dialog::DaysPassed;
use crate::monthview::MonthView;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
static LOG_ENV_VAR: &str = "CALGRID_LOG";

static DEFAULT_LOG_FILTER: &str = "info";

/// A month to display, with an optional day selected
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Selection {
    year: i32,
    month: u8,
    day: Option<u8>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        selection: Option<Selection>,
        log_file: Option<PathBuf>,
    },
    Print {
        selection: Selection,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut print = false;
        let mut log_file = None;
        let mut month = None;
        let mut year = None;
        let mut day = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('p') | Arg::Long("print") => print = true,
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if month.is_none() => month = Some(value.parse::<u8>()?),
                Arg::Value(value) if year.is_none() => year = Some(value.parse::<i32>()?),
                Arg::Value(value) if day.is_none() => day = Some(value.parse::<u8>()?),
                _ => return Err(arg.unexpected()),
            }
        }
        let selection = match (month, year) {
            (Some(month), Some(year)) => Some(Selection { year, month, day }),
            (Some(_), None) => return Err("a year must be given after the month".into()),
            (None, _) => None,
        };
        if print {
            let selection =
                selection.ok_or_else(|| lexopt::Error::from("--print requires a month and year"))?;
            Ok(Command::Print {
                selection,
                log_file,
            })
        } else {
            Ok(Command::Run {
                selection,
                log_file,
            })
        }
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                selection,
                log_file,
            } => {
                if let Some(path) = log_file {
                    init_logging(&path)?;
                }
                let mut app = App::new();
                if let Some(Selection { year, month, day }) = selection {
                    app.open(year, month, day)
                        .context("cannot show requested month")?;
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(&mut terminal).context("failed to run calendar")?;
                    Ok(())
                })
            }
            Command::Print {
                selection,
                log_file,
            } => {
                if let Some(path) = log_file {
                    init_logging(&path)?;
                }
                print_month(selection)
            }
            Command::Help => {
                println!("Usage: calgrid [-p] [--log-file PATH] [MONTH YEAR [DAY]]");
                println!("       calgrid [-p] [--log-file PATH] -- MONTH -YEAR [DAY]");
                println!();
                println!("Show a month with ISO week numbers and its count of workdays");
                println!();
                println!("Options:");
                println!("  -p, --print           Print the month to stdout and exit");
                println!("      --log-file PATH   Write logs to the given file; the level is");
                println!("                        read from ${LOG_ENV_VAR}");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                println!();
                println!("A negative YEAR must follow `--` so that it is not read as an option.");
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

fn print_month(selection: Selection) -> anyhow::Result<()> {
    let Selection { year, month, day } = selection;
    let mut view = MonthView::new(year, month).context("cannot show requested month")?;
    if let Some(day) = day {
        view = view
            .with_selected(day)
            .context("cannot select requested day")?;
    }
    for line in view.to_lines() {
        println!("{line}");
    }
    if let Some(days) = view.days_passed() {
        println!();
        println!("{}", DaysPassed::message(days));
    }
    Ok(())
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "{} starting",
        env!("CARGO_PKG_NAME")
    );
    Ok(())
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
