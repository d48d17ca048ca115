mod agenda;
mod app;
mod calendar;
mod catalog;
mod event;
mod help;
mod i18n;
mod jumpto;
mod theme;
use crate::app::App;
use crate::calendar::{MonthCursor, YearMonth};
use crate::catalog::{EventSource, FixtureCatalog, JsonCatalog};
use crate::i18n::Language;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the display language when `--lang` is
/// not given
const LANG_VAR: &str = "LABCAL_LANG";

/// Environment variable holding the log filter directives
const LOG_VAR: &str = "LABCAL_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    lang: Option<Language>,
    events: Option<PathBuf>,
    log: Option<PathBuf>,
    month: Option<YearMonth>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("lang") => {
                    opts.lang = Some(parser.value()?.parse()?);
                }
                Arg::Short('e') | Arg::Long("events") => {
                    opts.events = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log") => opts.log = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.month.is_none() => {
                    opts.month = Some(value.parse()?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => opts.run(),
            Command::Help => {
                println!("Usage: labcal [<options>] [YYYY-MM]");
                println!();
                println!("Terminal month calendar for research-group meetings, deadlines & workshops");
                println!();
                println!("Options:");
                println!("  -e, --events <FILE>   Read events from the given JSON file instead of");
                println!("                        showing the built-in sample schedule");
                println!();
                println!("  -l, --lang <CODE>     Display language: \"en\" or \"zh\" [default: ${LANG_VAR}");
                println!("                        or \"en\"]");
                println!();
                println!("      --log <FILE>      Write diagnostics to the given file; filter with");
                println!("                        ${LOG_VAR} [default: info]");
                println!();
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl RunOptions {
    fn run(self) -> anyhow::Result<()> {
        if let Some(path) = &self.log {
            init_logging(path)?;
        }
        let lang = match self.lang {
            Some(lang) => lang,
            None => match std::env::var(LANG_VAR) {
                Ok(code) => code
                    .parse()
                    .with_context(|| format!("invalid value for ${LANG_VAR}"))?,
                Err(_) => Language::default(),
            },
        };
        let today = OffsetDateTime::now_local()
            .context("failed to determine local date")?
            .date();
        let mut cursor = MonthCursor::new(today);
        if let Some(month) = self.month {
            cursor = cursor
                .start_month(month)
                .with_context(|| format!("cannot display {month}"))?;
        }
        let source: Box<dyn EventSource> = match self.events {
            Some(path) => {
                let catalog = JsonCatalog::new(path);
                tracing::info!(path = %catalog.path().display(), "reading events from file");
                Box::new(catalog)
            }
            None => Box::new(FixtureCatalog::new(cursor.shown())),
        };
        let events = source.load().context("failed to load events")?;
        tracing::info!(%lang, month = %cursor.shown(), events = events.len(), "starting calendar");
        with_terminal(|mut terminal| {
            terminal.hide_cursor().context("failed to hide cursor")?;
            App::new(cursor, events, lang).run(terminal)?;
            Ok(())
        })
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

// The terminal UI owns stdout, so diagnostics only go to a file
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
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

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(RunOptions::default()));
    }

    #[test]
    fn test_all_options() {
        assert_eq!(
            parse(&["-l", "zh", "--events", "lab.json", "--log", "labcal.log", "2024-04"]).unwrap(),
            Command::Run(RunOptions {
                lang: Some(Language::Zh),
                events: Some(PathBuf::from("lab.json")),
                log: Some(PathBuf::from("labcal.log")),
                month: Some(YearMonth::new(2024, Month::April)),
            })
        );
    }

    #[test]
    fn test_long_lang_with_equals() {
        assert_eq!(
            parse(&["--lang=en_US.UTF-8"]).unwrap(),
            Command::Run(RunOptions {
                lang: Some(Language::En),
                ..RunOptions::default()
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["2024-04", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_values() {
        assert!(matches!(
            parse(&["2024-13"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(matches!(
            parse(&["-l", "fr"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(parse(&["2024-04", "2024-05"]).is_err());
        assert!(parse(&["--lang"]).is_err());
    }
}
