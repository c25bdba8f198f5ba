mod table;

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use findpick_lib::FindError;
use findpick_lib::config::DialogConfig;
use findpick_lib::model::records_from_json;
use findpick_lib::schema::StandardFormatters;
use log::info;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

/// Open a find dialog over a JSON record list and print it as a table.
#[derive(Debug, Parser)]
#[command(name = "findpick", version, about)]
struct Cli {
    /// Dialog configuration (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Records to list (JSON array of objects)
    #[arg(short, long)]
    records: PathBuf,

    /// Only show rows containing this text
    #[arg(short, long)]
    filter: Option<String>,

    /// Toggle the sort of a column, by property name. Repeat to cycle.
    #[arg(short, long = "sort", value_name = "COLUMN")]
    sorts: Vec<String>,

    /// Pick the N-th displayed row (from 1) and print its record
    #[arg(short, long, value_name = "N")]
    pick: Option<usize>,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Find(#[from] FindError),
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No column named '{0}'")]
    UnknownColumn(String),
    #[error("Row {n} is not displayed ({visible} rows visible)")]
    NoSuchRow { n: usize, visible: usize },
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    WriteLogger::init(level(cli.verbose), Config::default(), std::io::stderr())?;

    let config = DialogConfig::from_json(&read(&cli.config)?)?;
    let records = records_from_json(&read(&cli.records)?)?;
    info!("Loaded {} columns and {} records", config.columns.len(), records.len());

    let mut session = config
        .into_dialog(Some(Rc::new(StandardFormatters::new())), None)
        .show(records);

    for name in &cli.sorts {
        match session.toggle_sort_by_name(name) {
            Some(order) => {
                info!("Sorted '{}' {:?}", name, order?);
            }
            None => return Err(CliError::UnknownColumn(name.clone())),
        }
    }

    if let Some(filter) = &cli.filter {
        session.set_filter_text(filter);
    }

    println!("{}", session.settings().title);
    println!("{}", table::render(&session));

    if let Some(n) = cli.pick {
        let order = session.display_order();
        let index = n
            .checked_sub(1)
            .and_then(|i| order.get(i).copied())
            .ok_or(CliError::NoSuchRow {
                n,
                visible: order.len(),
            })?;
        if let Some(record) = session.pick_row(index)? {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_sorts() {
        let cli = Cli::try_parse_from([
            "findpick", "--config", "c.json", "--records", "r.json", "--sort", "name", "--sort",
            "name", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.sorts, ["name", "name"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.pick, None);
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level(0), LevelFilter::Warn);
        assert_eq!(level(1), LevelFilter::Info);
        assert_eq!(level(5), LevelFilter::Trace);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = read(Path::new("/nonexistent/findpick.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read /nonexistent/findpick.json"));
    }
}
