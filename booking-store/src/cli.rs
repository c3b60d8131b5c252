//! Command-line front end.
//!
//! Loads a JSON file of bookings into a [`BookingStore`] and runs one query
//! against it. Nothing is written back to the file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::domain::{Booking, BookingError};
use crate::dto::{BookingDto, parse_bookings};
use crate::store::BookingStore;

/// Query a set of airline bookings.
#[derive(Debug, Clone, Parser)]
#[command(name = "booking-store", version, about = "Query airline bookings by time or route")]
pub struct Args {
    /// JSON file holding an array of bookings
    #[arg(short = 'b', long = "bookings", env = "BOOKINGS_FILE", value_name = "FILE")]
    pub bookings: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Queries the CLI can run.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every booking in departure order
    List,
    /// Bookings departing strictly before TIME (YYYY-MM-DD HH:MM[:SS])
    Before { time: String },
    /// Bookings flying ORIGIN directly to DESTINATION
    Route { origin: String, destination: String },
}

/// Errors from the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bookings file could not be read
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// Bookings file is not a JSON array of bookings
    #[error("invalid bookings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An entry in the file was rejected
    #[error("booking #{index} rejected: {source}")]
    Booking { index: usize, source: BookingError },

    /// The query itself was rejected
    #[error(transparent)]
    Query(#[from] BookingError),

    /// Writing results failed
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise logs this crate at `info`, or
/// `debug` with `verbose`.
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("booking_store={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    debug!("Logging initialized at level: {}", level);
}

/// Read a bookings file into a store.
///
/// Entries are added in file order. The first invalid or duplicate entry
/// aborts loading.
pub fn load_store(path: &Path) -> Result<BookingStore, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let dtos = parse_bookings(&text)?;

    let mut store = BookingStore::with_capacity(dtos.len());
    for (index, dto) in dtos.into_iter().enumerate() {
        Booking::try_from(dto)
            .and_then(|booking| store.add(booking))
            .map_err(|source| CliError::Booking { index, source })?;
    }

    info!(count = store.len(), path = %path.display(), "Loaded bookings");
    Ok(store)
}

/// Load the bookings and run the requested query, writing results to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    let store = load_store(&args.bookings)?;

    let found: Vec<&Booking> = match &args.command {
        Command::List => store.iter().collect(),
        Command::Before { time } => store.search_before(time)?.iter().collect(),
        Command::Route {
            origin,
            destination,
        } => store.search_route(origin, destination)?,
    };

    write_bookings(&found, args.json, out)
}

fn write_bookings(
    bookings: &[&Booking],
    json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if json {
        let dtos: Vec<BookingDto> = bookings.iter().map(|b| BookingDto::from(*b)).collect();
        serde_json::to_writer_pretty(&mut *out, &dtos)?;
        writeln!(out)?;
    } else {
        for booking in bookings {
            writeln!(out, "{booking}")?;
        }
        writeln!(out, "{} booking(s)", bookings.len())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const BOOKINGS: &str = r#"[
        {"passenger": "Bruce", "departure": "2024-09-19 18:45", "itinerary": ["AMS", "LHR", "JFK", "AMS"]},
        {"passenger": "Alice", "departure": "2024-09-19 06:45", "itinerary": ["LHR", "AMS", "JFK"]},
        {"passenger": "Cindy", "departure": "2024-09-18 18:30", "itinerary": ["LHR", "JFK", "AMS"]}
    ]"#;

    fn bookings_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn args(file: &NamedTempFile, json: bool, command: Command) -> Args {
        Args {
            bookings: file.path().to_path_buf(),
            json,
            verbose: false,
            command,
        }
    }

    fn run_to_string(args: &Args) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn load_store_sorts_entries() {
        let file = bookings_file(BOOKINGS);
        let store = load_store(file.path()).unwrap();

        let names: Vec<&str> = store.iter().map(Booking::passenger).collect();
        assert_eq!(names, vec!["Cindy", "Alice", "Bruce"]);
    }

    #[test]
    fn load_store_reports_bad_entry_index() {
        let file = bookings_file(
            r#"[
                {"passenger": "Alice", "departure": "2024-09-19 06:45", "itinerary": ["LHR"]},
                {"passenger": "", "departure": "2024-09-19 06:45", "itinerary": ["LHR"]}
            ]"#,
        );

        match load_store(file.path()) {
            Err(CliError::Booking { index, source }) => {
                assert_eq!(index, 1);
                assert!(source.is_invalid_argument());
            }
            other => panic!("expected booking error, got {other:?}"),
        }
    }

    #[test]
    fn load_store_reports_duplicates() {
        let entry = r#"{"passenger": "Alice", "departure": "2024-09-19 06:45", "itinerary": ["LHR"]}"#;
        let file = bookings_file(&format!("[{entry}, {entry}]"));

        match load_store(file.path()) {
            Err(CliError::Booking { index, source }) => {
                assert_eq!(index, 1);
                assert!(source.is_duplicate());
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn load_store_missing_file() {
        let err = load_store(Path::new("/nonexistent/bookings.json")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn load_store_rejects_malformed_json() {
        let file = bookings_file("{not json");
        assert!(matches!(load_store(file.path()), Err(CliError::Json(_))));
    }

    #[test]
    fn before_command_prints_matches() {
        let file = bookings_file(BOOKINGS);
        let output = run_to_string(&args(
            &file,
            false,
            Command::Before {
                time: "2024-09-19 08:00".into(),
            },
        ))
        .unwrap();

        assert_eq!(
            output,
            "Booking(Cindy, 2024-09-18 18:30:00, LHR -> JFK -> AMS)\n\
             Booking(Alice, 2024-09-19 06:45:00, LHR -> AMS -> JFK)\n\
             2 booking(s)\n"
        );
    }

    #[test]
    fn route_command_prints_json() {
        let file = bookings_file(BOOKINGS);
        let output = run_to_string(&args(
            &file,
            true,
            Command::Route {
                origin: "LHR".into(),
                destination: "AMS".into(),
            },
        ))
        .unwrap();

        let dtos: Vec<BookingDto> = serde_json::from_str(&output).unwrap();
        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].passenger, "Alice");
    }

    #[test]
    fn list_command_prints_everything() {
        let file = bookings_file(BOOKINGS);
        let output = run_to_string(&args(&file, false, Command::List)).unwrap();
        assert!(output.ends_with("3 booking(s)\n"));
    }

    #[test]
    fn invalid_query_is_an_error() {
        let file = bookings_file(BOOKINGS);
        let err = run_to_string(&args(
            &file,
            false,
            Command::Route {
                origin: "LHR".into(),
                destination: "LHR".into(),
            },
        ))
        .unwrap_err();

        match err {
            CliError::Query(e) => assert!(e.is_invalid_argument()),
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "booking-store",
            "--bookings",
            "bookings.json",
            "--json",
            "route",
            "LHR",
            "AMS",
        ])
        .unwrap();

        assert!(args.json);
        assert_eq!(args.bookings, PathBuf::from("bookings.json"));
        match args.command {
            Command::Route {
                origin,
                destination,
            } => {
                assert_eq!(origin, "LHR");
                assert_eq!(destination, "AMS");
            }
            other => panic!("expected route command, got {other:?}"),
        }
    }
}
