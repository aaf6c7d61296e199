//! Command-line front end for the city statistics core.
//!
//! # Responsibility
//! - Run one session per invocation against `city_data.csv` in the working
//!   directory.
//! - Render the table, chart series and notices as plain text.

use citystat_core::{
    core_version, default_log_level, init_logging, ChartPoint, CityService, CityTable,
    CsvCityStore, NewCity, Notice, Session, StoreConfig, CHART_TITLE, CHART_X_LABEL,
    CHART_Y_LABEL, DOWNLOAD_FILE_NAME, TABLE_HEADERS,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

const LOG_DIR_NAME: &str = "logs";
const CHART_WIDTH: u64 = 40;

#[derive(Parser)]
#[command(name = "citystat", about = "View, extend and export city statistics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the city table.
    List,
    /// Append a city and print the resulting table.
    Add {
        name: String,
        population: Option<u64>,
        area_km2: Option<u64>,
    },
    /// Write the table as CSV.
    Export {
        /// Destination file; defaults to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a population bar chart.
    Chart,
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Command::Version = cli.command {
        println!("citystat_core version={}", core_version());
        return ExitCode::SUCCESS;
    }

    match std::env::current_dir() {
        Ok(cwd) => {
            if let Err(err) = init_logging(default_log_level(), cwd.join(LOG_DIR_NAME)) {
                eprintln!("warning: logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("warning: logging disabled: {err}"),
    }

    let service = CityService::new(CsvCityStore::new(StoreConfig::default()));
    let (mut session, start_notice) = Session::start(service);
    if let Some(notice) = start_notice {
        print_notice(&notice);
        if session.is_degraded() {
            return ExitCode::FAILURE;
        }
    }

    match cli.command {
        Command::List => {
            print_table(session.table());
            ExitCode::SUCCESS
        }
        Command::Add {
            name,
            population,
            area_km2,
        } => {
            let notice = session.submit(NewCity {
                name,
                population,
                area_km2,
            });
            print_notice(&notice);
            print_table(session.table());
            if notice.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Command::Export { out } => export(&session, out),
        Command::Chart => {
            print_chart(&session.chart());
            ExitCode::SUCCESS
        }
        Command::Version => ExitCode::SUCCESS,
    }
}

fn export(session: &Session<CsvCityStore>, out: Option<PathBuf>) -> ExitCode {
    let bytes = match session.download() {
        Ok(bytes) => bytes,
        Err(notice) => {
            print_notice(&notice);
            return ExitCode::FAILURE;
        }
    };

    match out {
        Some(path) => match std::fs::write(&path, bytes) {
            Ok(()) => {
                println!("Wrote {} ({DOWNLOAD_FILE_NAME} format)", path.display());
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Error writing {}: {err}", path.display());
                ExitCode::FAILURE
            }
        },
        None => {
            print!("{}", String::from_utf8_lossy(&bytes));
            ExitCode::SUCCESS
        }
    }
}

fn print_notice(notice: &Notice) {
    if notice.is_error() {
        eprintln!("error: {}", notice.message);
    } else {
        println!("{}", notice.message);
    }
}

fn print_table(table: &CityTable) {
    let name_width = table
        .iter()
        .map(|record| record.name.chars().count())
        .chain(std::iter::once(TABLE_HEADERS[0].len()))
        .max()
        .unwrap_or_default();

    println!(
        "{:<name_width$}  {:>12}  {:>10}",
        TABLE_HEADERS[0], TABLE_HEADERS[1], TABLE_HEADERS[2]
    );
    for record in table {
        println!(
            "{:<name_width$}  {:>12}  {:>10}",
            record.name, record.population, record.area_km2
        );
    }
}

fn print_chart(series: &[ChartPoint]) {
    let max_value = series.iter().map(|point| point.value).max().unwrap_or(0);
    let label_width = series
        .iter()
        .map(|point| point.label.chars().count())
        .chain(std::iter::once(CHART_X_LABEL.len()))
        .max()
        .unwrap_or_default();

    println!("{CHART_TITLE}");
    println!("{:<label_width$}  {CHART_Y_LABEL}", CHART_X_LABEL);
    for point in series {
        let bar_len = if max_value == 0 {
            0
        } else {
            point.value.saturating_mul(CHART_WIDTH) / max_value
        };
        let bar = "#".repeat(usize::try_from(bar_len).unwrap_or_default());
        println!("{:<label_width$}  {bar} {}", point.label, point.value);
    }
}
