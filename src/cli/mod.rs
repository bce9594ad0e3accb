//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use indicatif::ProgressBar;

use crate::{
    config::{default_db_path, Config},
    sheets::{DEFAULT_READ_RANGE, DEFAULT_WRITE_RANGE, SHEETS_API_BASE},
    weather::OPENWEATHER_API_BASE,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Google service-account JSON key
    #[arg(long, global = true, env = "SERVICE_ACCOUNT_FILE")]
    pub service_account_file: Option<PathBuf>,

    /// Bearer token for the Sheets API, used instead of the service account
    #[arg(long, global = true, env = "SHEETS_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub weather_api_key: Option<String>,

    /// Local SQLite store [default: ~/datacollect.sqlite]
    #[arg(long, global = true, env = "DATACOLLECT_DB")]
    pub db: Option<PathBuf>,

    #[arg(long, global = true, env = "SHEETS_API_BASE", default_value = SHEETS_API_BASE, hide = true)]
    pub sheets_base_url: String,

    #[arg(long, global = true, env = "OPENWEATHER_API_BASE", default_value = OPENWEATHER_API_BASE, hide = true)]
    pub weather_base_url: String,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            service_account_file: self.service_account_file.clone(),
            access_token: self.access_token.clone(),
            weather_api_key: self.weather_api_key.clone(),
            db_path: self.db.clone().unwrap_or_else(default_db_path),
            sheets_base_url: self.sheets_base_url.clone(),
            weather_base_url: self.weather_base_url.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new spreadsheet and print its URL
    Create { title: String },
    /// Check whether a spreadsheet exists
    Exists { sheet: String },
    /// Print the numeric id of the sheet with the given title
    Find { sheet: String, title: String },
    /// List the sheets of a spreadsheet
    Tabs { sheet: String },
    /// Print a range as CSV
    Get {
        sheet: String,
        #[arg(long, default_value = DEFAULT_READ_RANGE)]
        range: String,
    },
    /// Write CSV (from a file or stdin) starting at a cell
    Set {
        sheet: String,
        #[arg(long, default_value = DEFAULT_WRITE_RANGE)]
        range: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Append CSV rows (from a file or stdin) to a sheet
    Append {
        sheet: String,
        #[arg(long, default_value = DEFAULT_WRITE_RANGE)]
        range: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Get the current weather for a city
    Weather {
        city: String,
        /// Top-level fields to keep
        #[arg(long, value_delimiter = ',', default_value = "main")]
        keys: Vec<String>,
        /// Also append a stamped row to this spreadsheet
        #[arg(long)]
        sheet: Option<String>,
        #[arg(long, default_value = DEFAULT_WRITE_RANGE)]
        range: String,
    },
    /// Write a table of sample people to a new dated spreadsheet
    People {
        #[arg(long, default_value_t = 5)]
        count: usize,
        /// Write into this spreadsheet instead of creating one
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Open the local store and report on it
    Store {},
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_parse_weather_keys() {
        let cli = Cli::try_parse_from([
            "datacollect",
            "weather",
            "Berlin",
            "--keys",
            "main,wind",
            "--weather-api-key",
            "k",
        ])
        .unwrap();

        match cli.command {
            Commands::Weather { city, keys, sheet, range } => {
                assert_eq!(city, "Berlin");
                assert_eq!(keys, vec!["main", "wind"]);
                assert_eq!(sheet, None);
                assert_eq!(range, DEFAULT_WRITE_RANGE);
            }
            _ => panic!("expected weather command"),
        }
        assert_eq!(cli.weather_api_key.as_deref(), Some("k"));
    }

    #[test]
    fn should_default_ranges() {
        let cli = Cli::try_parse_from(["datacollect", "get", "ABC123"]).unwrap();

        match cli.command {
            Commands::Get { sheet, range } => {
                assert_eq!(sheet, "ABC123");
                assert_eq!(range, DEFAULT_READ_RANGE);
            }
            _ => panic!("expected get command"),
        }
    }

    #[test]
    fn should_build_config_with_explicit_db() {
        let cli =
            Cli::try_parse_from(["datacollect", "store", "--db", "/tmp/collect.sqlite"]).unwrap();

        assert_eq!(cli.config().db_path, PathBuf::from("/tmp/collect.sqlite"));
    }

    #[test]
    fn should_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
