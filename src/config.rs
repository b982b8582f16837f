//! Command-line configuration and default locations.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

use crate::logging::default_log_level;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-catalog";
/// Catalog file name stored inside the application data directory.
const CATALOG_FILE_NAME: &str = "library.csv";
/// Log folder inside the application data directory.
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Parser)]
#[command(name = "book-catalog")]
#[command(about = "Keep track of a small library of books", long_about = None)]
pub struct Cli {
    /// Catalog file to load on start and save on exit
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Fill in whatever the command line left out with the per-user defaults.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let catalog_path = match cli.file {
            Some(path) => path,
            None => data_dir()?.join(CATALOG_FILE_NAME),
        };
        let log_dir = match cli.log_dir {
            Some(dir) => dir,
            None => data_dir()?.join(LOG_DIR_NAME),
        };
        Ok(Self {
            catalog_path,
            log_dir,
            log_level: cli
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
        })
    }
}

/// Resolve the application data directory inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_win_over_defaults() {
        let cli = Cli::parse_from([
            "book-catalog",
            "--file",
            "/tmp/books.csv",
            "--log-dir",
            "/tmp/book-logs",
            "--log-level",
            "warn",
        ]);
        let config = Config::resolve(cli).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("/tmp/books.csv"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/book-logs"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn defaults_live_under_the_home_directory() {
        let Some(base_dirs) = BaseDirs::new() else {
            return;
        };
        let config = Config::resolve(Cli::parse_from(["book-catalog"])).unwrap();
        let data_dir = base_dirs.home_dir().join(DATA_DIR_NAME);
        assert_eq!(config.catalog_path, data_dir.join(CATALOG_FILE_NAME));
        assert_eq!(config.log_dir, data_dir.join(LOG_DIR_NAME));
    }

    #[test]
    fn short_file_flag_is_accepted() {
        let cli = Cli::parse_from(["book-catalog", "-f", "shelf.csv"]);
        assert_eq!(cli.file, Some(PathBuf::from("shelf.csv")));
        assert!(cli.log_level.is_none());
    }
}
