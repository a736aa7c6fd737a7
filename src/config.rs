//! Command-line configuration. The defaults open the same demo account the
//! tool has always started with, so running the binary without flags gives a
//! ready-to-use patron.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-account-manager";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "library-account.log";

#[derive(Debug, Clone, Parser)]
#[command(name = "library-account-manager")]
#[command(about = "Issue and return books against a single library account", long_about = None)]
pub struct Cli {
    /// Patron display name.
    #[arg(long, default_value = "Alice")]
    pub name: String,

    /// Patron home address.
    #[arg(long, default_value = "123 Main St")]
    pub address: String,

    /// Account number; must be positive.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub account_number: i64,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Where to write the log. Defaults to a file in the application data
    /// directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Resolve the log destination, falling back to the per-user data
    /// directory when no explicit path was given.
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => default_log_path(),
        }
    }
}

/// Resolve the absolute path to the log file inside the user's home.
fn default_log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults_match_demo_account() {
        let cli = Cli::try_parse_from(["library-account-manager"]).unwrap();
        assert_eq!(cli.name, "Alice");
        assert_eq!(cli.address, "123 Main St");
        assert_eq!(cli.account_number, 1);
        assert_eq!(cli.log_level, "info");
        assert!(cli.log_file.is_none());
    }

    #[rstest]
    #[case("-4", -4)]
    #[case("0", 0)]
    #[case("42", 42)]
    fn account_number_is_parsed_without_validation(#[case] raw: &str, #[case] expected: i64) {
        let cli =
            Cli::try_parse_from(["library-account-manager", "--account-number", raw]).unwrap();
        assert_eq!(cli.account_number, expected);
    }

    #[test]
    fn explicit_log_file_wins() {
        let cli = Cli::try_parse_from([
            "library-account-manager",
            "--log-file",
            "/tmp/library.log",
        ])
        .unwrap();
        assert_eq!(cli.log_path().unwrap(), PathBuf::from("/tmp/library.log"));
    }

    #[test]
    fn rejects_non_numeric_account_number() {
        let result =
            Cli::try_parse_from(["library-account-manager", "--account-number", "seven"]);
        assert!(result.is_err());
    }
}
