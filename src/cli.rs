use crate::scanner::{ScanConfig, DEFAULT_CONCURRENCY};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "findme",
    about = "FindME - look up a username across social and developer platforms",
    version
)]

pub struct Args {
    /// Username to search for (prompted when omitted)
    pub username: Option<String>,

    /// Platform catalog (JSON); defaults to data.json, then the bundled catalog
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Number of platforms probed concurrently
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub threads: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "5")]
    pub timeout: u64,

    /// Write the scan report to a JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Hide the banner and progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            concurrency: self.threads,
            timeout: Duration::from_secs(self.timeout),
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["findme"]).unwrap();
        assert_eq!(args.username, None);
        assert_eq!(args.scan_config(), ScanConfig::default());
        assert_eq!(args.log_level(), "info");
    }

    #[test]
    fn test_full_invocation() {
        let args = Args::try_parse_from([
            "findme", "bob", "-d", "sites.json", "-t", "32", "--timeout", "2", "-o", "out.json", "-q",
        ])
        .unwrap();
        assert_eq!(args.username.as_deref(), Some("bob"));
        assert_eq!(args.data, Some(PathBuf::from("sites.json")));
        assert_eq!(args.scan_config().concurrency, 32);
        assert_eq!(args.scan_config().timeout, Duration::from_secs(2));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.log_level(), "error");
    }

    #[test]
    fn test_rejects_non_numeric_threads() {
        assert!(Args::try_parse_from(["findme", "-t", "many"]).is_err());
    }
}
