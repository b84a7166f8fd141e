use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use publisher_core::SelectAllScope;
use serde::{Deserialize, Serialize};

/// Command-line flags. Anything left unset falls back to the settings file.
#[derive(Parser, Debug)]
#[command(name = "publisher", about = "Batch-publish article files to blog profiles", version)]
pub struct Cli {
    /// Base URL of the publisher backend (e.g. http://127.0.0.1:8000)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Profile to select on start-up
    #[arg(long)]
    pub profile: Option<String>,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Where log output goes
    #[arg(long, value_enum, default_value = "file")]
    pub log_destination: LogDestinationArg,

    /// What select-all affects in the category/tag dialog
    #[arg(long, value_enum)]
    pub select_all_scope: Option<ScopeArg>,

    /// Upper bound in seconds for each backend call during a batch (0 disables it)
    #[arg(long)]
    pub call_timeout_secs: Option<u64>,

    /// Settings file path
    #[arg(long, default_value = ".publisher_settings.ron")]
    pub settings: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogDestinationArg {
    File,
    Terminal,
    Both,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeArg {
    /// Include items hidden by the search filter
    All,
    /// Only the items currently shown
    Visible,
}

impl From<ScopeArg> for SelectAllScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::All => SelectAllScope::AllItems,
            ScopeArg::Visible => SelectAllScope::VisibleOnly,
        }
    }
}

impl From<SelectAllScope> for ScopeArg {
    fn from(scope: SelectAllScope) -> Self {
        match scope {
            SelectAllScope::AllItems => ScopeArg::All,
            SelectAllScope::VisibleOnly => ScopeArg::Visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_leave_overrides_unset() {
        let cli = Cli::try_parse_from(["publisher"]).unwrap();
        assert_eq!(cli.api_url, None);
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_destination, LogDestinationArg::File);
        assert_eq!(cli.select_all_scope, None);
        assert_eq!(cli.settings, PathBuf::from(".publisher_settings.ron"));
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "publisher",
            "--api-url",
            "http://localhost:9000",
            "--profile",
            "blog-A",
            "--log-destination",
            "both",
            "--select-all-scope",
            "visible",
            "--call-timeout-secs",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.profile.as_deref(), Some("blog-A"));
        assert_eq!(cli.log_destination, LogDestinationArg::Both);
        assert_eq!(cli.select_all_scope, Some(ScopeArg::Visible));
        assert_eq!(cli.call_timeout_secs, Some(30));
    }

    #[test]
    fn rejects_unknown_scope() {
        assert!(Cli::try_parse_from(["publisher", "--select-all-scope", "some"]).is_err());
    }
}
