//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Overrides;

#[derive(Debug, Parser)]
#[command(name = "albumshift", version, about = "Copy VK photo albums to Yandex Disk")]
pub struct Cli {
    /// Configuration file (defaults to ~/.config/albumshift/config.toml).
    #[arg(long, global = true, env = "ALBUMSHIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// VK user whose albums are read.
    #[arg(long, global = true)]
    pub user_id: Option<String>,

    /// Root folder on the disk.
    #[arg(long, global = true)]
    pub folder: Option<String>,

    /// Number of photos fetched per album.
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub count: Option<u32>,

    /// Outcome log path.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Transfer one album. Prompts for the title unless `--album` is given.
    Transfer {
        /// Album title, matched case-insensitively. Empty selects profile photos.
        #[arg(long)]
        album: Option<String>,
    },
    /// List the user's albums.
    Albums,
    /// Show the user the tokens resolve to.
    Whoami,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            user_id: self.user_id.clone(),
            destination_folder: self.folder.clone(),
            page_size: self.count,
            log_file: self.log_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transfer_with_globals() {
        let cli = Cli::parse_from([
            "albumshift",
            "transfer",
            "--album",
            "Summer",
            "--folder",
            "Backup",
            "--count",
            "10",
        ]);
        assert!(matches!(
            cli.command,
            Command::Transfer { album: Some(ref a) } if a == "Summer"
        ));
        let o = cli.overrides();
        assert_eq!(o.destination_folder.as_deref(), Some("Backup"));
        assert_eq!(o.page_size, Some(10));
        assert!(o.user_id.is_none());
    }

    #[test]
    fn zero_count_rejected() {
        assert!(Cli::try_parse_from(["albumshift", "--count", "0", "albums"]).is_err());
    }

    #[test]
    fn command_required() {
        assert!(Cli::try_parse_from(["albumshift"]).is_err());
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
