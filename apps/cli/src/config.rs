//! CLI configuration management.
//!
//! Configuration is stored as TOML at `$XDG_CONFIG_HOME/albumshift/config.toml`
//! (falling back to `~/.config/albumshift/config.toml`). Values are layered:
//! file, then the `KEY_VK` / `TOKEN_YA` environment variables, then flags.

use std::path::{Path, PathBuf};

use albumshift_disk::DiskConfig;
use albumshift_source::SourceConfig;
use albumshift_transfer::{
    DEFAULT_DESTINATION_FOLDER, DEFAULT_LOG_FILE, DEFAULT_PAGE_SIZE, TransferConfig,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable carrying the VK access token.
pub const SOURCE_TOKEN_VAR: &str = "KEY_VK";

/// Environment variable carrying the Yandex Disk OAuth token.
pub const DISK_TOKEN_VAR: &str = "TOKEN_YA";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// VK access token.
    #[serde(default)]
    pub source_token: String,

    /// Yandex Disk OAuth token.
    #[serde(default)]
    pub disk_token: String,

    /// VK user whose albums are read.
    #[serde(default)]
    pub user_id: String,

    /// Root folder on the disk.
    #[serde(default = "default_destination_folder")]
    pub destination_folder: String,

    /// Photos fetched per album.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Outcome log path; empty disables the log.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// VK size variant to upload.
    #[serde(default = "default_size_variant")]
    pub size_variant: String,
}

fn default_destination_folder() -> String {
    DEFAULT_DESTINATION_FOLDER.into()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_size_variant() -> String {
    "w".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_token: String::new(),
            disk_token: String::new(),
            user_id: String::new(),
            destination_folder: default_destination_folder(),
            page_size: default_page_size(),
            log_file: default_log_file(),
            size_variant: default_size_variant(),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub user_id: Option<String>,
    pub destination_folder: Option<String>,
    pub page_size: Option<u32>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used and a template is written there on first run.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        let path = config_path(|key| std::env::var(key).ok());
        if path.exists() {
            Self::read(&path)
        } else {
            let config = Config::default();
            if let Err(e) = config.save(&path) {
                tracing::warn!(path = %path.display(), error = %e, "could not write configuration template");
            } else {
                tracing::info!(path = %path.display(), "configuration template written");
            }
            Ok(config)
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Saves the configuration to `path`, readable only by the owner.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Replaces tokens with non-empty values found through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty(SOURCE_TOKEN_VAR) {
            self.source_token = token.trim().to_string();
        }
        if let Some(token) = non_empty(DISK_TOKEN_VAR) {
            self.disk_token = token.trim().to_string();
        }
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(user_id) = &overrides.user_id {
            self.user_id = user_id.clone();
        }
        if let Some(folder) = &overrides.destination_folder {
            self.destination_folder = folder.clone();
        }
        if let Some(page_size) = overrides.page_size {
            self.page_size = page_size;
        }
        if let Some(log_file) = &overrides.log_file {
            self.log_file = log_file.clone();
        }
    }

    pub fn source_config(&self) -> anyhow::Result<SourceConfig> {
        anyhow::ensure!(
            !self.source_token.is_empty(),
            "VK token missing: set {SOURCE_TOKEN_VAR} or source_token in the config file"
        );
        anyhow::ensure!(
            !self.user_id.is_empty(),
            "VK user id missing: pass --user-id or set user_id in the config file"
        );

        let mut config = SourceConfig::new(&self.source_token, &self.user_id);
        config.size_variant = self.size_variant.clone();
        Ok(config)
    }

    pub fn disk_config(&self) -> anyhow::Result<DiskConfig> {
        anyhow::ensure!(
            !self.disk_token.is_empty(),
            "Yandex Disk token missing: set {DISK_TOKEN_VAR} or disk_token in the config file"
        );
        Ok(DiskConfig::new(&self.disk_token))
    }

    pub fn transfer_config(&self) -> TransferConfig {
        let log_path = if self.log_file.as_os_str().is_empty() {
            None
        } else {
            Some(self.log_file.clone())
        };

        TransferConfig {
            destination_folder: self.destination_folder.clone(),
            page_size: self.page_size,
            log_path,
        }
    }
}

/// Returns the configuration file path, resolving variables through `lookup`.
fn config_path(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let base = lookup("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let home = lookup("HOME").unwrap_or_else(|| "/tmp".into());
            PathBuf::from(home).join(".config")
        });
    base.join("albumshift").join("config.toml")
}
