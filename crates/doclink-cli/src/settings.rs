//! Settings resolution
//!
//! Values come from three places, highest precedence first: command-line
//! flags, environment variables (both handled by clap), and an optional
//! settings file. The merged values are validated into [`Settings`] before
//! anything touches the network or the destination tree.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use doclink_api::{ConnectionConfig, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT, DocumentSelection};
use doclink_core::{FolderTags, MirrorConfig, SyncOptions};
use doclink_fs::ConfigStore;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Contents of a settings file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub api_base_url: Option<String>,
    pub client_cert: Option<PathBuf>,
    pub client_key: Option<PathBuf>,
    pub token: Option<String>,
    pub src_dir: Option<PathBuf>,
    pub dst_dir: Option<PathBuf>,
    pub dry_run: Option<bool>,
    pub folder_tags: Option<String>,
    /// Seconds
    pub timeout: Option<u64>,
    pub page_size: Option<u32>,
}

impl FileSettings {
    /// Load a settings file, format chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        ConfigStore::new().load(path).map_err(|e| {
            CliError::config(format!("Cannot load settings file {}: {e}", path.display()))
        })
    }
}

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: Url,
    pub client_cert: Option<PathBuf>,
    pub client_key: Option<PathBuf>,
    pub token: Option<String>,
    pub src_dir: PathBuf,
    pub dst_dir: PathBuf,
    pub dry_run: bool,
    pub folder_tags: FolderTags,
    pub selection: DocumentSelection,
    pub timeout: Duration,
    pub page_size: u32,
}

impl Settings {
    /// Merge the parsed command line with its settings file (if any).
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileSettings::load(path)?,
            None => FileSettings::default(),
        };
        Self::merge(cli, file)
    }

    /// Merge flags over file values and validate the result.
    pub fn merge(cli: &Cli, file: FileSettings) -> Result<Self> {
        let api_base_url = cli
            .api_base_url
            .clone()
            .or(file.api_base_url)
            .ok_or_else(|| missing("API base URL", "--api-base-url", "API_BASE_URL"))?;
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            CliError::config(format!("Invalid API base URL {api_base_url:?}: {e}"))
        })?;

        let client_cert = cli.client_cert.clone().or(file.client_cert);
        let client_key = cli.client_key.clone().or(file.client_key);
        if client_cert.is_some() != client_key.is_some() {
            return Err(CliError::config(
                "--client-cert and --client-key must be given together",
            ));
        }

        let src_dir = cli
            .src_dir
            .clone()
            .or(file.src_dir)
            .ok_or_else(|| missing("source directory", "--src-dir", "SRC_DIR"))?;
        if !src_dir.is_dir() {
            return Err(CliError::config(format!(
                "Source directory does not exist: {}",
                src_dir.display()
            )));
        }

        let dst_dir = cli
            .dst_dir
            .clone()
            .or(file.dst_dir)
            .ok_or_else(|| missing("destination directory", "--dst-dir", "DST_DIR"))?;

        let folder_tags = match cli.folder_tags.as_deref().or(file.folder_tags.as_deref()) {
            Some(list) => list
                .parse::<FolderTags>()
                .map_err(|e| CliError::config(e.to_string()))?,
            None => FolderTags::default(),
        };

        let timeout = match cli.timeout.or(file.timeout) {
            Some(0) => return Err(CliError::config("Timeout must be at least one second")),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        let page_size = match cli.page_size.or(file.page_size) {
            Some(0) => return Err(CliError::config("Page size must be at least 1")),
            Some(size) => size,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            api_base_url,
            client_cert,
            client_key,
            token: cli.token.clone().or(file.token),
            src_dir,
            dst_dir,
            dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
            folder_tags,
            selection: selection(cli),
            timeout,
            page_size,
        })
    }

    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            api_base_url: self.api_base_url.clone(),
            client_cert: self.client_cert.clone(),
            client_key: self.client_key.clone(),
            token: self.token.clone(),
            timeout: self.timeout,
        }
    }

    pub fn mirror_config(&self) -> MirrorConfig {
        MirrorConfig {
            source_root: self.src_dir.clone(),
            destination_root: self.dst_dir.clone(),
            selection: self.selection,
            folder_tags: self.folder_tags.clone(),
            options: SyncOptions {
                dry_run: self.dry_run,
            },
        }
    }
}

/// clap guarantees exactly one of `--filter-tag-id` / `--all`.
fn selection(cli: &Cli) -> DocumentSelection {
    match cli.filter_tag_id {
        Some(tag) => DocumentSelection::Tag(tag),
        None => DocumentSelection::All,
    }
}

fn missing(what: &str, flag: &str, env: &str) -> CliError {
    CliError::config(format!("Missing {what}: pass {flag} or set {env}"))
}
