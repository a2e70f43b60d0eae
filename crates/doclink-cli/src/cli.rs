//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// doclink - mirror a Paperless document store into a hard-linked folder tree
#[derive(Parser, Debug)]
#[command(name = "doclink")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("selection")
        .required(true)
        .args(["filter_tag_id", "all"])
))]
pub struct Cli {
    /// Base URL of the Paperless server, e.g. https://paperless.example.com
    #[arg(long, env = "API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// PEM client certificate for mutual TLS (requires --client-key)
    #[arg(long, env = "CLIENT_CERT")]
    pub client_cert: Option<PathBuf>,

    /// PEM private key for mutual TLS (requires --client-cert)
    #[arg(long, env = "CLIENT_KEY")]
    pub client_key: Option<PathBuf>,

    /// API token
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Paperless media root containing archive/ and originals/
    #[arg(long, env = "SRC_DIR")]
    pub src_dir: Option<PathBuf>,

    /// Root of the mirrored tree
    #[arg(long, env = "DST_DIR")]
    pub dst_dir: Option<PathBuf>,

    /// Print what would change without touching the destination
    #[arg(long, env = "DRY_RUN")]
    pub dry_run: bool,

    /// Comma-separated tag ids that add a tag folder layer, e.g. "4,9"
    #[arg(long, env = "FOLDER_TAGS")]
    pub folder_tags: Option<String>,

    /// Only mirror documents carrying this tag id
    #[arg(long)]
    pub filter_tag_id: Option<u64>,

    /// Mirror every document
    #[arg(long)]
    pub all: bool,

    /// Settings file (TOML, JSON or YAML); flags and environment take precedence
    #[arg(long, env = "DOCLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long, env = "DOCLINK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Records requested per page [default: 1000]
    #[arg(long, env = "DOCLINK_PAGE_SIZE")]
    pub page_size: Option<u32>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("doclink").chain(args.iter().copied()))
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn selection_is_required() {
        let err = parse(&["--dst-dir", "/tmp/out"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn selection_flags_conflict() {
        let err = parse(&["--all", "--filter-tag-id", "3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_tag_selection() {
        let cli = parse(&["--filter-tag-id", "3", "--dry-run", "--folder-tags", "1,2"]).unwrap();
        assert_eq!(cli.filter_tag_id, Some(3));
        assert!(!cli.all);
        assert!(cli.dry_run);
        assert_eq!(cli.folder_tags.as_deref(), Some("1,2"));
    }

    #[test]
    fn rejects_non_numeric_tag_id() {
        let err = parse(&["--filter-tag-id", "inbox"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
