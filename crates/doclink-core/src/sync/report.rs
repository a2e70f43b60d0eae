//! Report types for a synchronization run

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A mutating filesystem action, performed or (in dry-run) predicted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    CreateDir { path: PathBuf },
    Link { src: PathBuf, dst: PathBuf },
    RemoveFile { path: PathBuf },
    RemoveDir { path: PathBuf },
}

impl Action {
    /// Describe the action as a prediction, e.g. `Would link a to b`.
    pub fn prediction(&self) -> String {
        match self {
            Self::CreateDir { path } => format!("Would create directory: {}", path.display()),
            Self::Link { src, dst } => {
                format!("Would link {} to {}", src.display(), dst.display())
            }
            Self::RemoveFile { path } => format!("Would remove stale file: {}", path.display()),
            Self::RemoveDir { path } => {
                format!("Would remove empty directory: {}", path.display())
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path } => write!(f, "Created directory: {}", path.display()),
            Self::Link { src, dst } => {
                write!(f, "Linked {} to {}", src.display(), dst.display())
            }
            Self::RemoveFile { path } => write!(f, "Removed stale file: {}", path.display()),
            Self::RemoveDir { path } => write!(f, "Removed empty directory: {}", path.display()),
        }
    }
}

/// A per-document problem that did not abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum Warning {
    /// Neither source candidate exists; the document is absent this run
    MissingSource {
        document: u64,
        candidates: Vec<PathBuf>,
    },
    /// Another document of this run already derived the same path
    DestinationCollision {
        document: u64,
        path: PathBuf,
        claimed_by: u64,
    },
    /// A different file already sits at the derived path and is kept
    DestinationOccupied {
        document: u64,
        path: PathBuf,
        source: PathBuf,
    },
    /// Creating the link or its directories failed; the path stays unclaimed
    LinkFailed {
        document: u64,
        path: PathBuf,
        message: String,
    },
}

impl Warning {
    pub fn document(&self) -> u64 {
        match self {
            Self::MissingSource { document, .. }
            | Self::DestinationCollision { document, .. }
            | Self::DestinationOccupied { document, .. }
            | Self::LinkFailed { document, .. } => *document,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource {
                document,
                candidates,
            } => {
                let checked: Vec<String> =
                    candidates.iter().map(|p| p.display().to_string()).collect();
                write!(
                    f,
                    "Document {document}: source file does not exist (checked {})",
                    checked.join(", ")
                )
            }
            Self::DestinationCollision {
                document,
                path,
                claimed_by,
            } => write!(
                f,
                "Document {document}: {} is already used by document {claimed_by}",
                path.display()
            ),
            Self::DestinationOccupied { document, path, .. } => write!(
                f,
                "Document {document}: destination file already exists and is not a link to its source: {}",
                path.display()
            ),
            Self::LinkFailed {
                document,
                path,
                message,
            } => write!(
                f,
                "Document {document}: cannot link {}: {message}",
                path.display()
            ),
        }
    }
}

/// Outcome of one synchronization run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Whether actions were only predicted
    pub dry_run: bool,
    /// Documents processed in the link phase
    pub documents: usize,
    /// Links created (or predicted)
    pub linked: usize,
    /// Destinations already linked to their source
    pub unchanged: usize,
    /// Documents whose source file could not be found
    pub unresolved: usize,
    /// Actions in the order they were taken
    pub actions: Vec<Action>,
    pub warnings: Vec<Warning>,
}

impl SyncReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// True when the run changed (or would change) nothing on disk.
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn removed_files(&self) -> usize {
        self.count(|a| matches!(a, Action::RemoveFile { .. }))
    }

    pub fn removed_dirs(&self) -> usize {
        self.count(|a| matches!(a, Action::RemoveDir { .. }))
    }

    /// Human-readable action lines, phrased as predictions in dry-run.
    pub fn action_lines(&self) -> Vec<String> {
        self.actions
            .iter()
            .map(|a| {
                if self.dry_run {
                    a.prediction()
                } else {
                    a.to_string()
                }
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Action) -> bool) -> usize {
        self.actions.iter().filter(|a| pred(a)).count()
    }
}
