//! LinkSynchronizer implementation
//!
//! A run has two phases. The link phase walks the selected documents in
//! order and makes sure each one has a hard link at its derived path. The
//! sweep phase removes every pre-existing `*.pdf` no document claimed, then
//! every directory that removal left empty.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use doclink_fs::{SourceLayout, io};

use super::report::{Action, SyncReport, Warning};
use super::state::LinkState;
use crate::Result;
use crate::catalog::HydratedDocument;
use crate::placement::{FolderTags, destination_path};

/// Options for a synchronization run
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// If true, record every mutation as a prediction without touching the disk.
    pub dry_run: bool,
}

/// Converges a destination tree to the selected documents.
pub struct LinkSynchronizer {
    layout: SourceLayout,
    root: PathBuf,
    folder_tags: FolderTags,
    options: SyncOptions,
}

impl LinkSynchronizer {
    pub fn new(
        layout: SourceLayout,
        root: impl Into<PathBuf>,
        folder_tags: FolderTags,
        options: SyncOptions,
    ) -> Self {
        Self {
            layout,
            root: root.into(),
            folder_tags,
            options,
        }
    }

    /// Run the link phase and then the sweep phase.
    ///
    /// # Errors
    ///
    /// Failures to create the root, scan it or sweep it abort the run.
    /// Problems with a single document, including a failed link, are
    /// reported as warnings instead.
    pub fn run(&self, documents: &[HydratedDocument]) -> Result<SyncReport> {
        let mut run = Run {
            dry_run: self.options.dry_run,
            report: SyncReport::new(self.options.dry_run),
            planned_dirs: BTreeSet::new(),
        };

        if !self.root.is_dir() {
            run.create_dir(&self.root)?;
        }

        let mut state = LinkState::scan(&self.root)?;
        tracing::debug!(
            root = %self.root.display(),
            existing = state.existing().len(),
            documents = documents.len(),
            dry_run = run.dry_run,
            "Starting link phase"
        );

        for doc in documents {
            let span = tracing::info_span!("document", doc_id = doc.id(), doc_title = doc.title());
            let _guard = span.enter();
            self.link_document(doc, &mut state, &mut run);
        }

        self.sweep(&state, &mut run)?;

        let report = run.report;
        tracing::info!(
            documents = report.documents,
            linked = report.linked,
            unchanged = report.unchanged,
            unresolved = report.unresolved,
            removed_files = report.removed_files(),
            removed_dirs = report.removed_dirs(),
            warnings = report.warnings.len(),
            "Synchronization finished"
        );
        Ok(report)
    }

    fn link_document(&self, doc: &HydratedDocument, state: &mut LinkState, run: &mut Run) {
        run.report.documents += 1;
        let dst = self.root.join(destination_path(doc, &self.folder_tags));

        let Some(source) = self.layout.resolve(doc.id()) else {
            let candidates = self.layout.candidates(doc.id());
            tracing::warn!(?candidates, "Source file does not exist");
            run.report.unresolved += 1;
            run.report.warnings.push(Warning::MissingSource {
                document: doc.id(),
                candidates,
            });
            return;
        };

        if let Some(claimed_by) = state.claimed_by(&dst) {
            tracing::warn!(path = %dst.display(), claimed_by, "Destination already used in this run");
            run.report.warnings.push(Warning::DestinationCollision {
                document: doc.id(),
                path: dst,
                claimed_by,
            });
            return;
        }

        if dst.symlink_metadata().is_err() {
            if let Err(err) = create_link(&source.path, &dst, run) {
                tracing::warn!(path = %dst.display(), error = %err, "Cannot link document");
                run.report.warnings.push(Warning::LinkFailed {
                    document: doc.id(),
                    path: dst,
                    message: err.to_string(),
                });
                return;
            }
            run.report.linked += 1;
        } else if is_same_file(&source.path, &dst) {
            tracing::debug!(path = %dst.display(), "Already linked");
            run.report.unchanged += 1;
        } else {
            tracing::warn!(path = %dst.display(), source = %source.path.display(), "Destination occupied by another file");
            run.report.warnings.push(Warning::DestinationOccupied {
                document: doc.id(),
                path: dst.clone(),
                source: source.path,
            });
        }

        state.claim(dst, doc.id());
    }

    fn sweep(&self, state: &LinkState, run: &mut Run) -> Result<()> {
        let mut removed: BTreeSet<PathBuf> = BTreeSet::new();

        for path in state.stale() {
            run.apply(Action::RemoveFile { path: path.clone() })?;
            removed.insert(path);
        }

        // Links predicted in dry-run are not on disk, so liveness comes from
        // the claimed paths rather than from directory contents alone.
        let live = state.live_dirs(&self.root);
        for dir in doclink_fs::directories_deepest_first(&self.root)? {
            if live.contains(&dir) {
                continue;
            }
            let entries = doclink_fs::list_dir(&dir)?;
            if entries.iter().all(|entry| removed.contains(entry)) {
                run.apply(Action::RemoveDir { path: dir.clone() })?;
                removed.insert(dir);
            }
        }
        Ok(())
    }
}

/// Create the parent directories of `dst` if needed, then link it.
fn create_link(src: &Path, dst: &Path, run: &mut Run) -> doclink_fs::Result<()> {
    if let Some(parent) = dst.parent() {
        if !parent.is_dir() {
            run.create_dir(parent)?;
        }
    }
    run.apply(Action::Link {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
    })
}

fn is_same_file(src: &Path, dst: &Path) -> bool {
    match io::same_file(src, dst) {
        Ok(same) => same,
        Err(err) => {
            tracing::debug!(error = %err, "Cannot compare file identity");
            false
        }
    }
}

/// Mutable bookkeeping for one run.
struct Run {
    dry_run: bool,
    report: SyncReport,
    /// Directories already created (or predicted) during this run
    planned_dirs: BTreeSet<PathBuf>,
}

impl Run {
    fn create_dir(&mut self, path: &Path) -> doclink_fs::Result<()> {
        if !self.planned_dirs.insert(path.to_path_buf()) {
            return Ok(());
        }
        let created = self.apply(Action::CreateDir {
            path: path.to_path_buf(),
        });
        if created.is_err() {
            self.planned_dirs.remove(path);
        }
        created
    }

    /// Perform `action` unless this is a dry run, and record it either way.
    ///
    /// A dry run still fails a directory creation that an existing
    /// non-directory would block.
    fn apply(&mut self, action: Action) -> doclink_fs::Result<()> {
        if self.dry_run {
            if let Action::CreateDir { path } = &action {
                io::check_creatable(path)?;
            }
            tracing::info!("{}", action.prediction());
        } else {
            match &action {
                Action::CreateDir { path } => io::ensure_dir(path)?,
                Action::Link { src, dst } => io::hard_link(src, dst)?,
                Action::RemoveFile { path } => io::remove_file(path)?,
                Action::RemoveDir { path } => io::remove_dir(path)?,
            }
            tracing::info!("{action}");
        }
        self.report.actions.push(action);
        Ok(())
    }
}
