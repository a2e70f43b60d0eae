//! One complete mirror run
//!
//! All four collections are fetched and every document is hydrated before
//! the destination tree is touched, so a failed request or a dangling
//! reference leaves the tree exactly as it was.

use std::path::PathBuf;

use doclink_api::{DocumentSelection, PaperlessClient};
use doclink_fs::SourceLayout;

use crate::Result;
use crate::catalog::Catalog;
use crate::placement::FolderTags;
use crate::sync::{LinkSynchronizer, SyncOptions, SyncReport};

/// Everything a run needs besides the API client
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Media root holding `archive/` and `originals/`
    pub source_root: PathBuf,
    /// Root of the mirrored tree
    pub destination_root: PathBuf,
    pub selection: DocumentSelection,
    pub folder_tags: FolderTags,
    pub options: SyncOptions,
}

/// Fetch, resolve and synchronize in one call.
pub struct Mirror<'c> {
    client: &'c PaperlessClient,
    config: MirrorConfig,
}

impl<'c> Mirror<'c> {
    pub fn new(client: &'c PaperlessClient, config: MirrorConfig) -> Self {
        Self { client, config }
    }

    /// Run the full pipeline.
    ///
    /// # Errors
    ///
    /// Fetch and reference errors abort before any filesystem change. A
    /// document that cannot be linked is reported and the run goes on.
    pub fn run(&self) -> Result<SyncReport> {
        let catalog = Catalog::fetch(self.client)?;

        let documents = self
            .client
            .documents(&self.config.selection)?
            .collect::<doclink_api::Result<Vec<_>>>()?;
        tracing::debug!(
            count = documents.len(),
            selection = ?self.config.selection,
            "Fetched documents"
        );

        let hydrated = catalog.hydrate_all(documents)?;

        let synchronizer = LinkSynchronizer::new(
            SourceLayout::new(&self.config.source_root),
            &self.config.destination_root,
            self.config.folder_tags.clone(),
            self.config.options,
        );
        synchronizer.run(&hydrated)
    }
}
