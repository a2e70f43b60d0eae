//! Reconciliation engine for doclink
//!
//! This crate turns remote document metadata into a hard-linked directory
//! tree and keeps that tree converged:
//!
//! - **Catalog**: id-keyed lookup tables for correspondents, document types
//!   and tags, and hydration of documents against them
//! - **Placement**: the pure mapping from a hydrated document to its
//!   destination path
//! - **LinkSynchronizer**: link phase then sweep phase against the
//!   destination tree, with a dry-run mode that only reports
//! - **Mirror**: one full run, fetch to sweep
//!
//! # Architecture
//!
//! ```text
//!                  doclink-cli
//!                       |
//!                  doclink-core
//!                       |
//!              +--------+--------+
//!              |                 |
//!          doclink-fs       doclink-api
//! ```

pub mod catalog;
pub mod error;
pub mod mirror;
pub mod placement;
pub mod sync;

pub use catalog::{Catalog, HydratedDocument, ResolvedTag};
pub use error::{Error, ReferenceKind, Result};
pub use mirror::{Mirror, MirrorConfig};
pub use placement::{FolderTags, destination_path};
pub use sync::{Action, LinkState, LinkSynchronizer, SyncOptions, SyncReport, Warning};
