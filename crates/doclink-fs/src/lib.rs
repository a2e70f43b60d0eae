//! Filesystem primitives for doclink
//!
//! Provides the source media layout, hard-link and removal operations,
//! destination tree scans, and format-agnostic settings file loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod scan;

pub use config::ConfigStore;
pub use constants::SourceDir;
pub use error::{Error, Result};
pub use layout::SourceLayout;
pub use scan::{directories_deepest_first, list_dir, scan_pdf_files};
