//! Link synchronization between the selected documents and the destination tree
//!
//! This module provides:
//! - **engine**: the link phase and the sweep phase
//! - **state**: the per-run working sets (existing files, linked files)
//! - **report**: actions taken or predicted, and per-document warnings

mod engine;
mod report;
mod state;

pub use engine::{LinkSynchronizer, SyncOptions};
pub use report::{Action, SyncReport, Warning};
pub use state::LinkState;
