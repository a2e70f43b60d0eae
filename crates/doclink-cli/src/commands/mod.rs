//! Command implementations for doclink-cli

pub mod link;

pub use link::run_link;
