//! Shared test utilities for the doclink workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`MirrorFixture`](tree::MirrorFixture), a temporary media root plus destination root
//! - [`records`]: builders for API records and paginated JSON envelopes

pub mod records;
pub mod tree;
