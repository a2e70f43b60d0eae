//! Read-only client for the document store's REST API
//!
//! Every collection endpoint answers with a cursor envelope
//! (`{"next": ..., "results": [...]}`); [`Paginated`] walks those envelopes
//! lazily and yields records in server order.
//!
//! ```text
//!   PaperlessClient ── Connection (timeout, token, mTLS identity)
//!         │
//!         └── fetch_paginated::<T>() ──> Paginated<T>: Iterator<Item = Result<T>>
//! ```

pub mod client;
pub mod connection;
pub mod error;
pub mod models;
pub mod pagination;

pub use client::{DEFAULT_PAGE_SIZE, DocumentSelection, PaperlessClient};
pub use connection::{Connection, ConnectionConfig, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use models::{Correspondent, Document, DocumentType, Tag};
pub use pagination::{Page, Paginated, fetch_paginated};
