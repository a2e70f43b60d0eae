//! Typed access to the four collections the mirror needs

use crate::models::{Correspondent, Document, DocumentType, Tag};
use crate::{Connection, Paginated, Result, fetch_paginated};

/// Records requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

pub const CORRESPONDENTS_PATH: &str = "/api/correspondents/";
pub const DOCUMENT_TYPES_PATH: &str = "/api/document_types/";
pub const TAGS_PATH: &str = "/api/tags/";
pub const DOCUMENTS_PATH: &str = "/api/documents/";

/// Which documents a run mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSelection {
    /// Every document in the store
    All,
    /// Only documents carrying this tag id
    Tag(u64),
}

/// Client for the collection endpoints.
#[derive(Debug, Clone)]
pub struct PaperlessClient {
    connection: Connection,
    page_size: u32,
}

impl PaperlessClient {
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// All correspondents, unfiltered.
    pub fn correspondents(&self) -> Result<Paginated<'_, Correspondent>> {
        self.collection(CORRESPONDENTS_PATH, Vec::new())
    }

    /// All document types, unfiltered.
    pub fn document_types(&self) -> Result<Paginated<'_, DocumentType>> {
        self.collection(DOCUMENT_TYPES_PATH, Vec::new())
    }

    /// All tags, unfiltered.
    pub fn tags(&self) -> Result<Paginated<'_, Tag>> {
        self.collection(TAGS_PATH, Vec::new())
    }

    /// Documents matching `selection`, with content truncated server-side.
    pub fn documents(&self, selection: &DocumentSelection) -> Result<Paginated<'_, Document>> {
        let mut params = vec![("truncate_content".to_string(), "true".to_string())];
        if let DocumentSelection::Tag(tag_id) = selection {
            params.push(("tags__id__all".to_string(), tag_id.to_string()));
        }
        self.collection(DOCUMENTS_PATH, params)
    }

    fn collection<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        mut params: Vec<(String, String)>,
    ) -> Result<Paginated<'_, T>> {
        let url = self.connection.endpoint(path)?;
        params.push(("page_size".to_string(), self.page_size.to_string()));
        Ok(fetch_paginated(&self.connection, url, params))
    }
}
