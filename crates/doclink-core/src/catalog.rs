//! Reference resolution
//!
//! The three support collections are fetched once per run into immutable
//! id-keyed tables; documents are then hydrated against them by reference.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use doclink_api::{Correspondent, Document, DocumentType, PaperlessClient, Tag};

use crate::{Error, ReferenceKind, Result};

/// A tag reference resolved to its name, kept in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub id: u64,
    pub name: String,
}

/// A document with its foreign keys replaced by names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydratedDocument {
    pub document: Document,
    pub correspondent: Option<String>,
    pub document_type: Option<String>,
    pub tags: Vec<ResolvedTag>,
}

impl HydratedDocument {
    pub fn id(&self) -> u64 {
        self.document.id
    }

    pub fn title(&self) -> &str {
        &self.document.title
    }

    pub fn created_on(&self) -> NaiveDate {
        self.document.created_on()
    }
}

/// Id-keyed lookup tables for the support collections.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    correspondents: BTreeMap<u64, Correspondent>,
    document_types: BTreeMap<u64, DocumentType>,
    tags: BTreeMap<u64, Tag>,
}

impl Catalog {
    /// Build the tables from records already in hand.
    pub fn from_records(
        correspondents: impl IntoIterator<Item = Correspondent>,
        document_types: impl IntoIterator<Item = DocumentType>,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Self {
            correspondents: correspondents.into_iter().map(|c| (c.id, c)).collect(),
            document_types: document_types.into_iter().map(|t| (t.id, t)).collect(),
            tags: tags.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    /// Fetch all three support collections to exhaustion.
    ///
    /// # Errors
    ///
    /// Any failed page aborts the fetch.
    pub fn fetch(client: &PaperlessClient) -> Result<Self> {
        let correspondents = client
            .correspondents()?
            .collect::<doclink_api::Result<Vec<_>>>()?;
        let document_types = client
            .document_types()?
            .collect::<doclink_api::Result<Vec<_>>>()?;
        let tags = client.tags()?.collect::<doclink_api::Result<Vec<_>>>()?;

        tracing::debug!(
            correspondents = correspondents.len(),
            document_types = document_types.len(),
            tags = tags.len(),
            "Fetched support collections"
        );

        Ok(Self::from_records(correspondents, document_types, tags))
    }

    pub fn correspondent(&self, id: u64) -> Option<&Correspondent> {
        self.correspondents.get(&id)
    }

    pub fn document_type(&self, id: u64) -> Option<&DocumentType> {
        self.document_types.get(&id)
    }

    pub fn tag(&self, id: u64) -> Option<&Tag> {
        self.tags.get(&id)
    }

    /// Resolve every reference of one document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReferentialIntegrity`] for the first id that is not
    /// in its table.
    pub fn hydrate(&self, document: Document) -> Result<HydratedDocument> {
        let missing = |kind, id| Error::ReferentialIntegrity {
            document: document.id,
            kind,
            id,
        };

        let correspondent = document
            .correspondent
            .map(|id| {
                self.correspondent(id)
                    .map(|c| c.name.clone())
                    .ok_or_else(|| missing(ReferenceKind::Correspondent, id))
            })
            .transpose()?;

        let document_type = document
            .document_type
            .map(|id| {
                self.document_type(id)
                    .map(|t| t.name.clone())
                    .ok_or_else(|| missing(ReferenceKind::DocumentType, id))
            })
            .transpose()?;

        let tags = document
            .tags
            .iter()
            .map(|&id| {
                self.tag(id)
                    .map(|t| ResolvedTag {
                        id,
                        name: t.name.clone(),
                    })
                    .ok_or_else(|| missing(ReferenceKind::Tag, id))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(HydratedDocument {
            document,
            correspondent,
            document_type,
            tags,
        })
    }

    /// Hydrate a batch, preserving input order. Stops at the first failure.
    pub fn hydrate_all(&self, documents: Vec<Document>) -> Result<Vec<HydratedDocument>> {
        documents.into_iter().map(|doc| self.hydrate(doc)).collect()
    }
}
