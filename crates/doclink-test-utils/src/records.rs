//! Builders for API records and paginated envelopes.
//!
//! Records are built as JSON first so the same fixture can be served by a
//! mock server or decoded straight into the model types.

use doclink_api::{Correspondent, Document, DocumentType, Tag};
use serde_json::{Value, json};

/// Builder for a document record.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    id: u64,
    title: String,
    created: String,
    correspondent: Option<u64>,
    document_type: Option<u64>,
    tags: Vec<u64>,
}

impl DocumentBuilder {
    /// A document with no references, created on 2024-03-02.
    pub fn new(id: u64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            created: "2024-03-02".to_string(),
            correspondent: None,
            document_type: None,
            tags: Vec::new(),
        }
    }

    /// Creation stamp, either `YYYY-MM-DD` or RFC 3339.
    pub fn created(mut self, created: &str) -> Self {
        self.created = created.to_string();
        self
    }

    pub fn correspondent(mut self, id: u64) -> Self {
        self.correspondent = Some(id);
        self
    }

    pub fn document_type(mut self, id: u64) -> Self {
        self.document_type = Some(id);
        self
    }

    pub fn tags(mut self, ids: &[u64]) -> Self {
        self.tags = ids.to_vec();
        self
    }

    /// The record as the server would send it.
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "correspondent": self.correspondent,
            "document_type": self.document_type,
            "storage_path": null,
            "title": self.title,
            "content": "",
            "tags": self.tags,
            "created": self.created,
            "modified": "2024-04-01T09:00:00+02:00",
            "added": "2024-04-01T09:00:00+02:00",
            "archive_serial_number": null,
            "original_file_name": format!("{}.pdf", self.title),
            "archived_file_name": null,
            "owner": null,
            "user_can_change": true,
            "notes": [],
            "custom_fields": []
        })
    }

    pub fn build(&self) -> Document {
        serde_json::from_value(self.to_json()).unwrap()
    }
}

pub fn correspondent_json(id: u64, name: &str) -> Value {
    named_record_json(id, name)
}

pub fn document_type_json(id: u64, name: &str) -> Value {
    named_record_json(id, name)
}

pub fn tag_json(id: u64, name: &str) -> Value {
    let mut value = named_record_json(id, name);
    value["colour"] = json!(1);
    value["is_inbox_tag"] = json!(false);
    value
}

pub fn correspondent(id: u64, name: &str) -> Correspondent {
    serde_json::from_value(correspondent_json(id, name)).unwrap()
}

pub fn document_type(id: u64, name: &str) -> DocumentType {
    serde_json::from_value(document_type_json(id, name)).unwrap()
}

pub fn tag(id: u64, name: &str) -> Tag {
    serde_json::from_value(tag_json(id, name)).unwrap()
}

/// A paginated envelope with an optional absolute `next` URL.
pub fn page_json(next: Option<&str>, results: Vec<Value>) -> Value {
    json!({
        "count": results.len(),
        "next": next,
        "previous": null,
        "results": results
    })
}

fn named_record_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "slug": name.to_lowercase(),
        "name": name,
        "match": "",
        "matching_algorithm": 6,
        "is_insensitive": true,
        "document_count": 0,
        "owner": null,
        "user_can_change": true
    })
}
