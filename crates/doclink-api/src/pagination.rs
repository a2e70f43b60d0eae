//! Cursor pagination over collection endpoints

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{Connection, Error, Result};

/// One response envelope of a collection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Absolute URL of the next page, absent on the last page
    pub next: Option<String>,
    pub results: Vec<T>,
}

/// Lazy, finite, non-restartable sequence of records from a collection.
///
/// Pages are fetched on demand while iterating. The first error ends the
/// sequence; iterating again after that yields `None`.
pub struct Paginated<'c, T> {
    connection: &'c Connection,
    next: Option<Url>,
    params: Vec<(String, String)>,
    buffer: std::vec::IntoIter<T>,
    pages: usize,
}

/// Start walking a collection.
///
/// `params` are sent with the first request only; every later request
/// follows the server's `next` URL verbatim.
pub fn fetch_paginated<T: DeserializeOwned>(
    connection: &Connection,
    url: Url,
    params: Vec<(String, String)>,
) -> Paginated<'_, T> {
    tracing::debug!(url = %url, ?params, "Fetching paginated collection");
    Paginated {
        connection,
        next: Some(url),
        params,
        buffer: Vec::new().into_iter(),
        pages: 0,
    }
}

impl<T: DeserializeOwned> Paginated<'_, T> {
    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    fn fetch_page(&mut self, url: Url) -> Result<()> {
        let params = std::mem::take(&mut self.params);
        let response = self.connection.get(&url, &params)?;
        let body = response.bytes().map_err(|source| Error::Request {
            url: url.to_string(),
            source,
        })?;
        let page: Page<T> = serde_json::from_slice(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })?;

        self.next = page
            .next
            .map(|next| Url::parse(&next).map_err(|source| Error::Url { url: next, source }))
            .transpose()?;
        self.buffer = page.results.into_iter();
        self.pages += 1;
        Ok(())
    }
}

impl<T: DeserializeOwned> Iterator for Paginated<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            let url = self.next.take()?;
            if let Err(e) = self.fetch_page(url) {
                return Some(Err(e));
            }
        }
    }
}
