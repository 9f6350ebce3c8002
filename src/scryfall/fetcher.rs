use std::collections::VecDeque;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::records::Page;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Pull-based reader over a paginated list endpoint. Pages are
/// fetched lazily as records are consumed.
pub struct PagedFetcher<T> {
    http: Client,
    next: Option<String>,
    buffer: VecDeque<T>,
    optional: bool,
}

impl<T: DeserializeOwned> PagedFetcher<T> {
    /// Starts a fetch at `url`. An `optional` fetch treats a
    /// non-success status on the first page as an empty sequence
    /// instead of an error.
    #[must_use]
    pub fn new(http: Client, url: String, optional: bool) -> Self {
        Self {
            http,
            next: Some(url),
            buffer: VecDeque::new(),
            optional,
        }
    }

    /// Returns the next record, fetching further pages as needed.
    /// `Ok(None)` marks the end of the sequence.
    pub async fn try_next(&mut self) -> Result<Option<T>, FetchError> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Ok(Some(record));
            }
            let Some(url) = self.next.take() else {
                return Ok(None);
            };
            let response = self.http.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                if self.optional {
                    return Ok(None);
                }
                return Err(FetchError::Status { url, status });
            }
            let page: Page<T> = response.json().await?;
            if page.has_more {
                self.next = page.next_page;
            }
            self.buffer.extend(page.data);
        }
    }

    /// Drains the remaining records into a vector.
    pub async fn try_collect(mut self) -> Result<Vec<T>, FetchError> {
        let mut records = Vec::new();
        while let Some(record) = self.try_next().await? {
            records.push(record);
        }
        Ok(records)
    }
}
