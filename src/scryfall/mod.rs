pub mod bulk;
pub mod fetcher;
pub mod records;

use reqwest::Client;
use uuid::Uuid;

use fetcher::{FetchError, PagedFetcher};
use records::{BulkDataRecord, CardRecord, SetRecord};

pub const API_BASE: &str = "https://api.scryfall.com";

const USER_AGENT: &str = concat!("cardex/", env!("CARGO_PKG_VERSION"));

/// Thin client over the remote masterdata API.
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    http: Client,
    base_url: String,
}

impl Default for ScryfallClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ScryfallClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Error creating http client");
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// All sets, newest first.
    #[must_use]
    pub fn sets(&self) -> PagedFetcher<SetRecord> {
        PagedFetcher::new(self.http.clone(), format!("{}/sets", self.base_url), false)
    }

    /// Every print in one set. An unknown or empty set code yields an
    /// empty sequence rather than an error.
    #[must_use]
    pub fn cards_of_set(&self, code: &str) -> PagedFetcher<CardRecord> {
        let url = format!(
            "{}/cards/search?order=set&unique=prints&q=e%3A{code}",
            self.base_url
        );
        PagedFetcher::new(self.http.clone(), url, true)
    }

    /// A single set by its code.
    pub async fn set(&self, code: &str) -> Result<SetRecord, FetchError> {
        self.get_json(format!("{}/sets/{code}", self.base_url)).await
    }

    /// A single card print by its canonical id.
    pub async fn card(&self, id: Uuid) -> Result<CardRecord, FetchError> {
        self.get_json(format!("{}/cards/{id}", self.base_url)).await
    }

    /// Metadata for one bulk snapshot, e.g. `default_cards`.
    pub async fn bulk_data(&self, name: &str) -> Result<BulkDataRecord, FetchError> {
        self.get_json(format!("{}/bulk-data/{name}", self.base_url))
            .await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }
        Ok(response.json().await?)
    }
}
