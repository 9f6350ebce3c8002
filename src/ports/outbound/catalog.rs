use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::card::Card;
use crate::domain::set::CardSet;
use crate::domain::variant::CardVariant;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(String);

impl StoreError {
    pub fn new(error: impl Into<String>) -> Self {
        Self(error.into())
    }
}

/// Persistence port for the local masterdata catalog.
#[async_trait]
pub trait CatalogStore {
    async fn find_set(&self, id: Uuid) -> Result<Option<CardSet>, StoreError>;
    async fn find_set_by_code(&self, code: &str) -> Result<Option<CardSet>, StoreError>;
    async fn save_set(&self, set: &CardSet) -> Result<(), StoreError>;

    async fn find_card(&self, id: Uuid) -> Result<Option<Card>, StoreError>;
    async fn find_cards_by_collector_number(
        &self,
        set_id: Uuid,
        collector_number: &str,
    ) -> Result<Vec<Card>, StoreError>;
    async fn save_card(&self, card: &Card) -> Result<(), StoreError>;

    async fn find_variant(&self, id: Uuid) -> Result<Option<CardVariant>, StoreError>;
    async fn save_variant(&self, variant: &CardVariant) -> Result<(), StoreError>;
}
