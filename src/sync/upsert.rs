use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::card::Card;
use crate::domain::set::CardSet;
use crate::domain::variant::CardVariant;
use crate::ports::outbound::catalog::{CatalogStore, StoreError};

/// Entities that can be created empty from their canonical id.
pub trait Seed {
    fn seed(id: Uuid) -> Self;
}

impl Seed for Card {
    fn seed(id: Uuid) -> Self {
        Self::new(id)
    }
}

impl Seed for CardSet {
    fn seed(id: Uuid) -> Self {
        Self::new(id)
    }
}

impl Seed for CardVariant {
    fn seed(id: Uuid) -> Self {
        Self::new(id)
    }
}

/// Lookup and save for one entity kind, implemented for every
/// catalog store.
#[async_trait]
pub trait UpsertStore<E: Send> {
    async fn find(&self, id: Uuid) -> Result<Option<E>, StoreError>;
    async fn save(&self, entity: &E) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: CatalogStore + Sync + ?Sized> UpsertStore<Card> for S {
    async fn find(&self, id: Uuid) -> Result<Option<Card>, StoreError> {
        self.find_card(id).await
    }

    async fn save(&self, entity: &Card) -> Result<(), StoreError> {
        self.save_card(entity).await
    }
}

#[async_trait]
impl<S: CatalogStore + Sync + ?Sized> UpsertStore<CardSet> for S {
    async fn find(&self, id: Uuid) -> Result<Option<CardSet>, StoreError> {
        self.find_set(id).await
    }

    async fn save(&self, entity: &CardSet) -> Result<(), StoreError> {
        self.save_set(entity).await
    }
}

#[async_trait]
impl<S: CatalogStore + Sync + ?Sized> UpsertStore<CardVariant> for S {
    async fn find(&self, id: Uuid) -> Result<Option<CardVariant>, StoreError> {
        self.find_variant(id).await
    }

    async fn save(&self, entity: &CardVariant) -> Result<(), StoreError> {
        self.save_variant(entity).await
    }
}

/// Loads the entity with the given id, seeding a fresh one if it does
/// not exist, applies `mutate`, and saves the result. Running the
/// same upsert twice leaves the store unchanged.
pub async fn upsert<E, S, F>(store: &S, id: Uuid, mutate: F) -> Result<E, StoreError>
where
    E: Seed + Send + Sync,
    S: UpsertStore<E> + Sync + ?Sized,
    F: FnOnce(&mut E) + Send,
{
    let mut entity = match store.find(id).await? {
        Some(existing) => existing,
        None => E::seed(id),
    };
    mutate(&mut entity);
    store.save(&entity).await?;
    Ok(entity)
}
