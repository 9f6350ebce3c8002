use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::card::Card;
use crate::domain::set::CardSet;
use crate::domain::variant::CardVariant;
use crate::ports::outbound::catalog::{CatalogStore, StoreError};

/// In-memory catalog, mostly for tests and dry runs. Enforces the
/// same uniqueness rule as the database schema: one variant per
/// original and variant type.
#[derive(Default)]
pub struct MemoryCatalog {
    sets: Mutex<HashMap<Uuid, CardSet>>,
    cards: Mutex<HashMap<Uuid, Card>>,
    variants: Mutex<HashMap<Uuid, CardVariant>>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<std::sync::MutexGuard<'a, T>, StoreError> {
        mutex
            .lock()
            .map_err(|_| StoreError::new(format!("{what} table lock poisoned")))
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn find_set(&self, id: Uuid) -> Result<Option<CardSet>, StoreError> {
        Ok(Self::lock(&self.sets, "set")?.get(&id).cloned())
    }

    async fn find_set_by_code(&self, code: &str) -> Result<Option<CardSet>, StoreError> {
        Ok(Self::lock(&self.sets, "set")?
            .values()
            .find(|set| set.code == code)
            .cloned())
    }

    async fn save_set(&self, set: &CardSet) -> Result<(), StoreError> {
        Self::lock(&self.sets, "set")?.insert(set.id, set.clone());
        Ok(())
    }

    async fn find_card(&self, id: Uuid) -> Result<Option<Card>, StoreError> {
        Ok(Self::lock(&self.cards, "card")?.get(&id).cloned())
    }

    async fn find_cards_by_collector_number(
        &self,
        set_id: Uuid,
        collector_number: &str,
    ) -> Result<Vec<Card>, StoreError> {
        Ok(Self::lock(&self.cards, "card")?
            .values()
            .filter(|card| card.set_id == set_id && card.collector_number == collector_number)
            .cloned()
            .collect())
    }

    async fn save_card(&self, card: &Card) -> Result<(), StoreError> {
        Self::lock(&self.cards, "card")?.insert(card.id, card.clone());
        Ok(())
    }

    async fn find_variant(&self, id: Uuid) -> Result<Option<CardVariant>, StoreError> {
        Ok(Self::lock(&self.variants, "variant")?.get(&id).cloned())
    }

    async fn save_variant(&self, variant: &CardVariant) -> Result<(), StoreError> {
        let mut variants = Self::lock(&self.variants, "variant")?;
        let duplicate = variants.values().any(|existing| {
            existing.id != variant.id
                && existing.original == variant.original
                && existing.variant_type == variant.variant_type
        });
        if duplicate {
            return Err(StoreError::new(format!(
                "A {} variant of {} already exists",
                variant.variant_type, variant.original
            )));
        }
        variants.insert(variant.id, variant.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::variant::VariantType;
    use crate::sync::upsert::upsert;

    #[tokio::test]
    async fn test_lookup_by_code_and_id_agree() {
        let store = MemoryCatalog::new();
        let mut set = CardSet::new(Uuid::new_v4());
        set.code = "neo".into();
        store.save_set(&set).await.unwrap();
        assert_eq!(
            store.find_set(set.id).await.unwrap(),
            store.find_set_by_code("neo").await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_duplicate_variant_link_is_rejected() {
        let store = MemoryCatalog::new();
        let original = Uuid::new_v4();
        let mut first = CardVariant::new(Uuid::new_v4());
        first.original = original;
        first.variant_type = VariantType::TheList;
        store.save_variant(&first).await.unwrap();

        let mut second = CardVariant::new(Uuid::new_v4());
        second.original = original;
        second.variant_type = VariantType::TheList;
        assert!(store.save_variant(&second).await.is_err());

        second.variant_type = VariantType::PrereleaseStamped;
        store.save_variant(&second).await.unwrap();
    }

    #[tokio::test]
    async fn test_resaving_a_variant_is_not_a_duplicate() {
        let store = MemoryCatalog::new();
        let mut variant = CardVariant::new(Uuid::new_v4());
        variant.original = Uuid::new_v4();
        store.save_variant(&variant).await.unwrap();
        store.save_variant(&variant).await.unwrap();
    }

    #[tokio::test]
    async fn test_upsert_seeds_then_updates() {
        let store = MemoryCatalog::new();
        let id = Uuid::new_v4();
        upsert(&store, id, |card: &mut Card| card.name = "Consider".into())
            .await
            .unwrap();
        let created = store.find_card(id).await.unwrap().unwrap();
        assert_eq!(created.name, "Consider");

        upsert(&store, id, |card: &mut Card| {
            card.price = Some(0.25);
        })
        .await
        .unwrap();
        let updated = store.find_card(id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Consider");
        assert_eq!(updated.price, Some(0.25));
    }
}
