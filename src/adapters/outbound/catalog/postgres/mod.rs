mod queries;

use std::env;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Pool, Row};
use time::Date;
use uuid::Uuid;

use crate::adapters::outbound::catalog::postgres::queries::{
    CARDS_FROM_COLLECTOR_NUMBER, CARD_FROM_ID, SET_FROM_CODE, SET_FROM_ID, UPSERT_CARD,
    UPSERT_SET, UPSERT_VARIANT, VARIANT_FROM_ID,
};
use crate::domain::card::Card;
use crate::domain::set::CardSet;
use crate::domain::variant::CardVariant;
use crate::ports::outbound::catalog::{CatalogStore, StoreError};

pub struct Postgres {
    pool: Pool<sqlx::Postgres>,
}

impl Postgres {
    pub async fn create() -> Result<Self, StoreError> {
        let uri = env::var("PSQL_URI")
            .map_err(|_| StoreError::new("Postgres uri wasn't in env vars"))?;
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&uri)
            .await
            .map_err(|why| StoreError::new(format!("Failed Postgres connection - {why}")))?;

        Ok(Self { pool })
    }
}

fn set_from_row(row: &PgRow) -> Result<CardSet, StoreError> {
    let wrap = |why: sqlx::Error| StoreError::new(format!("Malformed set row - {why}"));
    let set_type: String = row.try_get("set_type").map_err(wrap)?;
    Ok(CardSet {
        id: row.try_get("id").map_err(wrap)?,
        code: row.try_get("code").map_err(wrap)?,
        name: row.try_get("name").map_err(wrap)?,
        set_type: set_type.parse().map_err(StoreError::new)?,
        block_name: row.try_get("block_name").map_err(wrap)?,
        block_code: row.try_get("block_code").map_err(wrap)?,
        parent_set_code: row.try_get("parent_set_code").map_err(wrap)?,
        release_date: row.try_get::<Date, _>("release_date").map_err(wrap)?,
        card_count: row.try_get::<i32, _>("card_count").map_err(wrap)? as u32,
        digital_only: row.try_get("digital_only").map_err(wrap)?,
        icon_uri: row.try_get("icon_uri").map_err(wrap)?,
    })
}

fn card_from_row(row: &PgRow) -> Result<Card, StoreError> {
    let wrap = |why: sqlx::Error| StoreError::new(format!("Malformed card row - {why}"));
    let rarity: String = row.try_get("rarity").map_err(wrap)?;
    Ok(Card {
        id: row.try_get("id").map_err(wrap)?,
        set_id: row.try_get("set_id").map_err(wrap)?,
        collector_number: row.try_get("collector_number").map_err(wrap)?,
        name: row.try_get("name").map_err(wrap)?,
        rarity: rarity.parse().map_err(StoreError::new)?,
        promo: row.try_get("promo").map_err(wrap)?,
        token: row.try_get("token").map_err(wrap)?,
        nonfoil_available: row.try_get("nonfoil_available").map_err(wrap)?,
        foil_available: row.try_get("foil_available").map_err(wrap)?,
        full_art: row.try_get("full_art").map_err(wrap)?,
        extended_art: row.try_get("extended_art").map_err(wrap)?,
        color_identity: row.try_get("color_identity").map_err(wrap)?,
        mana_cost: row.try_get("mana_cost").map_err(wrap)?,
        mana_value: row.try_get("mana_value").map_err(wrap)?,
        oracle_text: row.try_get("oracle_text").map_err(wrap)?,
        special_deck_restrictions: row.try_get("special_deck_restrictions").map_err(wrap)?,
        price: row.try_get("price").map_err(wrap)?,
        price_foil: row.try_get("price_foil").map_err(wrap)?,
    })
}

fn variant_from_row(row: &PgRow) -> Result<CardVariant, StoreError> {
    let wrap = |why: sqlx::Error| StoreError::new(format!("Malformed variant row - {why}"));
    let variant_type: String = row.try_get("variant_type").map_err(wrap)?;
    Ok(CardVariant {
        id: row.try_get("id").map_err(wrap)?,
        original: row.try_get("original").map_err(wrap)?,
        variant_type: variant_type.parse().map_err(StoreError::new)?,
    })
}

#[async_trait]
impl CatalogStore for Postgres {
    async fn find_set(&self, id: Uuid) -> Result<Option<CardSet>, StoreError> {
        sqlx::query(SET_FROM_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|why| StoreError::new(format!("Failed set fetch - {why}")))?
            .map(|row| set_from_row(&row))
            .transpose()
    }

    async fn find_set_by_code(&self, code: &str) -> Result<Option<CardSet>, StoreError> {
        sqlx::query(SET_FROM_CODE)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|why| StoreError::new(format!("Failed set fetch - {why}")))?
            .map(|row| set_from_row(&row))
            .transpose()
    }

    async fn save_set(&self, set: &CardSet) -> Result<(), StoreError> {
        sqlx::query(UPSERT_SET)
            .bind(set.id)
            .bind(&set.code)
            .bind(&set.name)
            .bind(set.set_type.as_str())
            .bind(&set.block_name)
            .bind(&set.block_code)
            .bind(&set.parent_set_code)
            .bind(set.release_date)
            .bind(set.card_count as i32)
            .bind(set.digital_only)
            .bind(&set.icon_uri)
            .execute(&self.pool)
            .await
            .map_err(|why| StoreError::new(format!("Failed set upsert - {why}")))?;
        Ok(())
    }

    async fn find_card(&self, id: Uuid) -> Result<Option<Card>, StoreError> {
        sqlx::query(CARD_FROM_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|why| StoreError::new(format!("Failed card fetch - {why}")))?
            .map(|row| card_from_row(&row))
            .transpose()
    }

    async fn find_cards_by_collector_number(
        &self,
        set_id: Uuid,
        collector_number: &str,
    ) -> Result<Vec<Card>, StoreError> {
        sqlx::query(CARDS_FROM_COLLECTOR_NUMBER)
            .bind(set_id)
            .bind(collector_number)
            .fetch_all(&self.pool)
            .await
            .map_err(|why| StoreError::new(format!("Failed card fetch - {why}")))?
            .iter()
            .map(card_from_row)
            .collect()
    }

    async fn save_card(&self, card: &Card) -> Result<(), StoreError> {
        sqlx::query(UPSERT_CARD)
            .bind(card.id)
            .bind(card.set_id)
            .bind(&card.collector_number)
            .bind(&card.name)
            .bind(card.rarity.as_str())
            .bind(card.promo)
            .bind(card.token)
            .bind(card.nonfoil_available)
            .bind(card.foil_available)
            .bind(card.full_art)
            .bind(card.extended_art)
            .bind(&card.color_identity)
            .bind(&card.mana_cost)
            .bind(card.mana_value)
            .bind(&card.oracle_text)
            .bind(card.special_deck_restrictions)
            .bind(card.price)
            .bind(card.price_foil)
            .execute(&self.pool)
            .await
            .map_err(|why| StoreError::new(format!("Failed card upsert - {why}")))?;
        Ok(())
    }

    async fn find_variant(&self, id: Uuid) -> Result<Option<CardVariant>, StoreError> {
        sqlx::query(VARIANT_FROM_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|why| StoreError::new(format!("Failed variant fetch - {why}")))?
            .map(|row| variant_from_row(&row))
            .transpose()
    }

    async fn save_variant(&self, variant: &CardVariant) -> Result<(), StoreError> {
        sqlx::query(UPSERT_VARIANT)
            .bind(variant.id)
            .bind(variant.original)
            .bind(variant.variant_type.as_str())
            .execute(&self.pool)
            .await
            .map_err(|why| StoreError::new(format!("Failed variant upsert - {why}")))?;
        Ok(())
    }
}
