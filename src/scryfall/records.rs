use std::collections::HashMap;

use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use crate::domain::card::{Card, Rarity};
use crate::domain::set::{CardSet, SetType};
use crate::sync::overrides;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// One page of a paginated list response.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(rename = "object")]
    pub object_type: String,
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub total_cards: Option<u64>,
    pub data: Vec<T>,
}

/// A set as served by the remote masterdata API.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRecord {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub set_type: SetType,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub block_code: Option<String>,
    #[serde(default)]
    pub parent_set_code: Option<String>,
    #[serde(with = "iso_date")]
    pub released_at: Date,
    pub card_count: u32,
    pub digital: bool,
    #[serde(default)]
    pub icon_svg_uri: Option<String>,
}

impl SetRecord {
    /// Copies this record onto a catalog set, applying the curated
    /// block-name and parent-code corrections.
    pub fn apply(&self, set: &mut CardSet) {
        set.code = self.code.clone();
        set.name = self.name.clone();
        set.set_type = self.set_type;
        set.release_date = self.released_at;
        set.card_count = self.card_count;
        set.digital_only = self.digital;
        set.icon_uri = self.icon_svg_uri.clone();
        match overrides::block_override(&self.code) {
            Some((block_code, block_name)) => {
                set.block_code = Some(block_code.to_string());
                set.block_name = Some(block_name.to_string());
            }
            None => {
                set.block_code = self.block_code.clone();
                set.block_name = self.block.clone();
            }
        }
        set.parent_set_code = overrides::parent_override(&self.code)
            .map(str::to_string)
            .or_else(|| self.parent_set_code.clone());
    }

    /// Sets worth keeping in the local catalog. Digital-only and
    /// empty sets are dropped, as is the aggregated reprint list.
    /// Memorabilia sets are kept only for front-card and oversized
    /// subsets or when explicitly catalogued.
    #[must_use]
    pub fn is_import_worthy(&self) -> bool {
        !self.digital
            && self.card_count > 0
            && self.code != "plst"
            && (self.set_type != SetType::Memorabilia
                || self.code.starts_with('f')
                || self.code.starts_with('o')
                || overrides::is_memorabilia_catalogued(&self.code))
    }
}

/// A card print as served by the remote masterdata API.
#[derive(Debug, Clone, Deserialize)]
pub struct CardRecord {
    pub id: Uuid,
    pub name: String,
    pub layout: String,
    pub digital: bool,
    pub set: String,
    pub set_id: Uuid,
    pub set_type: String,
    pub collector_number: String,
    pub rarity: Rarity,
    pub promo: bool,
    #[serde(default)]
    pub promo_types: Vec<String>,
    pub nonfoil: bool,
    pub foil: bool,
    #[serde(default)]
    pub full_art: bool,
    #[serde(default)]
    pub frame_effects: Vec<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub prices: HashMap<String, Option<String>>,
}

impl CardRecord {
    /// Copies this record onto a catalog card. The collector number
    /// is supplied separately so callers can store the normalized
    /// form.
    pub fn apply(&self, card: &mut Card, set_id: Uuid, collector_number: String) {
        card.set_id = set_id;
        card.collector_number = collector_number;
        card.name = self.name.clone();
        card.rarity = self.rarity;
        card.promo = self.promo || overrides::has_promo_collector_number(&self.collector_number);
        card.token = self.set_type == "token";
        card.nonfoil_available = self.nonfoil;
        card.foil_available = self.foil;
        card.full_art = self.full_art;
        card.extended_art = self.frame_effects.iter().any(|e| e == "extendedart");
        card.color_identity = self.color_identity.clone();
        card.mana_cost = self.mana_cost.clone();
        card.mana_value = self.cmc.unwrap_or(0.0);
        card.oracle_text = self.oracle_text.clone().unwrap_or_default();
        card.special_deck_restrictions =
            overrides::special_deck_restrictions(&self.name, &card.oracle_text);
        card.price = self.price("eur");
        card.price_foil = self.price("eur_foil");
    }

    fn price(&self, key: &str) -> Option<f64> {
        self.prices
            .get(key)
            .and_then(|p| p.as_deref())
            .and_then(|p| p.parse().ok())
    }
}

/// A bulk-data catalog entry pointing at a downloadable snapshot.
#[derive(Debug, Deserialize)]
pub struct BulkDataRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub data_type: String,
    pub download_uri: String,
    #[serde(default)]
    pub size: Option<u64>,
}
