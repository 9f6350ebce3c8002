use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Special,
    Mythic,
    Bonus,
}

impl Rarity {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Special => "special",
            Self::Mythic => "mythic",
            Self::Bonus => "bonus",
        }
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "special" => Ok(Self::Special),
            "mythic" => Ok(Self::Mythic),
            "bonus" => Ok(Self::Bonus),
            other => Err(format!("unknown rarity {other:?}")),
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A primary card print in the local catalog, keyed by its canonical
/// remote id. Exactly one `Card` exists per canonical id; re-imports
/// overwrite fields in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: Uuid,
    pub set_id: Uuid,
    pub collector_number: String,
    pub name: String,
    pub rarity: Rarity,
    pub promo: bool,
    pub token: bool,
    pub nonfoil_available: bool,
    pub foil_available: bool,
    pub full_art: bool,
    pub extended_art: bool,
    pub color_identity: Vec<String>,
    pub mana_cost: Option<String>,
    pub mana_value: f64,
    pub oracle_text: String,
    pub special_deck_restrictions: Option<i32>,
    pub price: Option<f64>,
    pub price_foil: Option<f64>,
}

impl Card {
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            set_id: Uuid::nil(),
            collector_number: String::new(),
            name: String::new(),
            rarity: Rarity::Common,
            promo: false,
            token: false,
            nonfoil_available: true,
            foil_available: true,
            full_art: false,
            extended_art: false,
            color_identity: Vec::new(),
            mana_cost: None,
            mana_value: 0.0,
            oracle_text: String::new(),
            special_deck_restrictions: None,
            price: None,
            price_foil: None,
        }
    }
}
