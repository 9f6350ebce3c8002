use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use time::Date;
use uuid::Uuid;

/// Set codes treated as catalog roots even though they have a parent.
pub const ROOT_SET_OVERRIDES: [&str; 2] = ["j22", "j25"];

/// Block names that never form a multi-set block.
pub const BLOCK_NAME_BLACKLIST: [&str; 7] = [
    "Commander",
    "Core Set",
    "Heroes of the Realm",
    "Judge Gift Cards",
    "Friday Night Magic",
    "Magic Player Rewards",
    "Arena League",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    Core,
    Expansion,
    Masters,
    Alchemy,
    Masterpiece,
    Arsenal,
    FromTheVault,
    Spellbook,
    PremiumDeck,
    DuelDeck,
    DraftInnovation,
    TreasureChest,
    Commander,
    Planechase,
    Archenemy,
    Vanguard,
    Funny,
    Starter,
    Box,
    Promo,
    Token,
    Memorabilia,
    Minigame,
}

impl SetType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Expansion => "expansion",
            Self::Masters => "masters",
            Self::Alchemy => "alchemy",
            Self::Masterpiece => "masterpiece",
            Self::Arsenal => "arsenal",
            Self::FromTheVault => "from_the_vault",
            Self::Spellbook => "spellbook",
            Self::PremiumDeck => "premium_deck",
            Self::DuelDeck => "duel_deck",
            Self::DraftInnovation => "draft_innovation",
            Self::TreasureChest => "treasure_chest",
            Self::Commander => "commander",
            Self::Planechase => "planechase",
            Self::Archenemy => "archenemy",
            Self::Vanguard => "vanguard",
            Self::Funny => "funny",
            Self::Starter => "starter",
            Self::Box => "box",
            Self::Promo => "promo",
            Self::Token => "token",
            Self::Memorabilia => "memorabilia",
            Self::Minigame => "minigame",
        }
    }
}

impl FromStr for SetType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "core" => Ok(Self::Core),
            "expansion" => Ok(Self::Expansion),
            "masters" => Ok(Self::Masters),
            "alchemy" => Ok(Self::Alchemy),
            "masterpiece" => Ok(Self::Masterpiece),
            "arsenal" => Ok(Self::Arsenal),
            "from_the_vault" => Ok(Self::FromTheVault),
            "spellbook" => Ok(Self::Spellbook),
            "premium_deck" => Ok(Self::PremiumDeck),
            "duel_deck" => Ok(Self::DuelDeck),
            "draft_innovation" => Ok(Self::DraftInnovation),
            "treasure_chest" => Ok(Self::TreasureChest),
            "commander" => Ok(Self::Commander),
            "planechase" => Ok(Self::Planechase),
            "archenemy" => Ok(Self::Archenemy),
            "vanguard" => Ok(Self::Vanguard),
            "funny" => Ok(Self::Funny),
            "starter" => Ok(Self::Starter),
            "box" => Ok(Self::Box),
            "promo" => Ok(Self::Promo),
            "token" => Ok(Self::Token),
            "memorabilia" => Ok(Self::Memorabilia),
            "minigame" => Ok(Self::Minigame),
            other => Err(format!("unknown set type {other:?}")),
        }
    }
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set in the local catalog, keyed by its canonical remote id.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSet {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub set_type: SetType,
    pub block_name: Option<String>,
    pub block_code: Option<String>,
    pub parent_set_code: Option<String>,
    pub release_date: Date,
    pub card_count: u32,
    pub digital_only: bool,
    pub icon_uri: Option<String>,
}

impl CardSet {
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            code: String::new(),
            name: String::new(),
            set_type: SetType::Expansion,
            block_name: None,
            block_code: None,
            parent_set_code: None,
            release_date: Date::MIN,
            card_count: 0,
            digital_only: false,
            icon_uri: None,
        }
    }

    /// A set is a root of the catalog tree when it has no parent, when
    /// it is a commander set whose parent is not itself a commander
    /// set, or when its code is explicitly overridden.
    #[must_use]
    pub fn is_root(&self, parent: Option<&CardSet>) -> bool {
        match (&self.parent_set_code, parent) {
            (None, _) => true,
            (Some(_), parent) => {
                ROOT_SET_OVERRIDES.contains(&self.code.as_str())
                    || (self.set_type == SetType::Commander
                        && parent.is_none_or(|p| p.set_type != SetType::Commander))
            }
        }
    }
}

/// A top-level grouping of root sets for display purposes.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    SingleSet(CardSet),
    MultiSet { name: String, sets: Vec<CardSet> },
}

impl Block {
    #[must_use]
    pub fn release_date(&self) -> Date {
        match self {
            Self::SingleSet(set) => set.release_date,
            Self::MultiSet { sets, .. } => sets
                .iter()
                .map(|s| s.release_date)
                .max()
                .unwrap_or(Date::MIN),
        }
    }
}

/// Groups root sets into blocks. Digital-only sets and sets with
/// twelve or fewer cards are dropped. Sets whose block name is absent
/// or blacklisted stand alone; the rest group by block name, with a
/// group of one collapsing back to a single-set block. The result is
/// ordered newest first.
#[must_use]
pub fn group_into_blocks(sets: Vec<CardSet>) -> Vec<Block> {
    let mut singles = Vec::new();
    let mut grouped: Vec<(String, Vec<CardSet>)> = Vec::new();

    for set in sets {
        if set.digital_only || set.card_count <= 12 {
            continue;
        }
        match set.block_name.clone() {
            Some(name) if !BLOCK_NAME_BLACKLIST.contains(&name.as_str()) => {
                match grouped.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, members)) => members.push(set),
                    None => grouped.push((name, vec![set])),
                }
            }
            _ => singles.push(Block::SingleSet(set)),
        }
    }

    let mut blocks = singles;
    for (name, mut members) in grouped {
        if members.len() == 1 {
            blocks.push(Block::SingleSet(members.remove(0)));
        } else {
            members.sort_by_key(|s| s.release_date);
            blocks.push(Block::MultiSet {
                name: format!("{name} Block"),
                sets: members,
            });
        }
    }

    blocks.sort_by_key(|b| std::cmp::Reverse(b.release_date()));
    blocks
}
