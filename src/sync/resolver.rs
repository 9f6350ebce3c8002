use crate::domain::card::Card;
use crate::domain::collector_number;
use crate::domain::variant::VariantType;
use crate::error::SyncError;
use crate::ports::outbound::catalog::CatalogStore;
use crate::scryfall::records::CardRecord;

/// Outcome of looking up the original print a variant reproduces.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Card),
    NotFound,
    Ambiguous(usize),
}

/// Decides whether a record is a variant print, and of which kind.
#[must_use]
pub fn classify(record: &CardRecord) -> Option<VariantType> {
    let has = |t: &str| record.promo_types.iter().any(|p| p == t);
    if has("thelist") {
        Some(VariantType::TheList)
    } else if has("prerelease") && has("datestamped") {
        Some(VariantType::PrereleaseStamped)
    } else if has("promopack") && has("stamped") {
        Some(VariantType::PromopackStamped)
    } else {
        None
    }
}

/// Removes a trailing stamp marker from a collector number. The
/// marker may sit before a closing ★. Numbers without the marker are
/// returned unchanged.
#[must_use]
pub fn strip_stamp(collector_number: &str, stamp: char) -> String {
    if let Some(stripped) = collector_number.strip_suffix(stamp) {
        return stripped.to_string();
    }
    if let Some(inner) = collector_number.strip_suffix('★') {
        if let Some(stripped) = inner.strip_suffix(stamp) {
            return format!("{stripped}★");
        }
    }
    collector_number.to_string()
}

/// The set a stamped variant reproduces. Numbers still carrying a ★
/// live in the promo set itself; all others come from the promo
/// set's base set, named by dropping the leading `p`.
#[must_use]
pub fn assumed_set_code(set_code: &str, stripped_number: &str) -> String {
    if stripped_number.contains('★') {
        set_code.to_string()
    } else {
        set_code
            .strip_prefix('p')
            .unwrap_or(set_code)
            .to_string()
    }
}

/// Looks up the original print a variant record reproduces. The
/// lookup key depends on the variant kind: reprint-list numbers embed
/// the source set code, stamped numbers drop their stamp marker.
pub async fn resolve_original<S: CatalogStore + Sync + ?Sized>(
    store: &S,
    record: &CardRecord,
    variant_type: VariantType,
) -> Result<Resolution, SyncError> {
    let (set_code, number) = match variant_type {
        VariantType::TheList => {
            let Some((set_code, number)) = record.collector_number.split_once('-') else {
                return Err(SyncError::VariantResolution {
                    collector_number: record.collector_number.clone(),
                    reason: "reprint-list number has no set prefix".into(),
                });
            };
            (set_code.to_lowercase(), number.to_string())
        }
        VariantType::PrereleaseStamped => {
            let stripped = strip_stamp(&record.collector_number, 's');
            (assumed_set_code(&record.set, &stripped), stripped)
        }
        VariantType::PromopackStamped => {
            let stripped = strip_stamp(&record.collector_number, 'p');
            (assumed_set_code(&record.set, &stripped), stripped)
        }
    };
    let number = collector_number::normalize(&number)?;
    let Some(set) = store.find_set_by_code(&set_code).await? else {
        return Ok(Resolution::NotFound);
    };
    let mut matches = store
        .find_cards_by_collector_number(set.id, &number)
        .await?;
    match matches.len() {
        0 => Ok(Resolution::NotFound),
        1 => Ok(Resolution::Resolved(matches.remove(0))),
        n => Ok(Resolution::Ambiguous(n)),
    }
}
