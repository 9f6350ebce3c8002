use uuid::Uuid;

use crate::domain::collector_number;
use crate::domain::set::{CardSet, SetType};
use crate::error::SyncError;
use crate::ports::outbound::catalog::CatalogStore;
use crate::scryfall::records::SetRecord;
use crate::scryfall::ScryfallClient;
use crate::sync::upsert::upsert;

const fn known_uuid(raw: &str) -> Uuid {
    match Uuid::try_parse(raw) {
        Ok(id) => id,
        Err(_) => panic!("malformed uuid literal"),
    }
}

/// Oversized dungeon cards shipped with Adventures in the Forgotten
/// Realms have no set of their own upstream, so one is fabricated
/// locally and the three dungeons are copied into it.
const OVERSIZED_AFR_SET_ID: Uuid = known_uuid("c954ce81-07b0-4881-b350-af3d7780ec22");

const OVERSIZED_AFR_CARDS: [(Uuid, Uuid); 3] = [
    // Dungeon of the Mad Mage
    (
        known_uuid("6f509dbe-6ec7-4438-ab36-e20be46c9922"),
        known_uuid("20665182-5b20-4bb7-8638-4bea6bcfabb3"),
    ),
    // Lost Mine of Phandelver
    (
        known_uuid("59b11ff8-f118-4978-87dd-509dc0c8c932"),
        known_uuid("3377d60a-586d-4e59-8f6c-4c27664c1f40"),
    ),
    // Tomb of Annihilation
    (
        known_uuid("70b284bd-7a8f-4b60-8238-f746bdc5b236"),
        known_uuid("3ccf204e-8431-457c-aa3e-d0e2703f5a32"),
    ),
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SetSyncReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Mirrors the remote set catalog into the store, then patches in the
/// locally fabricated sets and cards.
pub async fn sync_sets<S: CatalogStore + Sync + ?Sized>(
    client: &ScryfallClient,
    store: &S,
) -> Result<SetSyncReport, SyncError> {
    let records = client.sets().try_collect().await?;
    let report = apply_set_records(store, &records).await?;
    inject_synthetic_sets(store).await?;
    inject_synthetic_cards(client, store).await?;
    log::info!(
        "Set sync finished: {} imported, {} skipped",
        report.imported,
        report.skipped
    );
    Ok(report)
}

/// Fetches one set by code and upserts it, so a single set can be
/// brought in without mirroring the whole catalog first.
pub async fn import_set<S: CatalogStore + Sync + ?Sized>(
    client: &ScryfallClient,
    store: &S,
    code: &str,
) -> Result<CardSet, SyncError> {
    let record = client.set(code).await?;
    let set = upsert(store, record.id, |set| record.apply(set)).await?;
    log::info!("Imported set {} ({})", set.code, set.name);
    Ok(set)
}

/// Upserts every import-worthy record into the store.
pub async fn apply_set_records<S: CatalogStore + Sync + ?Sized>(
    store: &S,
    records: &[SetRecord],
) -> Result<SetSyncReport, SyncError> {
    let mut report = SetSyncReport::default();
    for record in records {
        if !record.is_import_worthy() {
            log::debug!("Skipping set {} ({})", record.code, record.set_type);
            report.skipped += 1;
            continue;
        }
        upsert(store, record.id, |set| record.apply(set)).await?;
        report.imported += 1;
    }
    Ok(report)
}

/// Creates the fabricated oversized set. Its release date is taken
/// from the base set, so nothing happens until that set is present.
pub async fn inject_synthetic_sets<S: CatalogStore + Sync + ?Sized>(
    store: &S,
) -> Result<(), SyncError> {
    let Some(base) = store.find_set_by_code("afr").await? else {
        log::debug!("Base set afr not present, skipping fabricated oversized set");
        return Ok(());
    };
    upsert(store, OVERSIZED_AFR_SET_ID, |set: &mut CardSet| {
        set.code = "oafr".into();
        set.name = "Adventures in the Forgotten Realms Oversized".into();
        set.set_type = SetType::Token;
        set.parent_set_code = Some("afr".into());
        set.card_count = OVERSIZED_AFR_CARDS.len() as u32;
        set.release_date = base.release_date;
    })
    .await?;
    Ok(())
}

/// Copies the dungeon prints into the fabricated oversized set.
/// Fetch failures are logged and skipped so a missing upstream print
/// never aborts the run.
pub async fn inject_synthetic_cards<S: CatalogStore + Sync + ?Sized>(
    client: &ScryfallClient,
    store: &S,
) -> Result<(), SyncError> {
    if store.find_set(OVERSIZED_AFR_SET_ID).await?.is_none() {
        return Ok(());
    }
    for (source, target) in OVERSIZED_AFR_CARDS {
        let record = match client.card(source).await {
            Ok(record) => record,
            Err(why) => {
                log::warn!("Failed to fetch fabricated card source {source} - {why}");
                continue;
            }
        };
        let number = collector_number::normalize(&record.collector_number)?;
        upsert(store, target, |card| {
            record.apply(card, OVERSIZED_AFR_SET_ID, number.clone());
        })
        .await?;
    }
    Ok(())
}
