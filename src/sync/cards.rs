use std::io::Read;

use crate::domain::collector_number;
use crate::domain::variant::{CardVariant, VariantType};
use crate::error::SyncError;
use crate::ports::outbound::catalog::CatalogStore;
use crate::scryfall::bulk::{BulkRecords, BulkSource};
use crate::scryfall::records::CardRecord;
use crate::scryfall::ScryfallClient;
use crate::sync::overrides;
use crate::sync::resolver::{self, Resolution};
use crate::sync::upsert::upsert;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CardSyncReport {
    pub imported: usize,
    pub variants: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Streams card records into the store. Variant prints are deferred
/// until every primary print has been seen, then resolved against the
/// catalog. A record that cannot be imported is logged and counted,
/// never aborting the run.
pub struct CardSync<'a, S: CatalogStore + Sync + ?Sized> {
    store: &'a S,
    deferred: Vec<(CardRecord, VariantType)>,
    report: CardSyncReport,
}

impl<'a, S: CatalogStore + Sync + ?Sized> CardSync<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            deferred: Vec::new(),
            report: CardSyncReport::default(),
        }
    }

    pub async fn handle(&mut self, record: CardRecord) {
        if record.digital
            || record.layout == "art_series"
            || overrides::is_card_set_excluded(&record.set)
        {
            self.report.skipped += 1;
            return;
        }
        if let Some(variant_type) = resolver::classify(&record) {
            self.deferred.push((record, variant_type));
            return;
        }
        if let Err(why) = self.import_primary(&record).await {
            self.record_failure(&record, why);
        } else {
            self.report.imported += 1;
        }
    }

    /// Resolves the deferred variants and returns the final tally.
    pub async fn finish(mut self) -> CardSyncReport {
        let deferred = std::mem::take(&mut self.deferred);
        for (record, variant_type) in deferred {
            match self.link_variant(&record, variant_type).await {
                Ok(()) => self.report.variants += 1,
                Err(why) => self.record_failure(&record, why),
            }
        }
        self.report
    }

    async fn import_primary(&self, record: &CardRecord) -> Result<(), SyncError> {
        let number = collector_number::normalize(&record.collector_number)?;
        let Some(set) = self.store.find_set(record.set_id).await? else {
            return Err(SyncError::SetNotInDatabase {
                code: record.set.clone(),
                set_type: record.set_type.clone(),
            });
        };
        upsert(self.store, record.id, |card| {
            record.apply(card, set.id, number);
        })
        .await?;
        Ok(())
    }

    async fn link_variant(
        &self,
        record: &CardRecord,
        variant_type: VariantType,
    ) -> Result<(), SyncError> {
        let original = match resolver::resolve_original(self.store, record, variant_type).await? {
            Resolution::Resolved(card) => card,
            Resolution::NotFound => {
                return Err(SyncError::VariantResolution {
                    collector_number: record.collector_number.clone(),
                    reason: "no matching original print".into(),
                })
            }
            Resolution::Ambiguous(count) => {
                return Err(SyncError::VariantResolution {
                    collector_number: record.collector_number.clone(),
                    reason: format!("{count} matching original prints"),
                })
            }
        };
        upsert(self.store, record.id, |variant: &mut CardVariant| {
            variant.original = original.id;
            variant.variant_type = variant_type;
        })
        .await?;
        Ok(())
    }

    fn record_failure(&mut self, record: &CardRecord, why: SyncError) {
        match &why {
            SyncError::SetNotInDatabase { code, set_type }
                if set_type == "memorabilia" && !overrides::is_memorabilia_catalogued(code) =>
            {
                log::debug!("Skipping {} {} - {why}", record.set, record.collector_number);
                self.report.skipped += 1;
            }
            SyncError::InvalidCollectorNumber(_) => {
                log::warn!("Skipping {} {} - {why}", record.set, record.collector_number);
                self.report.skipped += 1;
            }
            _ => {
                log::error!(
                    "Failed to import {} {} - {why}",
                    record.set,
                    record.collector_number
                );
                self.report.errors += 1;
            }
        }
    }
}

/// Imports a full bulk snapshot of card prints.
pub async fn sync_cards_from_bulk<S: CatalogStore + Sync + ?Sized>(
    client: &ScryfallClient,
    store: &S,
    source: &BulkSource,
) -> Result<CardSyncReport, SyncError> {
    let reader = source.open(client).await?;
    let report = sync_cards_from_reader(store, reader).await?;
    log::info!(
        "Card sync finished: {} imported, {} variants, {} skipped, {} errors",
        report.imported,
        report.variants,
        report.skipped,
        report.errors
    );
    Ok(report)
}

/// Imports card prints from an already opened snapshot. A record
/// that fails to decode aborts the run.
pub async fn sync_cards_from_reader<S, R>(
    store: &S,
    reader: R,
) -> Result<CardSyncReport, SyncError>
where
    S: CatalogStore + Sync + ?Sized,
    R: Read,
{
    let mut sync = CardSync::new(store);
    for record in BulkRecords::new(reader) {
        sync.handle(record?).await;
    }
    Ok(sync.finish().await)
}

/// Imports every print of a single set straight from the paginated
/// API, for refreshing one set without a full snapshot.
pub async fn sync_cards_of_set<S: CatalogStore + Sync + ?Sized>(
    client: &ScryfallClient,
    store: &S,
    code: &str,
) -> Result<CardSyncReport, SyncError> {
    let mut fetcher = client.cards_of_set(code);
    let mut sync = CardSync::new(store);
    while let Some(record) = fetcher.try_next().await? {
        sync.handle(record).await;
    }
    let report = sync.finish().await;
    log::info!(
        "Card sync for {code} finished: {} imported, {} variants, {} skipped, {} errors",
        report.imported,
        report.variants,
        report.skipped,
        report.errors
    );
    Ok(report)
}
