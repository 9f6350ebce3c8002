use serde_json::{json, Value};
use uuid::Uuid;

use cardex::adapters::outbound::catalog::memory::MemoryCatalog;
use cardex::domain::set::{CardSet, SetType};
use cardex::domain::variant::VariantType;
use cardex::ports::outbound::catalog::CatalogStore;
use cardex::sync::cards::{sync_cards_from_reader, CardSyncReport};

async fn seed_set(store: &MemoryCatalog, code: &str, set_type: SetType) -> Uuid {
    let mut set = CardSet::new(Uuid::new_v4());
    set.code = code.into();
    set.set_type = set_type;
    set.card_count = 300;
    store.save_set(&set).await.unwrap();
    set.id
}

fn card(id: Uuid, set: &str, set_id: Uuid, number: &str, promo_types: &[&str]) -> Value {
    json!({
        "id": id,
        "name": "Thought Vessel",
        "layout": "normal",
        "digital": false,
        "set": set,
        "set_id": set_id,
        "set_type": "expansion",
        "collector_number": number,
        "rarity": "common",
        "promo": !promo_types.is_empty(),
        "promo_types": promo_types,
        "nonfoil": true,
        "foil": true
    })
}

fn snapshot(records: &[Value]) -> Vec<u8> {
    serde_json::to_vec(&Value::Array(records.to_vec())).unwrap()
}

#[tokio::test]
async fn prerelease_variant_resolves_against_base_set() {
    let store = MemoryCatalog::new();
    let neo = seed_set(&store, "neo", SetType::Expansion).await;
    let pneo = seed_set(&store, "pneo", SetType::Promo).await;

    let original_id = Uuid::new_v4();
    let variant_id = Uuid::new_v4();
    let records = snapshot(&[
        card(original_id, "neo", neo, "45", &[]),
        card(
            variant_id,
            "pneo",
            pneo,
            "45s",
            &["prerelease", "datestamped"],
        ),
    ]);

    let report = sync_cards_from_reader(&store, records.as_slice())
        .await
        .unwrap();
    assert_eq!(
        report,
        CardSyncReport {
            imported: 1,
            variants: 1,
            skipped: 0,
            errors: 0
        }
    );

    let original = store.find_card(original_id).await.unwrap().unwrap();
    assert_eq!(original.collector_number, "045");

    let variant = store.find_variant(variant_id).await.unwrap().unwrap();
    assert_eq!(variant.original, original_id);
    assert_eq!(variant.variant_type, VariantType::PrereleaseStamped);
}

#[tokio::test]
async fn reprint_list_number_embeds_the_source_set() {
    let store = MemoryCatalog::new();
    let mh2 = seed_set(&store, "mh2", SetType::Expansion).await;
    let plst = seed_set(&store, "plst", SetType::Masters).await;

    let original_id = Uuid::new_v4();
    let variant_id = Uuid::new_v4();
    let records = snapshot(&[
        card(original_id, "mh2", mh2, "123", &[]),
        card(variant_id, "plst", plst, "MH2-123", &["thelist"]),
    ]);

    let report = sync_cards_from_reader(&store, records.as_slice())
        .await
        .unwrap();
    assert_eq!(report.variants, 1);
    assert_eq!(report.errors, 0);

    let variant = store.find_variant(variant_id).await.unwrap().unwrap();
    assert_eq!(variant.original, original_id);
    assert_eq!(variant.variant_type, VariantType::TheList);
}

#[tokio::test]
async fn variant_without_original_is_counted_not_fatal() {
    let store = MemoryCatalog::new();
    let pneo = seed_set(&store, "pneo", SetType::Promo).await;
    seed_set(&store, "neo", SetType::Expansion).await;

    let variant_id = Uuid::new_v4();
    let records = snapshot(&[card(
        variant_id,
        "pneo",
        pneo,
        "45s",
        &["prerelease", "datestamped"],
    )]);

    let report = sync_cards_from_reader(&store, records.as_slice())
        .await
        .unwrap();
    assert_eq!(report.variants, 0);
    assert_eq!(report.errors, 1);
    assert!(store.find_variant(variant_id).await.unwrap().is_none());
}

#[tokio::test]
async fn ambiguous_originals_are_counted_as_errors() {
    let store = MemoryCatalog::new();
    let neo = seed_set(&store, "neo", SetType::Expansion).await;
    let pneo = seed_set(&store, "pneo", SetType::Promo).await;

    let variant_id = Uuid::new_v4();
    let records = snapshot(&[
        card(Uuid::new_v4(), "neo", neo, "45", &[]),
        card(Uuid::new_v4(), "neo", neo, "45", &[]),
        card(
            variant_id,
            "pneo",
            pneo,
            "45s",
            &["prerelease", "datestamped"],
        ),
    ]);

    let report = sync_cards_from_reader(&store, records.as_slice())
        .await
        .unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.variants, 0);
    assert_eq!(report.errors, 1);
    assert!(store.find_variant(variant_id).await.unwrap().is_none());
}

#[tokio::test]
async fn running_the_same_snapshot_twice_changes_nothing() {
    let store = MemoryCatalog::new();
    let neo = seed_set(&store, "neo", SetType::Expansion).await;
    let pneo = seed_set(&store, "pneo", SetType::Promo).await;

    let original_id = Uuid::new_v4();
    let variant_id = Uuid::new_v4();
    let records = snapshot(&[
        card(original_id, "neo", neo, "45", &[]),
        card(
            variant_id,
            "pneo",
            pneo,
            "45s",
            &["prerelease", "datestamped"],
        ),
    ]);

    let first = sync_cards_from_reader(&store, records.as_slice())
        .await
        .unwrap();
    let card_after_first = store.find_card(original_id).await.unwrap().unwrap();
    let variant_after_first = store.find_variant(variant_id).await.unwrap().unwrap();

    let second = sync_cards_from_reader(&store, records.as_slice())
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(
        store.find_card(original_id).await.unwrap().unwrap(),
        card_after_first
    );
    assert_eq!(
        store.find_variant(variant_id).await.unwrap().unwrap(),
        variant_after_first
    );
}

#[tokio::test]
async fn prints_from_unknown_memorabilia_sets_are_skipped_quietly() {
    let store = MemoryCatalog::new();

    let mut record = card(Uuid::new_v4(), "uplist", Uuid::new_v4(), "1", &[]);
    record["set_type"] = json!("memorabilia");
    let records = snapshot(&[record]);

    let report = sync_cards_from_reader(&store, records.as_slice())
        .await
        .unwrap();
    assert_eq!(
        report,
        CardSyncReport {
            imported: 0,
            variants: 0,
            skipped: 1,
            errors: 0
        }
    );
}

#[tokio::test]
async fn prints_from_unknown_regular_sets_are_errors() {
    let store = MemoryCatalog::new();

    let records = snapshot(&[card(Uuid::new_v4(), "neo", Uuid::new_v4(), "45", &[])]);
    let report = sync_cards_from_reader(&store, records.as_slice())
        .await
        .unwrap();
    assert_eq!(report.errors, 1);
    assert_eq!(report.imported, 0);
}

#[tokio::test]
async fn digital_and_playtest_prints_are_skipped() {
    let store = MemoryCatalog::new();
    let neo = seed_set(&store, "neo", SetType::Expansion).await;

    let mut digital = card(Uuid::new_v4(), "neo", neo, "46", &[]);
    digital["digital"] = json!(true);
    let playtest = card(Uuid::new_v4(), "cmb1", Uuid::new_v4(), "12", &[]);
    let records = snapshot(&[digital, playtest]);

    let report = sync_cards_from_reader(&store, records.as_slice())
        .await
        .unwrap();
    assert_eq!(report.skipped, 2);
    assert_eq!(report.imported, 0);
    assert_eq!(report.errors, 0);
}

#[tokio::test]
async fn malformed_collector_numbers_are_skipped() {
    let store = MemoryCatalog::new();
    let neo = seed_set(&store, "neo", SetType::Expansion).await;

    let records = snapshot(&[
        card(Uuid::new_v4(), "neo", neo, "abc", &[]),
        card(Uuid::new_v4(), "neo", neo, "45", &[]),
    ]);
    let report = sync_cards_from_reader(&store, records.as_slice())
        .await
        .unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.imported, 1);
}
