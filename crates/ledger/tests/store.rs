use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use ledger::{
    DateRange, DbStore, DisplayCurrency, LedgerError, NewTransaction, TransactionKind,
    TransactionPatch, TransactionStore, preferences,
};
use migration::MigratorTrait;

async fn store_with_db() -> (DbStore, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    (DbStore::new(db.clone()), db)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn new_tx(amount: f64, occurred_on: NaiveDate) -> NewTransaction {
    NewTransaction {
        kind: TransactionKind::Expense,
        amount,
        category: "misc".to_string(),
        note: None,
        occurred_on,
    }
}

#[tokio::test]
async fn insert_assigns_identifier_and_normalizes_text() {
    let (store, _db) = store_with_db().await;

    let stored = store
        .insert(
            "alice",
            NewTransaction {
                kind: TransactionKind::Income,
                amount: 100.0,
                category: "  salary ".to_string(),
                note: Some("   ".to_string()),
                occurred_on: date(2024, 1, 5),
            },
        )
        .await
        .unwrap();

    assert_eq!(stored.owner, "alice");
    assert_eq!(stored.category, "salary");
    assert_eq!(stored.note, None);
    assert_eq!(stored.amount, 100.0);
    assert_eq!(stored.display_amount, 100.0);
}

#[tokio::test]
async fn insert_rejects_negative_amounts() {
    let (store, _db) = store_with_db().await;

    let err = store
        .insert("alice", new_tx(-5.0, date(2024, 1, 5)))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));

    let rows = store.list("alice", &DateRange::default()).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn list_is_scoped_to_the_owner() {
    let (store, _db) = store_with_db().await;

    store
        .insert("alice", new_tx(1.0, date(2024, 1, 1)))
        .await
        .unwrap();
    store
        .insert("bob", new_tx(2.0, date(2024, 1, 2)))
        .await
        .unwrap();

    let rows = store.list("alice", &DateRange::default()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].owner, "alice");
}

#[tokio::test]
async fn list_range_bounds_are_inclusive() {
    let (store, _db) = store_with_db().await;

    for day in [1, 10, 20] {
        store
            .insert("alice", new_tx(f64::from(day), date(2024, 3, day as u32)))
            .await
            .unwrap();
    }

    let range = DateRange {
        start: Some(date(2024, 3, 10)),
        end: Some(date(2024, 3, 20)),
    };
    let rows = store.list("alice", &range).await.unwrap();
    let amounts: Vec<f64> = rows.iter().map(|tx| tx.amount).collect();
    assert_eq!(amounts, vec![20.0, 10.0]);
}

#[tokio::test]
async fn update_patches_fields_and_clears_blank_notes() {
    let (store, _db) = store_with_db().await;

    let stored = store
        .insert(
            "alice",
            NewTransaction {
                kind: TransactionKind::Expense,
                amount: 40.0,
                category: "food".to_string(),
                note: Some("groceries".to_string()),
                occurred_on: date(2024, 1, 5),
            },
        )
        .await
        .unwrap();

    let updated = store
        .update(
            stored.id,
            TransactionPatch {
                kind: Some(TransactionKind::Income),
                amount: Some(45.5),
                note: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.kind, TransactionKind::Income);
    assert_eq!(updated.amount, 45.5);
    assert_eq!(updated.note, None);
    assert_eq!(updated.category, "food");
    assert_eq!(updated.occurred_on, stored.occurred_on);
}

#[tokio::test]
async fn update_missing_row_is_key_not_found() {
    let (store, _db) = store_with_db().await;

    let err = store
        .update(Uuid::new_v4(), TransactionPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::KeyNotFound(_)));
}

#[tokio::test]
async fn delete_missing_row_is_key_not_found() {
    let (store, _db) = store_with_db().await;

    let err = store.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, LedgerError::KeyNotFound(_)));
}

#[tokio::test]
async fn display_currency_defaults_then_round_trips() {
    let (_store, db) = store_with_db().await;

    let loaded = preferences::load_display_currency(&db).await.unwrap();
    assert_eq!(loaded, DisplayCurrency::default());

    let euro = DisplayCurrency {
        code: "EUR".to_string(),
        symbol: "€".to_string(),
    };
    preferences::save_display_currency(&db, &euro).await.unwrap();
    assert_eq!(preferences::load_display_currency(&db).await.unwrap(), euro);

    let pound = DisplayCurrency {
        code: "GBP".to_string(),
        symbol: "£".to_string(),
    };
    preferences::save_display_currency(&db, &pound).await.unwrap();
    assert_eq!(
        preferences::load_display_currency(&db).await.unwrap(),
        pound
    );
}
