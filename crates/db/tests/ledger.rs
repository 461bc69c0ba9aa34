//! Integration tests for the quantity ledger.
//!
//! Verifies that:
//! - A pair with no row reads as zero, and reads never create rows
//! - `adjust` rejects negative results without writing anything
//! - A lock on a new pair holds back a second writer until it commits
//! - `allow_negative` lets a quantity drop below zero
//! - Stored quantities are rounded to three decimals
//! - The level matrix reports every live item x area pair

use assert_matches::assert_matches;
use rust_decimal::Decimal;
use sqlx::PgPool;
use stockroom_core::error::CoreError;
use stockroom_db::models::inventory::LevelQuery;
use stockroom_db::models::item::CreateItem;
use stockroom_db::models::storage_area::CreateStorageArea;
use stockroom_db::repositories::{InventoryRepo, ItemRepo, LedgerError, StorageAreaRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn new_item(sku: &str, name: &str) -> CreateItem {
    CreateItem {
        sku: sku.to_string(),
        name: name.to_string(),
        category: None,
        unit: None,
        reorder_level: None,
        notes: None,
        is_active: None,
    }
}

fn new_area(code: &str, name: &str) -> CreateStorageArea {
    CreateStorageArea {
        code: code.to_string(),
        name: name.to_string(),
        description: None,
        is_active: None,
    }
}

async fn seed_pair(pool: &PgPool) -> (i64, i64) {
    let item = ItemRepo::create(pool, &new_item("bolt-1", "Bolt")).await.unwrap();
    let area = StorageAreaRepo::create(pool, &new_area("a1", "Aisle 1"))
        .await
        .unwrap();
    (item.id, area.id)
}

async fn row_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM inventory_levels")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_absent_pair_reads_as_zero(pool: PgPool) {
    let (item, area) = seed_pair(&pool).await;

    let first = InventoryRepo::current_quantity(&pool, item, area).await.unwrap();
    let second = InventoryRepo::current_quantity(&pool, item, area).await.unwrap();

    assert_eq!(first, Decimal::ZERO);
    assert_eq!(second, Decimal::ZERO);
    assert_eq!(row_count(&pool).await, 0, "reads must not create rows");
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_absolute_upserts_and_rounds(pool: PgPool) {
    let (item, area) = seed_pair(&pool).await;

    let stored = InventoryRepo::set_absolute(&pool, item, area, dec("12.34567"))
        .await
        .unwrap();
    assert_eq!(stored, dec("12.346"));

    let stored = InventoryRepo::set_absolute(&pool, item, area, dec("4"))
        .await
        .unwrap();
    assert_eq!(stored, dec("4"));
    assert_eq!(row_count(&pool).await, 1, "second set updates the same row");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_adjust_accumulates(pool: PgPool) {
    let (item, area) = seed_pair(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let q = InventoryRepo::adjust(&mut conn, item, area, dec("10"), false)
        .await
        .unwrap();
    assert_eq!(q, dec("10"));

    let q = InventoryRepo::adjust(&mut conn, item, area, dec("-2.5"), false)
        .await
        .unwrap();
    assert_eq!(q, dec("7.5"));

    let q = InventoryRepo::adjust(&mut conn, item, area, dec("-7.5"), false)
        .await
        .unwrap();
    assert_eq!(q, Decimal::ZERO, "draining to exactly zero is allowed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_adjust_rejects_negative_without_writing(pool: PgPool) {
    let (item, area) = seed_pair(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let result = InventoryRepo::adjust(&mut conn, item, area, dec("-1"), false).await;
    assert_matches!(result, Err(LedgerError::Core(CoreError::InsufficientStock(_))));
    assert_eq!(row_count(&pool).await, 0, "failed adjust must not create a row");

    InventoryRepo::set_absolute(&pool, item, area, dec("3")).await.unwrap();
    let result = InventoryRepo::adjust(&mut conn, item, area, dec("-3.001"), false).await;
    assert_matches!(result, Err(LedgerError::Core(CoreError::InsufficientStock(_))));
    assert_eq!(
        InventoryRepo::current_quantity(&pool, item, area).await.unwrap(),
        dec("3")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_on_new_pair_serializes_writers(pool: PgPool) {
    let (item, area) = seed_pair(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    let current = InventoryRepo::lock_quantity(&mut *tx, item, area).await.unwrap();
    assert_eq!(current, Decimal::ZERO);

    let other = pool.clone();
    let writer = tokio::spawn(async move {
        let mut conn = other.acquire().await.unwrap();
        InventoryRepo::adjust(&mut conn, item, area, dec("5"), false).await
    });
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert!(!writer.is_finished(), "second writer must wait for the lock");

    InventoryRepo::set_absolute(&mut *tx, item, area, dec("10"))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let stored = writer.await.unwrap().unwrap();
    assert_eq!(stored, dec("15"));
    assert_eq!(row_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_adjust_allows_negative_when_enabled(pool: PgPool) {
    let (item, area) = seed_pair(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let q = InventoryRepo::adjust(&mut conn, item, area, dec("-4"), true)
        .await
        .unwrap();
    assert_eq!(q, dec("-4"));
}

// ---------------------------------------------------------------------------
// Matrix
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_matrix_covers_every_live_pair(pool: PgPool) {
    let bolt = ItemRepo::create(&pool, &new_item("b-1", "Bolt")).await.unwrap();
    let nut = ItemRepo::create(&pool, &new_item("n-1", "Nut")).await.unwrap();
    let a1 = StorageAreaRepo::create(&pool, &new_area("a1", "Aisle 1")).await.unwrap();
    let a2 = StorageAreaRepo::create(&pool, &new_area("a2", "Aisle 2")).await.unwrap();
    let gone = StorageAreaRepo::create(&pool, &new_area("x", "Annex")).await.unwrap();
    StorageAreaRepo::soft_delete(&pool, gone.id, None).await.unwrap();

    InventoryRepo::set_absolute(&pool, bolt.id, a1.id, dec("5")).await.unwrap();
    InventoryRepo::set_absolute(&pool, bolt.id, a2.id, dec("2.5")).await.unwrap();

    let rows = InventoryRepo::matrix(&pool, &LevelQuery::default()).await.unwrap();
    assert_eq!(rows.len(), 4, "2 items x 2 live areas");

    let names: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.item_name.as_str(), r.storage_area_name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Bolt", "Aisle 1"),
            ("Bolt", "Aisle 2"),
            ("Nut", "Aisle 1"),
            ("Nut", "Aisle 2"),
        ]
    );

    assert_eq!(rows[0].quantity, dec("5"));
    assert_eq!(rows[0].total_item_quantity, dec("7.5"));
    assert!(rows[0].last_level_update.is_some());
    assert_eq!(rows[2].item_id, nut.id);
    assert_eq!(rows[2].quantity, Decimal::ZERO);
    assert!(rows[2].last_level_update.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_matrix_filters(pool: PgPool) {
    ItemRepo::create(&pool, &new_item("b-1", "Bolt")).await.unwrap();
    let mut hidden = new_item("w-1", "Washer");
    hidden.is_active = Some(false);
    ItemRepo::create(&pool, &hidden).await.unwrap();
    let a1 = StorageAreaRepo::create(&pool, &new_area("a1", "Aisle 1")).await.unwrap();
    StorageAreaRepo::create(&pool, &new_area("a2", "Aisle 2")).await.unwrap();

    let by_area = LevelQuery {
        storage_area_id: Some(a1.id),
        ..Default::default()
    };
    let rows = InventoryRepo::matrix(&pool, &by_area).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].storage_area_id, a1.id);

    let by_search = LevelQuery {
        search: Some("wash".into()),
        include_inactive: Some(true),
        ..Default::default()
    };
    let rows = InventoryRepo::matrix(&pool, &by_search).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.sku == "W-1"));

    let active_only = LevelQuery {
        search: Some("wash".into()),
        ..Default::default()
    };
    assert!(InventoryRepo::matrix(&pool, &active_only).await.unwrap().is_empty());
}
