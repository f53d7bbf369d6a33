//! PostgreSQL entity store contract tests.
//!
//! These run only when `MARINA_TEST_DATABASE_URL` names a disposable
//! database; the tables are reset before each test, so never point it at
//! real data.

use diesel::sql_query;
use diesel_async::RunQueryDsl;
use marina::domain::ports::{Collection, EntityStore, EntityStoreError};
use marina::outbound::persistence::{
    DbPool, DieselEntityStore, PoolConfig, run_pending_migrations,
};
use rstest::rstest;
use serde_json::json;

const DATABASE_URL_ENV: &str = "MARINA_TEST_DATABASE_URL";

async fn fresh_store() -> Option<DieselEntityStore> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        eprintln!("{DATABASE_URL_ENV} not set; skipping PostgreSQL store test");
        return None;
    };
    run_pending_migrations(&url)
        .await
        .expect("migrations should apply");
    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .expect("pool should build");
    {
        let mut conn = pool.get().await.expect("connection");
        sql_query("DELETE FROM entities")
            .execute(&mut conn)
            .await
            .expect("clear entities");
        sql_query("UPDATE entity_sequences SET last_id = 0")
            .execute(&mut conn)
            .await
            .expect("reset sequences");
    }
    Some(DieselEntityStore::new(pool))
}

#[rstest]
#[tokio::test]
async fn ids_are_sequential_per_collection() {
    let Some(store) = fresh_store().await else {
        return;
    };

    let first = store
        .insert(Collection::Vessels, json!({ "name": "Orca" }))
        .await
        .expect("insert vessel");
    let second = store
        .insert(Collection::Vessels, json!({ "name": "Nautilus" }))
        .await
        .expect("insert vessel");
    let berth = store
        .insert(Collection::Berths, json!({ "number": 7 }))
        .await
        .expect("insert berth");

    assert_eq!((first.id, second.id, berth.id), (1, 2, 1));
    assert_eq!(first.revision, 1);
}

#[rstest]
#[tokio::test]
async fn failed_insert_does_not_consume_an_id() {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        return;
    };
    let Some(store) = fresh_store().await else {
        return;
    };
    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .expect("pool should build");
    let mut conn = pool.get().await.expect("connection");
    sql_query("INSERT INTO entities (kind, id, data) VALUES ('vessels', 1, '{}')")
        .execute(&mut conn)
        .await
        .expect("occupy id 1");

    let clash = store
        .insert(Collection::Vessels, json!({ "name": "Orca" }))
        .await;
    assert!(clash.is_err());

    sql_query("DELETE FROM entities WHERE kind = 'vessels'")
        .execute(&mut conn)
        .await
        .expect("free id 1");
    let doc = store
        .insert(Collection::Vessels, json!({ "name": "Orca" }))
        .await
        .expect("insert vessel");
    assert_eq!(doc.id, 1);
}

#[rstest]
#[tokio::test]
async fn conditional_updates_detect_stale_revisions() {
    let Some(store) = fresh_store().await else {
        return;
    };
    let doc = store
        .insert(Collection::Berths, json!({ "number": 7, "occupant": null }))
        .await
        .expect("insert berth");

    let updated = store
        .update(Collection::Berths, doc.id, json!({ "number": 7, "occupant": 1 }), Some(1))
        .await
        .expect("update")
        .expect("document exists");
    assert_eq!(updated.revision, 2);

    let stale = store
        .update(Collection::Berths, doc.id, json!({ "number": 7, "occupant": null }), Some(1))
        .await;
    assert_eq!(stale, Err(EntityStoreError::revision_mismatch(1_u64, 2_u64)));

    let missing = store
        .update(Collection::Berths, 99, json!({}), Some(1))
        .await
        .expect("update of missing document");
    assert!(missing.is_none());
}

#[rstest]
#[tokio::test]
async fn delete_and_scan_reflect_removals() {
    let Some(store) = fresh_store().await else {
        return;
    };
    for number in [7, 9, 11] {
        store
            .insert(Collection::Berths, json!({ "number": number }))
            .await
            .expect("insert berth");
    }

    assert!(store.delete(Collection::Berths, 2).await.expect("delete"));
    assert!(!store.delete(Collection::Berths, 2).await.expect("delete again"));

    let ids: Vec<u64> = store
        .scan(Collection::Berths)
        .await
        .expect("scan")
        .iter()
        .map(|doc| doc.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(store.get(Collection::Berths, 2).await.expect("get").is_none());
}
