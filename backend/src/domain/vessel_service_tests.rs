//! Tests for the vessel service.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{Collection, Document, MockEntityStore, OccupancyCommand};
use crate::domain::{BerthDraft, BerthRepository, ErrorCode, Occupancy};
use crate::outbound::memory::InMemoryEntityStore;

fn draft(name: &str) -> VesselDraft {
    VesselDraft::new(name, "sailboat", 30).expect("valid vessel")
}

#[fixture]
fn store() -> Arc<InMemoryEntityStore> {
    Arc::new(InMemoryEntityStore::new())
}

#[rstest]
#[tokio::test]
async fn create_assigns_sequential_ids(store: Arc<InMemoryEntityStore>) {
    let service = VesselService::new(store);

    let orca = service.create_vessel(draft("Orca")).await.expect("create");
    let tern = service.create_vessel(draft("Tern")).await.expect("create");

    assert_eq!(orca.id(), VesselId::new(1));
    assert_eq!(tern.id(), VesselId::new(2));
    assert_eq!(
        service.get_vessel(orca.id()).await.expect("get").name(),
        "Orca"
    );
}

#[rstest]
#[tokio::test]
async fn list_returns_every_vessel(store: Arc<InMemoryEntityStore>) {
    let service = VesselService::new(store);
    for name in ["Orca", "Tern", "Puffin"] {
        service.create_vessel(draft(name)).await.expect("create");
    }

    let names: Vec<String> = service
        .list_vessels()
        .await
        .expect("list")
        .iter()
        .map(|vessel| vessel.name().to_owned())
        .collect();
    assert_eq!(names, vec!["Orca", "Tern", "Puffin"]);
}

#[rstest]
#[tokio::test]
async fn update_replaces_all_attributes(store: Arc<InMemoryEntityStore>) {
    let service = VesselService::new(store);
    let vessel = service.create_vessel(draft("Orca")).await.expect("create");
    let replacement = VesselDraft::new("Orca II", "catamaran", 42).expect("valid vessel");

    let updated = service
        .update_vessel(vessel.id(), replacement)
        .await
        .expect("update");

    assert_eq!(updated.id(), vessel.id());
    assert_eq!(
        (updated.name(), updated.kind(), updated.length()),
        ("Orca II", "catamaran", 42)
    );
}

#[rstest]
#[tokio::test]
async fn update_and_get_of_missing_vessel_are_not_found(store: Arc<InMemoryEntityStore>) {
    let service = VesselService::new(store);

    let update = service
        .update_vessel(VesselId::new(5), draft("Orca"))
        .await
        .expect_err("missing");
    let get = service
        .get_vessel(VesselId::new(5))
        .await
        .expect_err("missing");

    assert_eq!(update.code(), ErrorCode::NotFound);
    assert_eq!(get.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_empties_the_occupied_berth(store: Arc<InMemoryEntityStore>) {
    let service = VesselService::new(Arc::clone(&store));
    let occupancy = OccupancyManager::new(Arc::clone(&store));
    let berths = BerthRepository::new(Arc::clone(&store));
    let vessel = service.create_vessel(draft("Orca")).await.expect("create");
    let berth = berths
        .insert(BerthDraft::new(json!(7)).expect("valid berth"))
        .await
        .expect("insert berth");
    occupancy
        .assign(berth.id(), vessel.id())
        .await
        .expect("assign");

    let deletion = service.delete_vessel(vessel.id()).await.expect("delete");

    assert_eq!(deletion.released_berths, vec![berth.id()]);
    let current = berths
        .find(berth.id())
        .await
        .expect("find")
        .expect("berth kept");
    assert_eq!(current.occupancy(), Occupancy::Empty);
    assert_eq!(
        service
            .get_vessel(vessel.id())
            .await
            .expect_err("deleted")
            .code(),
        ErrorCode::NotFound
    );
}

#[rstest]
#[tokio::test]
async fn delete_of_unberthed_vessel_releases_nothing(store: Arc<InMemoryEntityStore>) {
    let service = VesselService::new(store);
    let vessel = service.create_vessel(draft("Orca")).await.expect("create");

    let deletion = service.delete_vessel(vessel.id()).await.expect("delete");
    assert!(deletion.released_berths.is_empty());
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_vessel_is_not_found(store: Arc<InMemoryEntityStore>) {
    let service = VesselService::new(store);

    let err = service
        .delete_vessel(VesselId::new(1))
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn failed_cleanup_keeps_the_vessel() {
    let mut store = MockEntityStore::new();
    store.expect_get().times(1).return_once(|_, id| {
        Ok(Some(Document {
            id,
            revision: 1,
            data: json!({ "name": "Orca", "type": "sailboat", "length": 30 }),
        }))
    });
    store
        .expect_scan()
        .withf(|collection| *collection == Collection::Berths)
        .times(1)
        .return_once(|_| Err(crate::domain::ports::EntityStoreError::connection("refused")));
    store.expect_delete().times(0);
    let service = VesselService::new(Arc::new(store));

    let err = service
        .delete_vessel(VesselId::new(1))
        .await
        .expect_err("cleanup failed");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
