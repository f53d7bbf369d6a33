//! Behaviour tests for the berth occupancy lifecycle.
//!
//! Scenarios drive the domain services over an in-memory entity store and
//! check the referential-integrity invariant after mutating sequences.

use std::cell::RefCell;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use marina::domain::{BerthDraft, BerthId, Error, ErrorCode, VesselDraft, VesselId};
use marina::inbound::http::state::HttpStatePorts;
use marina::outbound::memory::InMemoryEntityStore;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

struct OccupancyWorld {
    runtime: Runtime,
    ports: HttpStatePorts,
    outcome: RefCell<Option<Result<(), Error>>>,
}

impl OccupancyWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime should build");
        Self {
            runtime,
            ports: HttpStatePorts::from_store(Arc::new(InMemoryEntityStore::new())),
            outcome: RefCell::new(None),
        }
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn record<T>(&self, result: Result<T, Error>) {
        *self.outcome.borrow_mut() = Some(result.map(|_| ()));
    }

    fn occupant(&self, berth: u64) -> Option<VesselId> {
        let berth = self
            .block_on(self.ports.berths_query.get_berth(BerthId::new(berth)))
            .expect("berth should exist");
        berth.occupancy().occupant()
    }
}

#[fixture]
fn world() -> OccupancyWorld {
    OccupancyWorld::new()
}

#[given("a vessel named {name}")]
fn a_vessel_named(world: &OccupancyWorld, name: String) {
    let draft = VesselDraft::new(name, "sailboat", 30).expect("valid vessel");
    world
        .block_on(world.ports.vessels.create_vessel(draft))
        .expect("vessel should be created");
}

#[given("an empty berth numbered {number}")]
fn an_empty_berth_numbered(world: &OccupancyWorld, number: u32) {
    let draft = BerthDraft::new(serde_json::json!(number)).expect("valid berth");
    world
        .block_on(world.ports.berths.create_berth(draft))
        .expect("berth should be created");
}

#[given("vessel {vessel} is moored at berth {berth}")]
fn vessel_is_moored_at_berth(world: &OccupancyWorld, vessel: u64, berth: u64) {
    world
        .block_on(
            world
                .ports
                .occupancy
                .assign(BerthId::new(berth), VesselId::new(vessel)),
        )
        .expect("assignment should succeed");
}

#[when("vessel {vessel} is assigned to berth {berth}")]
fn vessel_is_assigned_to_berth(world: &OccupancyWorld, vessel: u64, berth: u64) {
    let result = world.block_on(
        world
            .ports
            .occupancy
            .assign(BerthId::new(berth), VesselId::new(vessel)),
    );
    world.record(result);
}

#[when("vessel {vessel} is released from berth {berth}")]
fn vessel_is_released_from_berth(world: &OccupancyWorld, vessel: u64, berth: u64) {
    let result = world.block_on(
        world
            .ports
            .occupancy
            .release(BerthId::new(berth), VesselId::new(vessel)),
    );
    world.record(result);
}

#[when("vessel {vessel} is deleted")]
fn vessel_is_deleted(world: &OccupancyWorld, vessel: u64) {
    let result = world.block_on(world.ports.vessels.delete_vessel(VesselId::new(vessel)));
    world.record(result);
}

#[when("berth {berth} is deleted")]
fn berth_is_deleted(world: &OccupancyWorld, berth: u64) {
    let result = world.block_on(world.ports.berths.delete_berth(BerthId::new(berth)));
    world.record(result);
}

#[then("berth {berth} is occupied by vessel {vessel}")]
fn berth_is_occupied_by_vessel(world: &OccupancyWorld, berth: u64, vessel: u64) {
    assert_eq!(world.occupant(berth), Some(VesselId::new(vessel)));
}

#[then("berth {berth} is empty")]
fn berth_is_empty(world: &OccupancyWorld, berth: u64) {
    assert_eq!(world.occupant(berth), None);
}

#[then("vessel {vessel} still exists")]
fn vessel_still_exists(world: &OccupancyWorld, vessel: u64) {
    world
        .block_on(world.ports.vessels_query.get_vessel(VesselId::new(vessel)))
        .expect("vessel should survive");
}

#[then("the request fails with {code}")]
fn the_request_fails_with(world: &OccupancyWorld, code: String) {
    let outcome = world.outcome.borrow();
    let error = match outcome.as_ref().expect("a request was made") {
        Ok(()) => panic!("expected the request to fail"),
        Err(error) => error,
    };
    let expected = match code.as_str() {
        "forbidden" => ErrorCode::Forbidden,
        "not_found" => ErrorCode::NotFound,
        "conflict" => ErrorCode::Conflict,
        other => panic!("unknown error code {other}"),
    };
    assert_eq!(error.code(), expected);
}

#[then("every occupant refers to an existing vessel")]
fn every_occupant_refers_to_an_existing_vessel(world: &OccupancyWorld) {
    let vessels: HashSet<VesselId> = world
        .block_on(world.ports.vessels_query.list_vessels())
        .expect("vessels should list")
        .iter()
        .map(|vessel| vessel.id())
        .collect();
    let berths = world
        .block_on(world.ports.berths_query.list_berths())
        .expect("berths should list");
    for berth in berths {
        if let Some(occupant) = berth.occupancy().occupant() {
            assert!(
                vessels.contains(&occupant),
                "berth {} names missing vessel {occupant}",
                berth.id()
            );
        }
    }
}

#[scenario(
    path = "tests/features/berth_occupancy.feature",
    name = "A vessel moors and departs"
)]
fn a_vessel_moors_and_departs(world: OccupancyWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/berth_occupancy.feature",
    name = "An occupied berth refuses a second vessel"
)]
fn an_occupied_berth_refuses_a_second_vessel(world: OccupancyWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/berth_occupancy.feature",
    name = "Deleting a moored vessel frees its berth"
)]
fn deleting_a_moored_vessel_frees_its_berth(world: OccupancyWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/berth_occupancy.feature",
    name = "Assigning a vessel that does not exist"
)]
fn assigning_a_vessel_that_does_not_exist(world: OccupancyWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/berth_occupancy.feature",
    name = "Releasing a vessel that is not at the berth"
)]
fn releasing_a_vessel_that_is_not_at_the_berth(world: OccupancyWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/berth_occupancy.feature",
    name = "Deleting a berth leaves its vessel in place"
)]
fn deleting_a_berth_leaves_its_vessel_in_place(world: OccupancyWorld) {
    drop(world);
}
