//! End-to-end HTTP scenarios over the in-memory entity store.

use std::collections::HashSet;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use marina::Trace;
use marina::inbound::http::configure;
use marina::inbound::http::state::{HttpState, HttpStatePorts, ResourceLinks};
use marina::outbound::memory::InMemoryEntityStore;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const BASE_URL: &str = "http://localhost:8080";

#[fixture]
fn state() -> web::Data<HttpState> {
    let ports = HttpStatePorts::from_store(Arc::new(InMemoryEntityStore::new()));
    web::Data::new(HttpState::new(ports, ResourceLinks::new(BASE_URL)))
}

async fn call(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    req: actix_test::TestRequest,
) -> (StatusCode, Option<Value>) {
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).expect("JSON body"))
    };
    (status, body)
}

/// Cross-check `GET /berths` against `GET /vessels`: every non-null
/// occupant must name a listed vessel.
async fn assert_occupants_exist(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) {
    let (status, vessels) = call(app, actix_test::TestRequest::get().uri("/vessels")).await;
    assert_eq!(status, StatusCode::OK);
    let vessel_ids: HashSet<u64> = vessels
        .expect("vessel list")
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|vessel| vessel["id"].as_u64())
        .collect();

    let (status, berths) = call(app, actix_test::TestRequest::get().uri("/berths")).await;
    assert_eq!(status, StatusCode::OK);
    for berth in berths.expect("berth list").as_array().expect("array body") {
        if let Some(occupant) = berth["occupant"].as_u64() {
            assert!(
                vessel_ids.contains(&occupant),
                "berth {} names missing vessel {occupant}",
                berth["id"]
            );
        }
    }
}

#[rstest]
#[actix_web::test]
async fn deleting_a_moored_vessel_empties_its_berth(state: web::Data<HttpState>) {
    let app = actix_test::init_service(App::new().app_data(state).wrap(Trace).configure(configure))
        .await;

    let (status, vessel) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/vessels")
            .set_json(json!({ "name": "Orca", "type": "sailboat", "length": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(vessel.expect("vessel body")["id"], 1);

    let (status, berth) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/berths")
            .set_json(json!({ "number": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let berth = berth.expect("berth body");
    assert_eq!(berth["id"], 1);
    assert_eq!(berth["occupant"], Value::Null);
    assert_eq!(berth["self"], "http://localhost:8080/berths/1");

    let (status, body) = call(&app, actix_test::TestRequest::put().uri("/berths/1/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());

    let (_, berth) = call(&app, actix_test::TestRequest::get().uri("/berths/1")).await;
    assert_eq!(berth.expect("berth body")["occupant"], 1);

    let (status, _) = call(&app, actix_test::TestRequest::delete().uri("/vessels/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, berth) = call(&app, actix_test::TestRequest::get().uri("/berths/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(berth.expect("berth body")["occupant"], Value::Null);
    assert_occupants_exist(&app).await;
}

#[rstest]
#[actix_web::test]
async fn assigning_an_unknown_vessel_is_not_found(state: web::Data<HttpState>) {
    let app = actix_test::init_service(App::new().app_data(state).wrap(Trace).configure(configure))
        .await;

    call(
        &app,
        actix_test::TestRequest::post()
            .uri("/berths")
            .set_json(json!({ "number": 3 })),
    )
    .await;
    let (status, berth) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/berths")
            .set_json(json!({ "number": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(berth.expect("berth body")["id"], 2);

    let (status, error) = call(&app, actix_test::TestRequest::put().uri("/berths/2/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error = error.expect("error body");
    assert_eq!(error["code"], "not_found");
    assert!(error["traceId"].is_string());
    assert_occupants_exist(&app).await;
}

#[rstest]
#[actix_web::test]
async fn a_moored_vessel_cannot_be_reassigned_until_released(state: web::Data<HttpState>) {
    let app = actix_test::init_service(App::new().app_data(state).wrap(Trace).configure(configure))
        .await;
    call(
        &app,
        actix_test::TestRequest::post()
            .uri("/vessels")
            .set_json(json!({ "name": "Orca", "type": "sailboat", "length": 30 })),
    )
    .await;
    for number in [7, 9] {
        call(
            &app,
            actix_test::TestRequest::post()
                .uri("/berths")
                .set_json(json!({ "number": number })),
        )
        .await;
    }

    let (status, _) = call(&app, actix_test::TestRequest::put().uri("/berths/1/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, error) = call(&app, actix_test::TestRequest::put().uri("/berths/2/1")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error.expect("error body")["details"]["berthId"], 1);

    let (status, _) = call(&app, actix_test::TestRequest::delete().uri("/berths/1/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, actix_test::TestRequest::put().uri("/berths/2/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, berths) = call(&app, actix_test::TestRequest::get().uri("/berths")).await;
    let occupants: Vec<Value> = berths
        .expect("berth list")
        .as_array()
        .expect("array body")
        .iter()
        .map(|berth| berth["occupant"].clone())
        .collect();
    assert_eq!(occupants, vec![Value::Null, json!(1)]);
    assert_occupants_exist(&app).await;
}

#[rstest]
#[actix_web::test]
async fn mixed_deletions_leave_no_dangling_occupants(state: web::Data<HttpState>) {
    let app = actix_test::init_service(App::new().app_data(state).wrap(Trace).configure(configure))
        .await;
    for name in ["Orca", "Nautilus", "Calypso"] {
        call(
            &app,
            actix_test::TestRequest::post()
                .uri("/vessels")
                .set_json(json!({ "name": name, "type": "sailboat", "length": 30 })),
        )
        .await;
    }
    for number in [json!(7), json!("A7"), json!(7.5)] {
        let (status, _) = call(
            &app,
            actix_test::TestRequest::post()
                .uri("/berths")
                .set_json(json!({ "number": number })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    for uri in ["/berths/1/1", "/berths/2/2", "/berths/3/3"] {
        let (status, _) = call(&app, actix_test::TestRequest::put().uri(uri)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    assert_occupants_exist(&app).await;

    let (status, _) = call(&app, actix_test::TestRequest::delete().uri("/berths/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, actix_test::TestRequest::delete().uri("/vessels/2")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_occupants_exist(&app).await;

    let (_, vessel) = call(&app, actix_test::TestRequest::get().uri("/vessels/1")).await;
    assert_eq!(vessel.expect("vessel body")["id"], 1);
    let (_, berth) = call(&app, actix_test::TestRequest::get().uri("/berths/2")).await;
    let berth = berth.expect("berth body");
    assert_eq!(berth["number"], "A7");
    assert_eq!(berth["occupant"], Value::Null);
}
