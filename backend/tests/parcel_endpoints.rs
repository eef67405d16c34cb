//! End-to-end tests for the parcel REST surface over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    App,
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test::{self, TestRequest},
    web,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use swissparcel::Trace;
use swissparcel::domain::{ExampleParcelSeeder, ParcelService, TRACE_ID_HEADER};
use swissparcel::inbound::http::api_key::{API_KEY_HEADER, ApiKey};
use swissparcel::inbound::http::configure;
use swissparcel::inbound::http::health::HealthState;
use swissparcel::inbound::http::state::{HttpState, HttpStatePorts};
use swissparcel::outbound::InMemoryParcelRepository;

const KEY: &str = "SUPER_ALEX";

#[fixture]
fn repository() -> Arc<InMemoryParcelRepository> {
    Arc::new(InMemoryParcelRepository::new())
}

async fn init_app(
    repository: Arc<InMemoryParcelRepository>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let service = Arc::new(ParcelService::new(repository));
    let state = HttpState::new(
        HttpStatePorts {
            parcels: service.clone(),
            parcel_commands: service,
        },
        ApiKey::new(KEY).expect("valid key"),
    );
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(HealthState::new()))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

fn with_key(request: TestRequest) -> Request {
    request.insert_header((API_KEY_HEADER, KEY)).to_request()
}

async fn body_json(response: ServiceResponse<BoxBody>) -> Value {
    let bytes = test::read_body(response).await;
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[rstest]
#[actix_web::test]
async fn parcel_lifecycle(repository: Arc<InMemoryParcelRepository>) {
    let app = init_app(repository).await;

    let created = test::call_service(
        &app,
        with_key(TestRequest::post().uri("/parcels").set_json(json!({
            "id": "2222-A",
            "canton": "ZH",
            "municipality": null,
            "area_m2": 500.5,
            "zoning": "buildable",
            "is_buildable": true,
            "estimated_value_chf": null
        }))),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let score = test::call_service(
        &app,
        with_key(TestRequest::get().uri("/parcels/2222-A/score")),
    )
    .await;
    assert_eq!(
        body_json(score).await,
        json!({ "parcel_id": "2222-A", "score": 90 })
    );

    let updated = test::call_service(
        &app,
        with_key(TestRequest::put().uri("/parcels/2222-A").set_json(json!({
            "canton": "ZH",
            "municipality": "Zürich",
            "area_m2": 1500.0,
            "zoning": "buildable",
            "is_buildable": true,
            "estimated_value_chf": 900000.0
        }))),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["municipality"], "Zürich");

    let potential = test::call_service(
        &app,
        with_key(TestRequest::get().uri("/parcels/2222-A/development-potential")),
    )
    .await;
    assert_eq!(body_json(potential).await["potential"], "High");

    let deleted = test::call_service(
        &app,
        with_key(TestRequest::delete().uri("/parcels/2222-A")),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = test::call_service(&app, with_key(TestRequest::get().uri("/parcels/2222-A"))).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn seeded_examples_are_served(repository: Arc<InMemoryParcelRepository>) {
    let outcome = ExampleParcelSeeder::new(repository.clone())
        .seed()
        .await
        .expect("seeding succeeds");
    assert_eq!(outcome.inserted, 2);
    let app = init_app(repository).await;

    let listed = test::call_service(&app, with_key(TestRequest::get().uri("/parcels"))).await;
    let ids: Vec<Value> = body_json(listed)
        .await
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|parcel| parcel["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!("12345"), json!("67890")]);

    let stats = test::call_service(&app, with_key(TestRequest::get().uri("/parcels/stats"))).await;
    assert_eq!(
        body_json(stats).await,
        json!({
            "total_parcels": 2,
            "buildable_percentage": "50.00%",
            "average_area_m2": "1000.00"
        })
    );

    let zoning = test::call_service(
        &app,
        with_key(TestRequest::get().uri("/parcels/67890/zoning-explanation")),
    )
    .await;
    let zoning = body_json(zoning).await;
    assert_eq!(zoning["zoning"], "agricultural");
    assert_eq!(zoning["parcel_id"], "67890");
}

#[rstest]
#[actix_web::test]
async fn error_envelope_carries_the_caller_trace_id(repository: Arc<InMemoryParcelRepository>) {
    const CALLER_TRACE: &str = "6f1c2a9e-8a51-4d0c-9c63-0c1f5d0b9e11";
    let app = init_app(repository).await;

    let response = test::call_service(
        &app,
        TestRequest::get()
            .uri("/parcels/404")
            .insert_header((API_KEY_HEADER, KEY))
            .insert_header((TRACE_ID_HEADER, CALLER_TRACE))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(CALLER_TRACE)
    );
    let body = body_json(response).await;
    assert_eq!(body["traceId"], CALLER_TRACE);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case("/")]
#[case("/status")]
#[case("/health/live")]
#[actix_web::test]
async fn open_routes_need_no_key(
    repository: Arc<InMemoryParcelRepository>,
    #[case] path: &str,
) {
    let app = init_app(repository).await;
    let response = test::call_service(&app, TestRequest::get().uri(path).to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
}
