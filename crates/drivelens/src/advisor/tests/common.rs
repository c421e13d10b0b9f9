use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::advisor::{financing_router, FinancingService, RecommenderConfig};
use crate::catalog::{
    BodyType, BundledCatalog, CatalogError, CatalogShape, CatalogSource, Powertrain,
    VehicleCatalog, VehicleModel,
};
use crate::config::CatalogConfig;
use crate::profile::{CreditBand, CreditStanding, UserProfile};

pub(super) fn vehicle(id: &str, model: &str, powertrain: Powertrain, msrp: f64) -> VehicleModel {
    VehicleModel {
        id: id.to_string(),
        name: format!("{model} {id}"),
        make: Some("Toyota".to_string()),
        model: Some(model.to_string()),
        trim: None,
        year: Some(2024),
        powertrain,
        body: BodyType::Sedan,
        msrp,
        mpg: Some(30.0),
        mpge: None,
        apr_base: 0.06,
        lease_residual_pct: 0.58,
        safety_rating: Some(4),
        horsepower: Some(180),
        seats: Some(5),
        maintenance_cost_per_year: Some(450.0),
        insurance_cost_per_month: Some(140.0),
        resale_value_percent: Some(55.0),
        co2_grams_per_mile: None,
    }
}

pub(super) fn profile(income: f64, band: CreditBand) -> UserProfile {
    let mut profile = UserProfile::new(income, CreditStanding::Band(band));
    profile.daily_miles = Some(30.0);
    profile
}

pub(super) fn comfortable_profile() -> UserProfile {
    let mut profile = profile(7_500.0, CreditBand::VeryGood);
    profile.age = Some(34);
    profile.down_payment = 3_000.0;
    profile
}

pub(super) fn inventory() -> VehicleCatalog {
    VehicleCatalog::bundled(CatalogShape::Inventory).expect("inventory loads")
}

/// Serves a fixed catalog.
#[derive(Debug)]
pub(super) struct StaticCatalog(pub(super) VehicleCatalog);

impl CatalogSource for StaticCatalog {
    fn load(&self) -> Result<VehicleCatalog, CatalogError> {
        Ok(self.0.clone())
    }
}

/// Simulates an unreachable vehicle-data feed.
#[derive(Debug)]
pub(super) struct OfflineFeed;

impl CatalogSource for OfflineFeed {
    fn load(&self) -> Result<VehicleCatalog, CatalogError> {
        Err(CatalogError::Unavailable("feed offline".to_string()))
    }
}

pub(super) fn service() -> Arc<FinancingService> {
    Arc::new(FinancingService::bundled())
}

pub(super) fn service_with_inventory(vehicles: Vec<VehicleModel>) -> FinancingService {
    let catalog = VehicleCatalog::new(vehicles).expect("valid test catalog");
    FinancingService::new(
        Arc::new(BundledCatalog::new(CatalogShape::Basic)),
        Arc::new(StaticCatalog(catalog)),
        CatalogConfig::default().ttl(),
        RecommenderConfig::default(),
        "DriveLens",
    )
}

pub(super) fn router() -> Router {
    financing_router(service())
}

pub(super) async fn post_json(router: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    router.oneshot(request).await.expect("router response")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_ok(response: &Response) {
    assert_eq!(response.status(), StatusCode::OK);
}
