use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use super::service::{
    FinancingService, InsightsRequest, PredictRequest, ProfileAnalysisRequest, TrajectoryRequest,
};
use super::AdvisorError;
use crate::error::AppError;
use crate::finance::QuoteRequest;
use crate::profile::UserProfile;

/// Router builder exposing the financing endpoints.
pub fn financing_router(service: Arc<FinancingService>) -> Router {
    Router::new()
        .route("/api/calc", post(calc_handler))
        .route("/api/recommend", post(recommend_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/plan", post(plan_handler))
        .route("/api/inventory/recommend", post(inventory_handler))
        .route("/api/insights", post(insights_handler))
        .route("/api/credit/trajectory", post(trajectory_handler))
        .route("/api/profile/analysis", post(profile_analysis_handler))
        .with_state(service)
}

fn respond<T: Serialize>(result: Result<T, AdvisorError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn calc_handler(
    State(service): State<Arc<FinancingService>>,
    Json(request): Json<QuoteRequest>,
) -> Response {
    respond(service.calc(&request))
}

pub(crate) async fn recommend_handler(
    State(service): State<Arc<FinancingService>>,
    Json(profile): Json<UserProfile>,
) -> Response {
    respond(service.recommend(&profile))
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<FinancingService>>,
    Json(request): Json<PredictRequest>,
) -> Response {
    match service.predict(&request) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(AdvisorError::VehicleNotFound(_)) => {
            AppError::not_found("Model not found").into_response()
        }
        Err(other) => AppError::from(other).into_response(),
    }
}

pub(crate) async fn plan_handler(
    State(service): State<Arc<FinancingService>>,
    Json(profile): Json<UserProfile>,
) -> Response {
    respond(service.plan(&profile))
}

/// Ineligible profiles still answer 200 with the structured decision.
pub(crate) async fn inventory_handler(
    State(service): State<Arc<FinancingService>>,
    Json(profile): Json<UserProfile>,
) -> Response {
    respond(service.inventory_recommend(&profile))
}

pub(crate) async fn insights_handler(
    State(service): State<Arc<FinancingService>>,
    Json(request): Json<InsightsRequest>,
) -> Response {
    respond(service.insights(&request))
}

pub(crate) async fn trajectory_handler(
    State(service): State<Arc<FinancingService>>,
    Json(request): Json<TrajectoryRequest>,
) -> Response {
    respond(service.credit_trajectory(&request))
}

pub(crate) async fn profile_analysis_handler(
    State(service): State<Arc<FinancingService>>,
    Json(request): Json<ProfileAnalysisRequest>,
) -> Response {
    respond(service.profile_analysis(&request))
}
