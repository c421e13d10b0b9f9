//! Financing advice over a vehicle catalog: eligibility, scoring,
//! recommendation, insights, credit simulation, and the HTTP surface.

pub mod credit;
pub mod eligibility;
pub mod insights;
pub mod narration;
pub mod ownership;
pub mod profiling;
pub mod recommend;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use credit::{
    predict_credit_impact, predict_credit_trajectory, CreditImpact, ImpactLevel, TrajectoryPoint,
    DEFAULT_TRAJECTORY_MONTHS,
};
pub use eligibility::{EligibilityDecision, EligibilityPolicy, EligibilityView, IneligibilityReason};
pub use insights::{InsightsAggregator, InsightsConfig, RecommendedVehicle, VehicleInsight};
pub use narration::{NarrationError, Narrator, PlanNarration};
pub use ownership::{CostAnalysis, MonthlyRunningCosts, OwnershipModel};
pub use profiling::{analyze_profile, ProfileAnalysis, UserCluster};
pub use recommend::{Recommender, RecommenderConfig, ScoredCandidate, Selection, SelectionStrategy};
pub use router::financing_router;
pub use scoring::{
    BasicWeights, InventoryWeights, ScoreComponent, ScoreFactor, ScoringWeights, VehicleScore,
    VehicleScorer,
};
pub use service::FinancingService;

use crate::profile::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("vehicle {0} not found in catalog")]
    VehicleNotFound(String),
}
