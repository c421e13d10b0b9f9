mod affordability;
mod rules;
mod weights;

pub use affordability::{
    budget_distance, economy_share, estimated_payment, near_target, payment_ratio,
    AffordabilityCheck,
};
pub use weights::{BasicWeights, CreditMultipliers, InventoryWeights, ScoringWeights};

use super::ownership::{CostAnalysis, OwnershipModel};
use crate::catalog::VehicleModel;
use crate::profile::UserProfile;
use serde::{Deserialize, Serialize};

/// Stateless scorer applying one weight table to (vehicle, profile) pairs.
#[derive(Debug, Clone)]
pub struct VehicleScorer {
    weights: ScoringWeights,
    ownership: OwnershipModel,
}

impl VehicleScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            ownership: OwnershipModel::catalog_baseline(),
        }
    }

    pub fn with_ownership(mut self, ownership: OwnershipModel) -> Self {
        self.ownership = ownership;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, vehicle: &VehicleModel, profile: &UserProfile) -> VehicleScore {
        match &self.weights {
            ScoringWeights::Basic(weights) => rules::score_basic(vehicle, profile, weights),
            ScoringWeights::Inventory(weights) => {
                rules::score_inventory(vehicle, profile, weights, &self.ownership)
            }
        }
    }
}

/// Scoring factor a component was awarded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreFactor {
    BudgetDistance,
    Affordability,
    Efficiency,
    PowertrainMatch,
    BodyType,
    EcoGoal,
    Safety,
    TargetPayment,
    FinancePath,
}

/// Discrete contribution to a score, kept for audit and explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

/// Additive score for one vehicle. Higher is better; unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleScore {
    pub score: f64,
    pub monthly_payment: f64,
    /// Human-readable rationale in a fixed factor order.
    pub reasons: Vec<String>,
    pub components: Vec<ScoreComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_analysis: Option<CostAnalysis>,
}
