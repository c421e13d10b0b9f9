use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::credit::{
    predict_credit_impact, predict_credit_trajectory, CreditImpact, TrajectoryPoint,
    DEFAULT_TRAJECTORY_MONTHS, MAX_TRAJECTORY_MONTHS,
};
use super::eligibility::{EligibilityDecision, EligibilityPolicy, EligibilityView};
use super::insights::{InsightsAggregator, RecommendedVehicle, VehicleInsight};
use super::narration::{plan_prompt, plan_summary, Narrator, PlanNarration};
use super::profiling::{analyze_profile, ProfileAnalysis};
use super::recommend::{
    average_competitor_cost, filter_pool, Recommender, RecommenderConfig, ScoredCandidate,
    SelectionStrategy,
};
use super::scoring::{InventoryWeights, ScoringWeights};
use super::AdvisorError;
use crate::catalog::{
    BundledCatalog, CatalogCache, CatalogShape, CatalogSource, FileCatalog, VehicleCatalog,
};
use crate::config::{AppConfig, CatalogConfig, DEFAULT_PRODUCT_NAME};
use crate::finance::{
    quote, ProjectionPoint, Quote, QuoteRequest, ScenarioHeadline, ScenarioProjector,
    ScenarioSeries,
};
use crate::profile::{IssueCollector, UserProfile};

/// Basic-catalog recommendations are always the three best scores.
const BASIC_RECOMMENDATION_LIMIT: usize = 3;

type SharedSource = Arc<dyn CatalogSource>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub models: Vec<ScoredCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub user: UserProfile,
    pub model_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPaths {
    pub lease: Vec<ProjectionPoint>,
    pub buy: Vec<ProjectionPoint>,
    pub credit_boost: Vec<ProjectionPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub scenarios: ScenarioPaths,
    pub headline: ScenarioHeadline,
}

impl From<ScenarioSeries> for PredictResponse {
    fn from(series: ScenarioSeries) -> Self {
        Self {
            scenarios: ScenarioPaths {
                lease: series.lease,
                buy: series.buy,
                credit_boost: series.credit_boost,
            },
            headline: series.headline,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Every basic recommendation, best first; `chosen` is the head.
    pub models: Vec<ScoredCandidate>,
    pub chosen: Option<ScoredCandidate>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<ScenarioSeries>,
}

/// Either the eligibility rejection or the selected inventory.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InventoryRecommendation {
    Ineligible(EligibilityView),
    #[serde(rename_all = "camelCase")]
    Recommended {
        eligible: bool,
        recommendations: Vec<ScoredCandidate>,
        max_monthly_payment: f64,
        average_competitor_cost: Option<f64>,
    },
}

impl InventoryRecommendation {
    pub fn is_eligible(&self) -> bool {
        matches!(self, InventoryRecommendation::Recommended { .. })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
    pub profile: UserProfile,
    pub recommended_vehicles: Vec<RecommendedVehicle>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub insights: Vec<VehicleInsight>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryRequest {
    pub profile: UserProfile,
    pub monthly_payment: f64,
    #[serde(default)]
    pub months: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryResponse {
    pub trajectory: Vec<TrajectoryPoint>,
    pub impact: CreditImpact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysisRequest {
    pub profile: UserProfile,
    #[serde(default)]
    pub vehicle_id: Option<String>,
}

/// Facade over the catalogs and every advisory operation. Each call
/// validates its input before touching the catalog.
pub struct FinancingService {
    models: CatalogCache<SharedSource>,
    inventory: CatalogCache<SharedSource>,
    basic: Recommender,
    ranked_inventory: Recommender,
    inventory_weights: InventoryWeights,
    eligibility: EligibilityPolicy,
    projector: ScenarioProjector,
    insights: InsightsAggregator,
    narration: PlanNarration,
}

impl FinancingService {
    pub fn new(
        models: SharedSource,
        inventory: SharedSource,
        ttl: chrono::Duration,
        recommender: RecommenderConfig,
        product_name: impl Into<String>,
    ) -> Self {
        let basic_config = RecommenderConfig {
            strategy: SelectionStrategy::TopN,
            limit: BASIC_RECOMMENDATION_LIMIT,
        };
        let inventory_weights = InventoryWeights::default();

        Self {
            models: CatalogCache::new(models, ttl, CatalogShape::Basic),
            inventory: CatalogCache::new(inventory, ttl, CatalogShape::Inventory),
            basic: Recommender::new(ScoringWeights::basic(), basic_config),
            ranked_inventory: Recommender::new(
                ScoringWeights::Inventory(inventory_weights.clone()),
                recommender,
            ),
            inventory_weights,
            eligibility: EligibilityPolicy::default(),
            projector: ScenarioProjector::default(),
            insights: InsightsAggregator::default(),
            narration: PlanNarration::new(product_name),
        }
    }

    /// Compiled-in catalogs with default settings.
    pub fn bundled() -> Self {
        Self::new(
            Arc::new(BundledCatalog::new(CatalogShape::Basic)),
            Arc::new(BundledCatalog::new(CatalogShape::Inventory)),
            CatalogConfig::default().ttl(),
            RecommenderConfig::default(),
            DEFAULT_PRODUCT_NAME,
        )
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let inventory: SharedSource = match &config.catalog.path {
            Some(path) => {
                info!(path = %path.display(), "serving inventory from catalog file");
                Arc::new(FileCatalog::new(path.clone()))
            }
            None => Arc::new(BundledCatalog::new(CatalogShape::Inventory)),
        };

        Self::new(
            Arc::new(BundledCatalog::new(CatalogShape::Basic)),
            inventory,
            config.catalog.ttl(),
            config.recommender,
            config.narration.product_name.clone(),
        )
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narration = self.narration.with_narrator(narrator);
        self
    }

    pub fn with_eligibility(mut self, policy: EligibilityPolicy) -> Self {
        self.eligibility = policy;
        self
    }

    pub fn models(&self) -> Arc<VehicleCatalog> {
        self.models.get()
    }

    pub fn inventory(&self) -> Arc<VehicleCatalog> {
        self.inventory.get()
    }

    /// Drop cached catalogs so the next call reloads from the sources.
    pub fn refresh_catalogs(&self) {
        self.models.invalidate();
        self.inventory.invalidate();
    }

    pub fn calc(&self, request: &QuoteRequest) -> Result<Quote, AdvisorError> {
        Ok(quote(request)?)
    }

    pub fn recommend(&self, profile: &UserProfile) -> Result<RecommendResponse, AdvisorError> {
        profile.validate()?;
        let catalog = self.models.get();
        let models = self.basic.recommend(catalog.vehicles(), profile);
        debug!(count = models.len(), "basic recommendations ranked");
        Ok(RecommendResponse { models })
    }

    pub fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, AdvisorError> {
        request.user.validate()?;
        let catalog = self.models.get();
        let vehicle = catalog
            .find_by_name(&request.model_name)
            .ok_or_else(|| AdvisorError::VehicleNotFound(request.model_name.clone()))?;
        Ok(self.projector.build(&request.user, vehicle).into())
    }

    /// Recommend, project the top pick, and narrate the result.
    pub fn plan(&self, profile: &UserProfile) -> Result<PlanResponse, AdvisorError> {
        let RecommendResponse { models } = self.recommend(profile)?;
        let Some(chosen) = models.first().cloned() else {
            return Ok(PlanResponse {
                models,
                chosen: None,
                summary: "No models available.".to_string(),
                explanation: None,
                scenarios: None,
            });
        };

        let series = self.projector.build(profile, &chosen.vehicle);
        let summary = plan_summary(profile, &chosen.vehicle, &series);
        let explanation = self
            .narration
            .narrate(&plan_prompt(profile, &chosen.vehicle, &series));

        Ok(PlanResponse {
            models,
            chosen: Some(chosen),
            summary,
            explanation: Some(explanation),
            scenarios: Some(series),
        })
    }

    /// Eligibility gate, preference filter, scoring, and diverse selection
    /// over the inventory.
    pub fn inventory_recommend(
        &self,
        profile: &UserProfile,
    ) -> Result<InventoryRecommendation, AdvisorError> {
        profile.validate()?;

        let decision = self.eligibility.evaluate(profile);
        if let EligibilityDecision::Ineligible(_) = &decision {
            return Ok(InventoryRecommendation::Ineligible(decision.view()));
        }

        let catalog = self.inventory.get();
        let pool = filter_pool(catalog.vehicles(), profile);
        let selection = self
            .ranked_inventory
            .select(&pool, catalog.vehicles(), profile);
        info!(
            pool = pool.len(),
            selected = selection.selected.len(),
            "inventory recommendations selected"
        );

        Ok(InventoryRecommendation::Recommended {
            eligible: true,
            max_monthly_payment: self.inventory_weights.max_monthly_payment(profile).round(),
            average_competitor_cost: average_competitor_cost(&selection.remainder)
                .map(f64::round),
            recommendations: selection.selected,
        })
    }

    pub fn insights(&self, request: &InsightsRequest) -> Result<InsightsResponse, AdvisorError> {
        request.profile.validate()?;
        let mut issues = IssueCollector::default();
        for entry in &request.recommended_vehicles {
            issues.non_negative("recommendedVehicles.monthlyPayment", entry.monthly_payment);
        }
        issues.finish()?;

        let catalog = self.inventory.get();
        let insights =
            self.insights
                .aggregate(&catalog, &request.profile, &request.recommended_vehicles)?;
        Ok(InsightsResponse { insights })
    }

    pub fn credit_trajectory(
        &self,
        request: &TrajectoryRequest,
    ) -> Result<TrajectoryResponse, AdvisorError> {
        request.profile.validate()?;
        let mut issues = IssueCollector::default();
        issues.non_negative("monthlyPayment", request.monthly_payment);
        issues.positive_term("months", request.months, MAX_TRAJECTORY_MONTHS);
        issues.finish()?;

        let months = request.months.unwrap_or(DEFAULT_TRAJECTORY_MONTHS);
        Ok(TrajectoryResponse {
            trajectory: predict_credit_trajectory(&request.profile, request.monthly_payment, months),
            impact: predict_credit_impact(&request.profile, request.monthly_payment),
        })
    }

    pub fn profile_analysis(
        &self,
        request: &ProfileAnalysisRequest,
    ) -> Result<ProfileAnalysis, AdvisorError> {
        request.profile.validate()?;
        let catalog = self.inventory.get();
        let vehicle = match &request.vehicle_id {
            Some(id) => Some(
                catalog
                    .find_by_id(id)
                    .ok_or_else(|| AdvisorError::VehicleNotFound(id.clone()))?,
            ),
            None => None,
        };
        Ok(analyze_profile(&request.profile, vehicle))
    }
}
