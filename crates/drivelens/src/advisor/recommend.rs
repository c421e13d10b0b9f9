use super::ownership::CostAnalysis;
use super::scoring::{ScoreComponent, ScoringWeights, VehicleScorer};
use crate::catalog::{BodyType, VehicleModel};
use crate::profile::{Usage, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How ranked candidates are cut down to the final list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Highest scores, no constraints.
    TopN,
    /// Highest scores with at most `max_per_model` trims of one model name.
    #[serde(rename_all = "camelCase")]
    Diverse { max_per_model: usize },
}

impl Default for SelectionStrategy {
    fn default() -> Self {
        SelectionStrategy::Diverse { max_per_model: 2 }
    }
}

impl SelectionStrategy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "diverse" | "diversity" => Some(Self::default()),
            "top-n" | "topn" | "top_n" => Some(Self::TopN),
            _ => None,
        }
    }

    fn cap(&self) -> usize {
        match self {
            SelectionStrategy::TopN => usize::MAX,
            SelectionStrategy::Diverse { max_per_model } => (*max_per_model).max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommenderConfig {
    pub strategy: SelectionStrategy,
    pub limit: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            strategy: SelectionStrategy::default(),
            limit: 5,
        }
    }
}

/// A scored vehicle. `rank` is 1-based after sorting; 0 until selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    pub rank: usize,
    pub vehicle: VehicleModel,
    pub monthly_payment: f64,
    pub score: f64,
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ScoreComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_analysis: Option<CostAnalysis>,
}

/// Final picks plus every scored vehicle that did not make the cut.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub selected: Vec<ScoredCandidate>,
    pub remainder: Vec<ScoredCandidate>,
}

pub struct Recommender {
    scorer: VehicleScorer,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(weights: ScoringWeights, config: RecommenderConfig) -> Self {
        Self {
            scorer: VehicleScorer::new(weights),
            config,
        }
    }

    pub fn with_scorer(scorer: VehicleScorer, config: RecommenderConfig) -> Self {
        Self { scorer, config }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Score every vehicle and sort by score, highest first. The sort is
    /// stable so ties keep catalog order.
    pub fn rank(&self, vehicles: &[VehicleModel], profile: &UserProfile) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = vehicles
            .iter()
            .map(|vehicle| {
                let result = self.scorer.score(vehicle, profile);
                ScoredCandidate {
                    rank: 0,
                    vehicle: vehicle.clone(),
                    monthly_payment: result.monthly_payment,
                    score: result.score,
                    reasons: result.reasons,
                    components: result.components,
                    cost_analysis: result.cost_analysis,
                }
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// Select from `pool`. When diversity leaves open slots, candidates from
    /// `backfill` (typically the unfiltered catalog) fill them, still
    /// honoring the per-model cap.
    pub fn select(
        &self,
        pool: &[VehicleModel],
        backfill: &[VehicleModel],
        profile: &UserProfile,
    ) -> Selection {
        let ranked = self.rank(pool, profile);
        let limit = self.config.limit;
        let cap = self.config.strategy.cap();

        let mut per_model: HashMap<String, usize> = HashMap::new();
        let mut taken: HashSet<String> = HashSet::new();
        let mut selected = Vec::with_capacity(limit);
        let mut remainder = Vec::new();

        for candidate in ranked {
            if selected.len() < limit && admit(&mut per_model, &candidate.vehicle, cap) {
                taken.insert(candidate.vehicle.id.clone());
                selected.push(candidate);
            } else {
                remainder.push(candidate);
            }
        }

        if selected.len() < limit && !matches!(self.config.strategy, SelectionStrategy::TopN) {
            let extra: Vec<VehicleModel> = backfill
                .iter()
                .filter(|vehicle| !taken.contains(&vehicle.id))
                .filter(|vehicle| !remainder.iter().any(|held| held.vehicle.id == vehicle.id))
                .cloned()
                .collect();
            for candidate in self.rank(&extra, profile) {
                if selected.len() >= limit {
                    break;
                }
                if admit(&mut per_model, &candidate.vehicle, cap) {
                    selected.push(candidate);
                }
            }
        }

        for (index, candidate) in selected.iter_mut().enumerate() {
            candidate.rank = index + 1;
        }

        Selection {
            selected,
            remainder,
        }
    }

    /// Ranked list cut to the configured limit and strategy.
    pub fn recommend(&self, vehicles: &[VehicleModel], profile: &UserProfile) -> Vec<ScoredCandidate> {
        self.select(vehicles, &[], profile).selected
    }
}

fn admit(per_model: &mut HashMap<String, usize>, vehicle: &VehicleModel, cap: usize) -> bool {
    let count = per_model
        .entry(vehicle.model_name().to_ascii_lowercase())
        .or_insert(0);
    if *count >= cap {
        return false;
    }
    *count += 1;
    true
}

/// Narrow the inventory by hard preferences before scoring.
pub fn filter_pool(vehicles: &[VehicleModel], profile: &UserProfile) -> Vec<VehicleModel> {
    vehicles
        .iter()
        .filter(|vehicle| {
            profile
                .preferred_powertrain
                .map(|preferred| vehicle.powertrain == preferred)
                .unwrap_or(true)
        })
        .filter(|vehicle| match profile.usage {
            Some(Usage::Haul) => {
                vehicle.body == BodyType::Truck || vehicle.horsepower.unwrap_or(0) >= 250
            }
            Some(Usage::Family) => vehicle.body == BodyType::Suv || vehicle.seats.unwrap_or(0) >= 5,
            _ => true,
        })
        .cloned()
        .collect()
}

/// Mean net cost of scored vehicles that were not recommended.
pub fn average_competitor_cost(remainder: &[ScoredCandidate]) -> Option<f64> {
    let costs: Vec<f64> = remainder
        .iter()
        .filter_map(|candidate| candidate.cost_analysis.map(|analysis| analysis.net_cost))
        .collect();
    if costs.is_empty() {
        return None;
    }
    Some(costs.iter().sum::<f64>() / costs.len() as f64)
}
