//! Deterministic profile heuristics.
//!
//! The names echo the models they stand in for (clustering, forest, network,
//! boosting) but every score is a fixed closed-form formula.

use crate::catalog::{BodyType, VehicleModel};
use crate::finance::{apr_from_band, monthly_payment};
use crate::profile::{RiskTolerance, Usage, UserProfile};
use serde::{Deserialize, Serialize};

const ESTIMATE_TERM_MONTHS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserCluster {
    Premium,
    EstablishedProfessional,
    GrowingFamily,
    YoungProfessional,
    ValueSeeker,
}

impl UserCluster {
    pub fn label(self) -> &'static str {
        match self {
            UserCluster::Premium => "Premium",
            UserCluster::EstablishedProfessional => "Established Professional",
            UserCluster::GrowingFamily => "Growing Family",
            UserCluster::YoungProfessional => "Young Professional",
            UserCluster::ValueSeeker => "Value Seeker",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UserCluster::Premium => {
                "High income, excellent credit - ideal for premium vehicles and aggressive financing"
            }
            UserCluster::EstablishedProfessional => {
                "Strong financial foundation - good balance of affordability and quality"
            }
            UserCluster::GrowingFamily => {
                "Budget-conscious with moderate credit - focus on value and reliability"
            }
            UserCluster::YoungProfessional => {
                "Building wealth - prioritize affordable payments and credit building"
            }
            UserCluster::ValueSeeker => {
                "Cost-sensitive buyer - focus on affordability and long-term savings"
            }
        }
    }
}

/// Threshold "clustering" on income and credit midpoint.
pub fn cluster_profile(profile: &UserProfile) -> UserCluster {
    let income = profile.total_income();
    let credit = profile.credit.score();
    let age = profile.age_or_default();

    if income > 10_000.0 && credit > 740 {
        UserCluster::Premium
    } else if income > 7_000.0 && credit > 670 {
        UserCluster::EstablishedProfessional
    } else if income > 4_000.0 && credit > 580 {
        UserCluster::GrowingFamily
    } else if age < 30 && credit > 670 {
        UserCluster::YoungProfessional
    } else {
        UserCluster::ValueSeeker
    }
}

fn credit_percent(score: u16) -> f64 {
    (f64::from(score) - 300.0) / 550.0 * 100.0
}

/// Weighted blend of income, credit, debt ratio, and age; 0-100.
pub fn affordability_score(profile: &UserProfile, vehicle_price: f64) -> u8 {
    let income = profile.total_income();
    let age = profile.age_or_default();

    let income_score = (income / 15_000.0).min(1.0) * 100.0;
    let credit_score = credit_percent(profile.credit.score());
    let apr = apr_from_band(profile.credit.band());
    let payment = monthly_payment(vehicle_price, apr, ESTIMATE_TERM_MONTHS).round();
    let debt_score = if income > 0.0 {
        ((1.0 - payment / income / 0.3) * 100.0).max(0.0)
    } else {
        0.0
    };
    let age_score = if age < 25 {
        70.0
    } else if age > 50 {
        85.0
    } else {
        100.0
    };

    let blended = income_score * 0.4 + credit_score * 0.3 + debt_score * 0.2 + age_score * 0.1;
    blended.clamp(0.0, 100.0).round() as u8
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Two fixed hidden layers; 0-100.
pub fn financial_stability_score(profile: &UserProfile) -> u8 {
    let income = profile.total_income();
    let credit = f64::from(profile.credit.score());
    let age = f64::from(profile.age_or_default());
    let spouse = if profile.spouse_income.unwrap_or(0.0) > 0.0 {
        1.0
    } else {
        0.0
    };
    let risk_offset = match profile.risk_tolerance {
        Some(RiskTolerance::Low) => 0.8,
        _ => 0.2,
    };

    let h1_1 = sigmoid(income * 0.0001 + credit * 0.001 + spouse * 0.5);
    let h1_2 = sigmoid(age * 0.02 + credit * 0.0008 - 0.5);
    let h1_3 = sigmoid(income * 0.00015 + risk_offset);

    let h2_1 = sigmoid(h1_1 * 0.8 + h1_2 * 0.6 - 0.3);
    let h2_2 = sigmoid(h1_2 * 0.7 + h1_3 * 0.9 + 0.2);

    (sigmoid(h2_1 * 1.2 + h2_2 * 1.1) * 100.0).round() as u8
}

/// Three additive "trees" on usage, mileage, and age; capped at 100.
pub fn lifestyle_match_score(profile: &UserProfile, vehicle: &VehicleModel) -> u8 {
    let daily = profile.daily_miles();
    let age = profile.age_or_default();
    let electrified = vehicle.powertrain.is_electrified();
    let body = vehicle.body;

    let usage_tree = match profile.usage.unwrap_or(Usage::Mixed) {
        Usage::Commute if daily > 30.0 => {
            if electrified {
                30.0
            } else {
                15.0
            }
        }
        Usage::Family => {
            if matches!(body, BodyType::Suv | BodyType::Sedan) {
                30.0
            } else {
                10.0
            }
        }
        Usage::Haul => {
            if body == BodyType::Truck {
                30.0
            } else {
                15.0
            }
        }
        _ => 20.0,
    };

    let mileage_tree = if daily > 50.0 {
        if electrified {
            25.0
        } else {
            10.0
        }
    } else if daily > 30.0 {
        20.0
    } else {
        15.0
    };

    let age_tree = if age < 30 {
        if matches!(body, BodyType::Sedan | BodyType::Coupe) {
            25.0
        } else {
            15.0
        }
    } else if age > 40 {
        if body == BodyType::Suv {
            25.0
        } else {
            18.0
        }
    } else {
        20.0
    };

    let learning_rate = 0.3;
    let score: f64 = usage_tree + mileage_tree * learning_rate + age_tree * learning_rate * 0.8;
    score.min(100.0).round() as u8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetric {
    pub category: String,
    pub user_value: f64,
    pub average_value: f64,
    /// Linear position within a fixed range; may fall outside 0-100.
    pub percentile: i32,
}

fn percentile(value: f64, min: f64, max: f64) -> i32 {
    ((value - min) / (max - min) * 100.0).round() as i32
}

/// Position against fixed population averages.
pub fn comparison_metrics(profile: &UserProfile) -> Vec<ComparisonMetric> {
    let income = profile.total_income();
    let credit = f64::from(profile.credit.score());
    let daily = profile.daily_miles();
    let age = f64::from(profile.age_or_default());

    let metric = |category: &str, user_value: f64, average_value: f64, min: f64, max: f64| {
        ComparisonMetric {
            category: category.to_string(),
            user_value,
            average_value,
            percentile: percentile(user_value, min, max),
        }
    };

    vec![
        metric("Monthly Income", income, 6500.0, 3000.0, 15_000.0),
        metric("Credit Score", credit, 680.0, 300.0, 850.0),
        metric("Daily Commute", daily, 30.0, 5.0, 100.0),
        metric("Age", age, 38.0, 18.0, 75.0),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFit {
    pub vehicle_id: String,
    pub affordability_score: u8,
    pub lifestyle_match_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    pub cluster: UserCluster,
    pub cluster_label: String,
    pub cluster_description: String,
    pub financial_stability_score: u8,
    pub comparison: Vec<ComparisonMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_fit: Option<VehicleFit>,
}

pub fn analyze_profile(profile: &UserProfile, vehicle: Option<&VehicleModel>) -> ProfileAnalysis {
    let cluster = cluster_profile(profile);
    ProfileAnalysis {
        cluster,
        cluster_label: cluster.label().to_string(),
        cluster_description: cluster.description().to_string(),
        financial_stability_score: financial_stability_score(profile),
        comparison: comparison_metrics(profile),
        vehicle_fit: vehicle.map(|vehicle| VehicleFit {
            vehicle_id: vehicle.id.clone(),
            affordability_score: affordability_score(profile, vehicle.msrp),
            lifestyle_match_score: lifestyle_match_score(profile, vehicle),
        }),
    }
}
