use crate::advisor::credit::CreditImpact;
use crate::profile::FinancePath;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInsight {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub finance_path: FinancePath,
    pub five_year_projection: FiveYearProjection,
    pub credit_impact: CreditImpact,
    pub savings_analysis: SavingsAnalysis,
    pub recommendation: RecommendationNote,
}

/// Whole-dollar ownership projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiveYearProjection {
    pub total_cost: f64,
    pub monthly_breakdown: MonthlyBreakdown,
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    pub payment: f64,
    pub insurance: f64,
    pub fuel: f64,
    pub maintenance: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub principal: f64,
    pub interest: f64,
    pub fuel: f64,
    pub insurance: f64,
    pub maintenance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsCategory {
    Fuel,
    Overall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAnalysis {
    pub vs_average_car: AverageCarComparison,
    pub vs_other_options: Vec<OptionComparison>,
}

/// Positive `amount` means cheaper than the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageCarComparison {
    pub amount: f64,
    pub category: SavingsCategory,
}

/// Positive `amount` means this vehicle costs more than `compared_to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionComparison {
    pub compared_to: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationNote {
    pub is_top_choice: bool,
    pub reason: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}
