//! Credit-score impact of taking on a car payment.

mod trajectory;

pub use trajectory::{
    predict_credit_trajectory, TrajectoryPoint, DEFAULT_TRAJECTORY_MONTHS, MAX_TRAJECTORY_MONTHS,
};

use super::scoring::payment_ratio;
use crate::profile::{FinancePath, UserProfile};
use serde::{Deserialize, Serialize};

const MAX_SCORE: u16 = 850;
const ON_TIME_PAYMENT_GAIN: i32 = 35;
const CREDIT_BUILD_BONUS: i32 = 10;
const TWELVE_MONTH_SHARE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Excellent,
    Good,
    Moderate,
    Minimal,
}

impl ImpactLevel {
    /// Tier and point modifier for a payment-to-income ratio. Unknown
    /// ratios (no income) land in the lowest tier.
    fn for_ratio(ratio: Option<f64>) -> (Self, i32) {
        match ratio {
            Some(ratio) if ratio < 0.10 => (ImpactLevel::Excellent, 15),
            Some(ratio) if ratio < 0.15 => (ImpactLevel::Good, 0),
            Some(ratio) if ratio < 0.20 => (ImpactLevel::Moderate, -10),
            _ => (ImpactLevel::Minimal, -25),
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            ImpactLevel::Excellent => "This payment is very manageable for your income, allowing consistent on-time payments that significantly boost your credit score.",
            ImpactLevel::Good => "This payment fits comfortably in your budget, enabling reliable payments that improve your credit score steadily.",
            ImpactLevel::Moderate => "This payment is at the upper range of affordability. Consistent payments will improve credit, but budget carefully.",
            ImpactLevel::Minimal => "This payment stretches your budget. While it can still build credit, there's higher risk of missed payments.",
        }
    }

    pub fn is_favorable(self) -> bool {
        matches!(self, ImpactLevel::Excellent | ImpactLevel::Good)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditImpact {
    /// Numeric score, or the band midpoint for band-only profiles.
    pub current_score: u16,
    /// Score or band label as supplied.
    pub current_standing: String,
    pub projected_score_after_12_months: u16,
    pub projected_score_after_60_months: u16,
    pub score_delta: i32,
    pub impact_level: ImpactLevel,
    pub explanation: String,
}

/// Project the score after 12 and 60 months of on-time payments.
pub fn predict_credit_impact(profile: &UserProfile, monthly_payment: f64) -> CreditImpact {
    let current = profile.credit.score();
    let ratio = payment_ratio(monthly_payment, profile.total_income());
    let (level, modifier) = ImpactLevel::for_ratio(ratio);

    let mut delta = ON_TIME_PAYMENT_GAIN + modifier;
    if profile.finance_path() == FinancePath::CreditBuild {
        delta += CREDIT_BUILD_BONUS;
    }

    let projected = |gain: f64| -> u16 {
        let value = i64::from(current) + gain.round() as i64;
        value.clamp(0, i64::from(MAX_SCORE)) as u16
    };

    CreditImpact {
        current_score: current,
        current_standing: profile.credit.label(),
        projected_score_after_12_months: projected(f64::from(delta) * TWELVE_MONTH_SHARE),
        projected_score_after_60_months: projected(f64::from(delta)),
        score_delta: delta,
        impact_level: level,
        explanation: level.explanation().to_string(),
    }
}
