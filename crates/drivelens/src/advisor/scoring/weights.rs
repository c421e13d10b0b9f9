use crate::profile::{CreditBand, UserProfile};
use serde::{Deserialize, Serialize};

/// Weight table for one catalog shape. The two tables are kept apart on
/// purpose: the basic model list and the rich inventory score on different
/// factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum ScoringWeights {
    Basic(BasicWeights),
    Inventory(InventoryWeights),
}

impl ScoringWeights {
    pub fn basic() -> Self {
        Self::Basic(BasicWeights::default())
    }

    pub fn inventory() -> Self {
        Self::Inventory(InventoryWeights::default())
    }
}

/// Budget distance plus preference bonuses, used with the basic model list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicWeights {
    /// Share of household income used as the target payment when the
    /// profile carries no explicit budget.
    pub default_budget_share: f64,
    pub powertrain_match: f64,
    pub size_match: f64,
    pub eco_hybrid_bonus: f64,
    pub eco_ev_bonus: f64,
}

impl Default for BasicWeights {
    fn default() -> Self {
        Self {
            default_budget_share: 0.15,
            powertrain_match: 50.0,
            size_match: 25.0,
            eco_hybrid_bonus: 10.0,
            eco_ev_bonus: 20.0,
        }
    }
}

/// Affordability multiplier per credit band, low to high.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditMultipliers {
    pub poor: f64,
    pub fair: f64,
    pub good: f64,
    pub very_good: f64,
    pub excellent: f64,
}

impl CreditMultipliers {
    pub fn for_band(&self, band: CreditBand) -> f64 {
        match band {
            CreditBand::Poor => self.poor,
            CreditBand::Fair => self.fair,
            CreditBand::Good => self.good,
            CreditBand::VeryGood => self.very_good,
            CreditBand::Excellent => self.excellent,
        }
    }
}

impl Default for CreditMultipliers {
    fn default() -> Self {
        Self {
            poor: 0.7,
            fair: 0.85,
            good: 1.0,
            very_good: 1.1,
            excellent: 1.15,
        }
    }
}

/// Multi-factor weights for the rich inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryWeights {
    pub affordability_income_share: f64,
    pub credit_multipliers: CreditMultipliers,
    pub affordability_max: f64,
    pub over_budget_penalty: f64,
    /// Ratio of payment to max payment under which the vehicle is "well
    /// within budget".
    pub comfortable_ratio: f64,

    pub ev_efficiency: f64,
    pub hybrid_efficiency: f64,
    pub gas_efficiency_max: f64,
    pub gas_reference_mpg: f64,
    pub high_mileage_daily_miles: f64,
    pub high_mileage_bonus: f64,
    pub powertrain_match: f64,

    pub body_match: f64,
    pub family_suv_bonus: f64,
    pub family_suv_min_age: u32,
    pub family_suv_min_seats: u8,
    pub young_driver_bonus: f64,
    pub young_driver_max_age: u32,

    pub five_star_safety: f64,
    pub four_star_safety: f64,

    pub target_payment_tolerance: f64,
    pub target_payment_bonus: f64,

    pub lease_new_model_year: u16,
    pub lease_new_model_bonus: f64,
    pub lease_electrified_bonus: f64,
    pub buy_hybrid_resale_bonus: f64,
    pub buy_efficient_mpg: f64,
    pub buy_efficient_bonus: f64,
}

impl InventoryWeights {
    /// Household income share scaled by the credit band multiplier.
    pub fn max_monthly_payment(&self, profile: &UserProfile) -> f64 {
        profile.total_income()
            * self.affordability_income_share
            * self.credit_multipliers.for_band(profile.credit.band())
    }
}

impl Default for InventoryWeights {
    fn default() -> Self {
        Self {
            affordability_income_share: 0.12,
            credit_multipliers: CreditMultipliers::default(),
            affordability_max: 40.0,
            over_budget_penalty: 50.0,
            comfortable_ratio: 0.8,

            ev_efficiency: 30.0,
            hybrid_efficiency: 25.0,
            gas_efficiency_max: 20.0,
            gas_reference_mpg: 40.0,
            high_mileage_daily_miles: 50.0,
            high_mileage_bonus: 10.0,
            powertrain_match: 20.0,

            body_match: 20.0,
            family_suv_bonus: 15.0,
            family_suv_min_age: 35,
            family_suv_min_seats: 7,
            young_driver_bonus: 10.0,
            young_driver_max_age: 30,

            five_star_safety: 10.0,
            four_star_safety: 5.0,

            target_payment_tolerance: 0.1,
            target_payment_bonus: 15.0,

            lease_new_model_year: 2024,
            lease_new_model_bonus: 10.0,
            lease_electrified_bonus: 5.0,
            buy_hybrid_resale_bonus: 10.0,
            buy_efficient_mpg: 35.0,
            buy_efficient_bonus: 5.0,
        }
    }
}
