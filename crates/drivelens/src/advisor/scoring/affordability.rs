//! Affordability and efficiency math shared by both weight tables, the
//! eligibility gate, and the credit simulators.

use crate::catalog::{Powertrain, VehicleModel};
use crate::finance::{apr_for_standing, monthly_payment, principal_after_down_payment};
use crate::profile::UserProfile;

/// Amortized payment for `vehicle` under the profile's credit, down payment,
/// and loan term.
pub fn estimated_payment(vehicle: &VehicleModel, profile: &UserProfile) -> f64 {
    let apr = apr_for_standing(profile.credit, vehicle.apr_base);
    let principal = principal_after_down_payment(vehicle.msrp, profile.down_payment);
    monthly_payment(principal, apr, profile.loan_months())
}

/// Payment as a share of household income; `None` when income is not positive.
pub fn payment_ratio(payment: f64, income: f64) -> Option<f64> {
    if !income.is_finite() || income <= 0.0 || !payment.is_finite() {
        return None;
    }
    Some(payment.max(0.0) / income)
}

/// Where a payment sits against a ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordabilityCheck {
    pub payment: f64,
    pub max_payment: f64,
    /// `payment / max_payment`; infinite when the ceiling is zero.
    pub ratio: f64,
}

impl AffordabilityCheck {
    pub fn new(payment: f64, max_payment: f64) -> Self {
        let ratio = if max_payment > 0.0 {
            payment / max_payment
        } else {
            f64::INFINITY
        };
        Self {
            payment,
            max_payment,
            ratio,
        }
    }

    pub fn within(&self) -> bool {
        self.max_payment > 0.0 && self.payment <= self.max_payment
    }

    /// Unused headroom in `[0, 1]`; zero when over the ceiling.
    pub fn headroom(&self) -> f64 {
        if self.within() {
            (1.0 - self.ratio).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Absolute distance from a target payment.
pub fn budget_distance(payment: f64, target: f64) -> f64 {
    (payment - target).abs()
}

/// True when `payment` lands strictly within `tolerance` of `target`.
pub fn near_target(payment: f64, target: f64, tolerance: f64) -> bool {
    target > 0.0 && budget_distance(payment, target) < target * tolerance
}

/// Gas economy relative to a reference mpg, capped at 1.
pub fn economy_share(vehicle: &VehicleModel, reference_mpg: f64) -> f64 {
    if reference_mpg <= 0.0 {
        return 0.0;
    }
    (vehicle.combined_economy() / reference_mpg).clamp(0.0, 1.0)
}

pub fn is_electrified(vehicle: &VehicleModel) -> bool {
    vehicle.powertrain.is_electrified()
}

pub fn is_hybrid(vehicle: &VehicleModel) -> bool {
    vehicle.powertrain == Powertrain::Hybrid
}
