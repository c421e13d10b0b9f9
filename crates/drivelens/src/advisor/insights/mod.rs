//! Comparative savings analysis across an already-ranked recommendation set.

mod views;

pub use views::{
    AverageCarComparison, CostBreakdown, FiveYearProjection, MonthlyBreakdown, OptionComparison,
    RecommendationNote, SavingsAnalysis, SavingsCategory, VehicleInsight,
};

use super::credit::{predict_credit_impact, CreditImpact, ImpactLevel};
use super::ownership::OwnershipModel;
use super::AdvisorError;
use crate::catalog::{Powertrain, VehicleCatalog, VehicleModel};
use crate::finance::principal_after_down_payment;
use crate::profile::{FinancePath, UserProfile};
use serde::{Deserialize, Serialize};

/// One entry of a ranked recommendation set as the caller saw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedVehicle {
    pub vehicle_id: String,
    pub monthly_payment: f64,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsConfig {
    pub ownership: OwnershipModel,
    /// Five-year cost of a typical new car.
    pub average_car_cost: f64,
    pub comparisons: usize,
    /// Income share under which the monthly total counts as very affordable.
    pub affordable_income_share: f64,
    pub credit_build_max_payment: f64,
    pub affordable_monthly_total: f64,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            ownership: OwnershipModel::market_estimate(),
            average_car_cost: 45_000.0,
            comparisons: 2,
            affordable_income_share: 0.12,
            credit_build_max_payment: 400.0,
            affordable_monthly_total: 600.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InsightsAggregator {
    config: InsightsConfig,
}

struct Projected<'a> {
    vehicle: &'a VehicleModel,
    recommended: &'a RecommendedVehicle,
    projection: FiveYearProjection,
}

impl InsightsAggregator {
    pub fn new(config: InsightsConfig) -> Self {
        Self { config }
    }

    pub fn aggregate(
        &self,
        catalog: &VehicleCatalog,
        profile: &UserProfile,
        recommended: &[RecommendedVehicle],
    ) -> Result<Vec<VehicleInsight>, AdvisorError> {
        let projected = recommended
            .iter()
            .map(|entry| {
                let vehicle = catalog
                    .find_by_id(&entry.vehicle_id)
                    .ok_or_else(|| AdvisorError::VehicleNotFound(entry.vehicle_id.clone()))?;
                Ok(Projected {
                    vehicle,
                    recommended: entry,
                    projection: self.project(vehicle, profile, entry.monthly_payment),
                })
            })
            .collect::<Result<Vec<_>, AdvisorError>>()?;

        let top_rank = recommended.iter().map(|entry| entry.rank).min();
        let top_index = recommended
            .iter()
            .position(|entry| Some(entry.rank) == top_rank);

        Ok(projected
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let credit_impact = predict_credit_impact(profile, item.recommended.monthly_payment);
                let savings_analysis = self.savings(item, &projected);
                let recommendation = self.recommendation(
                    item,
                    profile,
                    &credit_impact,
                    Some(index) == top_index,
                );
                VehicleInsight {
                    vehicle_id: item.vehicle.id.clone(),
                    vehicle_name: item.vehicle.display_name(),
                    finance_path: profile.finance_path(),
                    five_year_projection: item.projection,
                    credit_impact,
                    savings_analysis,
                    recommendation,
                }
            })
            .collect())
    }

    /// Purchase, fuel, insurance, and maintenance over the horizon.
    pub fn project(
        &self,
        vehicle: &VehicleModel,
        profile: &UserProfile,
        monthly_payment: f64,
    ) -> FiveYearProjection {
        let ownership = &self.config.ownership;
        let months = f64::from(ownership.horizon_months);
        let running = ownership.monthly_costs(vehicle, profile.monthly_miles());

        let principal = principal_after_down_payment(vehicle.msrp, profile.down_payment);
        let total_paid = monthly_payment * months;
        let interest = (total_paid - principal).max(0.0);
        let fuel_total = running.fuel * months;
        let insurance_total = running.insurance * months;
        let maintenance_total = running.maintenance * months;

        FiveYearProjection {
            total_cost: (total_paid + fuel_total + insurance_total + maintenance_total).round(),
            monthly_breakdown: MonthlyBreakdown {
                payment: monthly_payment.round(),
                insurance: running.insurance.round(),
                fuel: running.fuel.round(),
                maintenance: running.maintenance.round(),
                total: (monthly_payment + running.insurance + running.fuel + running.maintenance)
                    .round(),
            },
            breakdown: CostBreakdown {
                principal: principal.round(),
                interest: interest.round(),
                fuel: fuel_total.round(),
                insurance: insurance_total.round(),
                maintenance: maintenance_total.round(),
            },
        }
    }

    fn savings(&self, item: &Projected<'_>, all: &[Projected<'_>]) -> SavingsAnalysis {
        let own_total = item.projection.total_cost;

        let mut others: Vec<&Projected<'_>> = all
            .iter()
            .filter(|other| other.vehicle.id != item.vehicle.id)
            .collect();
        others.sort_by(|a, b| {
            let da = (a.projection.total_cost - own_total).abs();
            let db = (b.projection.total_cost - own_total).abs();
            da.total_cmp(&db)
        });

        let vs_other_options = others
            .into_iter()
            .take(self.config.comparisons)
            .map(|other| OptionComparison {
                compared_to: short_name(other.vehicle),
                amount: (own_total - other.projection.total_cost).round(),
            })
            .collect();

        SavingsAnalysis {
            vs_average_car: AverageCarComparison {
                amount: (self.config.average_car_cost - own_total).round(),
                category: if item.vehicle.powertrain.is_electrified() {
                    SavingsCategory::Fuel
                } else {
                    SavingsCategory::Overall
                },
            },
            vs_other_options,
        }
    }

    fn recommendation(
        &self,
        item: &Projected<'_>,
        profile: &UserProfile,
        credit: &CreditImpact,
        is_top_choice: bool,
    ) -> RecommendationNote {
        let vehicle = item.vehicle;
        let monthly = item.projection.monthly_breakdown;
        let mut pros = Vec::new();
        let mut cons = Vec::new();

        if monthly.total < profile.total_income() * self.config.affordable_income_share {
            pros.push("Very affordable monthly cost".to_string());
        } else {
            cons.push("Higher monthly commitment".to_string());
        }

        let economy = vehicle.combined_economy();
        if vehicle.powertrain == Powertrain::Ev {
            pros.push("Zero fuel costs (electric)".to_string());
        } else if economy >= 40.0 {
            pros.push("Excellent fuel economy".to_string());
        } else if economy < 25.0 {
            cons.push("Lower fuel efficiency".to_string());
        }

        match credit.impact_level {
            ImpactLevel::Excellent => pros.push("Excellent credit building potential".to_string()),
            ImpactLevel::Good => pros.push("Good credit building potential".to_string()),
            ImpactLevel::Moderate | ImpactLevel::Minimal => {}
        }

        if vehicle.safety_rating == Some(5) {
            pros.push("Top safety rating".to_string());
        }

        match profile.finance_path() {
            FinancePath::Lease if vehicle.is_model_year_at_least(2024) => {
                pros.push("Great lease option (new model)".to_string());
            }
            FinancePath::Buy if vehicle.powertrain == Powertrain::Hybrid => {
                pros.push("Strong resale value".to_string());
            }
            FinancePath::CreditBuild if monthly.payment < self.config.credit_build_max_payment => {
                pros.push("Perfect for credit building".to_string());
            }
            _ => {}
        }

        let reason = if is_top_choice {
            let strength = if credit.impact_level == ImpactLevel::Excellent {
                "credit building"
            } else {
                "financial"
            };
            format!(
                "Best overall match for your {} path with strong {} benefits.",
                profile.finance_path().label(),
                strength
            )
        } else {
            let cost = if monthly.total < self.config.affordable_monthly_total {
                "affordable"
            } else {
                "competitive"
            };
            format!("Solid alternative offering good value with {cost} monthly costs.")
        };

        RecommendationNote {
            is_top_choice,
            reason,
            pros,
            cons,
        }
    }
}

/// "2024 Camry" style label used in side-by-side comparisons.
fn short_name(vehicle: &VehicleModel) -> String {
    match vehicle.year {
        Some(year) => format!("{} {}", year, vehicle.model_name()),
        None => vehicle.model_name().to_string(),
    }
}
