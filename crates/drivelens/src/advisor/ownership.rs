use crate::catalog::VehicleModel;
use crate::finance::{vehicle_fuel_cost, EnergyPrices, InsuranceModel, MaintenanceModel};
use serde::{Deserialize, Serialize};

/// Running-cost assumptions for multi-year ownership totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipModel {
    pub horizon_months: u32,
    pub maintenance: MaintenanceModel,
    pub insurance: InsuranceModel,
    /// Resale percentage (0-100) for entries without one.
    pub default_resale_percent: f64,
    pub prices: EnergyPrices,
}

impl OwnershipModel {
    /// Uses the per-vehicle baselines from the inventory, with flat defaults.
    pub fn catalog_baseline() -> Self {
        Self {
            horizon_months: 60,
            maintenance: MaintenanceModel::CatalogBaseline {
                default_annual: 500.0,
            },
            insurance: InsuranceModel::CatalogBaseline {
                default_monthly: 150.0,
            },
            default_resale_percent: 50.0,
            prices: EnergyPrices::default(),
        }
    }

    /// Value-banded insurance and model-year maintenance.
    pub fn market_estimate() -> Self {
        Self {
            horizon_months: 60,
            maintenance: MaintenanceModel::default(),
            insurance: InsuranceModel::default(),
            default_resale_percent: 50.0,
            prices: EnergyPrices::default(),
        }
    }

    pub fn monthly_costs(&self, vehicle: &VehicleModel, miles_per_month: f64) -> MonthlyRunningCosts {
        MonthlyRunningCosts {
            fuel: vehicle_fuel_cost(vehicle, miles_per_month, self.prices),
            maintenance: self.maintenance.monthly_cost(vehicle),
            insurance: self.insurance.monthly_cost(vehicle),
        }
    }

    pub fn resale_value(&self, vehicle: &VehicleModel) -> f64 {
        let percent = vehicle
            .resale_value_percent
            .unwrap_or(self.default_resale_percent);
        (vehicle.msrp * percent / 100.0).max(0.0)
    }

    pub fn cost_analysis(
        &self,
        vehicle: &VehicleModel,
        monthly_payment: f64,
        miles_per_month: f64,
    ) -> CostAnalysis {
        let months = f64::from(self.horizon_months);
        let running = self.monthly_costs(vehicle, miles_per_month);

        let total_purchase_cost = monthly_payment * months;
        let total_fuel_cost = running.fuel * months;
        let total_maintenance_cost = running.maintenance * months;
        let total_insurance_cost = running.insurance * months;
        let total_cost =
            total_purchase_cost + total_fuel_cost + total_maintenance_cost + total_insurance_cost;
        let resale_value = self.resale_value(vehicle);

        CostAnalysis {
            total_purchase_cost,
            total_fuel_cost,
            total_maintenance_cost,
            total_insurance_cost,
            total_cost,
            resale_value,
            net_cost: total_cost - resale_value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRunningCosts {
    pub fuel: f64,
    pub maintenance: f64,
    pub insurance: f64,
}

/// Ownership totals over the model's horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAnalysis {
    pub total_purchase_cost: f64,
    pub total_fuel_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_insurance_cost: f64,
    pub total_cost: f64,
    pub resale_value: f64,
    /// Total minus resale; may be negative.
    pub net_cost: f64,
}
