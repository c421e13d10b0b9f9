use crate::catalog::{Powertrain, VehicleModel};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FUEL_PRICE_PER_GALLON: f64 = 3.5;
pub const DEFAULT_PRICE_PER_KWH: f64 = 0.13;
const KWH_PER_GALLON_EQUIVALENT: f64 = 33.7;
const FALLBACK_MPG: f64 = 25.0;

/// Energy price assumptions for fuel/electricity cost estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyPrices {
    pub fuel_per_gallon: f64,
    pub per_kwh: f64,
}

impl Default for EnergyPrices {
    fn default() -> Self {
        Self {
            fuel_per_gallon: DEFAULT_FUEL_PRICE_PER_GALLON,
            per_kwh: DEFAULT_PRICE_PER_KWH,
        }
    }
}

/// Monthly fuel or electricity cost.
///
/// A missing or non-positive `mpg` with a valid `mpge` is treated as
/// electric; otherwise gasoline at `mpg` (25 when unknown).
pub fn monthly_fuel_cost(
    miles_per_month: f64,
    mpg: Option<f64>,
    mpge: Option<f64>,
    prices: EnergyPrices,
) -> f64 {
    if !miles_per_month.is_finite() || miles_per_month <= 0.0 {
        return 0.0;
    }

    let valid_mpg = mpg.filter(|value| value.is_finite() && *value > 0.0);
    let valid_mpge = mpge.filter(|value| value.is_finite() && *value > 0.0);

    if let (None, Some(mpge)) = (valid_mpg, valid_mpge) {
        let kwh_per_mile = KWH_PER_GALLON_EQUIVALENT / mpge;
        return miles_per_month * kwh_per_mile * prices.per_kwh;
    }

    let effective_mpg = valid_mpg.unwrap_or(FALLBACK_MPG);
    miles_per_month / effective_mpg * prices.fuel_per_gallon
}

/// Fuel cost for a catalog entry.
pub fn vehicle_fuel_cost(vehicle: &VehicleModel, miles_per_month: f64, prices: EnergyPrices) -> f64 {
    monthly_fuel_cost(miles_per_month, vehicle.mpg, vehicle.mpge, prices)
}

/// Tailpipe (or grid-average for EVs) kg CO2 per mile.
pub fn co2_kg_per_mile(powertrain: Powertrain) -> f64 {
    match powertrain {
        Powertrain::Gas => 0.404,
        Powertrain::Hybrid => 0.25,
        Powertrain::Ev => 0.18,
    }
}

/// Monthly CO2 mass in kg.
pub fn co2_per_month(
    miles_per_month: f64,
    powertrain: Powertrain,
    override_kg_per_mile: Option<f64>,
) -> f64 {
    if !miles_per_month.is_finite() || miles_per_month <= 0.0 {
        return 0.0;
    }
    let kg_per_mile = override_kg_per_mile.unwrap_or_else(|| co2_kg_per_mile(powertrain));
    miles_per_month * kg_per_mile
}

const BASELINE_ANNUAL_MILES: f64 = 12_000.0;
const BASELINE_ANNUAL_DECAY: f64 = 0.18;
const MIN_USAGE_FACTOR: f64 = 0.5;
const MAX_USAGE_FACTOR: f64 = 2.0;

/// Value lost by `month`, on an exponential curve scaled by annual mileage.
///
/// Each 12,000 miles/year above or below the baseline moves the 18% annual
/// decay rate by 20%, clamped to `[0.5x, 2x]`. `total_months` is the
/// reference horizon and only gates degenerate input.
pub fn depreciation_by_month(msrp: f64, month: u32, total_months: u32, annual_mileage: f64) -> f64 {
    if !msrp.is_finite() || msrp <= 0.0 || month == 0 || total_months == 0 {
        return 0.0;
    }

    let deviation = if annual_mileage.is_finite() {
        (annual_mileage - BASELINE_ANNUAL_MILES) / BASELINE_ANNUAL_MILES
    } else {
        0.0
    };
    let usage_factor = (1.0 + deviation * 0.2).clamp(MIN_USAGE_FACTOR, MAX_USAGE_FACTOR);
    let annual_rate = BASELINE_ANNUAL_DECAY * usage_factor;
    let monthly_rate = 1.0 - (1.0 - annual_rate).powf(1.0 / 12.0);
    let value_now = msrp * (1.0 - monthly_rate).powf(f64::from(month));

    (msrp - value_now).clamp(0.0, msrp)
}

/// Monthly maintenance estimate; shared by the projector and insights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MaintenanceModel {
    None,
    Flat {
        monthly: f64,
    },
    #[serde(rename_all = "camelCase")]
    ByModelYear {
        threshold_year: u16,
        new_monthly: f64,
        older_monthly: f64,
    },
    #[serde(rename_all = "camelCase")]
    CatalogBaseline {
        default_annual: f64,
    },
}

impl Default for MaintenanceModel {
    fn default() -> Self {
        MaintenanceModel::ByModelYear {
            threshold_year: 2024,
            new_monthly: 75.0,
            older_monthly: 100.0,
        }
    }
}

impl MaintenanceModel {
    pub fn monthly_cost(&self, vehicle: &VehicleModel) -> f64 {
        match *self {
            MaintenanceModel::None => 0.0,
            MaintenanceModel::Flat { monthly } => monthly.max(0.0),
            MaintenanceModel::ByModelYear {
                threshold_year,
                new_monthly,
                older_monthly,
            } => {
                if vehicle.is_model_year_at_least(threshold_year) {
                    new_monthly
                } else {
                    older_monthly
                }
            }
            MaintenanceModel::CatalogBaseline { default_annual } => {
                vehicle.maintenance_cost_per_year.unwrap_or(default_annual) / 12.0
            }
        }
    }
}

/// Monthly insurance estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InsuranceModel {
    Flat {
        monthly: f64,
    },
    /// `clamp(msrp / divisor, min, max)`.
    ValueBand {
        divisor: f64,
        min: f64,
        max: f64,
    },
    #[serde(rename_all = "camelCase")]
    CatalogBaseline {
        default_monthly: f64,
    },
}

impl Default for InsuranceModel {
    fn default() -> Self {
        InsuranceModel::ValueBand {
            divisor: 400.0,
            min: 150.0,
            max: 250.0,
        }
    }
}

impl InsuranceModel {
    pub fn monthly_cost(&self, vehicle: &VehicleModel) -> f64 {
        match *self {
            InsuranceModel::Flat { monthly } => monthly.max(0.0),
            InsuranceModel::ValueBand { divisor, min, max } => {
                if divisor <= 0.0 {
                    return min;
                }
                (vehicle.msrp / divisor).max(min).min(max)
            }
            InsuranceModel::CatalogBaseline { default_monthly } => {
                vehicle.insurance_cost_per_month.unwrap_or(default_monthly)
            }
        }
    }
}
