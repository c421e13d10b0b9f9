use super::amortization::{lease_principal, monthly_payment, principal_after_down_payment, total_interest};
use super::costs::{co2_per_month, depreciation_by_month, vehicle_fuel_cost, EnergyPrices, MaintenanceModel};
use super::rates::apr_for_standing;
use crate::catalog::VehicleModel;
use crate::profile::{UserProfile, MAX_TERM_MONTHS};
use serde::{Deserialize, Serialize};

/// One month of a cost series. `total_cost` is cash flow only
/// (payment + fuel + maintenance); depreciation and CO2 are informational.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub month: u32,
    pub total_cost: f64,
    pub payment: f64,
    pub fuel_or_energy_cost: f64,
    pub maintenance_cost: f64,
    pub depreciation: f64,
    pub co2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioHeadline {
    pub buy_monthly: f64,
    pub lease_monthly: f64,
    pub total_interest_buy: f64,
    pub apr: f64,
}

/// Lease, buy, and wait-and-improve-credit cost paths for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSeries {
    pub lease: Vec<ProjectionPoint>,
    pub buy: Vec<ProjectionPoint>,
    pub credit_boost: Vec<ProjectionPoint>,
    pub headline: ScenarioHeadline,
}

impl ScenarioSeries {
    pub fn lease_total(&self) -> f64 {
        sum_total(&self.lease)
    }

    pub fn buy_total(&self) -> f64 {
        sum_total(&self.buy)
    }

    pub fn credit_boost_total(&self) -> f64 {
        sum_total(&self.credit_boost)
    }
}

fn sum_total(points: &[ProjectionPoint]) -> f64 {
    points.iter().map(|point| point.total_cost).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectorConfig {
    pub prices: EnergyPrices,
    pub maintenance: MaintenanceModel,
    /// Months with no payment while the credit profile improves.
    pub credit_boost_wait_months: u32,
    /// APR multiplier once the wait is over.
    pub credit_boost_apr_factor: f64,
    /// Floor for the depreciation reference horizon.
    pub min_horizon_months: u32,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            prices: EnergyPrices::default(),
            maintenance: MaintenanceModel::default(),
            credit_boost_wait_months: 12,
            credit_boost_apr_factor: 0.85,
            min_horizon_months: 60,
        }
    }
}

/// Builds month-indexed cost series. Fuel, maintenance, and CO2 are flat
/// per month; only the payment and depreciation vary with the month.
#[derive(Debug, Clone, Default)]
pub struct ScenarioProjector {
    config: ProjectorConfig,
}

impl ScenarioProjector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    pub fn build(&self, profile: &UserProfile, vehicle: &VehicleModel) -> ScenarioSeries {
        let loan_months = profile.loan_months().min(MAX_TERM_MONTHS);
        let lease_months = profile.lease_months().min(MAX_TERM_MONTHS);
        let miles_per_month = profile.monthly_miles();
        let apr = apr_for_standing(profile.credit, vehicle.apr_base);

        let principal = principal_after_down_payment(vehicle.msrp, profile.down_payment);
        let buy_monthly = monthly_payment(principal, apr, loan_months);
        let lease_monthly = monthly_payment(
            lease_principal(principal, vehicle.lease_residual_pct),
            apr,
            lease_months,
        );
        let total_interest_buy = total_interest(principal, apr, loan_months);

        let horizon = loan_months
            .max(lease_months)
            .max(self.config.min_horizon_months);
        let fuel = vehicle_fuel_cost(vehicle, miles_per_month, self.config.prices);
        let maintenance = self.config.maintenance.monthly_cost(vehicle);
        let co2 = co2_per_month(
            miles_per_month,
            vehicle.powertrain,
            vehicle.co2_grams_per_mile.map(|grams| grams / 1000.0),
        );
        let annual_mileage = miles_per_month * 12.0;

        let point = |month: u32, payment: f64| ProjectionPoint {
            month,
            total_cost: payment + fuel + maintenance,
            payment,
            fuel_or_energy_cost: fuel,
            maintenance_cost: maintenance,
            depreciation: depreciation_by_month(vehicle.msrp, month, horizon, annual_mileage),
            co2,
        };

        let lease = (1..=lease_months)
            .map(|month| point(month, lease_monthly))
            .collect();
        let buy = (1..=loan_months)
            .map(|month| point(month, buy_monthly))
            .collect();

        let wait = self.config.credit_boost_wait_months;
        let improved_apr = (apr * self.config.credit_boost_apr_factor).max(0.0);
        let boosted_monthly = monthly_payment(principal, improved_apr, loan_months);
        let boost_end = wait.saturating_add(loan_months);
        let credit_boost = (1..=wait)
            .map(|month| point(month, 0.0))
            .chain((wait.saturating_add(1)..=boost_end).map(|month| point(month, boosted_monthly)))
            .collect();

        ScenarioSeries {
            lease,
            buy,
            credit_boost,
            headline: ScenarioHeadline {
                buy_monthly,
                lease_monthly,
                total_interest_buy,
                apr,
            },
        }
    }
}

/// Projection with default assumptions.
pub fn build_scenario_series(profile: &UserProfile, vehicle: &VehicleModel) -> ScenarioSeries {
    ScenarioProjector::default().build(profile, vehicle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogShape, VehicleCatalog};
    use crate::profile::{CreditStanding, UserProfile};

    fn rav4() -> VehicleModel {
        VehicleCatalog::bundled(CatalogShape::Basic)
            .expect("basic catalog")
            .find_by_name("RAV4")
            .cloned()
            .expect("rav4 present")
    }

    fn profile() -> UserProfile {
        let mut profile = UserProfile::new(6000.0, CreditStanding::Score(720));
        profile.avg_monthly_mileage = Some(1000.0);
        profile.down_payment = 3000.0;
        profile
    }

    #[test]
    fn series_lengths_follow_terms() {
        let mut profile = profile();
        profile.loan_term_months = Some(48);
        profile.lease_term_months = Some(24);
        let series = build_scenario_series(&profile, &rav4());

        assert_eq!(series.lease.len(), 24);
        assert_eq!(series.buy.len(), 48);
        assert_eq!(series.credit_boost.len(), 60);
        assert_eq!(series.buy[0].month, 1);
        assert_eq!(series.credit_boost.last().map(|point| point.month), Some(60));
    }

    #[test]
    fn credit_boost_waits_then_pays_less() {
        let series = build_scenario_series(&profile(), &rav4());

        assert!(series.credit_boost[..12].iter().all(|point| point.payment == 0.0));
        let boosted = series.credit_boost[12].payment;
        assert!(boosted > 0.0);
        assert!(boosted < series.headline.buy_monthly);
    }

    #[test]
    fn totals_exclude_depreciation_and_co2() {
        let series = build_scenario_series(&profile(), &rav4());
        for point in series.buy.iter().chain(&series.lease) {
            let expected = point.payment + point.fuel_or_energy_cost + point.maintenance_cost;
            assert!((point.total_cost - expected).abs() < 1e-9);
        }
        assert!(series.buy[59].depreciation > series.buy[0].depreciation);
    }

    #[test]
    fn headline_matches_amortization() {
        let vehicle = rav4();
        let series = build_scenario_series(&profile(), &vehicle);
        let principal = vehicle.msrp - 3000.0;

        assert!((series.headline.apr - vehicle.apr_base).abs() < 1e-12);
        let expected = monthly_payment(principal, vehicle.apr_base, 60);
        assert!((series.headline.buy_monthly - expected).abs() < 1e-9);
        let expected_lease = monthly_payment(principal * (1.0 - vehicle.lease_residual_pct), vehicle.apr_base, 36);
        assert!((series.headline.lease_monthly - expected_lease).abs() < 1e-9);
        assert!(series.lease_total() < series.buy_total());
    }

    #[test]
    fn unvalidated_terms_stay_bounded() {
        let mut profile = profile();
        profile.loan_term_months = Some(u32::MAX);
        profile.lease_term_months = Some(u32::MAX);
        let series = build_scenario_series(&profile, &rav4());

        assert_eq!(series.buy.len(), MAX_TERM_MONTHS as usize);
        assert_eq!(series.lease.len(), MAX_TERM_MONTHS as usize);
        assert_eq!(series.credit_boost.len(), 12 + MAX_TERM_MONTHS as usize);
    }

    #[test]
    fn maintenance_is_pluggable() {
        let projector = ScenarioProjector::new(ProjectorConfig {
            maintenance: MaintenanceModel::None,
            ..ProjectorConfig::default()
        });
        let series = projector.build(&profile(), &rav4());
        assert!(series.buy.iter().all(|point| point.maintenance_cost == 0.0));

        let default_series = build_scenario_series(&profile(), &rav4());
        assert_eq!(default_series.buy[0].maintenance_cost, 100.0);
    }
}
