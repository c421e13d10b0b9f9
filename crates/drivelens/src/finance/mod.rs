//! Pure financing math: rate tiers, amortization, running costs, and the
//! month-by-month scenario projector.

pub mod amortization;
pub mod costs;
pub mod projection;
pub mod quote;
pub mod rates;

pub use amortization::{lease_principal, monthly_payment, principal_after_down_payment, total_interest};
pub use costs::{
    co2_per_month, depreciation_by_month, monthly_fuel_cost, vehicle_fuel_cost, EnergyPrices,
    InsuranceModel, MaintenanceModel,
};
pub use projection::{
    build_scenario_series, ProjectionPoint, ProjectorConfig, ScenarioHeadline, ScenarioProjector,
    ScenarioSeries,
};
pub use quote::{quote, Quote, QuoteRequest};
pub use rates::{apr_for_standing, apr_from_band, apr_from_band_label, apr_from_credit};
