//! Vehicle catalog: the read-only set of models every recommendation runs
//! against, plus the loaders and the TTL cache that front the external feed.

mod cache;
pub mod domain;
mod loader;

pub use cache::{BundledCatalog, CatalogCache, CatalogSource, FileCatalog};
pub use domain::{BodyType, Powertrain, VehicleModel};
pub use loader::CatalogShape;

use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid catalog entry {entry}: {message}")]
    InvalidEntry { entry: String, message: String },
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}

/// Immutable, validated list of vehicles in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleCatalog {
    vehicles: Vec<VehicleModel>,
}

impl VehicleCatalog {
    pub fn new(vehicles: Vec<VehicleModel>) -> Result<Self, CatalogError> {
        let vehicles: Vec<VehicleModel> = vehicles.into_iter().map(VehicleModel::normalize).collect();
        let mut seen = HashSet::new();
        for vehicle in &vehicles {
            validate_entry(vehicle)?;
            if !seen.insert(vehicle.id.as_str()) {
                return Err(CatalogError::InvalidEntry {
                    entry: vehicle.id.clone(),
                    message: "duplicate id".to_string(),
                });
            }
        }
        Ok(Self { vehicles })
    }

    pub fn bundled(shape: CatalogShape) -> Result<Self, CatalogError> {
        loader::bundled(shape)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        loader::parse_json(reader)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        loader::parse_csv(reader)
    }

    pub fn vehicles(&self) -> &[VehicleModel] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&VehicleModel> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    /// Case-insensitive lookup on the entry name.
    pub fn find_by_name(&self, name: &str) -> Option<&VehicleModel> {
        let needle = name.trim();
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.name.eq_ignore_ascii_case(needle))
    }
}

fn validate_entry(vehicle: &VehicleModel) -> Result<(), CatalogError> {
    let invalid = |message: &str| CatalogError::InvalidEntry {
        entry: vehicle.id.clone(),
        message: message.to_string(),
    };

    if vehicle.id.is_empty() {
        return Err(invalid("missing id and name"));
    }
    if !vehicle.msrp.is_finite() || vehicle.msrp < 0.0 {
        return Err(invalid("msrp must be a non-negative number"));
    }
    if !(0.0..=1.0).contains(&vehicle.lease_residual_pct) {
        return Err(invalid("lease residual must be within 0..=1"));
    }
    if !vehicle.apr_base.is_finite() || vehicle.apr_base < 0.0 {
        return Err(invalid("base apr must be non-negative"));
    }
    if let Some(rating) = vehicle.safety_rating {
        if !(1..=5).contains(&rating) {
            return Err(invalid("safety rating must be within 1..=5"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: &str, msrp: f64) -> VehicleModel {
        VehicleModel {
            id: id.to_string(),
            name: id.to_string(),
            make: None,
            model: None,
            trim: None,
            year: None,
            powertrain: Powertrain::Gas,
            body: BodyType::Sedan,
            msrp,
            mpg: Some(30.0),
            mpge: None,
            apr_base: 0.06,
            lease_residual_pct: 0.58,
            safety_rating: None,
            horsepower: None,
            seats: None,
            maintenance_cost_per_year: None,
            insurance_cost_per_month: None,
            resale_value_percent: None,
            co2_grams_per_mile: None,
        }
    }

    #[test]
    fn rejects_negative_msrp() {
        let err = VehicleCatalog::new(vec![vehicle("bad", -1.0)]).expect_err("negative msrp");
        assert!(matches!(err, CatalogError::InvalidEntry { .. }));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = VehicleCatalog::new(vec![vehicle("a", 1.0), vehicle("a", 2.0)])
            .expect_err("duplicate id");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn finds_by_name_ignoring_case() {
        let catalog = VehicleCatalog::new(vec![vehicle("Corolla", 22_000.0)]).expect("valid");
        assert!(catalog.find_by_name("  corolla ").is_some());
        assert!(catalog.find_by_name("camry").is_none());
    }
}
