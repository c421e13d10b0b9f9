use super::domain::{BodyType, Powertrain, VehicleModel};
use super::{CatalogError, VehicleCatalog};
use serde::{Deserialize, Deserializer};
use std::io::Read;

const BASIC_MODELS: &str = include_str!("../../data/basic_models.json");
const INVENTORY: &str = include_str!("../../data/inventory.json");

/// Which compiled-in catalog to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogShape {
    /// Generic model list: one entry per model, no trims or ratings.
    Basic,
    /// Dealer-style inventory with trims, ratings, and cost baselines.
    Inventory,
}

pub(crate) fn bundled(shape: CatalogShape) -> Result<VehicleCatalog, CatalogError> {
    let raw = match shape {
        CatalogShape::Basic => BASIC_MODELS,
        CatalogShape::Inventory => INVENTORY,
    };
    parse_json(raw.as_bytes())
}

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<VehicleCatalog, CatalogError> {
    let vehicles: Vec<VehicleModel> = serde_json::from_reader(reader)?;
    VehicleCatalog::new(vehicles)
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<VehicleCatalog, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut vehicles = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        vehicles.push(row.into_vehicle(index + 1)?);
    }

    VehicleCatalog::new(vehicles)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    make: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    model: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    trim: Option<String>,
    #[serde(default)]
    year: Option<u16>,
    #[serde(alias = "type", alias = "fuelType")]
    powertrain: String,
    #[serde(alias = "size", alias = "bodyType")]
    body: String,
    msrp: f64,
    #[serde(default, alias = "mpgCombined")]
    mpg: Option<f64>,
    #[serde(default)]
    mpge: Option<f64>,
    #[serde(default)]
    apr_base: Option<f64>,
    #[serde(default)]
    lease_residual_pct: Option<f64>,
    #[serde(default)]
    safety_rating: Option<u8>,
    #[serde(default)]
    horsepower: Option<u32>,
    #[serde(default)]
    seats: Option<u8>,
    #[serde(default)]
    maintenance_cost_per_year: Option<f64>,
    #[serde(default)]
    insurance_cost_per_month: Option<f64>,
    #[serde(default)]
    resale_value_percent: Option<f64>,
    #[serde(default)]
    co2_grams_per_mile: Option<f64>,
}

impl CatalogRow {
    fn into_vehicle(self, row: usize) -> Result<VehicleModel, CatalogError> {
        let powertrain =
            Powertrain::parse(&self.powertrain).ok_or_else(|| CatalogError::InvalidEntry {
                entry: format!("row {row}"),
                message: format!("unknown powertrain '{}'", self.powertrain),
            })?;
        let body = BodyType::parse(&self.body).ok_or_else(|| CatalogError::InvalidEntry {
            entry: format!("row {row}"),
            message: format!("unknown body type '{}'", self.body),
        })?;

        Ok(VehicleModel {
            id: self.id.unwrap_or_default(),
            name: self.name,
            make: self.make,
            model: self.model,
            trim: self.trim,
            year: self.year,
            powertrain,
            body,
            msrp: self.msrp,
            mpg: self.mpg,
            mpge: self.mpge,
            apr_base: self.apr_base.unwrap_or(0.06),
            lease_residual_pct: self.lease_residual_pct.unwrap_or(0.58),
            safety_rating: self.safety_rating,
            horsepower: self.horsepower,
            seats: self.seats,
            maintenance_cost_per_year: self.maintenance_cost_per_year,
            insurance_cost_per_month: self.insurance_cost_per_month,
            resale_value_percent: self.resale_value_percent,
            co2_grams_per_mile: self.co2_grams_per_mile,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}
