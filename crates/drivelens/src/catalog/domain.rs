use serde::{Deserialize, Serialize};

/// Drivetrain energy source. Exactly one of `mpg`/`mpge` is authoritative per
/// powertrain: gas and hybrid use `mpg`, electric uses `mpge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Powertrain {
    #[serde(alias = "gas", alias = "gasoline", alias = "Gasoline")]
    Gas,
    #[serde(alias = "hybrid")]
    Hybrid,
    #[serde(rename = "EV", alias = "ev", alias = "electric", alias = "Electric")]
    Ev,
}

impl Powertrain {
    pub fn label(self) -> &'static str {
        match self {
            Powertrain::Gas => "Gas",
            Powertrain::Hybrid => "Hybrid",
            Powertrain::Ev => "EV",
        }
    }

    pub fn is_electrified(self) -> bool {
        matches!(self, Powertrain::Hybrid | Powertrain::Ev)
    }

    /// Loose parse used by CSV imports and CLI flags.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gas" | "gasoline" | "regular" | "premium" => Some(Powertrain::Gas),
            "hybrid" | "plug-in hybrid" | "phev" => Some(Powertrain::Hybrid),
            "ev" | "electric" | "electricity" | "bev" => Some(Powertrain::Ev),
            _ => None,
        }
    }
}

/// Body size/class of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    #[serde(alias = "Compact")]
    Compact,
    #[serde(alias = "Sedan")]
    Sedan,
    #[serde(alias = "SUV")]
    Suv,
    #[serde(alias = "Truck")]
    Truck,
    #[serde(alias = "Coupe")]
    Coupe,
    #[serde(alias = "Hatchback")]
    Hatchback,
    #[serde(alias = "Convertible")]
    Convertible,
    #[serde(alias = "Minivan")]
    Minivan,
}

impl BodyType {
    pub fn label(self) -> &'static str {
        match self {
            BodyType::Compact => "compact",
            BodyType::Sedan => "sedan",
            BodyType::Suv => "suv",
            BodyType::Truck => "truck",
            BodyType::Coupe => "coupe",
            BodyType::Hatchback => "hatchback",
            BodyType::Convertible => "convertible",
            BodyType::Minivan => "minivan",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.contains("suv") || normalized.contains("sport utility") {
            return Some(BodyType::Suv);
        }
        if normalized.contains("truck") || normalized.contains("pickup") {
            return Some(BodyType::Truck);
        }
        if normalized.contains("van") {
            return Some(BodyType::Minivan);
        }
        if normalized.contains("hatchback") {
            return Some(BodyType::Hatchback);
        }
        if normalized.contains("coupe") {
            return Some(BodyType::Coupe);
        }
        if normalized.contains("convertible") {
            return Some(BodyType::Convertible);
        }
        if normalized.contains("compact") || normalized.contains("small") {
            return Some(BodyType::Compact);
        }
        if ["sedan", "midsize", "mid-size", "large"]
            .iter()
            .any(|needle| normalized.contains(needle))
        {
            return Some(BodyType::Sedan);
        }
        None
    }
}

fn default_apr_base() -> f64 {
    0.06
}

fn default_lease_residual() -> f64 {
    0.58
}

/// Catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleModel {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(alias = "type", alias = "fuelType")]
    pub powertrain: Powertrain,
    #[serde(alias = "size", alias = "bodyType")]
    pub body: BodyType,
    pub msrp: f64,
    #[serde(default, alias = "mpgCombined", skip_serializing_if = "Option::is_none")]
    pub mpg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mpge: Option<f64>,
    #[serde(default = "default_apr_base")]
    pub apr_base: f64,
    #[serde(default = "default_lease_residual")]
    pub lease_residual_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horsepower: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_cost_per_year: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_cost_per_month: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resale_value_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_grams_per_mile: Option<f64>,
}

impl VehicleModel {
    /// Model name used for diversity grouping; falls back to the entry name.
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or(&self.name)
    }

    /// "2024 Toyota Camry" style label, skipping unknown parts.
    pub fn display_name(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if let Some(year) = self.year {
            parts.push(year.to_string());
        }
        if let Some(make) = &self.make {
            parts.push(make.clone());
        }
        parts.push(self.model_name().to_string());
        parts.join(" ")
    }

    /// Combined economy as used by threshold rules: mpg, or mpge for EVs.
    pub fn combined_economy(&self) -> f64 {
        self.mpg
            .filter(|value| *value > 0.0)
            .or(self.mpge.filter(|value| *value > 0.0))
            .unwrap_or(0.0)
    }

    pub fn is_model_year_at_least(&self, year: u16) -> bool {
        self.year.map(|value| value >= year).unwrap_or(false)
    }

    pub(crate) fn normalize(mut self) -> Self {
        if self.id.trim().is_empty() {
            self.id = slugify(&self.name);
        }
        self
    }
}

pub(crate) fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut last_dash = true;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
