use crate::catalog::{BodyType, Powertrain};
use serde::{Deserialize, Deserializer, Serialize};

/// Five fixed credit-score ranges used where a raw score is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreditBand {
    #[serde(rename = "300-579")]
    Poor,
    #[serde(rename = "580-669")]
    Fair,
    #[serde(rename = "670-739")]
    Good,
    #[serde(rename = "740-799")]
    VeryGood,
    #[serde(rename = "800-850")]
    Excellent,
}

impl CreditBand {
    pub const ALL: [CreditBand; 5] = [
        CreditBand::Poor,
        CreditBand::Fair,
        CreditBand::Good,
        CreditBand::VeryGood,
        CreditBand::Excellent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CreditBand::Poor => "300-579",
            CreditBand::Fair => "580-669",
            CreditBand::Good => "670-739",
            CreditBand::VeryGood => "740-799",
            CreditBand::Excellent => "800-850",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|band| band.label() == raw)
    }

    pub fn from_score(score: u16) -> Self {
        match score {
            0..=579 => CreditBand::Poor,
            580..=669 => CreditBand::Fair,
            670..=739 => CreditBand::Good,
            740..=799 => CreditBand::VeryGood,
            _ => CreditBand::Excellent,
        }
    }

    /// Representative score for the band.
    pub fn midpoint(self) -> u16 {
        match self {
            CreditBand::Poor => 440,
            CreditBand::Fair => 625,
            CreditBand::Good => 705,
            CreditBand::VeryGood => 770,
            CreditBand::Excellent => 825,
        }
    }

    pub fn is_worst(self) -> bool {
        self == CreditBand::Poor
    }
}

/// A profile carries either a raw score or a band label; both are supported
/// everywhere a credit signal is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreditStanding {
    Score(u16),
    Band(CreditBand),
}

impl CreditStanding {
    pub fn band(self) -> CreditBand {
        match self {
            CreditStanding::Score(score) => CreditBand::from_score(score),
            CreditStanding::Band(band) => band,
        }
    }

    pub fn score(self) -> u16 {
        match self {
            CreditStanding::Score(score) => score,
            CreditStanding::Band(band) => band.midpoint(),
        }
    }

    pub fn label(self) -> String {
        match self {
            CreditStanding::Score(score) => score.to_string(),
            CreditStanding::Band(band) => band.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    LowestMonthly,
    Ownership,
    Eco,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    Commute,
    Family,
    Haul,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinancePath {
    Lease,
    #[default]
    Buy,
    CreditBuild,
}

impl FinancePath {
    pub fn label(self) -> &'static str {
        match self {
            FinancePath::Lease => "lease",
            FinancePath::Buy => "buy",
            FinancePath::CreditBuild => "credit-build",
        }
    }
}

pub const DEFAULT_LOAN_TERM_MONTHS: u32 = 60;
pub const DEFAULT_LEASE_TERM_MONTHS: u32 = 36;
/// Longest loan or lease term accepted, in months.
pub const MAX_TERM_MONTHS: u32 = 120;
/// Age assumed by the heuristic profile analysis when none is supplied.
pub const DEFAULT_AGE: u32 = 38;

/// Financial and driving profile for one request. Never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub monthly_income: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_income: Option<f64>,
    #[serde(alias = "creditScore", alias = "creditBand")]
    pub credit: CreditStanding,
    #[serde(default, alias = "budget", skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<f64>,
    #[serde(default)]
    pub down_payment: f64,
    #[serde(default, alias = "assets", skip_serializing_if = "Option::is_none")]
    pub total_assets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_monthly_mileage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_miles: Option<f64>,
    #[serde(
        default,
        alias = "preferredType",
        alias = "fuelPreference",
        deserialize_with = "powertrain_preference",
        skip_serializing_if = "Option::is_none"
    )]
    pub preferred_powertrain: Option<Powertrain>,
    #[serde(
        default,
        alias = "size",
        alias = "carType",
        skip_serializing_if = "Option::is_none"
    )]
    pub body_preference: Option<BodyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_term_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_term_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<RiskTolerance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finance_path: Option<FinancePath>,
}

impl UserProfile {
    /// Minimal profile; remaining fields default to "not specified".
    pub fn new(monthly_income: f64, credit: CreditStanding) -> Self {
        Self {
            name: None,
            age: None,
            monthly_income,
            spouse_income: None,
            credit,
            monthly_budget: None,
            down_payment: 0.0,
            total_assets: None,
            avg_monthly_mileage: None,
            daily_miles: None,
            preferred_powertrain: None,
            body_preference: None,
            loan_term_months: None,
            lease_term_months: None,
            goal: None,
            usage: None,
            risk_tolerance: None,
            ownership_years: None,
            finance_path: None,
        }
    }

    /// Household monthly income.
    pub fn total_income(&self) -> f64 {
        self.monthly_income + self.spouse_income.unwrap_or(0.0)
    }

    pub fn loan_months(&self) -> u32 {
        self.loan_term_months.unwrap_or(DEFAULT_LOAN_TERM_MONTHS)
    }

    pub fn lease_months(&self) -> u32 {
        self.lease_term_months.unwrap_or(DEFAULT_LEASE_TERM_MONTHS)
    }

    pub fn monthly_miles(&self) -> f64 {
        match (self.avg_monthly_mileage, self.daily_miles) {
            (Some(monthly), _) => monthly,
            (None, Some(daily)) => daily * 365.0 / 12.0,
            (None, None) => 0.0,
        }
    }

    pub fn daily_miles(&self) -> f64 {
        match (self.daily_miles, self.avg_monthly_mileage) {
            (Some(daily), _) => daily,
            (None, Some(monthly)) => monthly * 12.0 / 365.0,
            (None, None) => 0.0,
        }
    }

    pub fn annual_miles(&self) -> f64 {
        self.monthly_miles() * 12.0
    }

    pub fn finance_path(&self) -> FinancePath {
        self.finance_path.unwrap_or_default()
    }

    pub fn age_or_default(&self) -> u32 {
        self.age.unwrap_or(DEFAULT_AGE)
    }
}

fn powertrain_preference<'de, D>(deserializer: D) -> Result<Option<Powertrain>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("any") => Ok(None),
        Some(value) => Powertrain::parse(value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown powertrain preference '{value}'"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_round_trips_through_score() {
        for band in CreditBand::ALL {
            assert_eq!(CreditBand::from_score(band.midpoint()), band);
            assert_eq!(CreditBand::parse(band.label()), Some(band));
        }
        assert_eq!(CreditBand::parse("900-999"), None);
    }

    #[test]
    fn accepts_numeric_score_or_band_label() {
        let numeric: UserProfile = serde_json::from_str(
            r#"{"monthlyIncome":5000,"creditScore":712,"avgMonthlyMileage":900,"preferredType":"EV"}"#,
        )
        .expect("numeric profile parses");
        assert_eq!(numeric.credit, CreditStanding::Score(712));
        assert_eq!(numeric.preferred_powertrain, Some(Powertrain::Ev));
        assert_eq!(numeric.credit.band(), CreditBand::Good);

        let banded: UserProfile = serde_json::from_str(
            r#"{"monthlyIncome":5000,"spouseIncome":1500,"creditScore":"740-799","dailyMiles":40,"fuelPreference":"any","carType":"suv","financePath":"credit-build"}"#,
        )
        .expect("banded profile parses");
        assert_eq!(banded.credit, CreditStanding::Band(CreditBand::VeryGood));
        assert_eq!(banded.credit.score(), 770);
        assert_eq!(banded.preferred_powertrain, None);
        assert_eq!(banded.body_preference, Some(BodyType::Suv));
        assert_eq!(banded.finance_path(), FinancePath::CreditBuild);
        assert_eq!(banded.total_income(), 6500.0);
    }

    #[test]
    fn mileage_converts_between_daily_and_monthly() {
        let mut profile = UserProfile::new(4000.0, CreditStanding::Score(700));
        profile.daily_miles = Some(40.0);
        assert!((profile.annual_miles() - 14_600.0).abs() < 1e-6);

        profile.avg_monthly_mileage = Some(1000.0);
        assert_eq!(profile.monthly_miles(), 1000.0);
        assert_eq!(profile.daily_miles(), 40.0);
    }

    #[test]
    fn defaults_terms_and_path() {
        let profile = UserProfile::new(4000.0, CreditStanding::Score(700));
        assert_eq!(profile.loan_months(), 60);
        assert_eq!(profile.lease_months(), 36);
        assert_eq!(profile.finance_path(), FinancePath::Buy);
        assert_eq!(profile.age_or_default(), DEFAULT_AGE);
    }
}
