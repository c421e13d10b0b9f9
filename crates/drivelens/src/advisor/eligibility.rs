use crate::profile::UserProfile;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Affordability thresholds checked before any recommendation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityPolicy {
    pub minimum_monthly_income: f64,
    /// Income floor applied when credit is in the worst band.
    pub poor_credit_minimum_income: f64,
    pub max_payment_income_share: f64,
    pub cheapest_vehicle_price: f64,
    pub cheapest_vehicle_term_months: u32,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            minimum_monthly_income: 2500.0,
            poor_credit_minimum_income: 3500.0,
            max_payment_income_share: 0.15,
            cheapest_vehicle_price: 15_000.0,
            cheapest_vehicle_term_months: 60,
        }
    }
}

impl EligibilityPolicy {
    /// Checks run in a fixed order: income floor, then poor credit with low
    /// income, then payment capacity against the cheapest plausible vehicle.
    pub fn evaluate(&self, profile: &UserProfile) -> EligibilityDecision {
        let total_income = profile.total_income();

        if total_income < self.minimum_monthly_income {
            return self.reject(IneligibilityReason::IncomeBelowFloor {
                total_income,
                minimum: self.minimum_monthly_income,
            });
        }

        if profile.credit.band().is_worst() && total_income < self.poor_credit_minimum_income {
            return self.reject(IneligibilityReason::PoorCreditLowIncome {
                total_income,
                minimum: self.poor_credit_minimum_income,
            });
        }

        let max_payment = total_income * self.max_payment_income_share;
        let cheapest_payment = self.cheapest_vehicle_payment();
        if max_payment < cheapest_payment {
            return self.reject(IneligibilityReason::PaymentCapacityTooLow {
                max_payment,
                cheapest_payment,
            });
        }

        EligibilityDecision::Eligible
    }

    /// Simple principal over term; no interest.
    pub fn cheapest_vehicle_payment(&self) -> f64 {
        if self.cheapest_vehicle_term_months == 0 {
            return self.cheapest_vehicle_price;
        }
        self.cheapest_vehicle_price / f64::from(self.cheapest_vehicle_term_months)
    }

    fn reject(&self, reason: IneligibilityReason) -> EligibilityDecision {
        info!(reason = reason.code(), "profile failed eligibility gate");
        EligibilityDecision::Ineligible(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EligibilityDecision {
    Eligible,
    Ineligible(IneligibilityReason),
}

impl EligibilityDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityDecision::Eligible)
    }

    pub fn summary(&self) -> String {
        match self {
            EligibilityDecision::Eligible => "eligible for financing".to_string(),
            EligibilityDecision::Ineligible(reason) => reason.summary(),
        }
    }

    pub fn view(&self) -> EligibilityView {
        match self {
            EligibilityDecision::Eligible => EligibilityView {
                eligible: true,
                reason: None,
                suggested_actions: None,
            },
            EligibilityDecision::Ineligible(reason) => EligibilityView {
                eligible: false,
                reason: Some(reason.summary()),
                suggested_actions: Some(reason.suggested_actions()),
            },
        }
    }
}

/// Why a profile was turned away. Not an error: callers get it as a
/// normal result alongside remediation steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IneligibilityReason {
    IncomeBelowFloor { total_income: f64, minimum: f64 },
    PoorCreditLowIncome { total_income: f64, minimum: f64 },
    PaymentCapacityTooLow { max_payment: f64, cheapest_payment: f64 },
}

impl IneligibilityReason {
    pub fn code(&self) -> &'static str {
        match self {
            IneligibilityReason::IncomeBelowFloor { .. } => "income-floor",
            IneligibilityReason::PoorCreditLowIncome { .. } => "credit-income",
            IneligibilityReason::PaymentCapacityTooLow { .. } => "payment-capacity",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::IncomeBelowFloor {
                total_income,
                minimum,
            } => format!(
                "Your total monthly income ({}) is below our minimum requirement of {}.",
                dollars(*total_income),
                dollars(*minimum)
            ),
            IneligibilityReason::PoorCreditLowIncome { .. } => {
                "Your combination of credit score and income level does not meet our financing criteria."
                    .to_string()
            }
            IneligibilityReason::PaymentCapacityTooLow { max_payment, .. } => format!(
                "Based on your income, your maximum recommended car payment is ${}/month, which may not be sufficient for most vehicles.",
                max_payment.round()
            ),
        }
    }

    pub fn suggested_actions(&self) -> Vec<String> {
        let actions: &[&str] = match self {
            IneligibilityReason::IncomeBelowFloor { .. } => &[
                "Consider increasing your income through additional work or side jobs",
                "Add a co-signer with higher income",
                "Save up to purchase a used vehicle with cash",
                "Look into public transportation or ride-sharing alternatives",
                "Explore employer transportation benefits or programs",
            ],
            IneligibilityReason::PoorCreditLowIncome { minimum, .. } => {
                return vec![
                    "Work on improving your credit score (pay bills on time, reduce debt)".to_string(),
                    format!("Increase your monthly income to at least {}", dollars(*minimum)),
                    "Consider a secured credit card to rebuild credit".to_string(),
                    "Wait 6-12 months while improving your financial situation".to_string(),
                    "Explore credit counseling services".to_string(),
                ];
            }
            IneligibilityReason::PaymentCapacityTooLow { .. } => &[
                "Increase your income or add a co-signer",
                "Save for a larger down payment to reduce monthly payments",
                "Consider more affordable used vehicle options",
                "Look for vehicles under $15,000",
                "Explore lease options with lower monthly payments",
            ],
        };
        actions.iter().map(|action| action.to_string()).collect()
    }
}

/// `{ eligible, reason?, suggestedActions? }` wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityView {
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_actions: Option<Vec<String>>,
}

/// Whole dollars with thousands separators, e.g. `$12,500`.
pub(crate) fn dollars(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
