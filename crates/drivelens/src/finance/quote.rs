use super::amortization::{lease_principal, monthly_payment, principal_after_down_payment};
use super::rates::apr_from_credit;
use crate::profile::{IssueCollector, ValidationError};
use serde::{Deserialize, Serialize};

fn default_residual() -> f64 {
    0.58
}

/// Inputs for a one-off buy/lease payment comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub car_price: f64,
    #[serde(default)]
    pub down_payment: f64,
    pub credit_score: f64,
    pub loan_months: u32,
    pub lease_months: u32,
    pub base_apr: f64,
    #[serde(default = "default_residual")]
    pub residual: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub buy_monthly: f64,
    pub lease_monthly: f64,
    pub apr: f64,
}

impl QuoteRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = IssueCollector::default();
        issues.non_negative("carPrice", self.car_price);
        issues.non_negative("downPayment", self.down_payment);
        if !self.credit_score.is_finite() {
            issues.push("creditScore", "must be a finite number");
        }
        if self.loan_months == 0 {
            issues.push("loanMonths", "must be a positive number of months");
        }
        if self.lease_months == 0 {
            issues.push("leaseMonths", "must be a positive number of months");
        }
        issues.non_negative("baseApr", self.base_apr);
        if !self.residual.is_finite() || !(0.0..=1.0).contains(&self.residual) {
            issues.push("residual", "must be between 0 and 1");
        }
        issues.finish()
    }
}

/// Validate and price a quick quote.
pub fn quote(request: &QuoteRequest) -> Result<Quote, ValidationError> {
    request.validate()?;

    let apr = apr_from_credit(request.credit_score, request.base_apr);
    let principal = principal_after_down_payment(request.car_price, request.down_payment);
    Ok(Quote {
        buy_monthly: monthly_payment(principal, apr, request.loan_months),
        lease_monthly: monthly_payment(
            lease_principal(principal, request.residual),
            apr,
            request.lease_months,
        ),
        apr,
    })
}
