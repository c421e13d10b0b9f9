use super::domain::{CreditStanding, UserProfile, MAX_TERM_MONTHS};
use serde::Serialize;
use std::fmt;

/// Single field-level problem found while validating input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Structurally invalid input. Never retried; surfaced with field detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.to_string(),
                message: message.into(),
            }],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details: Vec<String> = self
            .issues
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect();
        write!(f, "invalid request: {}", details.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Default)]
pub(crate) struct IssueCollector {
    issues: Vec<FieldIssue>,
}

impl IssueCollector {
    pub(crate) fn push(&mut self, field: &str, message: &str) {
        self.issues.push(FieldIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub(crate) fn non_negative(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.push(field, "must be a finite number >= 0");
        }
    }

    pub(crate) fn positive_term(&mut self, field: &str, value: Option<u32>, max: u32) {
        match value {
            Some(0) => self.push(field, "must be a positive number of months"),
            Some(months) if months > max => {
                self.issues.push(FieldIssue {
                    field: field.to_string(),
                    message: format!("must be at most {max} months"),
                });
            }
            _ => {}
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                issues: self.issues,
            })
        }
    }
}

impl UserProfile {
    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = IssueCollector::default();

        issues.non_negative("monthlyIncome", self.monthly_income);
        if let Some(spouse) = self.spouse_income {
            issues.non_negative("spouseIncome", spouse);
        }
        issues.non_negative("downPayment", self.down_payment);
        if let Some(assets) = self.total_assets {
            issues.non_negative("totalAssets", assets);
        }
        if let Some(budget) = self.monthly_budget {
            if !budget.is_finite() || budget <= 0.0 {
                issues.push("monthlyBudget", "must be a positive number");
            }
        }

        if let CreditStanding::Score(score) = self.credit {
            if !(300..=850).contains(&score) {
                issues.push("creditScore", "must be between 300 and 850");
            }
        }

        match (self.avg_monthly_mileage, self.daily_miles) {
            (None, None) => issues.push("mileage", "avgMonthlyMileage or dailyMiles is required"),
            (monthly, daily) => {
                if let Some(monthly) = monthly {
                    issues.non_negative("avgMonthlyMileage", monthly);
                }
                if let Some(daily) = daily {
                    issues.non_negative("dailyMiles", daily);
                }
            }
        }

        issues.positive_term("loanTermMonths", self.loan_term_months, MAX_TERM_MONTHS);
        issues.positive_term("leaseTermMonths", self.lease_term_months, MAX_TERM_MONTHS);

        if let Some(age) = self.age {
            if !(16..=120).contains(&age) {
                issues.push("age", "must be between 16 and 120");
            }
        }
        if self.ownership_years == Some(0) {
            issues.push("ownershipYears", "must be at least one year");
        }

        issues.finish()
    }
}
