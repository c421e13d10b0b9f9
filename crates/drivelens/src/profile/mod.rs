//! Per-request user profile: income, credit standing, driving habits, and
//! preferences.

pub mod domain;
mod validation;

pub use domain::{
    CreditBand, CreditStanding, FinancePath, Goal, RiskTolerance, Usage, UserProfile,
    DEFAULT_AGE, DEFAULT_LEASE_TERM_MONTHS, DEFAULT_LOAN_TERM_MONTHS, MAX_TERM_MONTHS,
};
pub use validation::{FieldIssue, ValidationError};

pub(crate) use validation::IssueCollector;
