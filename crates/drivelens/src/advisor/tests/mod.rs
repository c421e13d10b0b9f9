mod common;
mod eligibility;
mod insights;
