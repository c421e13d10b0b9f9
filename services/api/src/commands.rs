use clap::Args;
use drivelens::config::AppConfig;
use drivelens::error::AppError;
use drivelens::{FinancingService, UserProfile, ValidationError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file holding the buyer profile
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Rank dealer inventory (with eligibility gate) instead of base models
    #[arg(long)]
    pub(crate) inventory: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Path to a JSON file holding the buyer profile
    #[arg(long)]
    pub(crate) profile: PathBuf,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let profile = load_profile(&args.profile)?;
    let service = FinancingService::from_config(&AppConfig::load()?);

    if args.inventory {
        print_json(&service.inventory_recommend(&profile)?)
    } else {
        print_json(&service.recommend(&profile)?)
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let profile = load_profile(&args.profile)?;
    let service = FinancingService::from_config(&AppConfig::load()?);
    let plan = service.plan(&profile)?;

    println!("{}", plan.summary);
    if let Some(series) = &plan.scenarios {
        let headline = series.headline;
        println!(
            "APR {:.2}% | buy ${:.2}/mo | lease ${:.2}/mo | buy interest ${:.2}",
            headline.apr * 100.0,
            headline.buy_monthly,
            headline.lease_monthly,
            headline.total_interest_buy
        );
    }
    if let Some(explanation) = &plan.explanation {
        println!();
        println!("{explanation}");
    }
    Ok(())
}

fn load_profile(path: &Path) -> Result<UserProfile, AppError> {
    let raw = fs::read_to_string(path)?;
    let profile: UserProfile = serde_json::from_str(&raw)
        .map_err(|err| ValidationError::single("profile", err.to_string()))?;
    profile.validate()?;
    Ok(profile)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("drivelens-{}-{name}", std::process::id()));
        let mut file = fs::File::create(&path).expect("create temp profile");
        file.write_all(body.as_bytes()).expect("write temp profile");
        path
    }

    #[test]
    fn load_profile_reads_camel_case_json() {
        let path = write_temp(
            "ok.json",
            r#"{"monthlyIncome": 6500, "creditScore": 720, "downPayment": 2500}"#,
        );
        let profile = load_profile(&path).expect("profile loads");
        assert_eq!(profile.monthly_income, 6500.0);
        assert_eq!(profile.down_payment, 2500.0);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_profile_file_is_io() {
        let path = std::env::temp_dir().join("drivelens-no-such-profile.json");
        let err = load_profile(&path).expect_err("missing file");
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn load_profile_rejects_invalid_profiles() {
        let path = write_temp("bad.json", r#"{"monthlyIncome": -1, "creditScore": 720}"#);
        let err = load_profile(&path).expect_err("negative income rejected");
        assert!(matches!(err, AppError::Validation(_)));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_profile_reports_malformed_json_as_invalid_input() {
        let path = write_temp("broken.json", "{ not json");
        let err = load_profile(&path).expect_err("malformed json rejected");
        let AppError::Validation(validation) = err else {
            panic!("expected validation error");
        };
        assert_eq!(validation.issues[0].field, "profile");
        let _ = fs::remove_file(path);
    }
}
