use super::common::*;

use crate::advisor::insights::SavingsCategory;
use crate::advisor::{AdvisorError, InsightsAggregator, RecommendedVehicle};
use crate::profile::FinancePath;

fn pick(id: &str, monthly_payment: f64, rank: usize) -> RecommendedVehicle {
    RecommendedVehicle {
        vehicle_id: id.to_string(),
        monthly_payment,
        rank,
    }
}

#[test]
fn unknown_vehicle_is_reported() {
    let err = InsightsAggregator::default()
        .aggregate(
            &inventory(),
            &comfortable_profile(),
            &[pick("corolla-le-2024", 380.0, 1), pick("delorean-1981", 900.0, 2)],
        )
        .expect_err("missing vehicle");
    assert!(matches!(err, AdvisorError::VehicleNotFound(id) if id == "delorean-1981"));
}

#[test]
fn top_choice_follows_lowest_rank_not_input_order() {
    let insights = InsightsAggregator::default()
        .aggregate(
            &inventory(),
            &comfortable_profile(),
            &[
                pick("camry-le-2025", 470.0, 2),
                pick("corolla-le-2024", 380.0, 1),
                pick("rav4-le-2023", 490.0, 3),
            ],
        )
        .expect("insights");

    let flags: Vec<bool> = insights
        .iter()
        .map(|insight| insight.recommendation.is_top_choice)
        .collect();
    assert_eq!(flags, vec![false, true, false]);
    assert!(insights[1]
        .recommendation
        .reason
        .starts_with("Best overall match for your buy path"));
    assert!(insights[0]
        .recommendation
        .reason
        .starts_with("Solid alternative"));
}

#[test]
fn projection_totals_are_whole_dollar_sums() {
    let insights = InsightsAggregator::default()
        .aggregate(&inventory(), &comfortable_profile(), &[pick("camry-le-2025", 470.0, 1)])
        .expect("insights");
    let projection = insights[0].five_year_projection;
    let monthly = projection.monthly_breakdown;

    assert_eq!(monthly.payment, 470.0);
    assert_eq!(monthly.maintenance, 75.0);
    assert_eq!(projection.total_cost, projection.total_cost.round());
    assert!(projection.breakdown.interest >= 0.0);
    assert!(
        (projection.total_cost - (projection.breakdown.principal + projection.breakdown.interest
            + projection.breakdown.fuel
            + projection.breakdown.insurance
            + projection.breakdown.maintenance))
            .abs()
            <= 3.0
    );
    assert!(insights[0].savings_analysis.vs_other_options.is_empty());
}

#[test]
fn comparisons_use_nearest_cost_alternatives() {
    let insights = InsightsAggregator::default()
        .aggregate(
            &inventory(),
            &comfortable_profile(),
            &[
                pick("corolla-le-2024", 380.0, 1),
                pick("camry-le-2025", 470.0, 2),
                pick("highlander-le-2024", 690.0, 3),
                pick("bz4x-xle-2024", 720.0, 4),
            ],
        )
        .expect("insights");

    let corolla = &insights[0];
    let names: Vec<&str> = corolla
        .savings_analysis
        .vs_other_options
        .iter()
        .map(|option| option.compared_to.as_str())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(!names.iter().any(|name| name.contains("Corolla")));
    assert!(names.contains(&"2025 Camry"));
    assert!(corolla.savings_analysis.vs_other_options[0].amount < 0.0);

    let ev = &insights[3];
    assert_eq!(ev.savings_analysis.vs_average_car.category, SavingsCategory::Fuel);
    assert!(ev
        .recommendation
        .pros
        .contains(&"Zero fuel costs (electric)".to_string()));
    assert_eq!(
        corolla.savings_analysis.vs_average_car.category,
        SavingsCategory::Overall
    );
}

#[test]
fn credit_build_path_highlights_small_payments() {
    let mut builder = comfortable_profile();
    builder.finance_path = Some(FinancePath::CreditBuild);

    let insights = InsightsAggregator::default()
        .aggregate(&inventory(), &builder, &[pick("corolla-le-2024", 350.0, 1)])
        .expect("insights");
    let insight = &insights[0];

    assert_eq!(insight.finance_path, FinancePath::CreditBuild);
    assert!(insight
        .recommendation
        .pros
        .contains(&"Perfect for credit building".to_string()));
    assert_eq!(insight.credit_impact.score_delta, 35 + 15 + 10);
}
