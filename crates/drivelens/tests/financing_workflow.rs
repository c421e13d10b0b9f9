use std::io::Cursor;

use drivelens::advisor::service::{InventoryRecommendation, PredictRequest};
use drivelens::advisor::{EligibilityPolicy, FinancingService};
use drivelens::catalog::{CatalogShape, Powertrain, VehicleCatalog};
use drivelens::finance::{build_scenario_series, lease_principal, monthly_payment, total_interest};
use drivelens::profile::{CreditBand, CreditStanding, UserProfile};

fn household() -> UserProfile {
    let mut profile = UserProfile::new(5_200.0, CreditStanding::Score(705));
    profile.spouse_income = Some(1_800.0);
    profile.avg_monthly_mileage = Some(1_100.0);
    profile.down_payment = 2_500.0;
    profile.age = Some(41);
    profile
}

#[test]
fn regression_values_for_thirty_thousand_loan() {
    let payment = monthly_payment(30_000.0, 0.06, 60);
    assert!(payment > 550.0 && payment < 650.0);

    let interest = total_interest(30_000.0, 0.06, 60);
    assert!(interest > 0.0 && interest < 10_000.0);

    assert!((lease_principal(30_000.0, 0.58) - 12_600.0).abs() < 1e-9);
}

#[test]
fn eligibility_gate_boundaries() {
    let policy = EligibilityPolicy::default();

    let mut low = UserProfile::new(2_000.0, CreditStanding::Band(CreditBand::Good));
    low.daily_miles = Some(20.0);
    let decision = policy.evaluate(&low);
    assert!(!decision.is_eligible());
    assert!(decision.summary().contains("below our minimum requirement"));

    let mut solid = UserProfile::new(5_000.0, CreditStanding::Band(CreditBand::Excellent));
    solid.daily_miles = Some(20.0);
    assert!(policy.evaluate(&solid).is_eligible());
}

#[test]
fn household_walks_from_recommendation_to_insights() {
    let service = FinancingService::bundled();
    let profile = household();

    let outcome = service
        .inventory_recommend(&profile)
        .expect("valid household");
    let InventoryRecommendation::Recommended {
        recommendations, ..
    } = outcome
    else {
        panic!("household should be eligible");
    };
    assert!(!recommendations.is_empty());

    let request = serde_json::json!({
        "profile": profile,
        "recommendedVehicles": recommendations
            .iter()
            .map(|pick| serde_json::json!({
                "vehicleId": pick.vehicle.id,
                "monthlyPayment": pick.monthly_payment,
                "rank": pick.rank,
            }))
            .collect::<Vec<_>>(),
    });
    let request = serde_json::from_value(request).expect("insights request");
    let insights = service.insights(&request).expect("insights");

    assert_eq!(insights.insights.len(), recommendations.len());
    assert_eq!(
        insights
            .insights
            .iter()
            .filter(|insight| insight.recommendation.is_top_choice)
            .count(),
        1
    );
    assert_eq!(insights.insights[0].vehicle_id, recommendations[0].vehicle.id);
}

#[test]
fn predict_matches_direct_projection() {
    let service = FinancingService::bundled();
    let profile = household();
    let response = service
        .predict(&PredictRequest {
            user: profile.clone(),
            model_name: "Prius".to_string(),
        })
        .expect("prius is in the basic list");

    let catalog = VehicleCatalog::bundled(CatalogShape::Basic).expect("basic catalog");
    let prius = catalog.find_by_name("prius").expect("prius");
    let direct = build_scenario_series(&profile, prius);

    assert_eq!(response.headline, direct.headline);
    assert_eq!(response.scenarios.buy, direct.buy);
}

#[test]
fn csv_catalog_feeds_the_same_scoring() {
    let csv = "\
id,name,model,year,powertrain,body,msrp,mpg,mpge,aprBase,leaseResidualPct,seats
volt-2019,Volt,Volt,2019,EV,hatchback,34000,,106,0.05,0.55,4
civic-2024,Civic,Civic,2024,gas,sedan,24000,36,,0.06,0.58,5
";
    let catalog = VehicleCatalog::from_csv_reader(Cursor::new(csv)).expect("csv catalog");
    assert_eq!(catalog.len(), 2);

    let volt = catalog.find_by_id("volt-2019").expect("volt");
    assert_eq!(volt.powertrain, Powertrain::Ev);
    assert_eq!(volt.mpg, None);
    assert_eq!(catalog.find_by_name("CIVIC").map(|car| car.msrp), Some(24_000.0));
}
