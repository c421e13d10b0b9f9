use super::affordability::{
    budget_distance, economy_share, estimated_payment, is_electrified, is_hybrid, near_target,
    AffordabilityCheck,
};
use super::weights::{BasicWeights, InventoryWeights};
use super::{ScoreComponent, ScoreFactor, VehicleScore};
use crate::advisor::ownership::{CostAnalysis, OwnershipModel};
use crate::catalog::{BodyType, Powertrain, VehicleModel};
use crate::profile::{FinancePath, Goal, UserProfile};

#[derive(Default)]
struct Tally {
    total: f64,
    components: Vec<ScoreComponent>,
    reasons: Vec<String>,
}

impl Tally {
    fn award(&mut self, factor: ScoreFactor, points: f64, notes: impl Into<String>) {
        self.total += points;
        self.components.push(ScoreComponent {
            factor,
            points,
            notes: notes.into(),
        });
    }

    fn reason(&mut self, text: impl Into<String>) {
        self.reasons.push(text.into());
    }

    fn finish(self, monthly_payment: f64, cost_analysis: Option<CostAnalysis>) -> VehicleScore {
        VehicleScore {
            score: self.total,
            monthly_payment,
            reasons: self.reasons,
            components: self.components,
            cost_analysis,
        }
    }
}

pub(super) fn score_basic(
    vehicle: &VehicleModel,
    profile: &UserProfile,
    weights: &BasicWeights,
) -> VehicleScore {
    let mut tally = Tally::default();

    let payment = estimated_payment(vehicle, profile);
    let target = profile
        .monthly_budget
        .unwrap_or_else(|| profile.total_income() * weights.default_budget_share);
    let distance = budget_distance(payment, target);
    tally.award(
        ScoreFactor::BudgetDistance,
        -distance,
        format!("payment ${payment:.0} is ${distance:.0} from target ${target:.0}"),
    );
    tally.reason(format!("Est. monthly ~ ${payment:.0} vs budget ${target:.0}"));

    if profile.preferred_powertrain == Some(vehicle.powertrain) {
        tally.award(
            ScoreFactor::PowertrainMatch,
            weights.powertrain_match,
            format!("{} matches preference", vehicle.powertrain.label()),
        );
        tally.reason("matches preferred powertrain");
    }

    if profile.body_preference == Some(vehicle.body) {
        tally.award(
            ScoreFactor::BodyType,
            weights.size_match,
            format!("{} matches preference", vehicle.body.label()),
        );
        tally.reason("matches preferred size");
    }

    if profile.goal == Some(Goal::Eco) {
        match vehicle.powertrain {
            Powertrain::Hybrid => {
                tally.award(ScoreFactor::EcoGoal, weights.eco_hybrid_bonus, "hybrid suits eco goal")
            }
            Powertrain::Ev => {
                tally.award(ScoreFactor::EcoGoal, weights.eco_ev_bonus, "electric suits eco goal")
            }
            Powertrain::Gas => {}
        }
    }

    tally.finish(payment, None)
}

pub(super) fn score_inventory(
    vehicle: &VehicleModel,
    profile: &UserProfile,
    weights: &InventoryWeights,
    ownership: &OwnershipModel,
) -> VehicleScore {
    let mut tally = Tally::default();

    // Whole-dollar estimate, matching what the buyer is shown.
    let payment = estimated_payment(vehicle, profile).round();
    let max_payment = weights.max_monthly_payment(profile);
    let cost_analysis = ownership.cost_analysis(vehicle, payment, profile.monthly_miles());

    let check = AffordabilityCheck::new(payment, max_payment);
    if check.within() {
        tally.award(
            ScoreFactor::Affordability,
            check.headroom() * weights.affordability_max,
            format!("payment ${payment:.0} within max ${max_payment:.0}"),
        );
        if check.ratio < weights.comfortable_ratio {
            tally.reason("Well within budget");
        } else {
            tally.reason("Fits your budget");
        }
    } else {
        tally.award(
            ScoreFactor::Affordability,
            -weights.over_budget_penalty,
            format!("payment ${payment:.0} exceeds max ${max_payment:.0}"),
        );
    }

    score_efficiency(&mut tally, vehicle, profile, weights);
    score_body(&mut tally, vehicle, profile, weights);

    match vehicle.safety_rating {
        Some(5) => {
            tally.award(ScoreFactor::Safety, weights.five_star_safety, "5-star safety");
            tally.reason("5-star safety rating");
        }
        Some(4) => tally.award(ScoreFactor::Safety, weights.four_star_safety, "4-star safety"),
        _ => {}
    }

    if let Some(target) = profile.monthly_budget {
        if near_target(payment, target, weights.target_payment_tolerance) {
            tally.award(
                ScoreFactor::TargetPayment,
                weights.target_payment_bonus,
                format!("payment ${payment:.0} near target ${target:.0}"),
            );
            tally.reason("Matches your target payment");
        }
    }

    score_finance_path(&mut tally, vehicle, profile, weights);

    tally.finish(payment, Some(cost_analysis))
}

fn score_efficiency(
    tally: &mut Tally,
    vehicle: &VehicleModel,
    profile: &UserProfile,
    weights: &InventoryWeights,
) {
    let economy = vehicle.combined_economy();
    match vehicle.powertrain {
        Powertrain::Ev => {
            tally.award(ScoreFactor::Efficiency, weights.ev_efficiency, "electric");
            if profile.daily_miles() * 365.0 > 15_000.0 {
                tally.reason("Electric = major savings on high mileage");
            } else {
                tally.reason("Zero emissions");
            }
        }
        Powertrain::Hybrid => {
            tally.award(ScoreFactor::Efficiency, weights.hybrid_efficiency, "hybrid");
            if economy >= 40.0 {
                tally.reason("Exceptional fuel economy");
            } else {
                tally.reason("Great hybrid efficiency");
            }
        }
        Powertrain::Gas => {
            let points = economy_share(vehicle, weights.gas_reference_mpg) * weights.gas_efficiency_max;
            tally.award(ScoreFactor::Efficiency, points, format!("{economy:.0} mpg"));
            if economy >= 30.0 {
                tally.reason("Good fuel economy");
            }
        }
    }

    if profile.daily_miles() > weights.high_mileage_daily_miles && is_electrified(vehicle) {
        tally.award(
            ScoreFactor::Efficiency,
            weights.high_mileage_bonus,
            "electrified powertrain for a long commute",
        );
        tally.reason("Perfect for your daily commute");
    }

    if profile.preferred_powertrain == Some(vehicle.powertrain) {
        tally.award(
            ScoreFactor::PowertrainMatch,
            weights.powertrain_match,
            format!("{} matches preference", vehicle.powertrain.label()),
        );
    }
}

fn score_body(
    tally: &mut Tally,
    vehicle: &VehicleModel,
    profile: &UserProfile,
    weights: &InventoryWeights,
) {
    if let Some(preference) = profile.body_preference {
        if vehicle.body == preference {
            tally.award(
                ScoreFactor::BodyType,
                weights.body_match,
                format!("{} matches preference", preference.label()),
            );
            tally.reason(format!("Matches your {} preference", preference.label()));
        }
        return;
    }

    let Some(age) = profile.age else {
        return;
    };
    let seats = vehicle.seats.unwrap_or(0);
    if age > weights.family_suv_min_age
        && vehicle.body == BodyType::Suv
        && seats >= weights.family_suv_min_seats
    {
        tally.award(ScoreFactor::BodyType, weights.family_suv_bonus, "three-row suv");
        tally.reason("Spacious family vehicle");
    }
    if age < weights.young_driver_max_age
        && matches!(vehicle.body, BodyType::Sedan | BodyType::Hatchback)
    {
        tally.award(ScoreFactor::BodyType, weights.young_driver_bonus, "compact body for a young driver");
        tally.reason("Great for young professionals");
    }
}

fn score_finance_path(
    tally: &mut Tally,
    vehicle: &VehicleModel,
    profile: &UserProfile,
    weights: &InventoryWeights,
) {
    match profile.finance_path() {
        FinancePath::Lease => {
            if vehicle.is_model_year_at_least(weights.lease_new_model_year) {
                tally.award(ScoreFactor::FinancePath, weights.lease_new_model_bonus, "recent model year");
                tally.reason("Great lease option");
            }
            if is_electrified(vehicle) {
                tally.award(
                    ScoreFactor::FinancePath,
                    weights.lease_electrified_bonus,
                    "electrified lease incentives",
                );
                tally.reason("Strong lease incentives");
            }
        }
        FinancePath::Buy => {
            if is_hybrid(vehicle) {
                tally.award(ScoreFactor::FinancePath, weights.buy_hybrid_resale_bonus, "hybrid resale");
                tally.reason("Excellent resale value");
            }
            if vehicle.combined_economy() >= weights.buy_efficient_mpg {
                tally.award(ScoreFactor::FinancePath, weights.buy_efficient_bonus, "efficient to own");
                tally.reason("Long-term fuel savings");
            }
        }
        FinancePath::CreditBuild => {}
    }
}
