use super::common::*;

use crate::advisor::{EligibilityDecision, EligibilityPolicy, IneligibilityReason};
use crate::profile::CreditBand;

#[test]
fn income_below_floor_is_rejected_first() {
    let decision = EligibilityPolicy::default().evaluate(&profile(2_000.0, CreditBand::Poor));

    match &decision {
        EligibilityDecision::Ineligible(IneligibilityReason::IncomeBelowFloor {
            total_income,
            minimum,
        }) => {
            assert_eq!(*total_income, 2_000.0);
            assert_eq!(*minimum, 2_500.0);
        }
        other => panic!("expected income floor rejection, got {other:?}"),
    }

    let view = decision.view();
    assert!(!view.eligible);
    assert!(view
        .reason
        .as_deref()
        .expect("reason present")
        .contains("$2,000"));
    assert_eq!(view.suggested_actions.map(|actions| actions.len()), Some(5));
}

#[test]
fn solid_income_with_excellent_credit_is_eligible() {
    let decision = EligibilityPolicy::default().evaluate(&profile(5_000.0, CreditBand::Excellent));
    assert!(decision.is_eligible());

    let view = decision.view();
    assert!(view.eligible);
    assert!(view.reason.is_none());
    assert!(view.suggested_actions.is_none());
}

#[test]
fn spouse_income_counts_toward_the_floor() {
    let mut household = profile(1_500.0, CreditBand::Good);
    household.spouse_income = Some(1_500.0);
    assert!(EligibilityPolicy::default().evaluate(&household).is_eligible());
}

#[test]
fn worst_band_needs_higher_income() {
    let decision = EligibilityPolicy::default().evaluate(&profile(3_000.0, CreditBand::Poor));
    assert!(matches!(
        decision,
        EligibilityDecision::Ineligible(IneligibilityReason::PoorCreditLowIncome { .. })
    ));
    let actions = decision.view().suggested_actions.expect("actions");
    assert!(actions.iter().any(|action| action.contains("$3,500")));

    assert!(EligibilityPolicy::default()
        .evaluate(&profile(3_600.0, CreditBand::Poor))
        .is_eligible());
}

#[test]
fn payment_capacity_is_checked_against_cheapest_vehicle() {
    let policy = EligibilityPolicy {
        cheapest_vehicle_price: 30_000.0,
        cheapest_vehicle_term_months: 36,
        ..EligibilityPolicy::default()
    };
    let decision = policy.evaluate(&profile(4_000.0, CreditBand::Good));

    match decision {
        EligibilityDecision::Ineligible(IneligibilityReason::PaymentCapacityTooLow {
            max_payment,
            cheapest_payment,
        }) => {
            assert!((max_payment - 600.0).abs() < 1e-9);
            assert!(cheapest_payment > max_payment);
        }
        other => panic!("expected payment capacity rejection, got {other:?}"),
    }
}
