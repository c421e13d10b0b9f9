//! Month-by-month credit and net-worth trajectory.
//!
//! The update equations borrow the shape of a gated recurrent cell (forget,
//! input, and output gates over a scalar cell and hidden state) but nothing
//! here is trained. Treat the output as an illustrative heuristic, not a
//! statistically meaningful forecast.

use crate::advisor::scoring::payment_ratio;
use crate::profile::UserProfile;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRAJECTORY_MONTHS: u32 = 60;
/// Longest horizon simulated; longer requests are truncated here.
pub const MAX_TRAJECTORY_MONTHS: u32 = 600;
const SAMPLE_EVERY_MONTHS: u32 = 6;
const MAX_SCORE: f64 = 850.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub month: u32,
    pub credit_score: u16,
    pub net_worth: f64,
    pub total_paid: f64,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Simulate months `0..=months`, sampling every sixth month.
pub fn predict_credit_trajectory(
    profile: &UserProfile,
    monthly_payment: f64,
    months: u32,
) -> Vec<TrajectoryPoint> {
    let months = months.min(MAX_TRAJECTORY_MONTHS);
    let income = profile.total_income();
    let payment = if monthly_payment.is_finite() {
        monthly_payment.max(0.0)
    } else {
        0.0
    };
    // No income reads as a fully committed budget.
    let debt_ratio = payment_ratio(payment, income).unwrap_or(1.0);

    let base_increase = if debt_ratio < 0.15 {
        1.2
    } else if debt_ratio < 0.25 {
        0.8
    } else {
        0.4
    };

    let mut credit = f64::from(profile.credit.score());
    let mut cell = 0.5;
    let mut hidden = 0.5;
    let mut points = Vec::with_capacity((months / SAMPLE_EVERY_MONTHS + 1) as usize);

    for month in 0..=months {
        let m = f64::from(month);

        let forget = sigmoid(debt_ratio * -2.0 + hidden * 0.5);
        cell *= forget;

        let input = sigmoid(m * 0.01 + (1.0 - debt_ratio) * 2.0);
        let candidate = (m * 0.02 + credit * 0.001).tanh();
        cell += input * candidate;

        let output = sigmoid(cell + hidden);
        hidden = output * cell.tanh();

        let momentum = hidden * 20.0;
        credit = (credit + base_increase + momentum * 0.1).min(MAX_SCORE);

        if month % SAMPLE_EVERY_MONTHS == 0 {
            let equity = payment * 0.7 * m;
            let savings = (income - payment) * 0.1 * m;
            points.push(TrajectoryPoint {
                month,
                credit_score: credit.round() as u16,
                net_worth: (equity + savings).round(),
                total_paid: (payment * m).round(),
            });
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{CreditBand, CreditStanding};

    fn profile() -> UserProfile {
        UserProfile::new(6000.0, CreditStanding::Band(CreditBand::Good))
    }

    #[test]
    fn samples_every_six_months_including_zero() {
        let points = predict_credit_trajectory(&profile(), 450.0, 60);
        let months: Vec<u32> = points.iter().map(|point| point.month).collect();
        assert_eq!(months, vec![0, 6, 12, 18, 24, 30, 36, 42, 48, 54, 60]);
        assert_eq!(points[0].total_paid, 0.0);
        assert_eq!(points[10].total_paid, 27_000.0);
    }

    #[test]
    fn score_rises_and_caps_at_850() {
        let points = predict_credit_trajectory(&profile(), 450.0, 60);
        for pair in points.windows(2) {
            assert!(pair[1].credit_score >= pair[0].credit_score);
        }
        assert!(points[0].credit_score > 705);

        let mut strong = profile();
        strong.credit = CreditStanding::Score(845);
        let capped = predict_credit_trajectory(&strong, 300.0, 60);
        assert!(capped.iter().all(|point| point.credit_score <= 850));
        assert_eq!(capped.last().map(|point| point.credit_score), Some(850));
    }

    #[test]
    fn heavier_debt_grows_slower() {
        let light = predict_credit_trajectory(&profile(), 300.0, 60);
        let heavy = predict_credit_trajectory(&profile(), 2000.0, 60);
        assert!(light[10].credit_score > heavy[10].credit_score);
    }

    #[test]
    fn zero_income_does_not_panic() {
        let broke = UserProfile::new(0.0, CreditStanding::Score(600));
        let points = predict_credit_trajectory(&broke, 400.0, 12);
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn horizon_is_bounded() {
        let points = predict_credit_trajectory(&profile(), 450.0, u32::MAX);
        assert_eq!(points.len(), (MAX_TRAJECTORY_MONTHS / SAMPLE_EVERY_MONTHS + 1) as usize);
        assert_eq!(points.last().map(|point| point.month), Some(MAX_TRAJECTORY_MONTHS));
    }
}
