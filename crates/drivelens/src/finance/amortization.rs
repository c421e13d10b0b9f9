/// Fixed-rate amortized payment. Degenerate or non-finite input yields 0.
pub fn monthly_payment(principal: f64, apr: f64, months: u32) -> f64 {
    if !principal.is_finite() || !apr.is_finite() {
        return 0.0;
    }
    if principal <= 0.0 || months == 0 {
        return 0.0;
    }

    let monthly_rate = apr / 12.0;
    if monthly_rate == 0.0 {
        return principal / f64::from(months);
    }

    let factor = (1.0 + monthly_rate).powf(-f64::from(months));
    let payment = principal * monthly_rate / (1.0 - factor);
    if payment.is_finite() {
        payment
    } else {
        0.0
    }
}

/// Interest paid over the life of the loan, floored at 0.
pub fn total_interest(principal: f64, apr: f64, months: u32) -> f64 {
    let payment = monthly_payment(principal, apr, months);
    if payment <= 0.0 {
        return 0.0;
    }
    (payment * f64::from(months) - principal).max(0.0)
}

/// Amount financed after the down payment; never negative.
pub fn principal_after_down_payment(price: f64, down_payment: f64) -> f64 {
    (price - down_payment).max(0.0)
}

/// Portion of the principal amortized over a lease.
pub fn lease_principal(principal: f64, residual_pct: f64) -> f64 {
    principal * (1.0 - residual_pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn regression_thirty_thousand_at_six_percent() {
        let payment = monthly_payment(30_000.0, 0.06, 60);
        assert!(payment > 550.0 && payment < 650.0, "payment {payment}");

        let interest = total_interest(30_000.0, 0.06, 60);
        assert!(interest > 0.0 && interest < 10_000.0, "interest {interest}");
    }

    #[test]
    fn zero_rate_divides_evenly() {
        assert_eq!(monthly_payment(12_000.0, 0.0, 48), 250.0);
        assert!(total_interest(12_000.0, 0.0, 48).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_resolve_to_zero() {
        assert_eq!(monthly_payment(0.0, 0.05, 60), 0.0);
        assert_eq!(monthly_payment(-100.0, 0.05, 60), 0.0);
        assert_eq!(monthly_payment(10_000.0, 0.05, 0), 0.0);
        assert_eq!(monthly_payment(f64::NAN, 0.05, 60), 0.0);
        assert_eq!(monthly_payment(10_000.0, f64::INFINITY, 60), 0.0);
        assert_eq!(total_interest(10_000.0, 0.05, 0), 0.0);
    }

    #[test]
    fn lease_principal_uses_residual() {
        assert!((lease_principal(30_000.0, 0.58) - 12_600.0).abs() < 1e-9);
        assert_eq!(principal_after_down_payment(20_000.0, 25_000.0), 0.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_payment_covers_principal(
            principal in 1u32..500_000,
            apr_bp in 0u32..3_000,
            months in 1u32..121
        ) {
            let principal = f64::from(principal);
            let apr = f64::from(apr_bp) / 10_000.0;
            let payment = monthly_payment(principal, apr, months);
            prop_assert!(payment > 0.0);
            prop_assert!(payment * f64::from(months) >= principal * (1.0 - 1e-9));

            let interest = total_interest(principal, apr, months);
            let expected = (payment * f64::from(months) - principal).max(0.0);
            prop_assert!((interest - expected).abs() < 1e-6);
        }
    }
}
