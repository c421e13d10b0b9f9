use crate::profile::{CreditBand, CreditStanding};

/// APR used for band labels that do not match any known range.
pub const DEFAULT_BAND_APR: f64 = 0.07;

/// Adjust a catalog base APR by numeric credit tier. Never negative.
pub fn apr_from_credit(score: f64, base_apr: f64) -> f64 {
    if !score.is_finite() || !base_apr.is_finite() {
        return base_apr;
    }

    let adjusted = if score >= 760.0 {
        base_apr - 0.01
    } else if score >= 700.0 {
        base_apr
    } else if score >= 640.0 {
        base_apr + 0.01
    } else {
        base_apr + 0.02
    };
    adjusted.max(0.0)
}

/// Absolute APR for a credit band.
pub fn apr_from_band(band: CreditBand) -> f64 {
    match band {
        CreditBand::Poor => 0.14,
        CreditBand::Fair => 0.10,
        CreditBand::Good => 0.07,
        CreditBand::VeryGood => 0.05,
        CreditBand::Excellent => 0.04,
    }
}

/// Band lookup on a raw label, e.g. "670-739".
pub fn apr_from_band_label(label: &str) -> f64 {
    CreditBand::parse(label)
        .map(apr_from_band)
        .unwrap_or(DEFAULT_BAND_APR)
}

/// Numeric scores adjust the vehicle's base APR; band labels map straight to
/// the band table.
pub fn apr_for_standing(credit: CreditStanding, base_apr: f64) -> f64 {
    match credit {
        CreditStanding::Score(score) => apr_from_credit(f64::from(score), base_apr),
        CreditStanding::Band(band) => apr_from_band(band),
    }
}
