//! Plain-language plan narration with a deterministic local fallback.

use crate::catalog::VehicleModel;
use crate::finance::ScenarioSeries;
use crate::profile::UserProfile;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error("narration backend unavailable: {0}")]
    Unavailable(String),
    #[error("narration request failed: {0}")]
    Failed(String),
}

/// Turns a prompt summarizing computed numbers into prose.
pub trait Narrator: Send + Sync {
    fn narrate(&self, prompt: &str) -> Result<String, NarrationError>;
}

/// One-sentence lease vs. buy summary for the chosen vehicle.
pub fn plan_summary(profile: &UserProfile, vehicle: &VehicleModel, series: &ScenarioSeries) -> String {
    let lease_total = series.lease_total();
    let buy_total = series.buy_total();
    format!(
        "If you lease the {}, your total cost after {} months is around ${:.0}, saving ~${:.0} compared to buying.",
        vehicle.name,
        profile.lease_months(),
        lease_total,
        buy_total - lease_total
    )
}

pub fn plan_prompt(profile: &UserProfile, vehicle: &VehicleModel, series: &ScenarioSeries) -> String {
    format!(
        "User profile:\n- Credit Score: {}\n- Monthly Income: ${}\nCar: {}\nLease Total: ${:.0}\nBuy Total: ${:.0}\nGoal: Explain to a normal person what this means and which is smarter.",
        profile.credit.label(),
        profile.monthly_income,
        vehicle.name,
        series.lease_total(),
        series.buy_total()
    )
}

/// Wraps an optional backend; never fails.
#[derive(Clone)]
pub struct PlanNarration {
    product_name: String,
    narrator: Option<Arc<dyn Narrator>>,
}

impl std::fmt::Debug for PlanNarration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanNarration")
            .field("product_name", &self.product_name)
            .field("narrator", &self.narrator.is_some())
            .finish()
    }
}

impl PlanNarration {
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            narrator: None,
        }
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn fallback(&self, prompt: &str) -> String {
        format!("{} summary (fallback): {prompt}", self.product_name)
    }

    pub fn narrate(&self, prompt: &str) -> String {
        let Some(narrator) = &self.narrator else {
            return self.fallback(prompt);
        };

        match narrator.narrate(prompt) {
            Ok(text) if text.trim().is_empty() => prompt.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                warn!(error = %err, "narration failed, using fallback");
                self.fallback(prompt)
            }
        }
    }
}
