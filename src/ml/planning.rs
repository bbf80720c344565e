/// Risk classification and deterministic resource allocation for a single
/// forecast day.

use serde::{Deserialize, Serialize};

/// Risk tier for one day's predicted admission load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `< 100` LOW, `100 <= x < 200` MEDIUM, `>= 200` HIGH. The raw
    /// prediction is compared unrounded.
    pub fn classify(predicted_admissions: f64) -> Self {
        if predicted_admissions < 100.0 {
            Self::Low
        } else if predicted_admissions < 200.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Incremental staffing and beds above the standing roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourcePlan {
    pub extra_beds: u32,
    pub extra_doctors: u32,
    pub extra_nurses: u32,
}

/// Admissions the standing roster absorbs without surge staffing.
pub const BASELINE_ADMISSIONS: f64 = 100.0;

/// One surge step per this many patients above baseline.
const STEP_SIZE: f64 = 20.0;

/// Every full 20 patients above the 100-patient baseline adds one surge
/// step: 2 beds, 1 doctor, 2 nurses. Uncapped; capacity ceilings are an
/// operational concern.
pub fn plan_resources(predicted_admissions: f64) -> ResourcePlan {
    let excess = (predicted_admissions - BASELINE_ADMISSIONS).max(0.0);
    let steps = (excess / STEP_SIZE).floor() as u32;

    ResourcePlan {
        extra_beds: 2 * steps,
        extra_doctors: steps,
        extra_nurses: 2 * steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_risk_boundaries_are_exact() {
        assert_eq!(RiskLevel::classify(99.999), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(100.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(199.999), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(200.0), RiskLevel::High);
        assert_eq!(RiskLevel::classify(0.0), RiskLevel::Low);
    }

    #[test]
    fn test_risk_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), "\"LOW\"");
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
    }

    #[test]
    fn test_no_extras_at_or_below_baseline() {
        for x in [0.0, 50.0, 99.9, 100.0] {
            let plan = plan_resources(x);
            assert_eq!(plan.extra_beds, 0);
            assert_eq!(plan.extra_doctors, 0);
            assert_eq!(plan.extra_nurses, 0);
        }
    }

    #[test]
    fn test_two_full_steps_at_140() {
        let plan = plan_resources(140.0);
        assert_eq!(plan.extra_beds, 4);
        assert_eq!(plan.extra_doctors, 2);
        assert_eq!(plan.extra_nurses, 4);
    }

    #[test]
    fn test_partial_steps_round_down() {
        // 139 admissions is one full step plus change.
        let plan = plan_resources(139.0);
        assert_eq!(plan.extra_beds, 2);
        assert_eq!(plan.extra_doctors, 1);
        assert_eq!(plan.extra_nurses, 2);
    }

    #[test]
    fn test_extras_are_monotonic_in_load() {
        let mut prev = plan_resources(0.0);
        for tenth in 1..3000 {
            let plan = plan_resources(tenth as f64 / 10.0);
            assert!(plan.extra_beds >= prev.extra_beds);
            assert!(plan.extra_doctors >= prev.extra_doctors);
            assert!(plan.extra_nurses >= prev.extra_nurses);
            prev = plan;
        }
    }

    #[test]
    fn test_surge_is_uncapped() {
        let plan = plan_resources(1000.0);
        assert_eq!(plan.extra_doctors, 45);
        assert_eq!(plan.extra_beds, 90);
        assert_eq!(plan.extra_nurses, 90);
    }
}
