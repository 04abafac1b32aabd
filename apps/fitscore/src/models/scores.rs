use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::job::RoleLevel;

/// Bounded sub-scores extracted from a transcript and profile.
/// Recomputed wholesale on every call; every float lies in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSignals {
    pub consistency_score: f64,
    pub depth_score: f64,
    pub motivation_alignment: f64,
    pub culture_alignment: f64,
    pub turnover_risk: f64,
    pub data_confidence: f64,
    /// Set when a trap question received a confident, detailed answer.
    pub credibility_flag: bool,
    pub flags: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitBucket {
    Low,
    Borderline,
    Top,
}

impl FitBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            FitBucket::Top => "top",
            FitBucket::Borderline => "borderline",
            FitBucket::Low => "low",
        }
    }
}

/// Per-factor view of the role-fit calculation, kept for reviewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleFitFactors {
    pub mandatory_match: f64,
    pub preferred_match: f64,
    pub experience_match: f64,
    pub focus_alignment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleFitBreakdown {
    /// `None` when the job had no requirements and the skill-count heuristic was used.
    pub factors: Option<RoleFitFactors>,
    pub matched_mandatory: Vec<String>,
    pub missing_mandatory: Vec<String>,
    pub candidate_level: RoleLevel,
    /// Role fit before the depth blend.
    pub skill_fit: f64,
    pub role_fit: f64,
}

impl RoleFitBreakdown {
    pub fn is_degenerate(&self) -> bool {
        self.factors.is_none()
    }
}

/// Every intermediate of the composite calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub role_fit: f64,
    pub depth: f64,
    pub motivation: f64,
    pub reliability: f64,
    pub confidence: f64,
    pub raw_score: f64,
    pub confidence_multiplier: f64,
    pub fraud_penalty_applied: bool,
    pub role_fit_detail: RoleFitBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub fit_score: f64,
    pub fit_bucket: FitBucket,
    pub computed_at: DateTime<Utc>,
    pub breakdown: ScoreBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_ordering_is_low_to_top() {
        assert!(FitBucket::Low < FitBucket::Borderline);
        assert!(FitBucket::Borderline < FitBucket::Top);
    }

    #[test]
    fn test_bucket_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FitBucket::Borderline).unwrap(),
            r#""borderline""#
        );
        assert_eq!(FitBucket::Top.as_str(), "top");
    }
}
