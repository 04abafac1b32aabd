use crate::config::{Thresholds, ValidatedConfig};
use crate::models::{CandidateSignals, FitBucket};
use crate::signals::text::clamp_unit;

/// Result of combining signals and role fit into one score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composite {
    pub fit_score: f64,
    pub fit_bucket: FitBucket,
    pub raw_score: f64,
    pub confidence_multiplier: f64,
    pub fraud_penalty_applied: bool,
    pub reliability: f64,
}

/// Weighted sum of the five components, discounted by data confidence and
/// penalized when the credibility flag is set.
pub fn compose(signals: &CandidateSignals, role_fit: f64, config: &ValidatedConfig) -> Composite {
    let w = &config.weights;
    let confidence = clamp_unit(signals.data_confidence);
    let reliability = 1.0 - clamp_unit(signals.turnover_risk);

    let raw_score = clamp_unit(
        clamp_unit(role_fit) * w.role_fit
            + clamp_unit(signals.depth_score) * w.depth
            + clamp_unit(signals.motivation_alignment) * w.motivation
            + reliability * w.reliability
            + confidence * w.confidence,
    );

    let confidence_multiplier = 0.5 + 0.5 * confidence;
    let mut fit_score = raw_score * confidence_multiplier;

    let fraud_penalty_applied = signals.credibility_flag;
    if fraud_penalty_applied {
        fit_score *= config.fraud_penalty_multiplier;
    }
    let fit_score = clamp_unit(fit_score);

    Composite {
        fit_score,
        fit_bucket: classify_bucket(fit_score, &config.thresholds),
        raw_score,
        confidence_multiplier,
        fraud_penalty_applied,
        reliability,
    }
}

pub fn classify_bucket(score: f64, thresholds: &Thresholds) -> FitBucket {
    if score >= thresholds.top {
        FitBucket::Top
    } else if score >= thresholds.borderline {
        FitBucket::Borderline
    } else {
        FitBucket::Low
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::config::ScoringConfig;

    const EPS: f64 = 1e-9;

    fn config() -> ValidatedConfig {
        ScoringConfig::default().validate().unwrap()
    }

    /// Every component at 0.8, including reliability (turnover risk 0.2).
    fn uniform_signals(credibility_flag: bool) -> CandidateSignals {
        CandidateSignals {
            consistency_score: 0.8,
            depth_score: 0.8,
            motivation_alignment: 0.8,
            culture_alignment: 0.8,
            turnover_risk: 0.2,
            data_confidence: 0.8,
            credibility_flag,
            flags: BTreeSet::new(),
        }
    }

    #[test]
    fn test_uniform_components_land_borderline() {
        let composite = compose(&uniform_signals(false), 0.8, &config());
        assert!((composite.raw_score - 0.8).abs() < EPS);
        assert!((composite.confidence_multiplier - 0.9).abs() < EPS);
        assert!((composite.fit_score - 0.72).abs() < EPS);
        assert_eq!(composite.fit_bucket, FitBucket::Borderline);
        assert!(!composite.fraud_penalty_applied);
    }

    #[test]
    fn test_fraud_penalty_drops_to_low() {
        let composite = compose(&uniform_signals(true), 0.8, &config());
        assert!((composite.fit_score - 0.18).abs() < EPS);
        assert_eq!(composite.fit_bucket, FitBucket::Low);
        assert!(composite.fraud_penalty_applied);
    }

    #[test]
    fn test_fraud_flag_never_raises_score() {
        let config = config();
        for role_fit in [0.0, 0.3, 0.6, 1.0] {
            let clean = compose(&uniform_signals(false), role_fit, &config).fit_score;
            let flagged = compose(&uniform_signals(true), role_fit, &config).fit_score;
            assert!(flagged <= clean * config.fraud_penalty_multiplier + EPS);
            assert!(flagged < clean);
        }
    }

    #[test]
    fn test_bucket_is_monotonic_in_score() {
        let thresholds = Thresholds::default();
        let mut previous = FitBucket::Low;
        for step in 0..=100 {
            let bucket = classify_bucket(step as f64 / 100.0, &thresholds);
            assert!(bucket >= previous);
            previous = bucket;
        }
        assert_eq!(classify_bucket(0.75, &thresholds), FitBucket::Top);
        assert_eq!(classify_bucket(0.50, &thresholds), FitBucket::Borderline);
        assert_eq!(classify_bucket(0.4999, &thresholds), FitBucket::Low);
    }

    #[test]
    fn test_extreme_inputs_stay_in_bounds() {
        let config = config();
        let mut signals = uniform_signals(false);
        for value in [0.0, 1.0] {
            signals.depth_score = value;
            signals.motivation_alignment = value;
            signals.turnover_risk = 1.0 - value;
            signals.data_confidence = value;
            let composite = compose(&signals, value, &config);
            assert!((0.0..=1.0).contains(&composite.fit_score));
            assert!(composite.fit_score <= composite.raw_score + EPS);
        }
    }
}
