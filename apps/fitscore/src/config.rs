use std::ops::Deref;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_WORKERS: usize = 8;

/// Process configuration loaded from environment variables (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional JSON file holding a `ScoringConfig`; built-in defaults otherwise.
    pub scoring_config_path: Option<PathBuf>,
    pub job_profile_url: Option<String>,
    pub job_profile_timeout_secs: u64,
    pub workers: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let job_profile_timeout_secs = match lookup("JOB_PROFILE_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnv {
                key: "JOB_PROFILE_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let workers = match lookup("SCORING_WORKERS") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| ConfigError::InvalidEnv {
                key: "SCORING_WORKERS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_WORKERS,
        };
        if workers == 0 {
            return Err(ConfigError::InvalidEnv {
                key: "SCORING_WORKERS",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Config {
            scoring_config_path: lookup("SCORING_CONFIG")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            job_profile_url: lookup("JOB_PROFILE_URL").filter(|u| !u.trim().is_empty()),
            job_profile_timeout_secs,
            workers,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Loads and validates the scoring configuration. Called once at startup.
    pub fn load_scoring_config(&self) -> Result<ValidatedConfig, ConfigError> {
        let scoring = match &self.scoring_config_path {
            Some(path) => ScoringConfig::from_file(path)?,
            None => ScoringConfig::default(),
        };
        scoring.validate()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring configuration
// ────────────────────────────────────────────────────────────────────────────

/// Weights of the five composite components. Must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub role_fit: f64,
    #[serde(alias = "capability_depth")]
    pub depth: f64,
    #[serde(alias = "motivation_alignment")]
    pub motivation: f64,
    #[serde(alias = "reliability_inverse_turnover")]
    pub reliability: f64,
    #[serde(alias = "data_confidence")]
    pub confidence: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            role_fit: 0.35,
            depth: 0.20,
            motivation: 0.15,
            reliability: 0.15,
            confidence: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub top: f64,
    pub borderline: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            top: 0.75,
            borderline: 0.50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthWeights {
    pub length: f64,
    pub sophistication: f64,
    pub quantification: f64,
    pub structure: f64,
}

impl Default for DepthWeights {
    fn default() -> Self {
        Self {
            length: 0.2,
            sophistication: 0.4,
            quantification: 0.25,
            structure: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleFitWeights {
    pub mandatory: f64,
    pub preferred: f64,
    pub experience: f64,
    pub focus: f64,
}

impl Default for RoleFitWeights {
    fn default() -> Self {
        Self {
            mandatory: 0.40,
            preferred: 0.25,
            experience: 0.20,
            focus: 0.15,
        }
    }
}

/// Normalization constants used by the heuristic analyzers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    pub consistency_min_turns: usize,
    pub density_variance_scale: f64,
    pub depth_min_turn_chars: usize,
    pub depth_length_reference: f64,
    pub depth_weights: DepthWeights,
    /// Advanced-term density that earns full sophistication credit (10% of words).
    pub sophistication_reference: f64,
    pub quantification_reference: f64,
    pub structure_reference: f64,
    pub motivation_length_reference: f64,
    /// Corroboration boost applied when more than one motivation source exists.
    pub motivation_boost: f64,
    pub why_us_min_chars: usize,
    pub intro_min_chars: usize,
    pub trap_response_min_chars: usize,
    pub role_fit_weights: RoleFitWeights,
    /// Matching skills per focus area that earn full credit.
    pub focus_skill_reference: f64,
    /// Share of role fit taken from skill matching; the rest comes from depth.
    pub role_depth_blend: f64,
    pub min_interview_turns: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            consistency_min_turns: 3,
            density_variance_scale: 10.0,
            depth_min_turn_chars: 50,
            depth_length_reference: 400.0,
            depth_weights: DepthWeights::default(),
            sophistication_reference: 0.10,
            quantification_reference: 0.05,
            structure_reference: 0.05,
            motivation_length_reference: 200.0,
            motivation_boost: 0.10,
            why_us_min_chars: 20,
            intro_min_chars: 30,
            trap_response_min_chars: 20,
            role_fit_weights: RoleFitWeights::default(),
            focus_skill_reference: 3.0,
            role_depth_blend: 0.8,
            min_interview_turns: 5,
        }
    }
}

/// Complete scoring configuration as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default = "default_fraud_penalty")]
    pub fraud_penalty_multiplier: f64,
    #[serde(default)]
    pub analyzer: AnalyzerSettings,
}

fn default_fraud_penalty() -> f64 {
    0.25
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            thresholds: Thresholds::default(),
            fraud_penalty_multiplier: default_fraud_penalty(),
            analyzer: AnalyzerSettings::default(),
        }
    }
}

impl ScoringConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Checks every invariant the scorer relies on. The only way to obtain a
    /// `ValidatedConfig`, so an invalid configuration never reaches scoring.
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let w = &self.weights;
        check_weight_group(
            "composite",
            &[
                ("role_fit", w.role_fit),
                ("depth", w.depth),
                ("motivation", w.motivation),
                ("reliability", w.reliability),
                ("confidence", w.confidence),
            ],
        )?;

        let t = &self.thresholds;
        let thresholds_ok = t.top.is_finite()
            && t.borderline.is_finite()
            && 0.0 < t.borderline
            && t.borderline < t.top
            && t.top < 1.0;
        if !thresholds_ok {
            return Err(ConfigError::InvalidThresholds {
                top: t.top,
                borderline: t.borderline,
            });
        }

        let penalty = self.fraud_penalty_multiplier;
        if !(penalty.is_finite() && penalty > 0.0 && penalty < 1.0) {
            return Err(ConfigError::InvalidFraudPenalty(penalty));
        }

        self.analyzer.validate()?;

        Ok(ValidatedConfig(self))
    }
}

impl AnalyzerSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.depth_weights;
        check_weight_group(
            "depth",
            &[
                ("length", d.length),
                ("sophistication", d.sophistication),
                ("quantification", d.quantification),
                ("structure", d.structure),
            ],
        )?;

        let r = &self.role_fit_weights;
        check_weight_group(
            "role fit",
            &[
                ("mandatory", r.mandatory),
                ("preferred", r.preferred),
                ("experience", r.experience),
                ("focus", r.focus),
            ],
        )?;

        let references = [
            ("density_variance_scale", self.density_variance_scale),
            ("depth_length_reference", self.depth_length_reference),
            ("sophistication_reference", self.sophistication_reference),
            ("quantification_reference", self.quantification_reference),
            ("structure_reference", self.structure_reference),
            ("motivation_length_reference", self.motivation_length_reference),
            ("focus_skill_reference", self.focus_skill_reference),
        ];
        for (name, value) in references {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidSetting { name, value });
            }
        }

        if !(self.motivation_boost.is_finite() && self.motivation_boost >= 0.0) {
            return Err(ConfigError::InvalidSetting {
                name: "motivation_boost",
                value: self.motivation_boost,
            });
        }
        if !(0.0..=1.0).contains(&self.role_depth_blend) {
            return Err(ConfigError::InvalidSetting {
                name: "role_depth_blend",
                value: self.role_depth_blend,
            });
        }
        // Pairwise comparisons need at least two turns.
        if self.consistency_min_turns < 2 {
            return Err(ConfigError::InvalidSetting {
                name: "consistency_min_turns",
                value: self.consistency_min_turns as f64,
            });
        }
        if self.min_interview_turns == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "min_interview_turns",
                value: 0.0,
            });
        }

        Ok(())
    }
}

fn check_weight_group(group: &'static str, weights: &[(&'static str, f64)]) -> Result<(), ConfigError> {
    for &(name, value) in weights {
        if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
            return Err(ConfigError::InvalidWeight { name, value });
        }
    }
    let sum: f64 = weights.iter().map(|(_, v)| v).sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::WeightSum { group, sum });
    }
    Ok(())
}

/// A `ScoringConfig` that passed validation. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig(ScoringConfig);

impl Deref for ValidatedConfig {
    type Target = ScoringConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
