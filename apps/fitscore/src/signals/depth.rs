use serde::{Deserialize, Serialize};

use crate::config::AnalyzerSettings;
use crate::models::ChatTranscript;
use crate::signals::patterns::{RE_ADVANCED_TECHNICAL, RE_QUANTIFICATION, RE_STRUCTURAL};
use crate::signals::text::{clamp_unit, count_matches, mean, pattern_density, scaled_density, word_count};

/// Floor when no answer is long enough to carry a depth signal.
pub const INSUFFICIENT_DEPTH_SCORE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthFactors {
    pub length: f64,
    pub sophistication: f64,
    pub quantification: f64,
    pub structure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthReport {
    pub score: f64,
    /// `None` when the floor score was used.
    pub factors: Option<DepthFactors>,
}

/// Technical sophistication of the candidate's substantive answers.
pub fn analyze_depth(transcript: &ChatTranscript, settings: &AnalyzerSettings) -> DepthReport {
    let answers: Vec<&str> = transcript
        .candidate_turns()
        .map(|t| t.content.as_str())
        .filter(|c| c.chars().count() > settings.depth_min_turn_chars)
        .collect();

    if answers.is_empty() {
        return DepthReport {
            score: INSUFFICIENT_DEPTH_SCORE,
            factors: None,
        };
    }

    let lengths: Vec<f64> = answers.iter().map(|a| a.chars().count() as f64).collect();
    let average_length = mean(&lengths).unwrap_or(0.0);
    let length = clamp_unit(average_length / settings.depth_length_reference);

    // Sophistication is judged per answer, then averaged.
    let per_answer: Vec<f64> = answers
        .iter()
        .map(|a| pattern_density(&RE_ADVANCED_TECHNICAL, a, settings.sophistication_reference))
        .collect();
    let sophistication = mean(&per_answer).unwrap_or(0.0);

    // Quantification and structure are pooled over all answer words.
    let total_words: usize = answers.iter().map(|a| word_count(a)).sum();
    let quantified: usize = answers.iter().map(|a| count_matches(&RE_QUANTIFICATION, a)).sum();
    let structural: usize = answers.iter().map(|a| count_matches(&RE_STRUCTURAL, a)).sum();
    let quantification = scaled_density(quantified, total_words, settings.quantification_reference);
    let structure = scaled_density(structural, total_words, settings.structure_reference);

    let w = &settings.depth_weights;
    let score = clamp_unit(
        length * w.length
            + sophistication * w.sophistication
            + quantification * w.quantification
            + structure * w.structure,
    );

    DepthReport {
        score,
        factors: Some(DepthFactors {
            length,
            sophistication,
            quantification,
            structure,
        }),
    }
}
