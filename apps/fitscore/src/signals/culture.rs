use crate::models::{ChatTranscript, TurnIntent};
use crate::signals::patterns::RE_VALUES;
use crate::signals::text::{clamp_unit, mean, pattern_density};

/// Default when the interview never touched on values.
pub const NO_VALUES_SCORE: f64 = 0.6;

const VALUES_REFERENCE: f64 = 0.05;
const LENGTH_REFERENCE: f64 = 200.0;

/// Alignment with common workplace values, from answers to values questions.
pub fn analyze_culture(transcript: &ChatTranscript) -> f64 {
    let responses = transcript.responses_to(TurnIntent::Values);
    let lengths: Vec<f64> = responses
        .iter()
        .map(|t| t.content.chars().count() as f64)
        .collect();
    let Some(average_length) = mean(&lengths) else {
        return NO_VALUES_SCORE;
    };

    let text = responses
        .iter()
        .map(|t| t.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    clamp_unit(
        0.7 * pattern_density(&RE_VALUES, &text, VALUES_REFERENCE)
            + 0.3 * clamp_unit(average_length / LENGTH_REFERENCE),
    )
}
