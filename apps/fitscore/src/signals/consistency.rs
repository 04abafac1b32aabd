use crate::config::AnalyzerSettings;
use crate::models::ChatTranscript;
use crate::signals::patterns::RE_TECHNICAL;
use crate::signals::text::{clamp_unit, count_matches, jaccard, mean, variance, word_count, word_set};

/// Returned when there are too few candidate turns to compare.
pub const INSUFFICIENT_TURNS_SCORE: f64 = 0.5;
/// Returned when turns exist but no factor could be computed from them.
pub const NO_FACTOR_SCORE: f64 = 0.6;

/// Response-to-response stability across the candidate's answers.
///
/// Averages whichever of length, vocabulary and technical-density
/// consistency could be computed.
pub fn analyze_consistency(transcript: &ChatTranscript, settings: &AnalyzerSettings) -> f64 {
    let responses: Vec<&str> = transcript
        .candidate_turns()
        .map(|t| t.content.as_str())
        .collect();

    if responses.len() < settings.consistency_min_turns {
        return INSUFFICIENT_TURNS_SCORE;
    }

    let factors: Vec<f64> = [
        length_consistency(&responses),
        vocabulary_consistency(&responses),
        technical_density_consistency(&responses, settings.density_variance_scale),
    ]
    .into_iter()
    .flatten()
    .collect();

    mean(&factors).map(clamp_unit).unwrap_or(NO_FACTOR_SCORE)
}

/// `1 - var / mean²` over word counts.
fn length_consistency(responses: &[&str]) -> Option<f64> {
    if responses.len() < 2 {
        return None;
    }
    let counts: Vec<f64> = responses.iter().map(|r| word_count(r) as f64).collect();
    let m = mean(&counts)?;
    if m == 0.0 {
        return None;
    }
    let var = variance(&counts)?;
    Some(clamp_unit(1.0 - var / (m * m)))
}

/// Mean pairwise Jaccard similarity of lowercased word sets.
fn vocabulary_consistency(responses: &[&str]) -> Option<f64> {
    let sets: Vec<_> = responses.iter().map(|r| word_set(r)).collect();
    let mut similarities = Vec::new();
    for (i, a) in sets.iter().enumerate() {
        for b in &sets[i + 1..] {
            if let Some(similarity) = jaccard(a, b) {
                similarities.push(similarity);
            }
        }
    }
    mean(&similarities)
}

fn technical_density_consistency(responses: &[&str], variance_scale: f64) -> Option<f64> {
    let densities: Vec<f64> = responses
        .iter()
        .filter_map(|r| {
            let words = word_count(r);
            (words > 0).then(|| count_matches(&RE_TECHNICAL, r) as f64 / words as f64)
        })
        .collect();
    if densities.len() < 2 {
        return None;
    }
    let var = variance(&densities)?;
    Some(clamp_unit(1.0 - variance_scale * var))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transcript::{Turn, TurnIntent, TurnRole};

    fn transcript_of(answers: &[&str]) -> ChatTranscript {
        let turns = answers
            .iter()
            .enumerate()
            .flat_map(|(i, answer)| {
                [
                    Turn::new(TurnRole::Interviewer, TurnIntent::SkillProbe, "Tell me more", 2 * i as u32),
                    Turn::new(TurnRole::Candidate, TurnIntent::Other, *answer, 2 * i as u32 + 1),
                ]
            })
            .collect();
        ChatTranscript::new(turns)
    }

    #[test]
    fn test_fewer_than_three_turns_is_neutral() {
        let settings = AnalyzerSettings::default();
        assert_eq!(analyze_consistency(&ChatTranscript::default(), &settings), 0.5);
        let two = transcript_of(&["I built an api", "I tuned the database"]);
        assert_eq!(analyze_consistency(&two, &settings), 0.5);
    }

    #[test]
    fn test_near_identical_answers_score_high() {
        let answers = [
            "I designed the payment api in python and deployed it with docker on our cloud servers",
            "I designed the search api in python and deployed it with docker on our cloud servers",
            "I designed the billing api in python and deployed it with docker on our cloud servers",
            "I designed the reporting api in python and deployed it with docker on our cloud servers",
            "I designed the auth api in python and deployed it with docker on our cloud servers",
        ];
        let score = analyze_consistency(&transcript_of(&answers), &AnalyzerSettings::default());
        assert!(score > 0.7, "expected > 0.7, got {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn test_erratic_answers_score_lower_than_steady_ones() {
        let settings = AnalyzerSettings::default();
        let steady = transcript_of(&[
            "We cached results in redis to cut latency",
            "We cached sessions in redis to cut latency",
            "We cached tokens in redis to cut latency",
        ]);
        let erratic = transcript_of(&[
            "Yes",
            "Honestly I spent most of last year gardening and thinking about what I want to do next with my life and family",
            "api server database cache deploy",
        ]);
        assert!(analyze_consistency(&steady, &settings) > analyze_consistency(&erratic, &settings));
    }

    #[test]
    fn test_blank_answers_fall_back_to_default() {
        let score = analyze_consistency(&transcript_of(&["", "  ", "\n"]), &AnalyzerSettings::default());
        assert_eq!(score, NO_FACTOR_SCORE);
    }
}
