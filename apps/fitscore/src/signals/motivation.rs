use crate::config::AnalyzerSettings;
use crate::models::{CandidateProfile, ChatTranscript, TurnIntent};
use crate::signals::patterns::{
    RE_COMPANY, RE_FUTURE, RE_PASSION, RE_PERSONAL_PASSION, RE_RESEARCH, RE_ROLE, RE_SPECIFICITY,
};
use crate::signals::text::{clamp_unit, count_matches, mean, pattern_density};

/// Weak-neutral default when there is no motivation data at all.
pub const NO_MOTIVATION_SCORE: f64 = 0.4;

/// Keyword density that earns full credit in motivation answers (5% of words).
const KEYWORD_REFERENCE: f64 = 0.05;

/// Genuineness of stated motivation, from up to three independent sources.
pub fn analyze_motivation(
    profile: &CandidateProfile,
    transcript: &ChatTranscript,
    settings: &AnalyzerSettings,
) -> f64 {
    let sources: Vec<f64> = [
        transcript_motivation(transcript, settings),
        profile
            .why_us()
            .filter(|text| text.chars().count() > settings.why_us_min_chars)
            .map(why_us_motivation),
        profile
            .intro()
            .filter(|text| text.chars().count() > settings.intro_min_chars)
            .map(|text| pattern_density(&RE_PERSONAL_PASSION, text, KEYWORD_REFERENCE)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let Some(combined) = mean(&sources) else {
        return NO_MOTIVATION_SCORE;
    };

    if sources.len() > 1 {
        clamp_unit(combined * (1.0 + settings.motivation_boost))
    } else {
        clamp_unit(combined)
    }
}

fn transcript_motivation(transcript: &ChatTranscript, settings: &AnalyzerSettings) -> Option<f64> {
    let responses = transcript.responses_to(TurnIntent::Motivation);
    if responses.is_empty() {
        return None;
    }
    let text = responses
        .iter()
        .map(|t| t.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let lengths: Vec<f64> = responses
        .iter()
        .map(|t| t.content.chars().count() as f64)
        .collect();
    let length = clamp_unit(mean(&lengths)? / settings.motivation_length_reference);

    Some(clamp_unit(
        0.30 * pattern_density(&RE_PASSION, &text, KEYWORD_REFERENCE)
            + 0.25 * pattern_density(&RE_SPECIFICITY, &text, KEYWORD_REFERENCE)
            + 0.25 * pattern_density(&RE_FUTURE, &text, KEYWORD_REFERENCE)
            + 0.20 * length,
    ))
}

/// Company-specific, role-specific and research language in the "why us" field.
/// Each is saturating in raw hit count rather than density, since the field is short.
fn why_us_motivation(text: &str) -> f64 {
    let saturate = |hits: usize, full: f64| clamp_unit(hits as f64 / full);
    clamp_unit(
        0.4 * saturate(count_matches(&RE_COMPANY, text), 3.0)
            + 0.3 * saturate(count_matches(&RE_ROLE, text), 3.0)
            + 0.3 * saturate(count_matches(&RE_RESEARCH, text), 2.0),
    )
}
