use crate::config::AnalyzerSettings;
use crate::models::{CandidateProfile, ChatTranscript};
use crate::resume::short_tenure_count;
use crate::signals::patterns::RE_CAREER_PLANNING;
use crate::signals::text::clamp_unit;

const BASE_TURNOVER_RISK: f64 = 0.3;
const RISK_STEP: f64 = 0.1;
const MIN_TURNOVER_RISK: f64 = 0.1;
const MAX_TURNOVER_RISK: f64 = 0.9;
/// Short tenures needed before the résumé reads as job hopping.
const JOB_HOPPING_TENURES: usize = 3;
const SUBSTANTIAL_RESUME_CHARS: usize = 100;

/// Likelihood the candidate leaves early, in [0.1, 0.9].
pub fn assess_turnover_risk(profile: &CandidateProfile, transcript: &ChatTranscript) -> f64 {
    let mut risk = BASE_TURNOVER_RISK;

    if transcript
        .candidate_turns()
        .any(|t| RE_CAREER_PLANNING.is_match(&t.content))
    {
        risk -= RISK_STEP;
    }

    let job_hopping = profile
        .resume()
        .is_some_and(|text| short_tenure_count(text) >= JOB_HOPPING_TENURES);
    if job_hopping {
        risk += RISK_STEP;
    }

    risk.clamp(MIN_TURNOVER_RISK, MAX_TURNOVER_RISK)
}

/// How much reliable data the assessment rests on.
pub fn assess_data_confidence(
    profile: &CandidateProfile,
    transcript: &ChatTranscript,
    settings: &AnalyzerSettings,
) -> f64 {
    let expected_turns = (settings.min_interview_turns * 2) as f64;
    let chat_completeness = clamp_unit(transcript.len() as f64 / expected_turns);

    let resume_quality = match profile.resume() {
        Some(text) if text.chars().count() > SUBSTANTIAL_RESUME_CHARS => 1.0,
        _ => 0.5,
    };

    let present = [
        profile.intro().is_some(),
        profile.why_us().is_some(),
        profile.has_linkedin,
        profile.has_github,
    ];
    let profile_completeness =
        present.iter().filter(|p| **p).count() as f64 / present.len() as f64;

    clamp_unit((chat_completeness + resume_quality + profile_completeness) / 3.0)
}
