//! Heuristic signal extraction from a transcript and profile.
//!
//! Every analyzer is a pure function with an explicit default for thin
//! input, so extraction always yields a complete, bounded `CandidateSignals`.

pub mod consistency;
pub mod credibility;
pub mod culture;
pub mod depth;
pub mod motivation;
pub mod patterns;
pub mod reliability;
pub mod text;

use std::collections::BTreeSet;

use crate::config::ValidatedConfig;
use crate::models::{CandidateProfile, CandidateSignals, ChatTranscript};

pub use consistency::analyze_consistency;
pub use credibility::check_credibility;
pub use culture::analyze_culture;
pub use depth::{analyze_depth, DepthReport};
pub use motivation::analyze_motivation;
pub use reliability::{assess_data_confidence, assess_turnover_risk};

pub const FLAG_DETAILED_RESPONSES: &str = "detailed-responses";
pub const FLAG_DIVERSE_SKILLS: &str = "diverse-skills";
pub const FLAG_STRONG_ONLINE_PRESENCE: &str = "strong-online-presence";
pub const FLAG_TRAP_ANSWERED: &str = "trap-answered";
pub const FLAG_THIN_TRANSCRIPT: &str = "thin-transcript";
pub const FLAG_QUANTIFIED_CLAIMS: &str = "quantified-claims";

const DETAILED_RESPONSE_CHARS: f64 = 200.0;
const DIVERSE_SKILL_COUNT: usize = 7;
const THIN_TRANSCRIPT_TURNS: usize = 3;
const QUANTIFIED_CLAIMS_FACTOR: f64 = 0.5;

/// Extracts every signal for one candidate. Deterministic in its inputs.
pub fn compute_signals(
    profile: &CandidateProfile,
    transcript: &ChatTranscript,
    config: &ValidatedConfig,
) -> CandidateSignals {
    let settings = &config.analyzer;
    let depth = analyze_depth(transcript, settings);
    let credibility_flag = check_credibility(transcript, settings);

    CandidateSignals {
        consistency_score: analyze_consistency(transcript, settings),
        depth_score: depth.score,
        motivation_alignment: analyze_motivation(profile, transcript, settings),
        culture_alignment: analyze_culture(transcript),
        turnover_risk: assess_turnover_risk(profile, transcript),
        data_confidence: assess_data_confidence(profile, transcript, settings),
        credibility_flag,
        flags: extract_flags(profile, transcript, &depth, credibility_flag),
    }
}

fn extract_flags(
    profile: &CandidateProfile,
    transcript: &ChatTranscript,
    depth: &DepthReport,
    credibility_flag: bool,
) -> BTreeSet<String> {
    let mut flags = BTreeSet::new();

    let lengths: Vec<f64> = transcript
        .candidate_turns()
        .map(|t| t.content.chars().count() as f64)
        .collect();
    if text::mean(&lengths).is_some_and(|avg| avg > DETAILED_RESPONSE_CHARS) {
        flags.insert(FLAG_DETAILED_RESPONSES.to_string());
    }
    if lengths.len() < THIN_TRANSCRIPT_TURNS {
        flags.insert(FLAG_THIN_TRANSCRIPT.to_string());
    }
    if profile.normalized_skills().len() > DIVERSE_SKILL_COUNT {
        flags.insert(FLAG_DIVERSE_SKILLS.to_string());
    }
    if profile.has_linkedin && profile.has_github {
        flags.insert(FLAG_STRONG_ONLINE_PRESENCE.to_string());
    }
    if credibility_flag {
        flags.insert(FLAG_TRAP_ANSWERED.to_string());
    }
    if depth
        .factors
        .is_some_and(|f| f.quantification >= QUANTIFIED_CLAIMS_FACTOR)
    {
        flags.insert(FLAG_QUANTIFIED_CLAIMS.to_string());
    }

    flags
}
