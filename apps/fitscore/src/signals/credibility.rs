use crate::config::AnalyzerSettings;
use crate::models::{ChatTranscript, TurnIntent};
use crate::signals::patterns::RE_UNFAMILIARITY;
use crate::signals::text::fold_for_matching;

/// True when any answer to a trap question is substantive and never admits
/// the term is unfamiliar or fabricated. Hedges elsewhere in a confident
/// answer do not count as an admission. A transcript without trap turns is never flagged.
pub fn check_credibility(transcript: &ChatTranscript, settings: &AnalyzerSettings) -> bool {
    transcript
        .responses_to(TurnIntent::Trap)
        .into_iter()
        .any(|turn| is_fabricated_answer(&turn.content, settings.trap_response_min_chars))
}

fn is_fabricated_answer(answer: &str, min_chars: usize) -> bool {
    let answer = answer.trim();
    if answer.chars().count() <= min_chars {
        return false;
    }
    !RE_UNFAMILIARITY.is_match(&fold_for_matching(answer))
}
