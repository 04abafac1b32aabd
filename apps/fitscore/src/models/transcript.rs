use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    Candidate,
    Interviewer,
    System,
}

/// What an interview turn is probing for. Set by the interview generator on
/// the questions it asks; candidate answers usually carry `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnIntent {
    SkillProbe,
    Motivation,
    /// Question about a fabricated technology, used as an integrity check.
    Trap,
    Values,
    Scenario,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    #[serde(default)]
    pub intent: TurnIntent,
    pub content: String,
    pub sequence_index: u32,
}

impl Turn {
    pub fn new(
        role: TurnRole,
        intent: TurnIntent,
        content: impl Into<String>,
        sequence_index: u32,
    ) -> Self {
        Self {
            role,
            intent,
            content: content.into(),
            sequence_index,
        }
    }

    pub fn is_candidate(&self) -> bool {
        self.role == TurnRole::Candidate
    }
}

/// Ordered interview transcript. Turns are kept sorted by `sequence_index`
/// regardless of the order they were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Turn>", into = "Vec<Turn>")]
pub struct ChatTranscript {
    turns: Vec<Turn>,
}

impl From<Vec<Turn>> for ChatTranscript {
    fn from(turns: Vec<Turn>) -> Self {
        Self::new(turns)
    }
}

impl From<ChatTranscript> for Vec<Turn> {
    fn from(transcript: ChatTranscript) -> Self {
        transcript.turns
    }
}

impl ChatTranscript {
    pub fn new(mut turns: Vec<Turn>) -> Self {
        turns.sort_by_key(|t| t.sequence_index);
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn candidate_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|t| t.is_candidate())
    }

    /// Candidate turns that answer a question of the given intent.
    ///
    /// A candidate turn answers `intent` when it is tagged with it directly, or
    /// when the most recent interviewer turn before it carries that intent.
    /// System turns never change the active question.
    pub fn responses_to(&self, intent: TurnIntent) -> Vec<&Turn> {
        let mut active_question: Option<TurnIntent> = None;
        let mut responses = Vec::new();

        for turn in &self.turns {
            match turn.role {
                TurnRole::Interviewer => active_question = Some(turn.intent),
                TurnRole::System => {}
                TurnRole::Candidate => {
                    if turn.intent == intent || active_question == Some(intent) {
                        responses.push(turn);
                    }
                }
            }
        }

        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interviewer(intent: TurnIntent, idx: u32) -> Turn {
        Turn::new(TurnRole::Interviewer, intent, "question", idx)
    }

    fn candidate(content: &str, idx: u32) -> Turn {
        Turn::new(TurnRole::Candidate, TurnIntent::Other, content, idx)
    }

    #[test]
    fn test_turns_sorted_by_sequence_index() {
        let transcript = ChatTranscript::new(vec![candidate("b", 2), candidate("a", 1)]);
        assert_eq!(transcript.turns()[0].content, "a");
        assert_eq!(transcript.turns()[1].content, "b");
    }

    #[test]
    fn test_responses_follow_interviewer_intent() {
        let transcript = ChatTranscript::new(vec![
            interviewer(TurnIntent::Motivation, 0),
            candidate("because I love the product", 1),
            interviewer(TurnIntent::Trap, 2),
            candidate("never heard of it", 3),
        ]);
        let motivation = transcript.responses_to(TurnIntent::Motivation);
        assert_eq!(motivation.len(), 1);
        assert_eq!(motivation[0].sequence_index, 1);

        let trap = transcript.responses_to(TurnIntent::Trap);
        assert_eq!(trap.len(), 1);
        assert_eq!(trap[0].content, "never heard of it");
    }

    #[test]
    fn test_self_tagged_candidate_turn_counts() {
        let transcript = ChatTranscript::new(vec![Turn::new(
            TurnRole::Candidate,
            TurnIntent::Values,
            "teamwork matters",
            0,
        )]);
        assert_eq!(transcript.responses_to(TurnIntent::Values).len(), 1);
        assert!(transcript.responses_to(TurnIntent::Motivation).is_empty());
    }

    #[test]
    fn test_system_turn_does_not_reset_active_question() {
        let transcript = ChatTranscript::new(vec![
            interviewer(TurnIntent::Values, 0),
            Turn::new(TurnRole::System, TurnIntent::Other, "reminder", 1),
            candidate("integrity first", 2),
        ]);
        assert_eq!(transcript.responses_to(TurnIntent::Values).len(), 1);
    }

    #[test]
    fn test_transcript_deserializes_from_turn_array() {
        let json = r#"[
            {"role": "interviewer", "intent": "skill_probe", "content": "Tell me about Rust", "sequence_index": 0},
            {"role": "candidate", "content": "I use it daily", "sequence_index": 1}
        ]"#;
        let transcript: ChatTranscript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].intent, TurnIntent::SkillProbe);
        assert_eq!(transcript.turns()[1].intent, TurnIntent::Other);
        assert_eq!(transcript.candidate_turns().count(), 1);
    }
}
