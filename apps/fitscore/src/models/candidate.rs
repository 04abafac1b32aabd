use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Read-only view of a candidate as supplied by the profile store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub why_us: Option<String>,
    #[serde(default)]
    pub has_linkedin: bool,
    #[serde(default)]
    pub has_github: bool,
}

impl CandidateProfile {
    /// Skills lowercased and trimmed, blanks dropped.
    pub fn normalized_skills(&self) -> BTreeSet<String> {
        normalize_skills(&self.skills)
    }

    pub fn resume(&self) -> Option<&str> {
        non_blank(self.resume_text.as_deref())
    }

    pub fn intro(&self) -> Option<&str> {
        non_blank(self.intro.as_deref())
    }

    pub fn why_us(&self) -> Option<&str> {
        non_blank(self.why_us.as_deref())
    }
}

pub fn normalize_skills<'a, I>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    skills
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}
