//! Derives `JobRequirements` from a raw job posting and its skill list.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::models::{JobRequirements, RoleLevel};
use crate::signals::patterns::{
    FOCUS_AREAS, JOB_JUNIOR_TERMS, JOB_MANAGEMENT_TERMS, JOB_SENIOR_TERMS,
};
use crate::signals::text::contains_term;

const MAX_FOCUS_AREAS: usize = 3;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSkill {
    #[serde(alias = "skillName")]
    pub name: String,
    #[serde(default, alias = "isMandatory")]
    pub mandatory: bool,
}

pub fn derive_requirements(posting: &JobPosting, skills: &[JobSkill]) -> JobRequirements {
    let mut mandatory_skills = BTreeSet::new();
    let mut preferred_skills = BTreeSet::new();
    for skill in skills {
        let name = skill.name.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }
        if skill.mandatory {
            mandatory_skills.insert(name);
        } else {
            preferred_skills.insert(name);
        }
    }
    // A skill listed both ways counts as mandatory.
    preferred_skills.retain(|s| !mandatory_skills.contains(s));

    let description = posting.description.as_deref().unwrap_or_default();
    JobRequirements {
        mandatory_skills,
        preferred_skills,
        role_level: derive_role_level(&posting.title, description),
        technical_focus: derive_technical_focus(description),
    }
}

/// Seniority from title and description. Senior terms take precedence,
/// then junior, then management; anything else is mid-level.
pub fn derive_role_level(title: &str, description: &str) -> RoleLevel {
    let combined = format!("{title} {description}").to_lowercase();
    let mentions = |terms: &[&str]| terms.iter().any(|t| contains_term(&combined, t));

    if mentions(JOB_SENIOR_TERMS) {
        RoleLevel::Senior
    } else if mentions(JOB_JUNIOR_TERMS) {
        RoleLevel::Junior
    } else if mentions(JOB_MANAGEMENT_TERMS) {
        RoleLevel::Management
    } else {
        RoleLevel::MidLevel
    }
}

/// Up to three focus-area tags mentioned in the description, in library order.
pub fn derive_technical_focus(description: &str) -> Vec<String> {
    let lower = description.to_lowercase();
    FOCUS_AREAS
        .iter()
        .filter(|area| area.keywords.iter().any(|k| contains_term(&lower, k)))
        .take(MAX_FOCUS_AREAS)
        .map(|area| area.tag.to_string())
        .collect()
}
