//! Role fit: how well a candidate's skills and seniority line up with a job.

use std::collections::BTreeSet;

use crate::config::AnalyzerSettings;
use crate::models::candidate::normalize_skills;
use crate::models::{CandidateProfile, JobRequirements, RoleFitBreakdown, RoleFitFactors, RoleLevel};
use crate::resume::{detect_skills, experience_years, years_band};
use crate::signals::patterns::{focus_area, RE_LEVELS};
use crate::signals::text::{clamp_unit, mean};

/// Skill count that earns full credit when the job carries no requirements.
const DEGENERATE_SKILL_REFERENCE: f64 = 5.0;
/// Focus alignment when none of the job's focus tags are known.
const NO_FOCUS_SCORE: f64 = 0.5;

const EXACT_LEVEL_MATCH: f64 = 1.0;
const ADJACENT_LEVEL_MATCH: f64 = 0.7;
const DISTANT_LEVEL_MATCH: f64 = 0.4;

/// Computes role fit and its breakdown, blending in the depth score.
pub fn calculate_role_fit(
    profile: &CandidateProfile,
    requirements: &JobRequirements,
    depth_score: f64,
    settings: &AnalyzerSettings,
) -> RoleFitBreakdown {
    let skills = candidate_skills(profile);
    let candidate_level = classify_experience(profile.resume());

    if requirements.is_empty() {
        let skill_fit = clamp_unit(skills.len() as f64 / DEGENERATE_SKILL_REFERENCE);
        return RoleFitBreakdown {
            factors: None,
            matched_mandatory: Vec::new(),
            missing_mandatory: Vec::new(),
            candidate_level,
            skill_fit,
            role_fit: blend(skill_fit, depth_score, settings.role_depth_blend),
        };
    }

    let mandatory = normalize_skills(&requirements.mandatory_skills);
    let preferred = normalize_skills(&requirements.preferred_skills);
    let matched_mandatory: Vec<String> = mandatory.intersection(&skills).cloned().collect();
    let missing_mandatory: Vec<String> = mandatory.difference(&skills).cloned().collect();

    let factors = RoleFitFactors {
        mandatory_match: match_ratio(&skills, &mandatory),
        preferred_match: match_ratio(&skills, &preferred),
        experience_match: level_match(candidate_level, requirements.role_level),
        focus_alignment: focus_alignment(&skills, &requirements.technical_focus, settings),
    };

    let w = &settings.role_fit_weights;
    let skill_fit = clamp_unit(
        factors.mandatory_match * w.mandatory
            + factors.preferred_match * w.preferred
            + factors.experience_match * w.experience
            + factors.focus_alignment * w.focus,
    );

    RoleFitBreakdown {
        factors: Some(factors),
        matched_mandatory,
        missing_mandatory,
        candidate_level,
        skill_fit,
        role_fit: blend(skill_fit, depth_score, settings.role_depth_blend),
    }
}

/// Profile skills, or skills found in the résumé when the profile lists none.
fn candidate_skills(profile: &CandidateProfile) -> BTreeSet<String> {
    let listed = profile.normalized_skills();
    if !listed.is_empty() {
        return listed;
    }
    profile.resume().map(detect_skills).unwrap_or_default()
}

fn blend(skill_fit: f64, depth_score: f64, skill_share: f64) -> f64 {
    clamp_unit(skill_share * skill_fit + (1.0 - skill_share) * clamp_unit(depth_score))
}

/// Share of `required` the candidate has. An empty requirement set is full credit.
fn match_ratio(skills: &BTreeSet<String>, required: &BTreeSet<String>) -> f64 {
    if required.is_empty() {
        return 1.0;
    }
    required.intersection(skills).count() as f64 / required.len() as f64
}

fn level_match(candidate: RoleLevel, required: RoleLevel) -> f64 {
    match candidate.distance(required) {
        0 => EXACT_LEVEL_MATCH,
        1 => ADJACENT_LEVEL_MATCH,
        _ => DISTANT_LEVEL_MATCH,
    }
}

/// Infers seniority from résumé vocabulary plus one vote for the band implied
/// by stated years of experience. Ties go to the lower level; no evidence
/// at all reads as mid-level.
pub fn classify_experience(resume: Option<&str>) -> RoleLevel {
    let Some(text) = resume else {
        return RoleLevel::MidLevel;
    };

    let mut votes = [0usize; 4];
    for (slot, re) in votes.iter_mut().zip(RE_LEVELS.iter()) {
        *slot = re.find_iter(text).count();
    }
    if let Some(years) = experience_years(text) {
        votes[years_band(years).rank() as usize] += 1;
    }

    let mut best = RoleLevel::MidLevel;
    let mut best_votes = 0;
    for (level, count) in RoleLevel::ALL.into_iter().zip(votes) {
        if count > best_votes {
            best = level;
            best_votes = count;
        }
    }
    best
}

fn focus_alignment(skills: &BTreeSet<String>, tags: &[String], settings: &AnalyzerSettings) -> f64 {
    let per_area: Vec<f64> = tags
        .iter()
        .filter_map(|tag| focus_area(tag))
        .map(|area| {
            let overlap = area.skills.iter().filter(|s| skills.contains(**s)).count();
            clamp_unit(overlap as f64 / settings.focus_skill_reference)
        })
        .collect();
    mean(&per_area).unwrap_or(NO_FOCUS_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn profile_with(names: &[&str]) -> CandidateProfile {
        CandidateProfile {
            skills: skills(names),
            ..Default::default()
        }
    }

    #[test]
    fn test_half_of_mandatory_skills_matched() {
        let requirements = JobRequirements {
            mandatory_skills: skills(&["python", "aws"]),
            ..Default::default()
        };
        let breakdown = calculate_role_fit(
            &profile_with(&["python"]),
            &requirements,
            0.5,
            &AnalyzerSettings::default(),
        );
        let factors = breakdown.factors.clone().unwrap();
        assert_eq!(factors.mandatory_match, 0.5);
        assert_eq!(breakdown.matched_mandatory, vec!["python".to_string()]);
        assert_eq!(breakdown.missing_mandatory, vec!["aws".to_string()]);
    }

    #[test]
    fn test_skill_matching_ignores_case() {
        let requirements = JobRequirements {
            mandatory_skills: skills(&["Python", "AWS"]),
            ..Default::default()
        };
        let breakdown = calculate_role_fit(
            &profile_with(&["python", "aws"]),
            &requirements,
            0.5,
            &AnalyzerSettings::default(),
        );
        assert_eq!(breakdown.factors.unwrap().mandatory_match, 1.0);
    }

    #[test]
    fn test_missing_requirement_sets_get_full_credit() {
        let requirements = JobRequirements {
            technical_focus: vec!["Database".to_string()],
            ..Default::default()
        };
        let breakdown = calculate_role_fit(
            &profile_with(&["sql"]),
            &requirements,
            0.5,
            &AnalyzerSettings::default(),
        );
        let factors = breakdown.factors.unwrap();
        assert_eq!(factors.mandatory_match, 1.0);
        assert_eq!(factors.preferred_match, 1.0);
    }

    #[test]
    fn test_empty_requirements_use_skill_count_heuristic() {
        let settings = AnalyzerSettings::default();
        let breakdown = calculate_role_fit(
            &profile_with(&["python", "go"]),
            &JobRequirements::default(),
            0.5,
            &settings,
        );
        assert!(breakdown.is_degenerate());
        assert!((breakdown.skill_fit - 0.4).abs() < 1e-12);
        assert!((breakdown.role_fit - (0.8 * 0.4 + 0.2 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_level_match_scale() {
        assert_eq!(level_match(RoleLevel::Senior, RoleLevel::Senior), 1.0);
        assert_eq!(level_match(RoleLevel::MidLevel, RoleLevel::Senior), 0.7);
        assert_eq!(level_match(RoleLevel::Junior, RoleLevel::Management), 0.4);
    }

    #[test]
    fn test_classify_experience() {
        assert_eq!(classify_experience(None), RoleLevel::MidLevel);
        assert_eq!(classify_experience(Some("")), RoleLevel::MidLevel);
        assert_eq!(
            classify_experience(Some(
                "Senior engineer. Led the platform team and mentored five engineers. 10 years of experience."
            )),
            RoleLevel::Senior
        );
        assert_eq!(
            classify_experience(Some("Computer science graduate, summer intern at Acme.")),
            RoleLevel::Junior
        );
    }

    #[test]
    fn test_job_title_nouns_do_not_outvote_seniority() {
        assert_eq!(
            classify_experience(Some("Senior Software Engineer at Acme")),
            RoleLevel::Senior
        );
        assert_eq!(
            classify_experience(Some("Senior Developer, backend engineer, platform engineer")),
            RoleLevel::Senior
        );
        // Title nouns alone carry no evidence.
        assert_eq!(
            classify_experience(Some("Software Engineer at Acme")),
            RoleLevel::MidLevel
        );
    }

    #[test]
    fn test_focus_alignment_saturates_and_skips_unknown_tags() {
        let settings = AnalyzerSettings::default();
        let candidate = skills(&["docker", "kubernetes", "terraform", "aws"]);
        let tags = vec!["devops".to_string(), "Underwater Welding".to_string()];
        assert_eq!(focus_alignment(&candidate, &tags, &settings), 1.0);
        assert_eq!(focus_alignment(&candidate, &[], &settings), NO_FOCUS_SCORE);
        let unknown_only = vec!["Underwater Welding".to_string()];
        assert_eq!(focus_alignment(&candidate, &unknown_only, &settings), NO_FOCUS_SCORE);
    }

    #[test]
    fn test_resume_skills_stand_in_for_empty_profile() {
        let profile = CandidateProfile {
            resume_text: Some("Built services in Python on AWS.".to_string()),
            ..Default::default()
        };
        let requirements = JobRequirements {
            mandatory_skills: skills(&["python", "aws"]),
            ..Default::default()
        };
        let breakdown = calculate_role_fit(&profile, &requirements, 0.3, &AnalyzerSettings::default());
        assert_eq!(breakdown.factors.unwrap().mandatory_match, 1.0);
    }

    #[test]
    fn test_role_fit_in_bounds() {
        let requirements = JobRequirements {
            mandatory_skills: skills(&["rust"]),
            preferred_skills: skills(&["tokio"]),
            role_level: RoleLevel::Senior,
            technical_focus: vec!["Web Development".to_string()],
        };
        for depth in [0.0, 0.5, 1.0] {
            let breakdown = calculate_role_fit(
                &profile_with(&["rust", "tokio", "react"]),
                &requirements,
                depth,
                &AnalyzerSettings::default(),
            );
            assert!((0.0..=1.0).contains(&breakdown.role_fit));
        }
    }
}
