//! Structured facts pulled out of free résumé text.

use std::collections::BTreeSet;

use crate::models::RoleLevel;
use crate::signals::patterns::{
    RESUME_SKILLS, RE_TENURE_MONTHS, RE_TENURE_NAMED_RANGE, RE_TENURE_NUMERIC_RANGE,
    RE_YEARS_EXPERIENCE, RE_YEARS_OVER, RE_YEARS_RANGE,
};
use crate::signals::text::contains_term;

/// Known skills mentioned as whole terms.
pub fn detect_skills(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    RESUME_SKILLS
        .iter()
        .filter(|skill| contains_term(&lower, skill))
        .map(|skill| skill.to_string())
        .collect()
}

/// Largest years-of-experience figure stated anywhere.
/// Upper bound of any ranged figure wins ("3-5 years" reads as 5).
pub fn experience_years(text: &str) -> Option<u32> {
    let single = RE_YEARS_EXPERIENCE
        .captures_iter(text)
        .chain(RE_YEARS_OVER.captures_iter(text))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok());
    let ranged = RE_YEARS_RANGE
        .captures_iter(text)
        .filter_map(|caps| caps.get(2)?.as_str().parse::<u32>().ok());
    single.chain(ranged).max()
}

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Tenures under a year. Only employment-shaped text counts: a date range
/// ("Mar 2021 - Nov 2021", "03/2021 - 11/2021") or a parenthesized duration
/// ("Acme (8 months)"). On a line with date ranges, parenthesized durations
/// restate them and are not counted again. Project durations in prose
/// ("shipped in 3 months") are not tenures.
pub fn short_tenure_count(text: &str) -> usize {
    text.lines()
        .flat_map(|line| {
            let ranged = date_range_months(line);
            if ranged.is_empty() {
                RE_TENURE_MONTHS
                    .captures_iter(line)
                    .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
                    .collect()
            } else {
                ranged
            }
        })
        .filter(|months| *months < 12)
        .count()
}

/// Length in months of every employment date range on the line. Ranges that
/// run backwards are ignored.
fn date_range_months(line: &str) -> Vec<u32> {
    let named = RE_TENURE_NAMED_RANGE.captures_iter(line).filter_map(|caps| {
        let start = month_number(caps.get(1)?.as_str())?;
        let end = month_number(caps.get(3)?.as_str())?;
        span_months(start, caps.get(2)?.as_str(), end, caps.get(4)?.as_str())
    });
    let numeric = RE_TENURE_NUMERIC_RANGE.captures_iter(line).filter_map(|caps| {
        let start = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let end = caps.get(3)?.as_str().parse::<u32>().ok()?;
        if !(1..=12).contains(&start) || !(1..=12).contains(&end) {
            return None;
        }
        span_months(start, caps.get(2)?.as_str(), end, caps.get(4)?.as_str())
    });
    named.chain(numeric).collect()
}

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

fn span_months(start_month: u32, start_year: &str, end_month: u32, end_year: &str) -> Option<u32> {
    let start = start_year.parse::<u32>().ok()? * 12 + start_month;
    let end = end_year.parse::<u32>().ok()? * 12 + end_month;
    end.checked_sub(start)
}

/// Seniority band implied by years of experience.
pub fn years_band(years: u32) -> RoleLevel {
    match years {
        0..=2 => RoleLevel::Junior,
        3..=6 => RoleLevel::MidLevel,
        _ => RoleLevel::Senior,
    }
}
