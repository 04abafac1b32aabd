//! Small numeric and lexical helpers shared by the analyzers.

use std::collections::BTreeSet;

use regex::Regex;

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercased alphanumeric tokens of `text`.
pub fn word_set(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn count_matches(re: &Regex, text: &str) -> usize {
    re.find_iter(text).count()
}

/// Hits per word, scaled so `reference` earns full credit. Capped at 1.0.
pub fn scaled_density(hits: usize, words: usize, reference: f64) -> f64 {
    if words == 0 {
        return 0.0;
    }
    clamp_unit((hits as f64 / words as f64) / reference)
}

/// Density of `re` matches in `text`, scaled against `reference`.
pub fn pattern_density(re: &Regex, text: &str, reference: f64) -> f64 {
    scaled_density(count_matches(re, text), word_count(text), reference)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance.
pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64)
}

pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Option<f64> {
    let union = a.union(b).count();
    if union == 0 {
        return None;
    }
    Some(a.intersection(b).count() as f64 / union as f64)
}

/// Clamps into [0, 1]; NaN maps to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Lowercases and folds typographic apostrophes to `'`.
pub fn fold_for_matching(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}', '`'], "'")
}

/// Whole-term containment for terms that may start or end with punctuation
/// (`c++`, `ci/cd`), where `\b` anchors do not apply. `haystack` must
/// already be lowercased.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    haystack.match_indices(term).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_of_constant_series_is_zero() {
        assert_eq!(variance(&[3.0, 3.0, 3.0]), Some(0.0));
        assert_eq!(variance(&[]), None);
        assert_eq!(variance(&[1.0, 3.0]), Some(1.0));
    }

    #[test]
    fn test_word_set_strips_punctuation() {
        let words = word_set("Rust, rust! Tokio.");
        assert_eq!(words.len(), 2);
        assert!(words.contains("tokio"));
    }

    #[test]
    fn test_jaccard_of_empty_sets_is_undefined() {
        assert_eq!(jaccard(&BTreeSet::new(), &BTreeSet::new()), None);
        assert_eq!(jaccard(&word_set("a b"), &word_set("b c")), Some(1.0 / 3.0));
    }

    #[test]
    fn test_scaled_density_caps_at_one() {
        assert_eq!(scaled_density(5, 10, 0.05), 1.0);
        assert_eq!(scaled_density(1, 8, 0.25), 0.5);
        assert_eq!(scaled_density(3, 0, 0.05), 0.0);
    }

    #[test]
    fn test_contains_term_respects_boundaries() {
        assert!(contains_term("skilled in c++ and go", "c++"));
        assert!(contains_term("ci/cd pipelines", "ci/cd"));
        assert!(!contains_term("google cloud", "go"));
        assert!(!contains_term("category", "go"));
    }

    #[test]
    fn test_fold_for_matching_normalizes_apostrophes() {
        assert_eq!(fold_for_matching("I Don\u{2019}t Know"), "i don't know");
    }

    #[test]
    fn test_clamp_unit_handles_nan() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
    }
}
