//! Fuzzy pitcher name matching
//!
//! Schedule feeds carry pitcher names as free text: misspellings,
//! abbreviated first names ("J. deGrom") and placeholders like "TBD".
//! Matching resolves them against the canonical names from the pitcher
//! table; failure to match is a normal outcome, never an error.

use strsim::normalized_levenshtein;

/// Similarity between two names on a 0-100 scale
///
/// The score is the better of a whole-string normalized edit distance
/// (catches misspellings) and a token-by-token comparison in which a
/// single-letter token counts as a full match against any token sharing
/// its first letter (catches abbreviated first names).
pub fn similarity(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let norm_a = tokens_a.join(" ");
    let norm_b = tokens_b.join(" ");
    if norm_a == norm_b {
        return 100.0;
    }

    let whole = normalized_levenshtein(&norm_a, &norm_b) * 100.0;
    whole.max(token_score(&tokens_a, &tokens_b))
}

/// Resolve a raw name against canonical candidates
///
/// Returns the best-scoring candidate at or above `threshold`, or `None`.
/// Blank input short-circuits to `None`. Equal scores keep the earliest
/// candidate in input order, so resolution is deterministic.
pub fn best_match<'a>(raw: &str, candidates: &'a [String], threshold: f64) -> Option<&'a str> {
    if raw.trim().is_empty() {
        return None;
    }

    let mut best: Option<(&str, f64)> = None;
    for candidate in candidates {
        let score = similarity(raw, candidate);
        let replace = match best {
            Some((_, best_score)) => score > best_score,
            None => true,
        };
        if replace {
            best = Some((candidate, score));
        }
    }

    best.filter(|(_, score)| *score >= threshold)
        .map(|(name, _)| name)
}

/// Lowercase alphanumeric tokens; punctuation and extra spacing drop out
fn tokenize(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Average best-pairing token score, normalized by the longer token list
///
/// Unpairable tokens on the longer side drag the average down, so a bare
/// surname does not spuriously clear the threshold against a full name.
fn token_score(a: &[String], b: &[String]) -> f64 {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut used = vec![false; long.len()];
    let mut total = 0.0;
    for token in short {
        let mut best = 0.0;
        let mut best_idx = None;
        for (i, other) in long.iter().enumerate() {
            if used[i] {
                continue;
            }
            let score = token_pair_score(token, other);
            if score > best {
                best = score;
                best_idx = Some(i);
            }
        }
        if let Some(i) = best_idx {
            used[i] = true;
        }
        total += best;
    }
    total / long.len() as f64
}

fn token_pair_score(a: &str, b: &str) -> f64 {
    if a == b {
        return 100.0;
    }
    // "j" (from "J.") fully matches "jacob"
    let initial = a.chars().count() == 1 || b.chars().count() == 1;
    if initial && a.chars().next() == b.chars().next() {
        return 100.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_abbreviated_first_name_resolves() {
        let names = canon(&["Jacob deGrom", "Zack Wheeler", "Gerrit Cole"]);
        assert_eq!(
            best_match("J. Degrom", &names, 90.0),
            Some("Jacob deGrom")
        );
        assert!(similarity("J. Degrom", "Jacob deGrom") >= 90.0);
    }

    #[test]
    fn test_misspelling_resolves() {
        let names = canon(&["Jacob deGrom", "Zack Wheeler"]);
        assert_eq!(best_match("Jacob Degrm", &names, 90.0), Some("Jacob deGrom"));
    }

    #[test]
    fn test_no_close_match_is_none() {
        let names = canon(&["Jacob deGrom", "Zack Wheeler"]);
        assert_eq!(best_match("Random Nobody", &names, 90.0), None);
        assert_eq!(best_match("TBD", &names, 90.0), None);
    }

    #[test]
    fn test_blank_input_is_none() {
        let names = canon(&["Jacob deGrom"]);
        assert_eq!(best_match("", &names, 90.0), None);
        assert_eq!(best_match("   ", &names, 90.0), None);
    }

    #[test]
    fn test_exact_match_ignores_case_and_punctuation() {
        let names = canon(&["Jacob deGrom"]);
        assert_eq!(best_match("jacob degrom", &names, 90.0), Some("Jacob deGrom"));
        assert_eq!(similarity("JACOB DEGROM", "Jacob deGrom"), 100.0);
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        // Both candidates normalize to the same distance from the query
        let names = canon(&["Jon Smith", "Jan Smith"]);
        assert_eq!(similarity("Jen Smith", "Jon Smith"), similarity("Jen Smith", "Jan Smith"));
        assert_eq!(best_match("Jen Smith", &names, 50.0), Some("Jon Smith"));
    }

    #[test]
    fn test_bare_surname_stays_below_threshold() {
        let names = canon(&["Jacob deGrom"]);
        assert_eq!(best_match("deGrom", &names, 90.0), None);
    }

    #[test]
    fn test_empty_candidate_set() {
        assert_eq!(best_match("Jacob deGrom", &[], 90.0), None);
    }
}
