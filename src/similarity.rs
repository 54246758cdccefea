// 📏 Similarity Scorer - Bounded company-name similarity in [0, 1]
//
// Four heuristics, strongest first:
//   1. Exact match of normalized keys          → 1.0
//   2. Substring containment (either way)      → 0.9
//   3. Jaccard word overlap, only if > 0.5     → the ratio itself
//   4. Character-level matching-blocks ratio   → fallback
//
// The precedence matters: short names that merely share a common word
// must not score high via the weak fallback, while reordered or
// abbreviated names still register before we reach character level.

use crate::normalize::normalize;
use std::collections::HashSet;

/// Similarity between two raw company names.
///
/// Symmetric, deterministic, total. Either name normalizing to empty
/// scores 0.0 — two empty names are NOT the same business entity.
///
/// Example:
/// - similarity("CG Logistics", "cg logistics ltd") == 1.0
/// - similarity("MarketXcel", "MarketXcel India") == 0.9
/// - similarity("Digital Ocean Inc", "Ocean Digital Services") ≈ 0.667
pub fn similarity(a: &str, b: &str) -> f64 {
    let norm_a = normalize(a);
    let norm_b = normalize(b);

    // Empty keys match nothing, including each other
    if norm_a.is_empty() || norm_b.is_empty() {
        return 0.0;
    }

    // Exact match after normalization
    if norm_a == norm_b {
        return 1.0;
    }

    // One name contains the other ("MarketXcel" vs "MarketXcel India")
    if norm_a.contains(&norm_b) || norm_b.contains(&norm_a) {
        return 0.9;
    }

    // Word overlap (Jaccard index) - handles reordered words
    let words_a: HashSet<&str> = norm_a.split_whitespace().collect();
    let words_b: HashSet<&str> = norm_b.split_whitespace().collect();
    let overlap = words_a.intersection(&words_b).count();
    let total = words_a.union(&words_b).count();
    let word_similarity = overlap as f64 / total as f64;

    if word_similarity > 0.5 {
        return word_similarity;
    }

    // Weak overlap is discarded, not returned: fall through to the
    // character-level ratio. Order the pair first so block tie-breaks
    // cannot make the score asymmetric.
    if norm_a <= norm_b {
        sequence_ratio(&norm_a, &norm_b)
    } else {
        sequence_ratio(&norm_b, &norm_a)
    }
}

/// Ratcliff-Obershelp ratio: 2·M / (|a| + |b|), where M is the total
/// length of the recursively-found longest matching blocks.
fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Total matched characters: take the longest common block, then recurse
/// on the pieces to its left and right.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_common_block(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + size..], &b[j + size..])
}

/// Longest common contiguous block of `a` and `b`.
///
/// Returns (start_in_a, start_in_b, length). Ties resolve to the earliest
/// start in `a`, then in `b`, so the decomposition is deterministic.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];

    for i in 0..a.len() {
        let mut cur = vec![0usize; b.len() + 1];
        for j in 0..b.len() {
            if a[i] == b[j] {
                let run = prev[j] + 1;
                cur[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = cur;
    }

    best
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_identical_names_score_one() {
        assert_eq!(similarity("CG Logistics", "CG Logistics"), 1.0);
        assert_eq!(similarity("MarketXcel", "MarketXcel"), 1.0);
    }

    #[test]
    fn test_exact_after_normalization() {
        assert_eq!(similarity("CG Logistics Pvt Ltd", "cg logistics"), 1.0);
        assert_eq!(similarity("Acme, Inc.", "ACME"), 1.0);
    }

    #[test]
    fn test_empty_names_never_match() {
        assert_eq!(similarity("", "anything"), 0.0);
        assert_eq!(similarity("anything", ""), 0.0);
        assert_eq!(similarity("", ""), 0.0);
        // Names that normalize to empty behave like empty names
        assert_eq!(similarity("Ltd.", "Ltd."), 0.0);
        assert_eq!(similarity("   ", "Acme"), 0.0);
    }

    #[test]
    fn test_containment_scores_point_nine() {
        assert_eq!(similarity("CG Logistics", "CG Logistics Pune Branch"), 0.9);
        assert_eq!(similarity("MarketXcel India", "MarketXcel"), 0.9);
    }

    #[test]
    fn test_word_overlap_beats_character_fallback() {
        // {digital, ocean} over {digital, ocean, services} = 2/3
        let score = similarity("Digital Ocean Inc", "Ocean Digital Services");
        assert!((score - 2.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_low_word_overlap_falls_through() {
        // One shared word out of four is 0.25 - must NOT be returned as-is.
        // The character fallback takes over: matched block "transport" gives
        // 2*9 / (14+17) = 18/31.
        let score = similarity("Acme Transport", "Transport Hub Xyz");
        assert!((score - 18.0 / 31.0).abs() < EPS);
        assert!((score - 0.25).abs() > EPS);
    }

    #[test]
    fn test_character_fallback_for_abbreviation() {
        // "cgl" vs "cg logistics": blocks "cg" + "l" = 3 matched chars,
        // ratio = 2*3 / (3+12) = 0.4
        let score = similarity("CGL", "CG Logistics");
        assert!((score - 0.4).abs() < EPS);
    }

    #[test]
    fn test_character_fallback_for_missing_space() {
        // "marketxcel" vs "market xcel" match on "market" + "xcel"
        let score = similarity("MarketXcel", "Market Xcel");
        assert!((score - 20.0 / 21.0).abs() < EPS);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("CG Logistics", "CGL"),
            ("MarketXcel", "Market Xcel"),
            ("Digital Ocean Inc", "Ocean Digital Services"),
            ("Aiqmen", "Aquimen"),
            ("ab", "ba"),
            ("", "Acme"),
        ];
        for (a, b) in pairs {
            assert_eq!(
                similarity(a, b),
                similarity(b, a),
                "asymmetric for ({:?}, {:?})",
                a,
                b
            );
        }
    }

    #[test]
    fn test_determinism() {
        let first = similarity("Digtinctive Pune", "distinctive");
        for _ in 0..10 {
            assert_eq!(similarity("Digtinctive Pune", "distinctive"), first);
        }
    }

    #[test]
    fn test_unrelated_names_score_low() {
        assert!(similarity("CG Logistics", "Unrelated Co") < 0.5);
        assert!(similarity("FIICC", "MarketXcel") < 0.5);
    }

    #[test]
    fn test_score_always_bounded() {
        let samples = [
            ("CG Logistics", "CGL"),
            ("a", "aaaaaaaaaaaaaaaaaaaa"),
            ("Übermensch", "Uber"),
            ("x", "y"),
        ];
        for (a, b) in samples {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s), "out of range for ({:?}, {:?})", a, b);
        }
    }

    #[test]
    fn test_longest_common_block() {
        let a: Vec<char> = "cg logistics".chars().collect();
        let b: Vec<char> = "cgl".chars().collect();
        assert_eq!(longest_common_block(&a, &b), (0, 0, 2));

        let empty: Vec<char> = Vec::new();
        assert_eq!(longest_common_block(&empty, &b), (0, 0, 0));
    }

    #[test]
    fn test_sequence_ratio_known_values() {
        assert!((sequence_ratio("kitten", "sitting") - 8.0 / 13.0).abs() < EPS);
        assert_eq!(sequence_ratio("abc", "abc"), 1.0);
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
    }
}
