// 🎯 Matcher - Best company-name match from a candidate pool
//
// Two entry points:
// - find_best_match: heuristic scan only, returns Option + score
// - resolve: curated mapping table first, then heuristics, and falls
//   back to the target itself so callers always get a filter key
//
// Candidate order is part of the contract: the running best is only
// replaced by a strictly higher score, so the first-seen candidate wins
// exact ties, and the mapping short-circuit takes the first qualifying
// candidate in pool order.

use crate::mapping::MappingTable;
use crate::similarity::similarity;
use serde::{Deserialize, Serialize};

/// Minimum similarity for a heuristic match (inclusive).
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// A mapping-table variant must beat this (exclusive) to short-circuit.
pub const MAPPING_CUTOFF: f64 = 0.8;

// ============================================================================
// MATCH RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Best-scoring candidate at or above the threshold, if any.
    pub candidate: Option<String>,

    /// Its similarity score; 0.0 when there is no match.
    pub score: f64,
}

impl MatchResult {
    pub fn no_match() -> Self {
        MatchResult {
            candidate: None,
            score: 0.0,
        }
    }

    pub fn is_match(&self) -> bool {
        self.candidate.is_some()
    }
}

// ============================================================================
// COMPANY MATCHER
// ============================================================================

/// Matches one company identity against a pool of vendor-supplied names.
///
/// Holds only immutable data, so one matcher can be shared freely across
/// request threads.
#[derive(Debug, Clone)]
pub struct CompanyMatcher {
    /// Minimum similarity (inclusive) for a heuristic match.
    pub threshold: f64,

    mappings: MappingTable,
}

impl CompanyMatcher {
    /// Matcher with the curated default mapping table and threshold 0.6.
    pub fn new() -> Self {
        CompanyMatcher {
            threshold: DEFAULT_THRESHOLD,
            mappings: MappingTable::with_defaults(),
        }
    }

    /// Matcher with an injected mapping table (tests supply their own).
    pub fn with_mappings(mappings: MappingTable) -> Self {
        CompanyMatcher {
            threshold: DEFAULT_THRESHOLD,
            mappings,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    /// Heuristic scan: best candidate scoring at least the threshold.
    ///
    /// The boundary is inclusive - 0.60 qualifies, 0.59 does not.
    /// Does NOT consult the mapping table.
    pub fn find_best_match<S: AsRef<str>>(&self, target: &str, candidates: &[S]) -> MatchResult {
        let mut best: Option<String> = None;
        let mut best_score = 0.0;

        for candidate in candidates {
            let score = similarity(target, candidate.as_ref());
            if score > best_score && score >= self.threshold {
                best_score = score;
                best = Some(candidate.as_ref().to_string());
            }
        }

        MatchResult {
            candidate: best,
            score: best_score,
        }
    }

    /// Resolve a company identity to a pool name, or to itself.
    ///
    /// If the target has a mapping-table entry, the first candidate (in
    /// pool order) that any known variant scores above 0.8 against wins
    /// outright - the threshold is never consulted on this path. Otherwise
    /// falls back to the heuristic scan, and finally to the unchanged
    /// target with score 0.0 so downstream filtering always has a key.
    pub fn resolve<S: AsRef<str>>(&self, target: &str, candidates: &[S]) -> (String, f64) {
        if let Some(variants) = self.mappings.variants(target) {
            for candidate in candidates {
                for variant in variants {
                    let score = similarity(variant, candidate.as_ref());
                    if score > MAPPING_CUTOFF {
                        return (candidate.as_ref().to_string(), score);
                    }
                }
            }
        }

        let result = self.find_best_match(target, candidates);
        match result.candidate {
            Some(name) => (name, result.score),
            None => (target.to_string(), 0.0),
        }
    }
}

impl Default for CompanyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_best_match_by_containment() {
        let matcher = CompanyMatcher::new();
        let pool = ["MarketXcel India", "CG Logistics", "Unrelated Co"];

        let result = matcher.find_best_match("MarketXcel", &pool);
        assert_eq!(result.candidate.as_deref(), Some("MarketXcel India"));
        assert_eq!(result.score, 0.9);
    }

    #[test]
    fn test_find_best_match_none_below_threshold() {
        let matcher = CompanyMatcher::new();
        // "CGL" vs "CG Logistics" scores 0.4 heuristically - below 0.6
        let result = matcher.find_best_match("CG Logistics", &["CGL", "Random Corp"]);
        assert!(!result.is_match());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_find_best_match_empty_pool() {
        let matcher = CompanyMatcher::new();
        let result = matcher.find_best_match("CG Logistics", &Vec::<String>::new());
        assert_eq!(result, MatchResult::no_match());
    }

    #[test]
    fn test_find_best_match_empty_target() {
        let matcher = CompanyMatcher::new();
        let result = matcher.find_best_match("", &["CG Logistics", ""]);
        // Empty target scores 0.0 against everything, including another
        // empty name - two empty names are not the same entity
        assert!(!result.is_match());
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        // Jaccard 3/5 = 0.6 exactly: {alpha beta gamma} shared,
        // {delta, epsilon} unshared
        let target = "Alpha Beta Gamma Delta";
        let pool = ["Alpha Beta Gamma Epsilon"];

        let at_threshold = CompanyMatcher::new().with_threshold(0.6);
        let result = at_threshold.find_best_match(target, &pool);
        assert_eq!(result.candidate.as_deref(), Some("Alpha Beta Gamma Epsilon"));
        assert!((result.score - 0.6).abs() < 1e-9);

        // The same candidate is rejected once the bar moves above its score
        let above = CompanyMatcher::new().with_threshold(0.61);
        assert!(!above.find_best_match(target, &pool).is_match());
    }

    #[test]
    fn test_first_seen_wins_on_tied_scores() {
        let matcher = CompanyMatcher::new();
        // Both candidates contain the target, so both score 0.9
        let pool = ["CG Logistics Pune", "CG Logistics Mumbai"];
        let result = matcher.find_best_match("CG Logistics", &pool);
        assert_eq!(result.candidate.as_deref(), Some("CG Logistics Pune"));

        let reversed = ["CG Logistics Mumbai", "CG Logistics Pune"];
        let result = matcher.find_best_match("CG Logistics", &reversed);
        assert_eq!(result.candidate.as_deref(), Some("CG Logistics Mumbai"));
    }

    #[test]
    fn test_resolve_mapping_short_circuit() {
        let matcher = CompanyMatcher::new();
        // Heuristics alone score "CGL" at 0.4 - only the curated table
        // knows the abbreviation
        let (name, score) = matcher.resolve("CG Logistics", &["CGL", "Random Corp"]);
        assert_eq!(name, "CGL");
        assert!(score > MAPPING_CUTOFF);
    }

    #[test]
    fn test_resolve_mapping_ignores_threshold() {
        let matcher = CompanyMatcher::new().with_threshold(1.0);
        let (name, _) = matcher.resolve("CG Logistics", &["CGL"]);
        assert_eq!(name, "CGL");
    }

    #[test]
    fn test_resolve_mapping_takes_first_candidate_in_pool_order() {
        let matcher = CompanyMatcher::new();
        // Both "CGL" and "C G Logistics" clear the variant cutoff; pool
        // order decides
        let (name, _) = matcher.resolve("CG Logistics", &["C G Logistics", "CGL"]);
        assert_eq!(name, "C G Logistics");
    }

    #[test]
    fn test_resolve_heuristic_fallback() {
        let matcher = CompanyMatcher::with_mappings(MappingTable::new());
        let pool = ["MarketXcel India", "CG Logistics", "Unrelated Co"];
        let (name, score) = matcher.resolve("MarketXcel", &pool);
        assert_eq!(name, "MarketXcel India");
        assert_eq!(score, 0.9);
    }

    #[test]
    fn test_resolve_falls_back_to_target() {
        let matcher = CompanyMatcher::new();
        let (name, score) = matcher.resolve("Zebra Holdings", &["Unrelated Co"]);
        assert_eq!(name, "Zebra Holdings");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_resolve_empty_pool_returns_target() {
        let matcher = CompanyMatcher::new();
        let (name, score) = matcher.resolve("CG Logistics", &Vec::<String>::new());
        assert_eq!(name, "CG Logistics");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_injected_mapping_table() {
        let table = MappingTable::from_entries([("Acme", vec!["AC Widgets"])]);
        let matcher = CompanyMatcher::with_mappings(table);

        let (name, _) = matcher.resolve("Acme", &["AC Widgets Ltd", "Other"]);
        assert_eq!(name, "AC Widgets Ltd");
    }

    #[test]
    fn test_determinism() {
        let matcher = CompanyMatcher::new();
        let pool = ["MarketXcel India", "CG Logistics", "Unrelated Co"];
        let first = matcher.find_best_match("MarketXcel", &pool);
        for _ in 0..10 {
            assert_eq!(matcher.find_best_match("MarketXcel", &pool), first);
        }
    }

    #[test]
    fn test_matcher_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompanyMatcher>();
    }
}
