// 🔤 Name Normalizer - Canonical comparison keys for company names
//
// Problem solved:
// - "CG Logistics Pvt. Ltd." and "cg logistics" → same comparison key
// - Legal-entity suffixes (Ltd, Inc, LLC, ...) carry no identity information
// - Punctuation and spacing vary freely across vendor systems
//
// The key is the basis for ALL similarity comparisons, so it must be
// deterministic and idempotent: normalize(normalize(x)) == normalize(x).

/// Legal-entity suffixes removed during normalization.
/// Removed only as standalone words, never as substrings
/// ("inc" goes, "incorporated" stays).
pub const LEGAL_SUFFIXES: &[&str] = &[
    "ltd",
    "limited",
    "pvt",
    "private",
    "inc",
    "corp",
    "corporation",
    "llc",
];

/// Normalize a company name into its comparison key.
///
/// Steps:
/// 1. Lowercase
/// 2. Replace every non-letter, non-digit, non-whitespace char with a space
/// 3. Drop legal-entity suffix words
/// 4. Collapse whitespace runs, trim
///
/// Empty or whitespace-only input (or input that reduces to nothing, e.g.
/// "Ltd.") yields the empty string.
///
/// Example: "C.G. Logistics Pvt Ltd" → "c g logistics"
pub fn normalize(name: &str) -> String {
    let lowered: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    lowered
        .split_whitespace()
        .filter(|word| !LEGAL_SUFFIXES.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================
