use strsim::{jaro_winkler, normalized_levenshtein};

///
/// The pluggable similarity primitive. Implementations must be deterministic
/// and symmetric, with scores as integer percentages in `[0, 100]`.
///
pub trait SimilarityScorer {
    fn score(&self, a: &str, b: &str) -> u8;
}

/// Splits on whitespace, sorts tokens lexicographically, rejoins with single
/// spaces. This is the normalization that makes the scorers insensitive to
/// token order.
fn sort_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn to_percentage(ratio: f64) -> u8 {
    (ratio * 100.0).round() as u8
}

///
/// Token-sort ratio over normalized Levenshtein similarity: the default
/// scorer. Two empty inputs score 100. No case folding and no punctuation
/// stripping; the contract is token-order insensitivity, nothing more.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenSortRatio;

impl SimilarityScorer for TokenSortRatio {
    fn score(&self, a: &str, b: &str) -> u8 {
        let a = sort_tokens(a);
        let b = sort_tokens(b);
        to_percentage(normalized_levenshtein(&a, &b))
    }
}

/// Same token normalization scored with Jaro-Winkler similarity instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenSortJaroWinkler;

impl SimilarityScorer for TokenSortJaroWinkler {
    fn score(&self, a: &str, b: &str) -> u8 {
        let a = sort_tokens(a);
        let b = sort_tokens(b);
        to_percentage(jaro_winkler(&a, &b))
    }
}
