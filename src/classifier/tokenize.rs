//! Text tokenization for the classifier

use std::sync::OnceLock;

use regex::Regex;

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("invalid token regex"))
}

/// Lowercased runs of two or more word characters
pub fn tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_re()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Unigrams followed by adjacent bigrams (joined by a single space)
pub fn ngrams(text: &str) -> Vec<String> {
    let unigrams = tokens(text);
    let bigrams: Vec<String> = unigrams
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect();

    let mut grams = unigrams;
    grams.extend(bigrams);
    grams
}
