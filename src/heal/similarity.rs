/// Collapse whitespace and casefold so cosmetic label edits don't count
/// against similarity.
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Similarity between a remembered label and a live one, in [0, 1].
///
/// Normalized exact match scores 1.0; anything else is the normalized
/// Levenshtein ratio over the normalized forms.
pub fn text_similarity(original: &str, current: &str) -> f64 {
    let a = normalize_label(original);
    let b = normalize_label(current);

    if a.is_empty() || b.is_empty() {
        return if a == b { 1.0 } else { 0.0 };
    }
    if a == b {
        return 1.0;
    }
    strsim::normalized_levenshtein(&a, &b)
}
