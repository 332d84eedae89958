//! Header label normalization.

use std::collections::HashSet;

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Turns raw header cells into unique, non-empty column labels.
///
/// Labels are trimmed; an empty label becomes its positional index and a
/// repeated label gets the first free `_1`, `_2`, ... suffix.
pub fn unique_labels<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(idx, value)| {
            let mut label = normalize_header(value.as_ref());
            if label.is_empty() {
                label = idx.to_string();
            }
            let label = disambiguate(&label, |candidate| seen.contains(candidate));
            seen.insert(label.clone());
            label
        })
        .collect()
}

/// Returns `base`, or `base_N` for the smallest `N >= 1` that is not taken.
pub fn disambiguate(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
