use caseless::default_case_fold_str;
use unicode_normalization::UnicodeNormalization;

const UNKNOWN_SLUG: &str = "UNKNOWN";

/// Canonical comparison key: NFKC, letters only, single spaces, case-folded.
///
/// An empty result means the value carried nothing usable and must be discarded.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let collapsed = raw
        .nfkc()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    default_case_fold_str(&collapsed)
}

/// Case-insensitive comparison form of a display string.
pub fn fold_case(display: &str) -> String {
    default_case_fold_str(display)
}

/// Collapse whitespace and trim, keeping casing and punctuation.
pub fn clean_display(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title-case each token of a normalized key.
pub fn display_from_key(key: &str) -> String {
    key.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Identifier ingredient: normalized, underscores for spaces, upper-cased.
pub fn slugify(display: &str) -> String {
    let slug = normalize(display).replace(' ', "_").to_uppercase();
    if slug.is_empty() {
        UNKNOWN_SLUG.to_string()
    } else {
        slug
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
