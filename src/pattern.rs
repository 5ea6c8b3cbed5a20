//! Pattern normalization.
//!
//! Canonicalizes caller-supplied deletion patterns before they reach the
//! matching collaborator. Literal patterns written with backslash separators
//! are rewritten with forward slashes on platforms whose native separator is
//! a backslash; glob expressions pass through untouched because a backslash
//! inside a glob is an escape, not a separator.

/// Report whether `pattern` contains unescaped glob metacharacters.
#[must_use]
pub fn is_glob(pattern: &str) -> bool {
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                // An escape consumes the following character.
                chars.next();
            }
            '*' | '?' | '[' | ']' | '{' | '}' => return true,
            _ => {}
        }
    }
    false
}

/// Normalize a single pattern for the running platform.
#[must_use]
pub fn normalize(pattern: &str) -> String {
    normalize_with_separator(pattern, std::path::MAIN_SEPARATOR == '\\')
}

fn normalize_with_separator(pattern: &str, backslash_native: bool) -> String {
    if backslash_native && !is_glob(pattern) {
        pattern.replace('\\', "/")
    } else {
        pattern.to_owned()
    }
}

/// Normalize an ordered sequence of patterns, preserving order.
///
/// Empty input yields an empty sequence; normalization never fails.
#[must_use]
pub fn normalize_all<P: AsRef<str>>(patterns: &[P]) -> Vec<String> {
    patterns
        .iter()
        .map(|pattern| normalize(pattern.as_ref()))
        .collect()
}
