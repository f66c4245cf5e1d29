use crate::config::{CaseFolding, TrieConfig};

/// Emits a `tracing` event at TRACE level when the `tracing` feature is on.
///
/// Compiles to nothing otherwise.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

/// Normalizes a key (or prefix, or pattern) into the characters the tries store.
///
/// Lowercasing may expand one character into several, so positions reported in
/// errors refer to the normalized sequence.
pub fn normalize(key: &str, case: CaseFolding) -> Vec<char> {
    match case {
        CaseFolding::Lowercase => key.chars().flat_map(char::to_lowercase).collect(),
        CaseFolding::Sensitive => key.chars().collect(),
    }
}

/// Normalizes a wildcard pattern, with `None` at every wildcard position.
///
/// Pattern characters are compared with the configured wildcard before any
/// folding, so an uppercase wildcard still works under [`CaseFolding::Lowercase`].
pub fn normalize_pattern(pattern: &str, config: &TrieConfig) -> Vec<Option<char>> {
    let mut normalized = Vec::with_capacity(pattern.len());
    for ch in pattern.chars() {
        if ch == config.wildcard {
            normalized.push(None);
            continue;
        }
        match config.case {
            CaseFolding::Lowercase => normalized.extend(ch.to_lowercase().map(Some)),
            CaseFolding::Sensitive => normalized.push(Some(ch)),
        }
    }
    normalized
}

/// Builds a key string from a path prefix and one more character.
pub fn extend_key(prefix: &str, ch: char) -> String {
    let mut key = String::with_capacity(prefix.len() + ch.len_utf8());
    key.push_str(prefix);
    key.push(ch);
    key
}
