//! Construction-time settings shared by both tries.

/// How key characters are normalized before they reach the trie.
///
/// The same policy applies to keys, prefixes and the literal characters of
/// patterns, for both trie variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFolding {
    /// Lowercase every character (`"Brian"` and `"brian"` are the same key)
    Lowercase,
    /// Compare characters exactly
    Sensitive,
}

impl Default for CaseFolding {
    fn default() -> Self {
        CaseFolding::Lowercase
    }
}

/// The wildcard used by `pattern_match` unless configured otherwise.
pub const DEFAULT_WILDCARD: char = '.';

/// Settings for a trie instance.
///
/// # Examples
///
/// ```
/// use prefix_tries::{CaseFolding, TrieConfig};
///
/// let config = TrieConfig::default()
///     .with_case(CaseFolding::Sensitive)
///     .with_wildcard('?');
///
/// assert_eq!(config.case, CaseFolding::Sensitive);
/// assert_eq!(config.wildcard, '?');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieConfig {
    /// Case normalization policy
    pub case: CaseFolding,
    /// Pattern character matching any single key character, taken as written
    /// (it is never case folded)
    pub wildcard: char,
}

impl TrieConfig {
    /// Creates the default configuration: lowercase folding and `.` as wildcard
    pub fn new() -> Self {
        TrieConfig {
            case: CaseFolding::default(),
            wildcard: DEFAULT_WILDCARD,
        }
    }

    /// Returns this configuration with a different case policy
    pub fn with_case(mut self, case: CaseFolding) -> Self {
        self.case = case;
        self
    }

    /// Returns this configuration with a different wildcard
    pub fn with_wildcard(mut self, wildcard: char) -> Self {
        self.wildcard = wildcard;
        self
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self::new()
    }
}
