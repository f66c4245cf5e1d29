//! The contract shared by both trie representations.

use crate::Error;

/// Outcome of walking a key down a trie.
///
/// Every read operation resolves a key to one of these states and treats
/// [`Search::FellOff`] exactly like a missing key.
#[derive(Debug)]
pub(crate) enum Search<'a, N> {
    /// The key's node exists and holds a value
    Found(&'a N),
    /// The key's node exists, but no key ends there
    NotFound(&'a N),
    /// A child needed at `position` is missing
    FellOff {
        /// Index of the first key character that could not be followed
        position: usize,
    },
}

impl<'a, N> Search<'a, N> {
    /// Returns the node reached by the walk, with or without a value
    pub fn node(&self) -> Option<&'a N> {
        match *self {
            Search::Found(node) | Search::NotFound(node) => Some(node),
            Search::FellOff { .. } => None,
        }
    }

    /// Returns `true` for [`Search::Found`]
    pub fn is_found(&self) -> bool {
        matches!(self, Search::Found(_))
    }
}

/// A string-keyed map supporting prefix and wildcard queries.
///
/// Keys are normalized according to the map's case policy before use, and
/// results report keys in their normalized form.
///
/// # Examples
///
/// ```
/// use prefix_tries::{FixedBranchTrie, PrefixMap, TernarySearchTrie};
///
/// fn fill<M: PrefixMap<u32>>(map: &mut M) {
///     for (i, key) in ["bag", "bat", "cab"].iter().enumerate() {
///         assert_eq!(map.insert(key, i as u32), Ok(true));
///     }
/// }
///
/// let mut fixed = FixedBranchTrie::new();
/// let mut ternary = TernarySearchTrie::new();
/// fill(&mut fixed);
/// fill(&mut ternary);
///
/// assert_eq!(fixed.autocomplete("ba"), ternary.autocomplete("ba"));
/// ```
pub trait PrefixMap<V> {
    /// Stores `value` under `key` unless the key already holds a value.
    ///
    /// Returns `Ok(false)` for a duplicate key, leaving the map unchanged.
    fn insert(&mut self, key: &str, value: V) -> Result<bool, Error>;

    /// Removes the value stored under `key`.
    ///
    /// Returns `Ok(false)` if the key holds no value.
    fn remove(&mut self, key: &str) -> Result<bool, Error>;

    /// Returns the value stored under `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns `true` if a value is stored under `key`
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns every entry whose key has the pattern's length and matches it
    /// character by character, with the wildcard matching any one character.
    fn pattern_match(&self, pattern: &str) -> Vec<(String, &V)>;

    /// Returns every entry whose key starts with `prefix`, in key order
    fn autocomplete(&self, prefix: &str) -> Vec<(String, &V)>;

    /// Returns the number of keys starting with `prefix`
    fn count_with_prefix(&self, prefix: &str) -> usize {
        self.autocomplete(prefix).len()
    }

    /// Returns the number of stored values
    fn len(&self) -> usize;

    /// Returns `true` if the map holds no values
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry
    fn clear(&mut self);
}
