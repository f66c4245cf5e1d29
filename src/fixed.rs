//! The fixed-branching trie.
//!
//! This module contains the `FixedBranchTrie` type: every node owns one child
//! slot per alphabet letter, so a key of length `n` always sits at depth `n`.

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::config::{CaseFolding, TrieConfig};
use crate::iter::FixedIter;
use crate::map::{PrefixMap, Search};
use crate::node::{release, release_link, BranchNode};
use crate::util::{extend_key, normalize, normalize_pattern};
use crate::Error;

/// A trie with one child slot per alphabet letter.
///
/// Each node counts the values stored at or below it. Those counts make
/// `len` and prefix counting O(1) per node and tell removal exactly which
/// subtrees have become empty, so dead nodes are released eagerly.
///
/// Keys may only use letters of the trie's [`Alphabet`] (after case folding);
/// anything else is rejected with [`Error::InvalidCharacter`] by `insert` and
/// `remove`, and simply never matches in read operations.
pub struct FixedBranchTrie<V> {
    /// The root node; it holds the value of the empty key and is never pruned
    root: BranchNode<V>,

    /// Letters and their child slots
    alphabet: Arc<Alphabet>,

    config: TrieConfig,
}

impl<V> FixedBranchTrie<V> {
    /// Creates a new, empty trie over the lowercase alphabet `a..=z`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{FixedBranchTrie, PrefixMap};
    ///
    /// let trie = FixedBranchTrie::<i32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        let alphabet = Alphabet::lowercase();
        FixedBranchTrie {
            root: BranchNode::new(alphabet.len()),
            alphabet,
            config: TrieConfig::default(),
        }
    }

    /// Creates a new, empty trie over a custom alphabet.
    ///
    /// Fails if the configured wildcard is one of the alphabet's letters, or
    /// if lowercase folding is configured and a letter is not its own
    /// lowercase form (no folded key could ever contain it).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use prefix_tries::{Alphabet, CaseFolding, FixedBranchTrie, PrefixMap, TrieConfig};
    ///
    /// let dna = Arc::new(Alphabet::new("ACGT".chars()).unwrap());
    /// let config = TrieConfig::default().with_case(CaseFolding::Sensitive).with_wildcard('N');
    /// let mut trie = FixedBranchTrie::with_config(dna, config).unwrap();
    ///
    /// trie.insert("GATTACA", 1).unwrap();
    /// assert_eq!(trie.pattern_match("GNTTNCA").len(), 1);
    /// ```
    pub fn with_config(alphabet: Arc<Alphabet>, config: TrieConfig) -> Result<Self, Error> {
        if alphabet.contains(config.wildcard) {
            return Err(Error::WildcardInAlphabet(config.wildcard));
        }
        if config.case == CaseFolding::Lowercase {
            let folds = |letter: &char| !letter.to_lowercase().eq(std::iter::once(*letter));
            if let Some(letter) = alphabet.letters().iter().copied().find(folds) {
                return Err(Error::UnreachableLetter(letter));
            }
        }

        Ok(FixedBranchTrie {
            root: BranchNode::new(alphabet.len()),
            alphabet,
            config,
        })
    }

    /// Returns the alphabet keys are drawn from
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the configuration this trie was built with
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Returns the number of nodes, including the root.
    ///
    /// An empty trie consists of the root alone.
    pub fn node_count(&self) -> usize {
        self.root.subtree_nodes()
    }

    /// Returns an iterator over all entries in lexicographic key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{FixedBranchTrie, PrefixMap};
    ///
    /// let mut trie = FixedBranchTrie::new();
    /// trie.insert("beet", 2).unwrap();
    /// trie.insert("abc", 1).unwrap();
    ///
    /// let keys: Vec<String> = trie.iter().map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec!["abc", "beet"]);
    /// ```
    pub fn iter(&self) -> FixedIter<'_, V> {
        FixedIter::new(Some((&self.root, String::new())), &self.alphabet)
    }

    // Walks a normalized key down from the root
    fn locate(&self, key: &[char]) -> Search<'_, BranchNode<V>> {
        let mut node = &self.root;

        for (position, &ch) in key.iter().enumerate() {
            match self.alphabet.index_of(ch).and_then(|index| node.child(index)) {
                Some(child) => node = child,
                None => return Search::FellOff { position },
            }
        }

        if node.value.is_some() {
            Search::Found(node)
        } else {
            Search::NotFound(node)
        }
    }
}

impl<V> PrefixMap<V> for FixedBranchTrie<V> {
    /// Inserts a key-value pair.
    ///
    /// Creates missing nodes along the key's path and bumps the descendant
    /// count of every node on it, root included.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{Error, FixedBranchTrie, PrefixMap};
    ///
    /// let mut trie = FixedBranchTrie::new();
    /// assert_eq!(trie.insert("Brian", 10), Ok(true));
    /// assert_eq!(trie.insert("brian", 99), Ok(false));
    /// assert_eq!(trie.get("BRIAN"), Some(&10));
    /// assert_eq!(
    ///     trie.insert("r2d2", 1),
    ///     Err(Error::InvalidCharacter { ch: '2', position: 1 })
    /// );
    /// ```
    fn insert(&mut self, key: &str, value: V) -> Result<bool, Error> {
        let key = normalize(key, self.config.case);
        let path = self.alphabet.indices(&key)?;

        // First write wins
        if self.locate(&key).is_found() {
            trace!(len = key.len(), "rejected duplicate key");
            return Ok(false);
        }

        let width = self.alphabet.len();
        let mut node = &mut self.root;
        for &index in &path {
            node.descendants += 1;
            node = &mut **node.children[index].get_or_insert_with(|| Box::new(BranchNode::new(width)));
        }
        node.descendants += 1;
        node.value = Some(value);

        trace!(len = key.len(), "inserted key");
        Ok(true)
    }

    /// Removes the value stored under a key.
    ///
    /// The first node on the path whose subtree held nothing but the removed
    /// value is detached from its parent, releasing everything below it.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{FixedBranchTrie, PrefixMap};
    ///
    /// let mut trie = FixedBranchTrie::new();
    /// trie.insert("hello", 1).unwrap();
    ///
    /// assert_eq!(trie.remove("hello"), Ok(true));
    /// assert_eq!(trie.remove("hello"), Ok(false));
    /// assert_eq!(trie.node_count(), 1);
    /// ```
    fn remove(&mut self, key: &str) -> Result<bool, Error> {
        let key = normalize(key, self.config.case);
        let path = self.alphabet.indices(&key)?;

        if !self.locate(&key).is_found() {
            return Ok(false);
        }

        let mut node = &mut self.root;
        for &index in &path {
            node.descendants -= 1;

            let slot = &mut node.children[index];
            if slot.as_ref().map_or(false, |child| child.descendants == 1) {
                // Only the removed value lives below this slot
                release_link(slot);
                trace!(len = key.len(), "pruned subtree");
                return Ok(true);
            }

            node = match slot {
                Some(child) => &mut **child,
                None => unreachable!("located key lost its path"),
            };
        }
        node.descendants -= 1;
        node.value = None;

        trace!(len = key.len(), "removed key");
        Ok(true)
    }

    /// Retrieves a reference to the value stored for the given key, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{FixedBranchTrie, PrefixMap};
    ///
    /// let mut trie = FixedBranchTrie::new();
    /// trie.insert("bagel", 30).unwrap();
    ///
    /// assert_eq!(trie.get("bagel"), Some(&30));
    /// assert_eq!(trie.get("bag"), None);
    /// assert_eq!(trie.get("bagels"), None);
    /// ```
    fn get(&self, key: &str) -> Option<&V> {
        let key = normalize(key, self.config.case);
        match self.locate(&key) {
            Search::Found(node) => node.value.as_ref(),
            Search::NotFound(_) | Search::FellOff { .. } => None,
        }
    }

    /// Finds all keys matching a wildcard pattern.
    ///
    /// Literal positions follow a single child; wildcard positions fan out to
    /// every child, in alphabet order.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{FixedBranchTrie, PrefixMap};
    ///
    /// let mut trie = FixedBranchTrie::new();
    /// for (key, value) in &[("bag", 10), ("bat", 20), ("bagel", 30)] {
    ///     trie.insert(key, *value).unwrap();
    /// }
    ///
    /// assert_eq!(
    ///     trie.pattern_match("ba."),
    ///     vec![("bag".to_string(), &10), ("bat".to_string(), &20)]
    /// );
    /// ```
    fn pattern_match(&self, pattern: &str) -> Vec<(String, &V)> {
        let pattern = normalize_pattern(pattern, &self.config);
        let mut matches = Vec::new();
        let mut stack = vec![(&self.root, 0, String::new())];

        while let Some((node, depth, key)) = stack.pop() {
            if depth == pattern.len() {
                if let Some(value) = &node.value {
                    matches.push((key, value));
                }
                continue;
            }

            match pattern[depth] {
                None => {
                    for (index, child) in node.children.iter().enumerate().rev() {
                        if let (Some(child), Some(letter)) = (child.as_deref(), self.alphabet.letter(index)) {
                            stack.push((child, depth + 1, extend_key(&key, letter)));
                        }
                    }
                }
                Some(ch) => {
                    if let Some(child) = self.alphabet.index_of(ch).and_then(|index| node.child(index)) {
                        stack.push((child, depth + 1, extend_key(&key, ch)));
                    }
                }
            }
        }

        matches
    }

    /// Lists every entry below a prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{FixedBranchTrie, PrefixMap};
    ///
    /// let mut trie = FixedBranchTrie::new();
    /// trie.insert("help", 2).unwrap();
    /// trie.insert("hello", 1).unwrap();
    /// trie.insert("world", 3).unwrap();
    ///
    /// let keys: Vec<String> = trie.autocomplete("hel").into_iter().map(|(k, _)| k).collect();
    /// assert_eq!(keys, vec!["hello", "help"]);
    /// assert!(trie.autocomplete("xyz").is_empty());
    /// ```
    fn autocomplete(&self, prefix: &str) -> Vec<(String, &V)> {
        let prefix = normalize(prefix, self.config.case);
        let start = self.locate(&prefix).node().map(|node| (node, prefix.iter().collect::<String>()));
        FixedIter::new(start, &self.alphabet).collect()
    }

    /// Counts the keys below a prefix using the stored descendant counts.
    fn count_with_prefix(&self, prefix: &str) -> usize {
        let prefix = normalize(prefix, self.config.case);
        self.locate(&prefix).node().map_or(0, |node| node.descendants)
    }

    fn len(&self) -> usize {
        self.root.descendants
    }

    /// Releases every node below the root and empties the root itself.
    fn clear(&mut self) {
        release(&mut self.root);
        self.root.value = None;
        self.root.descendants = 0;
    }
}

impl<V> Drop for FixedBranchTrie<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V> Default for FixedBranchTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for FixedBranchTrie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Two tries are equal when they hold the same entries, regardless of alphabet
impl<V: PartialEq> PartialEq for FixedBranchTrie<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for FixedBranchTrie<V> {}
