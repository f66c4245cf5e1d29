//! The ternary search tree.
//!
//! Each node holds one character and three links: `low` and `high` lead to
//! sibling characters at the same key position, `equal` moves on to the next
//! position. Nodes are only created for characters actually used, so any
//! `char` may appear in a key.

use std::cmp::Ordering;
use std::fmt;

use crate::config::TrieConfig;
use crate::iter::{Step, TernaryIter};
use crate::map::{PrefixMap, Search};
use crate::node::{release_link, unlink, Branch, Link, TernaryNode};
use crate::util::{extend_key, normalize, normalize_pattern};
use crate::Error;

/// A ternary search tree keyed by strings.
///
/// The empty key has no node of its own and is kept in a dedicated slot.
/// Removal prunes nodes that no longer lead to a value, splicing their
/// low/high siblings back together, so removing every key leaves no nodes.
pub struct TernarySearchTrie<V> {
    /// The root node of the tree
    root: Link<TernaryNode<V>>,

    /// The value stored under the empty key, if any
    empty_key: Option<V>,

    /// The number of values stored in the tree
    size: usize,

    config: TrieConfig,
}

impl<V> TernarySearchTrie<V> {
    /// Creates a new, empty tree with lowercase folding and `.` as wildcard.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{PrefixMap, TernarySearchTrie};
    ///
    /// let tree = TernarySearchTrie::<i32>::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.node_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates a new, empty tree with the given configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{CaseFolding, PrefixMap, TernarySearchTrie, TrieConfig};
    ///
    /// let mut tree = TernarySearchTrie::with_config(TrieConfig::default().with_case(CaseFolding::Sensitive));
    /// tree.insert("Rust", 1).unwrap();
    ///
    /// assert_eq!(tree.get("Rust"), Some(&1));
    /// assert_eq!(tree.get("rust"), None);
    /// ```
    pub fn with_config(config: TrieConfig) -> Self {
        TernarySearchTrie {
            root: None,
            empty_key: None,
            size: 0,
            config,
        }
    }

    /// Returns the configuration this tree was built with
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Returns the number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.root.as_deref().map_or(0, TernaryNode::subtree_nodes)
    }

    /// Returns an iterator over all entries in lexicographic key order.
    pub fn iter(&self) -> TernaryIter<'_, V> {
        let head = self.empty_key.as_ref().map(|value| (String::new(), value));
        TernaryIter::new(head, self.root.as_deref(), String::new())
    }

    // Walks a normalized, non-empty key down from the root
    fn locate(&self, key: &[char]) -> Search<'_, TernaryNode<V>> {
        let mut current = self.root.as_deref();
        let mut position = 0;

        while let (Some(node), Some(&ch)) = (current, key.get(position)) {
            match ch.cmp(&node.ch) {
                Ordering::Less => current = node.low.as_deref(),
                Ordering::Greater => current = node.high.as_deref(),
                Ordering::Equal => {
                    position += 1;
                    if position == key.len() {
                        return if node.value.is_some() {
                            Search::Found(node)
                        } else {
                            Search::NotFound(node)
                        };
                    }
                    current = node.equal.as_deref();
                }
            }
        }

        Search::FellOff { position }
    }

    // Removes the value for a normalized, non-empty key, pruning nodes left dead.
    //
    // The search path is detached from the tree on the way down and reattached
    // bottom-up, so neither long keys nor long sibling chains deepen the stack.
    fn remove_key(&mut self, key: &[char]) -> Option<V> {
        let mut path: Vec<(Box<TernaryNode<V>>, Branch)> = Vec::new();
        let mut current = self.root.take();
        let mut position = 0;
        let mut removed = None;

        loop {
            let mut node = match current.take() {
                Some(node) => node,
                None => break,
            };
            let branch = match key[position].cmp(&node.ch) {
                Ordering::Less => Branch::Low,
                Ordering::Greater => Branch::High,
                Ordering::Equal if position + 1 == key.len() => {
                    removed = node.value.take();
                    current = Some(node);
                    break;
                }
                Ordering::Equal => {
                    position += 1;
                    Branch::Equal
                }
            };
            current = node.link_mut(branch).take();
            path.push((node, branch));
        }

        let pruning = removed.is_some();
        let mut child = current;
        loop {
            if pruning && child.as_deref().map_or(false, TernaryNode::is_dead) {
                trace!(depth = path.len(), "pruned node");
                unlink(&mut child);
            }
            match path.pop() {
                Some((mut parent, branch)) => {
                    *parent.link_mut(branch) = child;
                    child = Some(parent);
                }
                None => break,
            }
        }
        self.root = child;

        removed
    }
}

impl<V> PrefixMap<V> for TernarySearchTrie<V> {
    /// Inserts a key-value pair.
    ///
    /// At every node the current key character is compared with the node's:
    /// smaller and greater move to `low`/`high` on the same character, a match
    /// moves to `equal` on the next one. Missing nodes are created on the way.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{PrefixMap, TernarySearchTrie};
    ///
    /// let mut tree = TernarySearchTrie::new();
    /// assert_eq!(tree.insert("bagel", 30), Ok(true));
    /// assert_eq!(tree.insert("bag", 10), Ok(true));
    /// assert_eq!(tree.insert("bag", 99), Ok(false));
    ///
    /// assert_eq!(tree.get("bag"), Some(&10));
    /// assert_eq!(tree.len(), 2);
    /// ```
    fn insert(&mut self, key: &str, value: V) -> Result<bool, Error> {
        let key = normalize(key, self.config.case);

        if key.is_empty() {
            if self.empty_key.is_some() {
                return Ok(false);
            }
            self.empty_key = Some(value);
            self.size += 1;
            return Ok(true);
        }

        let mut slot = &mut self.root;
        let mut position = 0;
        loop {
            let ch = key[position];
            let node = slot.get_or_insert_with(|| Box::new(TernaryNode::new(ch)));

            match ch.cmp(&node.ch) {
                Ordering::Less => slot = &mut node.low,
                Ordering::Greater => slot = &mut node.high,
                Ordering::Equal => {
                    position += 1;
                    if position < key.len() {
                        slot = &mut node.equal;
                        continue;
                    }

                    // First write wins
                    if node.value.is_some() {
                        trace!(len = key.len(), "rejected duplicate key");
                        return Ok(false);
                    }
                    node.value = Some(value);
                    self.size += 1;

                    trace!(len = key.len(), "inserted key");
                    return Ok(true);
                }
            }
        }
    }

    /// Removes the value stored under a key and prunes nodes left without purpose.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{PrefixMap, TernarySearchTrie};
    ///
    /// let mut tree = TernarySearchTrie::new();
    /// tree.insert("brian", 10).unwrap();
    /// tree.insert("brianna", 20).unwrap();
    ///
    /// assert_eq!(tree.remove("brianna"), Ok(true));
    /// assert_eq!(tree.remove("brianna"), Ok(false));
    /// assert_eq!(tree.get("brian"), Some(&10));
    /// assert_eq!(tree.node_count(), 5);
    /// ```
    fn remove(&mut self, key: &str) -> Result<bool, Error> {
        let key = normalize(key, self.config.case);

        let removed = if key.is_empty() {
            self.empty_key.take()
        } else {
            self.remove_key(&key)
        };

        match removed {
            Some(_) => {
                self.size -= 1;
                trace!(len = key.len(), "removed key");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get(&self, key: &str) -> Option<&V> {
        let key = normalize(key, self.config.case);
        if key.is_empty() {
            return self.empty_key.as_ref();
        }

        match self.locate(&key) {
            Search::Found(node) => node.value.as_ref(),
            Search::NotFound(_) | Search::FellOff { .. } => None,
        }
    }

    /// Finds all keys matching a wildcard pattern.
    ///
    /// A literal character follows exactly one of `low`, `equal` or `high`.
    /// A wildcard explores all three, since every sibling character satisfies it.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{PrefixMap, TernarySearchTrie};
    ///
    /// let mut tree = TernarySearchTrie::new();
    /// for (key, value) in &[("cab", 70), ("bat", 20), ("bag", 10), ("beet", 40)] {
    ///     tree.insert(key, *value).unwrap();
    /// }
    ///
    /// assert_eq!(
    ///     tree.pattern_match("ba."),
    ///     vec![("bag".to_string(), &10), ("bat".to_string(), &20)]
    /// );
    /// assert_eq!(tree.pattern_match(".a.").len(), 3);
    /// ```
    fn pattern_match(&self, pattern: &str) -> Vec<(String, &V)> {
        let pattern = normalize_pattern(pattern, &self.config);
        let mut matches = Vec::new();

        if pattern.is_empty() {
            matches.extend(self.empty_key.as_ref().map(|value| (String::new(), value)));
            return matches;
        }

        // Visit frames carry the pattern position reached at that node
        let mut stack: Vec<(Step<'_, V>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((Step::Visit(root, String::new()), 0));
        }

        while let Some((step, position)) = stack.pop() {
            let (node, prefix) = match step {
                Step::Emit(key, value) => {
                    matches.push((key, value));
                    continue;
                }
                Step::Visit(node, prefix) => (node, prefix),
            };

            // The wildcard (`None`) agrees with every sibling
            let order = pattern[position].map(|ch| ch.cmp(&node.ch));
            let follows = |wanted: Ordering| order.map_or(true, |order| order == wanted);

            // Pushed in reverse of the visiting order: high, self, low
            if follows(Ordering::Greater) {
                if let Some(high) = node.high.as_deref() {
                    stack.push((Step::Visit(high, prefix.clone()), position));
                }
            }
            if follows(Ordering::Equal) {
                let key = extend_key(&prefix, node.ch);
                if position + 1 == pattern.len() {
                    if let Some(value) = &node.value {
                        stack.push((Step::Emit(key, value), position));
                    }
                } else if let Some(equal) = node.equal.as_deref() {
                    stack.push((Step::Visit(equal, key), position + 1));
                }
            }
            if follows(Ordering::Less) {
                if let Some(low) = node.low.as_deref() {
                    stack.push((Step::Visit(low, prefix), position));
                }
            }
        }

        matches
    }

    /// Lists every entry below a prefix.
    ///
    /// The prefix is located by character comparison; the completions are the
    /// prefix node's own value followed by its `equal` subtree in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tries::{PrefixMap, TernarySearchTrie};
    ///
    /// let mut tree = TernarySearchTrie::new();
    /// for (key, value) in &[("bag", 10), ("bat", 20), ("cab", 70), ("bagel", 30)] {
    ///     tree.insert(key, *value).unwrap();
    /// }
    ///
    /// assert_eq!(
    ///     tree.autocomplete("ba"),
    ///     vec![
    ///         ("bag".to_string(), &10),
    ///         ("bagel".to_string(), &30),
    ///         ("bat".to_string(), &20),
    ///     ]
    /// );
    /// ```
    fn autocomplete(&self, prefix: &str) -> Vec<(String, &V)> {
        let prefix = normalize(prefix, self.config.case);
        if prefix.is_empty() {
            return self.iter().collect();
        }

        match self.locate(&prefix).node() {
            Some(node) => {
                let prefix: String = prefix.iter().collect();
                let head = node.value.as_ref().map(|value| (prefix.clone(), value));
                TernaryIter::new(head, node.equal.as_deref(), prefix).collect()
            }
            None => Vec::new(),
        }
    }

    /// Counts the keys below a prefix without building them.
    fn count_with_prefix(&self, prefix: &str) -> usize {
        let prefix = normalize(prefix, self.config.case);
        if prefix.is_empty() {
            return self.size;
        }

        let node = match self.locate(&prefix).node() {
            Some(node) => node,
            None => return 0,
        };
        let mut count = node.value.is_some() as usize;
        let mut stack: Vec<&TernaryNode<V>> = node.equal.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            count += node.value.is_some() as usize;
            for link in &[&node.low, &node.equal, &node.high] {
                stack.extend(link.as_deref());
            }
        }
        count
    }

    fn len(&self) -> usize {
        self.size
    }

    fn clear(&mut self) {
        release_link(&mut self.root);
        self.empty_key = None;
        self.size = 0;
    }
}

impl<V> Drop for TernarySearchTrie<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V> Default for TernarySearchTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TernarySearchTrie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for TernarySearchTrie<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for TernarySearchTrie<V> {}
