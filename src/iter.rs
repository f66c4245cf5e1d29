//! Ordered, lazy iteration over trie entries.
//!
//! Both iterators keep their pending work on an explicit stack, so key length
//! never translates into call-stack depth.

use std::fmt;

use crate::alphabet::Alphabet;
use crate::node::{BranchNode, TernaryNode};
use crate::util::extend_key;

/// An iterator over the entries of a [`FixedBranchTrie`](crate::FixedBranchTrie)
/// subtree, in lexicographic key order.
///
/// This iterator performs a pre-order depth-first traversal, visiting children
/// in alphabet order, and yields each key together with a reference to its value.
pub struct FixedIter<'a, V> {
    /// Nodes still to visit, along with the key spelled by their path
    stack: Vec<(&'a BranchNode<V>, String)>,

    /// Maps child slots back to letters
    alphabet: &'a Alphabet,
}

impl<'a, V> FixedIter<'a, V> {
    pub(crate) fn new(start: Option<(&'a BranchNode<V>, String)>, alphabet: &'a Alphabet) -> Self {
        FixedIter {
            stack: start.into_iter().collect(),
            alphabet,
        }
    }
}

impl<'a, V> Iterator for FixedIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, key)) = self.stack.pop() {
            // Push children in reverse so the smallest letter is visited first
            for (index, child) in node.children.iter().enumerate().rev() {
                if let (Some(child), Some(letter)) = (child.as_deref(), self.alphabet.letter(index)) {
                    self.stack.push((child, extend_key(&key, letter)));
                }
            }

            if let Some(value) = &node.value {
                return Some((key, value));
            }
        }

        None
    }
}

impl<'a, V> fmt::Debug for FixedIter<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedIter").field("pending", &self.stack.len()).finish()
    }
}

/// Pending work of a ternary traversal.
pub(crate) enum Step<'a, V> {
    /// Walk the subtree rooted at this node; the string is the key prefix
    /// spelled before the node's own character
    Visit(&'a TernaryNode<V>, String),
    /// Report an entry
    Emit(String, &'a V),
}

/// An iterator over the entries of a [`TernarySearchTrie`](crate::TernarySearchTrie)
/// subtree, in lexicographic key order.
///
/// Nodes are visited in infix order: low siblings, the node's own value, its
/// equal subtree, then high siblings.
pub struct TernaryIter<'a, V> {
    /// An entry reported before the subtree (the empty key, or the prefix itself)
    head: Option<(String, &'a V)>,

    stack: Vec<Step<'a, V>>,
}

impl<'a, V> TernaryIter<'a, V> {
    pub(crate) fn new(head: Option<(String, &'a V)>, subtree: Option<&'a TernaryNode<V>>, prefix: String) -> Self {
        TernaryIter {
            head,
            stack: subtree.map(|node| Step::Visit(node, prefix)).into_iter().collect(),
        }
    }
}

impl<'a, V> Iterator for TernaryIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(entry) = self.head.take() {
            return Some(entry);
        }

        while let Some(step) = self.stack.pop() {
            let (node, prefix) = match step {
                Step::Emit(key, value) => return Some((key, value)),
                Step::Visit(node, prefix) => (node, prefix),
            };

            // Reverse of the visiting order: high, equal, self, low
            if let Some(high) = node.high.as_deref() {
                self.stack.push(Step::Visit(high, prefix.clone()));
            }
            let key = extend_key(&prefix, node.ch);
            if let Some(equal) = node.equal.as_deref() {
                self.stack.push(Step::Visit(equal, key.clone()));
            }
            if let Some(value) = &node.value {
                self.stack.push(Step::Emit(key, value));
            }
            if let Some(low) = node.low.as_deref() {
                self.stack.push(Step::Visit(low, prefix));
            }
        }

        None
    }
}

impl<'a, V> fmt::Debug for TernaryIter<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TernaryIter")
            .field("pending", &(self.stack.len() + self.head.is_some() as usize))
            .finish()
    }
}
