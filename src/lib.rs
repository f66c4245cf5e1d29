//! # Prefix Tries
//!
//! Two string-keyed prefix maps sharing one interface.
//!
//! This crate provides a fixed-branching trie (one child slot per alphabet letter) and a
//! ternary search tree (three-way branching on character comparison). Both support exact
//! lookup, deletion, wildcard pattern matching and prefix enumeration through the
//! [`PrefixMap`] trait, so callers can pick the memory/comparison trade-off that suits them.
//!
//! ## Features
//!
//! - **First write wins**: inserting an existing key fails and leaves the stored value alone
//! - **Eager pruning**: removal releases every node that no longer leads to a value
//! - **Ordered results**: pattern matches and completions come back in lexicographic order
//! - **Iterative traversal**: enumeration uses explicit stacks, never deep recursion
//!
//! ## Example
//!
//! ```rust
//! use prefix_tries::{FixedBranchTrie, PrefixMap, TernarySearchTrie};
//!
//! let mut words = FixedBranchTrie::new();
//! words.insert("bag", 10).unwrap();
//! words.insert("bat", 20).unwrap();
//! words.insert("bagel", 30).unwrap();
//!
//! let keys: Vec<String> = words.autocomplete("ba").into_iter().map(|(k, _)| k).collect();
//! assert_eq!(keys, vec!["bag", "bagel", "bat"]);
//!
//! let mut tst = TernarySearchTrie::new();
//! tst.insert("bag", 10).unwrap();
//! tst.insert("bat", 20).unwrap();
//! assert_eq!(tst.pattern_match("ba.").len(), 2);
//! ```

#[macro_use]
mod util;

pub mod alphabet;
pub mod config;
mod fixed;
mod iter;
mod map;
mod node;
#[cfg(feature = "serde")]
mod serde_impl;
mod ternary;

// Re-export public types
pub use crate::alphabet::Alphabet;
pub use crate::config::{CaseFolding, TrieConfig};
pub use crate::fixed::FixedBranchTrie;
pub use crate::iter::{FixedIter, TernaryIter};
pub use crate::map::PrefixMap;
pub use crate::ternary::TernarySearchTrie;

/// Errors that can occur in trie operations
///
/// A duplicate insert or the removal of an absent key are not errors; those
/// operations report `Ok(false)` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key character is not part of the trie's alphabet
    InvalidCharacter {
        /// The offending character
        ch: char,
        /// Its position (in characters) within the normalized key
        position: usize,
    },
    /// The alphabet contains the pattern wildcard
    WildcardInAlphabet(char),
    /// An alphabet needs at least one letter
    EmptyAlphabet,
    /// A letter was listed twice when building an alphabet
    DuplicateLetter(char),
    /// An alphabet letter that case folding turns into something else, so no key can reach it
    UnreachableLetter(char),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidCharacter { ch, position } => {
                write!(f, "character {:?} at position {} is not in the alphabet", ch, position)
            }
            Error::WildcardInAlphabet(ch) => {
                write!(f, "wildcard {:?} must not be an alphabet letter", ch)
            }
            Error::EmptyAlphabet => write!(f, "alphabet has no letters"),
            Error::DuplicateLetter(ch) => write!(f, "letter {:?} appears twice in the alphabet", ch),
            Error::UnreachableLetter(ch) => {
                write!(f, "letter {:?} cannot be reached once keys are lowercased", ch)
            }
        }
    }
}

impl std::error::Error for Error {}
