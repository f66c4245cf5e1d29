//! Serde support: both tries (de)serialize as an ordered map of key to value.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{FixedBranchTrie, PrefixMap, TernarySearchTrie};

impl<V: Serialize> Serialize for FixedBranchTrie<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&key, value)?;
        }
        map.end()
    }
}

impl<V: Serialize> Serialize for TernarySearchTrie<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&key, value)?;
        }
        map.end()
    }
}

/// Fills any default-constructed prefix map from a serialized map.
struct PrefixMapVisitor<M, V> {
    marker: PhantomData<fn() -> (M, V)>,
}

impl<'de, M, V> Visitor<'de> for PrefixMapVisitor<M, V>
where
    M: PrefixMap<V> + Default,
    V: Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<M, A::Error> {
        let mut trie = M::default();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            match trie.insert(&key, value) {
                Ok(true) => {}
                Ok(false) => return Err(de::Error::custom(format_args!("duplicate key {:?}", key))),
                Err(err) => return Err(de::Error::custom(err)),
            }
        }
        Ok(trie)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for FixedBranchTrie<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PrefixMapVisitor { marker: PhantomData })
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for TernarySearchTrie<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PrefixMapVisitor { marker: PhantomData })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    #[test]
    fn test_fixed_tokens() {
        let mut trie = FixedBranchTrie::new();
        trie.insert("bat", 20).unwrap();
        trie.insert("bag", 10).unwrap();

        assert_tokens(
            &trie,
            &[
                Token::Map { len: Some(2) },
                Token::Str("bag"),
                Token::I32(10),
                Token::Str("bat"),
                Token::I32(20),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_ternary_tokens() {
        let mut tree = TernarySearchTrie::new();
        tree.insert("cab", 70).unwrap();
        tree.insert("", 1).unwrap();

        assert_tokens(
            &tree,
            &[
                Token::Map { len: Some(2) },
                Token::Str(""),
                Token::I32(1),
                Token::Str("cab"),
                Token::I32(70),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_invalid_key_rejected() {
        assert_de_tokens_error::<FixedBranchTrie<i32>>(
            &[Token::Map { len: Some(1) }, Token::Str("b4g"), Token::I32(1), Token::MapEnd],
            "character '4' at position 1 is not in the alphabet",
        );
    }

    #[test]
    fn test_duplicate_key_rejected() {
        // Keys collide after case folding
        assert_de_tokens_error::<TernarySearchTrie<i32>>(
            &[
                Token::Map { len: Some(2) },
                Token::Str("Bag"),
                Token::I32(1),
                Token::Str("bag"),
                Token::I32(2),
                Token::MapEnd,
            ],
            "duplicate key \"bag\"",
        );
    }
}
