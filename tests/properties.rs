//! Model-based checks against `BTreeMap`, fuzzed with quickcheck.
use std::collections::BTreeMap;

use prefix_tries::{FixedBranchTrie, PrefixMap, TernarySearchTrie};
use quickcheck::{quickcheck, Arbitrary, Gen};

/// A short key over a four-letter alphabet, so keys share prefixes often.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Key(String);

impl Arbitrary for Key {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 6;
        Key((0..len).filter_map(|_| g.choose(&['a', 'b', 'c', 'd']).copied()).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().filter(|s| s.chars().all(|c| ('a'..='d').contains(&c))).map(Key))
    }
}

/// Turns a key into a pattern by hiding the characters selected by `mask`.
fn masked(key: &str, mask: u8) -> String {
    key.chars()
        .enumerate()
        .map(|(i, c)| if mask & (1 << (i % 8)) != 0 { '.' } else { c })
        .collect()
}

fn matches(key: &str, pattern: &str) -> bool {
    key.chars().count() == pattern.chars().count()
        && key.chars().zip(pattern.chars()).all(|(k, p)| p == '.' || k == p)
}

/// Replays inserts and removals on a map and a model, comparing every observable result.
fn agrees_with_model<M: PrefixMap<u32> + Default>(inserts: &[(Key, u32)], removals: &[Key], probe: &Key, mask: u8) -> bool {
    let mut map = M::default();
    let mut model = BTreeMap::new();

    for (key, value) in inserts {
        let fresh = !model.contains_key(&key.0);
        if fresh {
            model.insert(key.0.clone(), *value);
        }
        if map.insert(&key.0, *value) != Ok(fresh) {
            return false;
        }
    }
    for key in removals {
        let present = model.remove(&key.0).is_some();
        if map.remove(&key.0) != Ok(present) {
            return false;
        }
    }

    let entries: Vec<(String, &u32)> = model.iter().map(|(k, v)| (k.clone(), v)).collect();
    let completions: Vec<(String, &u32)> = entries.iter().filter(|(k, _)| k.starts_with(&probe.0)).cloned().collect();
    let pattern = masked(&probe.0, mask);
    let matching: Vec<(String, &u32)> = entries.iter().filter(|(k, _)| matches(k, &pattern)).cloned().collect();

    map.len() == model.len()
        && map.is_empty() == model.is_empty()
        && model.iter().all(|(k, v)| map.get(k) == Some(v))
        && map.get(&probe.0) == model.get(&probe.0)
        && map.autocomplete("") == entries
        && map.autocomplete(&probe.0) == completions
        && map.count_with_prefix(&probe.0) == completions.len()
        && map.pattern_match(&pattern) == matching
}

/// Inserting and then removing every key must release the whole structure.
fn drains_completely(inserts: Vec<(Key, u32)>) -> bool {
    let mut fixed = FixedBranchTrie::new();
    let mut ternary = TernarySearchTrie::new();
    for (key, value) in &inserts {
        let _ = fixed.insert(&key.0, *value);
        let _ = ternary.insert(&key.0, *value);
    }
    for (key, _) in inserts.iter().rev() {
        let _ = fixed.remove(&key.0);
        let _ = ternary.remove(&key.0);
    }
    fixed.is_empty() && ternary.is_empty() && fixed.node_count() == 1 && ternary.node_count() == 0
}

quickcheck! {
    fn fixed_branch_matches_model(inserts: Vec<(Key, u32)>, removals: Vec<Key>, probe: Key, mask: u8) -> bool {
        agrees_with_model::<FixedBranchTrie<u32>>(&inserts, &removals, &probe, mask)
    }

    fn ternary_matches_model(inserts: Vec<(Key, u32)>, removals: Vec<Key>, probe: Key, mask: u8) -> bool {
        agrees_with_model::<TernarySearchTrie<u32>>(&inserts, &removals, &probe, mask)
    }

    fn removing_everything_leaves_no_nodes(inserts: Vec<(Key, u32)>) -> bool {
        drains_completely(inserts)
    }
}

#[test]
fn test_model_regressions() {
    // Empty key next to keys that extend it
    let inserts = vec![(Key("".into()), 1), (Key("a".into()), 2), (Key("ab".into()), 3)];
    let removals = vec![Key("a".into())];
    assert!(agrees_with_model::<FixedBranchTrie<u32>>(&inserts, &removals, &Key("a".into()), 0b10));
    assert!(agrees_with_model::<TernarySearchTrie<u32>>(&inserts, &removals, &Key("a".into()), 0b10));
    assert!(drains_completely(inserts));
}
