//! Internal node implementations for both tries.
//!
//! Every node is exclusively owned by its parent through a `Box`. Dropping a
//! `Box` chain recurses once per node, so whole subtrees are released through
//! [`release`] and [`release_link`] instead, which take nodes apart on a heap
//! stack.

/// An owned, possibly absent child.
pub(crate) type Link<N> = Option<Box<N>>;

/// A node owning child links of its own type.
pub(crate) trait Subtree: Sized {
    /// Moves every child of this node onto `out`, leaving the node childless
    fn take_children(&mut self, out: &mut Vec<Box<Self>>);
}

/// Drops everything below `node`, one node at a time.
///
/// Afterwards `node` has no children; its own value is left alone.
pub(crate) fn release<N: Subtree>(node: &mut N) {
    let mut stack = Vec::new();
    node.take_children(&mut stack);
    while let Some(mut child) = stack.pop() {
        child.take_children(&mut stack);
    }
}

/// Empties `slot`, releasing the subtree it held.
pub(crate) fn release_link<N: Subtree>(slot: &mut Link<N>) {
    if let Some(mut node) = slot.take() {
        release(&mut *node);
    }
}

/// Node of the fixed-branching trie.
///
/// The character a node stands for is implied by the slot it occupies in its
/// parent's `children`.
#[derive(Debug)]
pub(crate) struct BranchNode<V> {
    /// The value stored at this node, if a key ends here
    pub value: Option<V>,

    /// Number of values stored at or below this node
    pub descendants: usize,

    /// One slot per alphabet letter, in alphabet order
    pub children: Box<[Link<BranchNode<V>>]>,
}

impl<V> BranchNode<V> {
    /// Creates a new empty node with `width` child slots
    pub fn new(width: usize) -> Self {
        BranchNode {
            value: None,
            descendants: 0,
            children: std::iter::repeat_with(|| None).take(width).collect(),
        }
    }

    /// Returns the child in slot `index`, if any
    pub fn child(&self, index: usize) -> Option<&BranchNode<V>> {
        self.children.get(index).and_then(|child| child.as_deref())
    }

    /// Counts this node and every node below it
    pub fn subtree_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter().filter_map(|child| child.as_deref()));
        }
        count
    }
}

impl<V> Subtree for BranchNode<V> {
    fn take_children(&mut self, out: &mut Vec<Box<Self>>) {
        out.extend(self.children.iter_mut().filter_map(Option::take));
    }
}

/// Node of the ternary search tree.
#[derive(Debug)]
pub(crate) struct TernaryNode<V> {
    /// The key character this node represents
    pub ch: char,

    /// The value stored at this node, if a key ends here
    pub value: Option<V>,

    /// Siblings at the same key position with a smaller character
    pub low: Link<TernaryNode<V>>,

    /// Continuation with the next key position
    pub equal: Link<TernaryNode<V>>,

    /// Siblings at the same key position with a greater character
    pub high: Link<TernaryNode<V>>,
}

impl<V> TernaryNode<V> {
    /// Creates a childless node for `ch`
    pub fn new(ch: char) -> Self {
        TernaryNode {
            ch,
            value: None,
            low: None,
            equal: None,
            high: None,
        }
    }

    /// A node without a value and without an equal subtree leads to no key.
    pub fn is_dead(&self) -> bool {
        self.value.is_none() && self.equal.is_none()
    }

    /// Counts this node and every node below it
    pub fn subtree_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            for link in &[&node.low, &node.equal, &node.high] {
                if let Some(child) = link.as_deref() {
                    stack.push(child);
                }
            }
        }
        count
    }

    /// Returns the link selected by `branch`
    pub fn link_mut(&mut self, branch: Branch) -> &mut Link<TernaryNode<V>> {
        match branch {
            Branch::Low => &mut self.low,
            Branch::Equal => &mut self.equal,
            Branch::High => &mut self.high,
        }
    }
}

impl<V> Subtree for TernaryNode<V> {
    fn take_children(&mut self, out: &mut Vec<Box<Self>>) {
        out.extend(self.low.take());
        out.extend(self.equal.take());
        out.extend(self.high.take());
    }
}

/// One of the three links leaving a [`TernaryNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Branch {
    Low,
    Equal,
    High,
}

/// Unlinks the dead node held by `slot`, splicing its low/high siblings back in.
///
/// When both siblings exist, the smallest node of the high subtree takes the
/// removed node's place, which keeps the sibling BST ordering intact.
pub(crate) fn unlink<V>(slot: &mut Link<TernaryNode<V>>) {
    if let Some(mut node) = slot.take() {
        *slot = match (node.low.take(), node.high.take()) {
            (None, None) => None,
            (Some(low), None) => Some(low),
            (None, Some(high)) => Some(high),
            (Some(low), Some(high)) => {
                let (mut successor, rest) = detach_min(high);
                successor.low = Some(low);
                successor.high = rest;
                Some(successor)
            }
        };
    }
}

/// Splits off the node with the smallest character among `node` and its low descendants.
///
/// Returns that node, with its `high` cleared, and what remains of the subtree.
fn detach_min<V>(mut node: Box<TernaryNode<V>>) -> (Box<TernaryNode<V>>, Link<TernaryNode<V>>) {
    // Ancestors of the minimum, each with its low link cut
    let mut ancestors = Vec::new();
    while let Some(low) = node.low.take() {
        ancestors.push(node);
        node = low;
    }

    let mut rest = node.high.take();
    while let Some(mut parent) = ancestors.pop() {
        parent.low = rest;
        rest = Some(parent);
    }
    (node, rest)
}

/// Runs `f` on a thread with a 2 MiB stack, the default for test threads.
#[cfg(test)]
pub(crate) fn on_small_stack<F: FnOnce() + Send + 'static>(f: F) {
    let worker = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(f)
        .expect("failed to spawn worker");
    worker.join().expect("Thread panicked");
}
