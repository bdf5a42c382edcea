#[cfg(feature = "parallel-index")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    min: i64,
    max: i64,
}

impl Node {
    const EMPTY: Self = Self {
        min: i64::MAX,
        max: i64::MIN,
    };

    fn leaf(value: i64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Min/max range-query tree over one series' values.
///
/// Stored as an implicit complete binary tree: node `1` is the root, node `k`
/// has children `2k` and `2k + 1`, and leaf `i` lives at `leaves + i`. Padding
/// leaves past `len` hold the merge identity so they never affect a result.
///
/// The tree is immutable after [`RangeIndex::build`]; new data replaces the
/// whole index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeIndex {
    len: usize,
    leaves: usize,
    nodes: Vec<Node>,
}

impl RangeIndex {
    /// Builds the index bottom-up in `O(n)`.
    ///
    /// Empty input yields an empty index; every range query on it is out of
    /// bounds.
    #[must_use]
    pub fn build(values: &[i64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let leaves = values.len().next_power_of_two();
        let mut nodes = vec![Node::EMPTY; 2 * leaves];
        for (slot, value) in nodes[leaves..].iter_mut().zip(values) {
            *slot = Node::leaf(*value);
        }

        // Level holding `width` nodes occupies `[width, 2 * width)`.
        let mut width = leaves;
        while width > 1 {
            let parent_start = width / 2;
            let (upper, children) = nodes.split_at_mut(width);
            let parents = &mut upper[parent_start..];
            merge_level(parents, &children[..width]);
            width = parent_start;
        }

        Self {
            len: values.len(),
            leaves,
            nodes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Min and max over the whole indexed series.
    #[must_use]
    pub fn overall(&self) -> Option<(i64, i64)> {
        self.nodes.get(1).map(|root| (root.min, root.max))
    }

    /// Minimum over the inclusive interval `[l, r]`.
    ///
    /// Inverted or out-of-bounds intervals are programming errors: they panic in
    /// debug builds and yield `None` in release builds.
    #[must_use]
    pub fn range_min(&self, l: usize, r: usize) -> Option<i64> {
        self.range_min_max(l, r).map(|(min, _)| min)
    }

    /// Maximum over the inclusive interval `[l, r]`.
    #[must_use]
    pub fn range_max(&self, l: usize, r: usize) -> Option<i64> {
        self.range_min_max(l, r).map(|(_, max)| max)
    }

    /// Min and max over `[l, r]` in a single descent.
    #[must_use]
    pub fn range_min_max(&self, l: usize, r: usize) -> Option<(i64, i64)> {
        debug_assert!(
            l <= r && r < self.len,
            "range index query [{l}, {r}] outside [0, {})",
            self.len
        );
        if l > r || r >= self.len {
            return None;
        }

        let node = self.query(1, 0, self.leaves - 1, l, r);
        Some((node.min, node.max))
    }

    fn query(&self, node: usize, node_lo: usize, node_hi: usize, l: usize, r: usize) -> Node {
        if r < node_lo || node_hi < l {
            return Node::EMPTY;
        }
        if l <= node_lo && node_hi <= r {
            return self.nodes[node];
        }

        let mid = node_lo + (node_hi - node_lo) / 2;
        let left = self.query(2 * node, node_lo, mid, l, r);
        let right = self.query(2 * node + 1, mid + 1, node_hi, l, r);
        left.merge(right)
    }
}

#[cfg(not(feature = "parallel-index"))]
fn merge_level(parents: &mut [Node], children: &[Node]) {
    for (i, parent) in parents.iter_mut().enumerate() {
        *parent = children[2 * i].merge(children[2 * i + 1]);
    }
}

#[cfg(feature = "parallel-index")]
fn merge_level(parents: &mut [Node], children: &[Node]) {
    parents.par_iter_mut().enumerate().for_each(|(i, parent)| {
        *parent = children[2 * i].merge(children[2 * i + 1]);
    });
}
