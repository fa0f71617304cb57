use std::ops::Range;

use tracing::debug;

use crate::builder::{self, NONE, RootedTree};
use crate::error::BuildError;

/// Heavy-light decomposition of a static rooted tree.
///
/// Nodes are laid out in `trace` so that every subtree and every heavy chain
/// occupies a contiguous range of positions. All per-node records are flat
/// arrays indexed by node id.
#[derive(Clone, Debug)]
pub struct HeavyLight {
    pub(crate) root: usize,
    pub(crate) parent: Vec<usize>,
    pub(crate) size: Vec<usize>,
    pub(crate) depth: Vec<usize>,
    pub(crate) index: Vec<usize>,
    pub(crate) head: Vec<usize>,
    pub(crate) trace: Vec<usize>,
    chains: usize,
}

impl HeavyLight {
    /// Decomposes the tree given by an undirected adjacency list.
    pub fn build(graph: &[Vec<usize>], root: usize) -> Result<Self, BuildError> {
        let tree = builder::build(graph, root)?;
        let hld = Self::decompose(tree);
        debug!(
            nodes = hld.len(),
            root = hld.root,
            chains = hld.chains,
            "heavy-light decomposition built"
        );
        Ok(hld)
    }

    pub fn from_edges(
        n: usize,
        edges: &[(usize, usize)],
        root: usize,
    ) -> Result<Self, BuildError> {
        let mut graph = vec![Vec::new(); n];
        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(BuildError::EdgeOutOfRange { u, v, len: n });
            }
            graph[u].push(v);
            graph[v].push(u);
        }
        Self::build(&graph, root)
    }

    fn decompose(tree: RootedTree) -> Self {
        let n = tree.parent.len();
        let mut index = vec![0_usize; n];
        let mut head = vec![tree.root; n];
        let mut trace = Vec::with_capacity(n);
        let mut chains = 1;

        let mut stack = Vec::with_capacity(n);
        stack.push(tree.root);
        while let Some(u) = stack.pop() {
            index[u] = trace.len();
            trace.push(u);
            if let Some((&heavy, light)) = tree.children.of(u).split_first() {
                for &c in light.iter().rev() {
                    head[c] = c;
                    stack.push(c);
                }
                chains += light.len();
                head[heavy] = head[u];
                stack.push(heavy);
            }
        }
        debug_assert_eq!(trace.len(), n);

        Self {
            root: tree.root,
            parent: tree.parent,
            size: tree.size,
            depth: tree.depth,
            index,
            head,
            trace,
            chains,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    #[inline]
    pub fn root(&self) -> usize {
        self.root
    }

    #[inline]
    pub fn parent(&self, u: usize) -> Option<usize> {
        self.check_node(u);
        let p = self.parent[u];
        (p != NONE).then_some(p)
    }

    #[inline]
    pub fn size(&self, u: usize) -> usize {
        self.check_node(u);
        self.size[u]
    }

    #[inline]
    pub fn depth(&self, u: usize) -> usize {
        self.check_node(u);
        self.depth[u]
    }

    /// Position of `u` in [`trace`](Self::trace).
    #[inline]
    pub fn index(&self, u: usize) -> usize {
        self.check_node(u);
        self.index[u]
    }

    /// Topmost node of the heavy chain containing `u`.
    #[inline]
    pub fn head(&self, u: usize) -> usize {
        self.check_node(u);
        self.head[u]
    }

    #[inline]
    pub fn trace(&self) -> &[usize] {
        &self.trace
    }

    pub fn heavy_child(&self, u: usize) -> Option<usize> {
        self.check_node(u);
        (self.size[u] > 1).then(|| self.trace[self.index[u] + 1])
    }

    pub fn chain_count(&self) -> usize {
        self.chains
    }

    /// Half-open range of trace positions covered by the subtree of `u`.
    #[inline]
    pub fn subtree_range(&self, u: usize) -> Range<usize> {
        self.check_node(u);
        self.index[u]..self.index[u] + self.size[u]
    }

    /// Returns `true` when `u` is `v` or a proper ancestor of `v`.
    #[inline]
    pub fn is_ancestor(&self, u: usize, v: usize) -> bool {
        self.check_node(u);
        self.check_node(v);
        self.contains(u, v)
    }

    #[inline(always)]
    pub(crate) fn contains(&self, u: usize, v: usize) -> bool {
        let begin = self.index[u];
        let pos = self.index[v];
        begin <= pos && pos < begin + self.size[u]
    }

    #[inline(always)]
    pub(crate) fn check_node(&self, u: usize) {
        assert!(
            u < self.len(),
            "node {u} out of range (tree has {} nodes)",
            self.len()
        );
    }
}
