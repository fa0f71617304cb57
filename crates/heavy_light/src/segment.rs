use std::ops::Range;

use crate::decompose::HeavyLight;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Toward the root: from `node` back to `head`.
    Up,
    /// Away from the root: from `head` to `node`.
    Down,
}

/// Contiguous run of trace positions `[head, node]` on a single heavy chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Segment {
    /// Trace position of the root-side end (a position, not a node id).
    pub head: usize,
    /// Trace position of the leaf-side end, inclusive.
    pub node: usize,
    pub dir: Direction,
}

impl Segment {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.head..self.node + 1
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node - self.head + 1
    }

    /// Trace positions in traversal order.
    pub fn positions(self) -> impl DoubleEndedIterator<Item = usize> + ExactSizeIterator {
        let up = self.dir == Direction::Up;
        (0..self.node_count()).map(move |k| if up { self.node - k } else { self.head + k })
    }
}

impl HeavyLight {
    /// Splits the path from `x` to `y` into chain segments, in path order.
    ///
    /// With `edges_only`, the LCA is left out and every remaining position
    /// stands for the edge between that node and its parent.
    pub fn query(&self, x: usize, y: usize, edges_only: bool) -> Vec<Segment> {
        let mut out = Vec::new();
        self.query_into(x, y, edges_only, &mut out);
        out
    }

    /// Same as [`query`](Self::query), reusing `out`'s allocation.
    pub fn query_into(&self, x: usize, y: usize, edges_only: bool, out: &mut Vec<Segment>) {
        self.check_node(x);
        self.check_node(y);
        out.clear();
        let (mut x, mut y) = (x, y);
        while self.head[x] != self.head[y] {
            if self.index[self.head[x]] > self.index[self.head[y]] {
                let h = self.head[x];
                out.push(Segment {
                    head: self.index[h],
                    node: self.index[x],
                    dir: Direction::Up,
                });
                x = self.parent[h];
            } else {
                let h = self.head[y];
                out.push(Segment {
                    head: self.index[h],
                    node: self.index[y],
                    dir: Direction::Down,
                });
                y = self.parent[h];
            }
        }

        // Stable: each side stays in hop order.
        out.sort_by_key(|s| s.dir == Direction::Down);
        let ascending = out.iter().take_while(|s| s.dir == Direction::Up).count();

        let skip = usize::from(edges_only);
        let last = if self.index[x] >= self.index[y] {
            Segment {
                head: self.index[y] + skip,
                node: self.index[x],
                dir: Direction::Up,
            }
        } else {
            Segment {
                head: self.index[x] + skip,
                node: self.index[y],
                dir: Direction::Down,
            }
        };
        if last.head <= last.node {
            out.push(last);
        }
        // [up.., down in hop order.., last] -> [up.., last, down leaf-ward..]
        out[ascending..].reverse();
    }

    /// The whole subtree of `u` as a single segment.
    pub fn subtree(&self, u: usize) -> Segment {
        let range = self.subtree_range(u);
        Segment {
            head: range.start,
            node: range.end - 1,
            dir: Direction::Down,
        }
    }

    /// Nodes on the path from `x` to `y`, both ends included.
    pub fn path_nodes(&self, x: usize, y: usize) -> Vec<usize> {
        let mut nodes = Vec::with_capacity(self.distance(x, y) + 1);
        for seg in self.query(x, y, false) {
            nodes.extend(seg.positions().map(|pos| self.trace[pos]));
        }
        nodes
    }
}
