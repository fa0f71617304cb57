use crate::builder::NONE;
use crate::decompose::HeavyLight;

impl HeavyLight {
    /// Lowest common ancestor of `x` and `y`.
    pub fn lca(&self, x: usize, y: usize) -> usize {
        self.check_node(x);
        self.check_node(y);
        let (mut x, mut y) = (x, y);
        while self.head[x] != self.head[y] {
            if self.index[self.head[x]] > self.index[self.head[y]] {
                x = self.parent[self.head[x]];
            } else {
                y = self.parent[self.head[y]];
            }
        }
        if self.index[x] <= self.index[y] { x } else { y }
    }

    /// Number of edges on the path between `x` and `y`.
    pub fn distance(&self, x: usize, y: usize) -> usize {
        self.check_node(x);
        self.check_node(y);
        let (mut x, mut y) = (x, y);
        let mut dist = 0;
        while self.head[x] != self.head[y] {
            if self.index[self.head[x]] < self.index[self.head[y]] {
                std::mem::swap(&mut x, &mut y);
            }
            let h = self.head[x];
            // Nodes from `h` to `x` plus the light edge above `h`.
            dist += self.index[x] - self.index[h] + 1;
            x = self.parent[h];
        }
        dist + self.index[x].abs_diff(self.index[y])
    }

    /// The `k`-th ancestor of `x`, or `None` when `k > depth(x)`.
    pub fn ancestor(&self, x: usize, k: usize) -> Option<usize> {
        self.check_node(x);
        let (mut x, mut k) = (x, k);
        loop {
            let h = self.head[x];
            let offset = self.index[x] - self.index[h];
            if k <= offset {
                return Some(self.trace[self.index[x] - k]);
            }
            k -= offset + 1;
            x = self.parent[h];
            if x == NONE {
                return None;
            }
        }
    }

    /// Neighbor of `u` on the path from `u` to `v`, or `None` when `u == v`.
    pub fn advance(&self, u: usize, v: usize) -> Option<usize> {
        self.check_node(u);
        self.check_node(v);
        if u == v {
            return None;
        }
        if !self.contains(u, v) {
            return Some(self.parent[u]);
        }
        // `v` is a proper descendant, so `u` has a heavy child right after it.
        let heavy = self.trace[self.index[u] + 1];
        if self.contains(heavy, v) {
            return Some(heavy);
        }
        let mut w = v;
        loop {
            let h = self.head[w];
            if self.parent[h] == u {
                return Some(h);
            }
            w = self.parent[h];
        }
    }

    /// The node lying on all three pairwise paths between `a`, `b` and `c`.
    pub fn intersect(&self, a: usize, b: usize, c: usize) -> usize {
        self.check_node(a);
        self.check_node(b);
        self.check_node(c);
        let mut p = [a, b, c];
        p.sort_unstable_by_key(|&u| self.index[u]);
        if self.contains(p[0], p[1]) && self.contains(p[1], p[2]) {
            // All three on one root path.
            return p[1];
        }
        // In pre-order, lca(p0, p2) is the shallower of these two.
        let l1 = self.lca(p[0], p[1]);
        let l2 = self.lca(p[1], p[2]);
        if self.index[l1] >= self.index[l2] { l1 } else { l2 }
    }

    /// The `k`-th node on the path from `x` to `y` (`k == 0` is `x`).
    pub fn jump(&self, x: usize, y: usize, k: usize) -> Option<usize> {
        let l = self.lca(x, y);
        let up = self.depth[x] - self.depth[l];
        let down = self.depth[y] - self.depth[l];
        if k <= up {
            self.ancestor(x, k)
        } else if k <= up + down {
            self.ancestor(y, up + down - k)
        } else {
            None
        }
    }
}
