use crate::error::BuildError;

pub(crate) const NONE: usize = usize::MAX;
const UNVISITED: usize = usize::MAX;

/// Rooted view of an adjacency list: parents, depths, subtree sizes and a
/// children table whose first entry per node is the heavy child.
pub(crate) struct RootedTree {
    pub(crate) root: usize,
    pub(crate) parent: Vec<usize>,
    pub(crate) depth: Vec<usize>,
    pub(crate) size: Vec<usize>,
    pub(crate) children: Children,
}

pub(crate) struct Children {
    offsets: Vec<usize>,
    to: Vec<usize>,
}

impl Children {
    #[inline]
    pub(crate) fn of(&self, u: usize) -> &[usize] {
        &self.to[self.offsets[u]..self.offsets[u + 1]]
    }
}

pub(crate) fn build(graph: &[Vec<usize>], root: usize) -> Result<RootedTree, BuildError> {
    let n = graph.len();
    if n == 0 {
        return Err(BuildError::EmptyTree);
    }
    if root >= n {
        return Err(BuildError::RootOutOfRange { root, len: n });
    }

    let mut parent = vec![NONE; n];
    let mut depth = vec![UNVISITED; n];
    let mut order = Vec::with_capacity(n);
    let mut stack = Vec::with_capacity(n);
    depth[root] = 0;
    stack.push(root);
    while let Some(u) = stack.pop() {
        order.push(u);
        // Only one occurrence of the parent edge may be skipped; a second one
        // is a duplicate edge.
        let mut parent_skipped = false;
        for &w in &graph[u] {
            if w >= n {
                return Err(BuildError::NeighborOutOfRange {
                    node: u,
                    neighbor: w,
                    len: n,
                });
            }
            if w == parent[u] && !parent_skipped {
                parent_skipped = true;
                continue;
            }
            if depth[w] != UNVISITED {
                return Err(BuildError::Cycle { node: u, neighbor: w });
            }
            depth[w] = depth[u] + 1;
            parent[w] = u;
            stack.push(w);
        }
    }

    if order.len() < n {
        let node = depth
            .iter()
            .position(|&d| d == UNVISITED)
            .unwrap_or_default();
        return Err(BuildError::Disconnected { node });
    }

    let mut size = vec![1_usize; n];
    for &u in order.iter().rev() {
        let p = parent[u];
        if p != NONE {
            size[p] += size[u];
        }
    }

    let children = heavy_first_children(graph, &parent, &size);
    Ok(RootedTree {
        root,
        parent,
        depth,
        size,
        children,
    })
}

fn heavy_first_children(graph: &[Vec<usize>], parent: &[usize], size: &[usize]) -> Children {
    let n = graph.len();
    let mut degree = vec![0_usize; n];
    for &p in parent {
        if p != NONE {
            degree[p] += 1;
        }
    }
    let mut offsets = vec![0_usize; n + 1];
    for u in 0..n {
        offsets[u + 1] = offsets[u] + degree[u];
    }

    let mut to = vec![0_usize; n - 1];
    let mut cursor = offsets[..n].to_vec();
    for (u, neighbors) in graph.iter().enumerate() {
        for &w in neighbors {
            if parent[w] == u {
                to[cursor[u]] = w;
                cursor[u] += 1;
            }
        }
    }

    for u in 0..n {
        let kids = &mut to[offsets[u]..offsets[u + 1]];
        let mut heavy = 0;
        for (i, &c) in kids.iter().enumerate() {
            if size[c] > size[kids[heavy]] {
                heavy = i;
            }
        }
        // Keeps the light children in adjacency order.
        if heavy > 0 {
            kids[..=heavy].rotate_right(1);
        }
    }

    Children { offsets, to }
}
