use thiserror::Error;

/// Error returned when an adjacency list does not describe a tree.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum BuildError {
    #[error("tree must contain at least one node")]
    EmptyTree,

    #[error("root {root} out of range (tree has {len} nodes)")]
    RootOutOfRange { root: usize, len: usize },

    #[error("node {node} lists neighbor {neighbor}, but the tree has {len} nodes")]
    NeighborOutOfRange {
        node: usize,
        neighbor: usize,
        len: usize,
    },

    /// An edge-list entry names a nonexistent endpoint.
    #[error("edge ({u}, {v}) has an endpoint outside 0..{len}")]
    EdgeOutOfRange { u: usize, v: usize, len: usize },

    /// `neighbor` was reached again from `node` through a non-parent edge.
    #[error("edge ({node}, {neighbor}) closes a cycle")]
    Cycle { node: usize, neighbor: usize },

    #[error("node {node} is unreachable from the root")]
    Disconnected { node: usize },
}
