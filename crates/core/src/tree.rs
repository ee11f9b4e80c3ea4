//! Prefix-code tree rebuilt from its serialized pre-order description.
//!
//! # Table Format
//!
//! ```text
//! node := 1 <symbol: 1-4 bytes>     leaf
//!       | 0 <node: left> <node: right>   internal
//! ```
//!
//! Nothing is byte aligned: a symbol's bytes start at whatever bit follows
//! its leaf marker. Left is always serialized before right, and while
//! decoding a `0` bit selects left and a `1` bit selects right.
//!
//! Nodes live in a flat arena and refer to their children by [`NodeId`].
//! The tree is strict by construction: every internal node gets exactly two
//! children or the build fails.

use crate::bitio::BitCursor;
use crate::error::{Result, TreeError};
use crate::symbol::Symbol;

/// Deepest tree accepted unless the caller overrides it.
pub const DEFAULT_MAX_TREE_DEPTH: usize = 1024;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    fn index(self) -> usize {
        self.0
    }
}

/// A tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Symbol),
    Internal { left: NodeId, right: NodeId },
}

/// One leaf of the code table, with the bits that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub symbol: Symbol,
    /// Root-to-leaf path, `false` = left, `true` = right
    pub code: Vec<bool>,
}

impl CodeEntry {
    /// Render the code as a string of `0`/`1`.
    pub fn code_string(&self) -> String {
        self.code.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

/// An immutable prefix-code tree.
#[derive(Debug, Clone)]
pub struct PrefixTree {
    nodes: Vec<Node>,
    root: NodeId,
    depth: usize,
}

impl PrefixTree {
    /// Build a tree from the cursor using [`DEFAULT_MAX_TREE_DEPTH`].
    pub fn read(cursor: &mut BitCursor<'_>) -> Result<Self> {
        Self::read_with_max_depth(cursor, DEFAULT_MAX_TREE_DEPTH)
    }

    /// Build a tree from the cursor.
    ///
    /// The root sits at depth 0; a node deeper than `max_depth` fails the
    /// build before any of its bits beyond the marker are read.
    ///
    /// # Errors
    /// - `BitIoError::OutOfData` if the description is truncated
    /// - `SymbolError::*` if a leaf payload is rejected
    /// - `TreeError::TooDeep` if nesting exceeds `max_depth`
    pub fn read_with_max_depth(cursor: &mut BitCursor<'_>, max_depth: usize) -> Result<Self> {
        let mut builder = Builder {
            cursor,
            nodes: Vec::new(),
            open: Vec::new(),
            max_depth,
            deepest: 0,
        };
        let root = builder.build()?;
        let depth = builder.deepest;
        let nodes = builder.nodes;

        tracing::debug!(
            nodes = nodes.len(),
            leaves = nodes.len() / 2 + 1,
            depth,
            "decoding table built"
        );

        Ok(Self { nodes, root, depth })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves; a strict binary tree has one more leaf than internal nodes.
    pub fn leaf_count(&self) -> usize {
        self.nodes.len() / 2 + 1
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Walk from the root to a leaf, one bit per edge, and return its symbol.
    ///
    /// A tree that is a single leaf consumes no bits.
    ///
    /// # Errors
    /// `BitIoError::OutOfData` if the stream ends mid-walk.
    pub fn decode_symbol(&self, cursor: &mut BitCursor<'_>) -> Result<Symbol> {
        let mut id = self.root;
        loop {
            match self.node(id) {
                Node::Leaf(symbol) => return Ok(*symbol),
                Node::Internal { left, right } => {
                    id = if cursor.next_bit()? { *right } else { *left };
                }
            }
        }
    }

    /// All leaves in pre-order (left before right), with their codes.
    pub fn code_table(&self) -> Vec<CodeEntry> {
        let mut table = Vec::with_capacity(self.leaf_count());
        let mut stack = vec![(self.root, Vec::new())];

        while let Some((id, code)) = stack.pop() {
            match self.node(id) {
                Node::Leaf(symbol) => table.push(CodeEntry {
                    symbol: *symbol,
                    code,
                }),
                Node::Internal { left, right } => {
                    let mut right_code = code.clone();
                    right_code.push(true);
                    let mut left_code = code;
                    left_code.push(false);
                    // Right goes on the stack first so left pops first
                    stack.push((*right, right_code));
                    stack.push((*left, left_code));
                }
            }
        }

        table
    }
}

/// Internal node whose children are still being read.
struct OpenNode {
    depth: usize,
    left: Option<NodeId>,
}

/// Build state for a single table.
///
/// Nesting is tracked on `open` rather than the call stack, so the depth
/// bound only limits what is accepted.
struct Builder<'c, 'a> {
    cursor: &'c mut BitCursor<'a>,
    nodes: Vec<Node>,
    open: Vec<OpenNode>,
    max_depth: usize,
    deepest: usize,
}

impl Builder<'_, '_> {
    /// Read nodes in pre-order until the root is complete.
    fn build(&mut self) -> Result<NodeId> {
        let mut depth = 0;
        loop {
            if depth > self.max_depth {
                return Err(TreeError::TooDeep {
                    max: self.max_depth,
                }
                .into());
            }
            self.deepest = self.deepest.max(depth);

            if !self.cursor.next_bit()? {
                self.open.push(OpenNode { depth, left: None });
                depth += 1;
                continue;
            }

            // A finished subtree fills the innermost open slot; closing a
            // right child may complete several ancestors at once.
            let leaf = Symbol::read(self.cursor)?;
            let mut id = self.push(Node::Leaf(leaf));
            loop {
                let Some(parent) = self.open.last_mut() else {
                    return Ok(id);
                };
                if let Some(left) = parent.left {
                    self.open.pop();
                    id = self.push(Node::Internal { left, right: id });
                } else {
                    parent.left = Some(id);
                    depth = parent.depth + 1;
                    break;
                }
            }
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}
