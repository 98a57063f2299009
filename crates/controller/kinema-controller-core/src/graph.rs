//! Opaque state-graph tree.
//!
//! The editor never evaluates the graph; it only walks containers for
//! navigation, hands nodes to event editors, and moves the tree
//! through the binary protocol intact. Leaf internals are opaque
//! bytes owned by the runtime that compiles and runs the graph.

use serde::{Deserialize, Serialize};

use crate::codec::{CodecError, Reader, Writer};

const NODE_CONTAINER: u8 = 0;
const NODE_LEAF: u8 = 1;

/// Caps for decoding untrusted streams.
const MAX_NODE_NAME: usize = 64;
const MAX_LEAF_PAYLOAD: usize = 1 << 20;
const MAX_DEPTH: usize = 64;

/// One node of the state graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GraphNode {
    Container(Container),
    Leaf(LeafNode),
}

/// A node that groups children and tracks which one is selected in
/// the editor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    pub selected: Option<usize>,
    pub children: Vec<GraphNode>,
}

/// A node whose internals belong to the runtime; the editor carries
/// its serialized bytes through load/save untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub name: String,
    pub payload: Vec<u8>,
}

impl Container {
    pub fn selected_child(&self) -> Option<&GraphNode> {
        self.selected.and_then(|i| self.children.get(i))
    }

    pub fn selected_child_mut(&mut self) -> Option<&mut GraphNode> {
        self.selected.and_then(|i| self.children.get_mut(i))
    }
}

impl GraphNode {
    /// An empty container, the root of a fresh controller.
    pub fn empty_root() -> Self {
        GraphNode::Container(Container::default())
    }

    pub fn name(&self) -> &str {
        match self {
            GraphNode::Container(c) => &c.name,
            GraphNode::Leaf(l) => &l.name,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            GraphNode::Container(c) => Some(c),
            GraphNode::Leaf(_) => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            GraphNode::Container(c) => Some(c),
            GraphNode::Leaf(_) => None,
        }
    }

    /// Encode the subtree: tag, name, then per-kind payload.
    pub fn encode(&self, w: &mut Writer) -> Result<(), CodecError> {
        match self {
            GraphNode::Container(c) => {
                w.write_u8(NODE_CONTAINER);
                w.write_string(&c.name, MAX_NODE_NAME)?;
                let selected = c.selected.map_or(-1, |i| i as i32);
                w.write_i32(selected);
                w.write_u32(c.children.len() as u32);
                for child in &c.children {
                    child.encode(w)?;
                }
            }
            GraphNode::Leaf(l) => {
                w.write_u8(NODE_LEAF);
                w.write_string(&l.name, MAX_NODE_NAME)?;
                w.write_len_prefixed(&l.payload)?;
            }
        }
        Ok(())
    }

    /// Decode a subtree, bounding depth and payload sizes so corrupt
    /// input cannot recurse or allocate without limit.
    pub fn decode(r: &mut Reader) -> Result<Self, CodecError> {
        Self::decode_at(r, 0)
    }

    fn decode_at(r: &mut Reader, depth: usize) -> Result<Self, CodecError> {
        if depth > MAX_DEPTH {
            return Err(CodecError::TooDeep);
        }
        match r.read_u8()? {
            NODE_CONTAINER => {
                let name = r.read_string(MAX_NODE_NAME)?;
                let selected = r.read_i32()?;
                let count = r.read_u32()? as usize;
                let mut children = Vec::new();
                for _ in 0..count {
                    children.push(Self::decode_at(r, depth + 1)?);
                }
                let selected = if selected < 0 {
                    None
                } else if (selected as usize) < count {
                    Some(selected as usize)
                } else {
                    return Err(CodecError::OutOfRange);
                };
                Ok(GraphNode::Container(Container {
                    name,
                    selected,
                    children,
                }))
            }
            NODE_LEAF => {
                let name = r.read_string(MAX_NODE_NAME)?;
                let payload = r.read_len_prefixed(MAX_LEAF_PAYLOAD)?.to_vec();
                Ok(GraphNode::Leaf(LeafNode { name, payload }))
            }
            other => Err(CodecError::InvalidTag(other)),
        }
    }
}
