//! Flat storage for a tree of named nodes.
//!
//! Nodes refer to each other by [`NodeId`] instead of owning their children,
//! so the whole tree is one cloneable, comparable value.

use std::collections::BTreeMap;
use std::fmt;

/// Stable handle to a node. Ids are never reused within one arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Nested description of a tree, consumed by [`NodeArena::from_outline`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub name: String,
    pub children: Vec<Outline>,
}

impl Outline {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::node(name, Vec::new())
    }

    pub fn node(name: impl Into<String>, children: Vec<Outline>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeArena {
    nodes: BTreeMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
}

impl NodeArena {
    /// An arena holding a single root node.
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            Node {
                name: root_name.into(),
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append a child under `parent`. Returns `None` if `parent` does not exist.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> Option<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        Some(self.insert(parent, name.into()))
    }

    /// Build a whole tree from an outline.
    pub fn from_outline(outline: Outline) -> Self {
        let Outline { name, children } = outline;
        let mut arena = Self::new(name);
        let mut pending: Vec<(NodeId, Outline)> =
            children.into_iter().rev().map(|child| (arena.root, child)).collect();
        while let Some((parent, Outline { name, children })) = pending.pop() {
            let id = arena.insert(parent, name);
            pending.extend(children.into_iter().rev().map(|child| (id, child)));
        }
        arena
    }

    /// `parent` must be a live node.
    fn insert(&mut self, parent: NodeId, name: String) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                name,
                parent: Some(parent),
                children: Vec::new(),
            },
        );
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.push(id);
        }
        id
    }

    /// Remove `id` and its whole subtree. Returns how many nodes were removed.
    ///
    /// The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if id == self.root {
            return 0;
        }
        let Some(node) = self.nodes.get(&id) else {
            return 0;
        };
        if let Some(parent) = node.parent.and_then(|parent| self.nodes.get_mut(&parent)) {
            parent.children.retain(|child| *child != id);
        }

        let mut pending = vec![id];
        let mut removed = 0;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Distance from the root; `None` for unknown ids.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.nodes.get(&id)?;
        while let Some(parent) = current.parent {
            current = self.nodes.get(&parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// One line per node, depth-first, indented by depth.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![(self.root, 0usize)];
        while let Some((id, depth)) = pending.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            out.push_str(&format!("{}{} {}\n", "  ".repeat(depth), id, node.name));
            pending.extend(node.children.iter().rev().map(|child| (*child, depth + 1)));
        }
        out
    }
}
