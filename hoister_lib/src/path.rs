//! The `path` module provides owned node addresses.  A [`NodePath`] is the sequence of slot
//! steps leading from the root of a tree to a node.  Unlike a borrowed reference, a path stays
//! meaningful while the tree is being mutated, so rewrites record paths while searching and
//! resolve them again when they are ready to change the tree.

use crate::error::HoisterError;
use crate::node::{NodeMut, NodeRef};
use std::fmt;

/// One step of a node path: a slot name plus an index for sequence slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotStep {
    pub slot: &'static str,
    pub index: Option<usize>,
}

impl SlotStep {
    /// A step into an optional or required slot.
    pub fn field(slot: &'static str) -> SlotStep {
        SlotStep { slot, index: None }
    }

    /// A step to the element at `index` of a sequence slot.
    pub fn at(slot: &'static str, index: usize) -> SlotStep {
        SlotStep {
            slot,
            index: Some(index),
        }
    }
}

impl fmt::Display for SlotStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.slot, i),
            None => write!(f, "{}", self.slot),
        }
    }
}

/// The address of a node relative to the root of its tree.  The empty path addresses the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    steps: Vec<SlotStep>,
}

impl NodePath {
    /// Create the path of the root node.
    pub fn root() -> NodePath {
        NodePath { steps: Vec::new() }
    }

    pub fn from_steps(steps: Vec<SlotStep>) -> NodePath {
        NodePath { steps }
    }

    pub fn steps(&self) -> &[SlotStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push(&mut self, step: SlotStep) {
        self.steps.push(step);
    }

    pub fn pop(&mut self) -> Option<SlotStep> {
        self.steps.pop()
    }

    /// Return a new path that extends this one by `step`.
    pub fn join(&self, step: SlotStep) -> NodePath {
        let mut steps = self.steps.clone();
        steps.push(step);
        NodePath { steps }
    }

    /// Return the path of the parent node, or `None` for the root.
    pub fn parent(&self) -> Option<NodePath> {
        match self.steps.split_last() {
            Some((_, rest)) => Some(NodePath {
                steps: rest.to_vec(),
            }),
            None => None,
        }
    }

    /// Return the step that leads from the parent to the addressed node.
    pub fn last(&self) -> Option<&SlotStep> {
        self.steps.last()
    }

    /// Return true if `prefix` addresses this node or one of its ancestors.
    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.steps.starts_with(&prefix.steps)
    }

    /// Replace `old_prefix` at the front of this path with `new_prefix`.  Returns `None` if the
    /// path does not start with `old_prefix`.
    ///
    /// # Arguments
    ///
    /// * `old_prefix` - The address the subtree had before it moved.
    /// * `new_prefix` - The address the subtree has now.
    pub fn rebase(&self, old_prefix: &NodePath, new_prefix: &NodePath) -> Option<NodePath> {
        if !self.starts_with(old_prefix) {
            return None;
        }

        let mut steps = new_prefix.steps.clone();
        steps.extend_from_slice(&self.steps[old_prefix.len()..]);
        Some(NodePath { steps })
    }

    /// Walk the path from `root` and return the addressed node.
    pub fn resolve<'a>(&self, root: NodeRef<'a>) -> Result<NodeRef<'a>, HoisterError> {
        let mut node = root;
        for step in &self.steps {
            node = node.child(step)?;
        }
        Ok(node)
    }

    /// Walk the path from `root` and return a mutable reference to the addressed node.
    pub fn resolve_mut<'a>(&self, root: NodeMut<'a>) -> Result<NodeMut<'a>, HoisterError> {
        let mut node = root;
        for step in &self.steps {
            node = node.child_mut(step)?;
        }
        Ok(node)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "<root>");
        }

        let parts: Vec<String> = self.steps.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Walk `path` from `root` and return the addressed node.
pub fn resolve<'a>(root: NodeRef<'a>, path: &NodePath) -> Result<NodeRef<'a>, HoisterError> {
    path.resolve(root)
}

/// Walk `path` from `root` and return a mutable reference to the addressed node.
pub fn resolve_mut<'a>(root: NodeMut<'a>, path: &NodePath) -> Result<NodeMut<'a>, HoisterError> {
    path.resolve_mut(root)
}
