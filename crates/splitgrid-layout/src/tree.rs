//! The splitter tree and its structural operations.
//!
//! Every mutating operation runs against a working copy, validates the
//! result, and only then replaces the live tree. A rejected operation leaves
//! the tree exactly as it was.

use std::collections::BTreeSet;

use crate::descriptor::MAX_DESCRIPTOR_DEPTH;
use crate::error::{LayoutError, ModelError, OperationFailure};
use crate::node::{Branch, Leaf, Node, Orientation, PaneId, Proportions};

/// Deepest tree a structural operation may produce. A lone leaf has depth 1,
/// so this is the deepest tree whose descriptor [`crate::descriptor::load`]
/// still accepts.
pub const MAX_TREE_DEPTH: usize = MAX_DESCRIPTOR_DEPTH + 1;

/// Result of splitting a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOutcome {
    /// The new branch that took the leaf's place.
    pub branch: PaneId,
    /// The original leaf, now the branch's first child.
    pub retained: PaneId,
    /// The new empty leaf, the branch's second child.
    pub created: PaneId,
}

/// Result of removing a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub removed: PaneId,
    /// The parent branch that was collapsed away.
    pub collapsed_branch: PaneId,
    /// The sibling that now occupies the parent's position.
    pub promoted: PaneId,
}

/// Binary tree of splitter panels.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitterTree<C> {
    root: Node<C>,
    next_id: PaneId,
}

impl<C> Default for SplitterTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SplitterTree<C> {
    /// A tree with a single empty leaf.
    #[must_use]
    pub fn new() -> Self {
        Self::singleton(None)
    }

    /// A tree with a single leaf holding `content`.
    #[must_use]
    pub fn singleton(content: Option<C>) -> Self {
        let root_id = PaneId::MIN;
        Self {
            root: Node::Leaf(Leaf::new(root_id, content)),
            next_id: root_id.checked_next().unwrap_or(root_id),
        }
    }

    pub(crate) fn from_parts(root: Node<C>, next_id: PaneId) -> Result<Self, ModelError> {
        let tree = Self { root, next_id };
        tree.validate()?;
        Ok(tree)
    }

    #[must_use]
    pub const fn root(&self) -> &Node<C> {
        &self.root
    }

    #[must_use]
    pub const fn root_id(&self) -> PaneId {
        self.root.id()
    }

    /// The ID the next allocation will return.
    #[must_use]
    pub const fn next_id(&self) -> PaneId {
        self.next_id
    }

    #[must_use]
    pub fn node(&self, id: PaneId) -> Option<&Node<C>> {
        self.root.find(id)
    }

    #[must_use]
    pub fn leaf(&self, id: PaneId) -> Option<&Leaf<C>> {
        self.node(id).and_then(Node::as_leaf)
    }

    #[must_use]
    pub fn branch(&self, id: PaneId) -> Option<&Branch<C>> {
        self.node(id).and_then(Node::as_branch)
    }

    /// Content of a leaf; `None` for empty leaves, branches, and unknown IDs.
    #[must_use]
    pub fn content(&self, id: PaneId) -> Option<&C> {
        self.leaf(id).and_then(Leaf::content)
    }

    /// Leaves in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Leaf<C>> {
        self.root.leaves()
    }

    #[must_use]
    pub fn leaf_ids(&self) -> Vec<PaneId> {
        self.leaves().into_iter().map(Leaf::id).collect()
    }

    #[must_use]
    pub fn contains(&self, id: PaneId) -> bool {
        self.node(id).is_some()
    }

    #[must_use]
    pub fn is_leaf(&self, id: PaneId) -> bool {
        self.leaf(id).is_some()
    }

    #[must_use]
    pub fn is_root(&self, id: PaneId) -> bool {
        self.root.id() == id
    }

    /// True when `id` names a node with a parent, and therefore a sibling.
    #[must_use]
    pub fn has_sibling(&self, id: PaneId) -> bool {
        self.parent_of(id).is_some()
    }

    #[must_use]
    pub fn parent_of(&self, id: PaneId) -> Option<PaneId> {
        self.root.parent_of(id).map(Branch::id)
    }

    #[must_use]
    pub fn sibling_of(&self, id: PaneId) -> Option<PaneId> {
        let parent = self.root.parent_of(id)?;
        let slot = parent.slot_of(id)?;
        Some(parent.child(slot.other()).id())
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    #[must_use]
    pub fn branch_count(&self) -> usize {
        self.root.branch_count()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Check the structural invariants: unique IDs, valid proportions on
    /// every branch, and an allocator ahead of every existing ID.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = BTreeSet::new();
        for id in self.root.node_ids() {
            if !seen.insert(id) {
                return Err(ModelError::DuplicateNodeId { node_id: id });
            }
        }
        self.root.check_proportions()?;
        if let Some(&max_existing) = seen.last()
            && self.next_id <= max_existing
        {
            return Err(ModelError::NextIdNotGreaterThanExisting {
                next_id: self.next_id,
                max_existing,
            });
        }
        Ok(())
    }

    pub(crate) fn allocate_id(&mut self) -> Result<PaneId, OperationFailure> {
        let current = self.next_id;
        self.next_id = current
            .checked_next()
            .ok_or(OperationFailure::IdOverflow { current })?;
        Ok(current)
    }

    pub(crate) fn replace_root(&mut self, root: Node<C>) -> Node<C> {
        std::mem::replace(&mut self.root, root)
    }

    fn require_leaf(&self, id: PaneId) -> Result<&Leaf<C>, OperationFailure> {
        match self.node(id) {
            None => Err(OperationFailure::MissingNode { node_id: id }),
            Some(Node::Branch(_)) => Err(OperationFailure::NodeNotLeaf { node_id: id }),
            Some(Node::Leaf(leaf)) => Ok(leaf),
        }
    }

    /// Replace a leaf's content, returning the previous value.
    pub fn set_content(&mut self, leaf: PaneId, content: Option<C>) -> Result<Option<C>, LayoutError> {
        self.require_leaf(leaf)?;
        let slot = self
            .root
            .find_leaf_mut(leaf)
            .ok_or(OperationFailure::NodeNotLeaf { node_id: leaf })?;
        Ok(std::mem::replace(slot.content_mut(), content))
    }

    /// Exchange the contents of two leaves. Swapping a leaf with itself is a
    /// no-op.
    pub fn swap_content(&mut self, a: PaneId, b: PaneId) -> Result<(), LayoutError> {
        self.require_leaf(a)?;
        self.require_leaf(b)?;
        if a == b {
            return Ok(());
        }
        let taken_a = self
            .root
            .find_leaf_mut(a)
            .and_then(|leaf| leaf.content_mut().take());
        let taken_b = self
            .root
            .find_leaf_mut(b)
            .and_then(|leaf| leaf.content_mut().take());
        if let Some(leaf) = self.root.find_leaf_mut(a) {
            *leaf.content_mut() = taken_b;
        }
        if let Some(leaf) = self.root.find_leaf_mut(b) {
            *leaf.content_mut() = taken_a;
        }
        Ok(())
    }

    /// Set a branch's first share; the second becomes its complement.
    pub fn set_proportion(&mut self, branch: PaneId, first: f64) -> Result<Proportions, LayoutError> {
        let proportions = Proportions::from_first(first).map_err(|reason| {
            OperationFailure::InvalidProportion {
                node_id: branch,
                reason,
            }
        })?;
        let target = match self.root.find_mut(branch) {
            None => return Err(OperationFailure::MissingNode { node_id: branch }.into()),
            Some(Node::Leaf(_)) => {
                return Err(OperationFailure::NodeNotBranch { node_id: branch }.into());
            }
            Some(Node::Branch(target)) => target,
        };
        target.set_proportions(proportions);
        Ok(proportions)
    }
}

impl<C: Clone> SplitterTree<C> {
    /// Run `op` against a working copy; commit only if it succeeds, the
    /// result validates, and it stays within [`MAX_TREE_DEPTH`].
    pub(crate) fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, OperationFailure>,
    ) -> Result<T, LayoutError> {
        let mut working = self.clone();
        let outcome = op(&mut working)?;
        working.validate().map_err(OperationFailure::Validation)?;
        if working.depth() > MAX_TREE_DEPTH {
            return Err(OperationFailure::DepthLimit {
                max_depth: MAX_TREE_DEPTH,
            }
            .into());
        }
        *self = working;
        Ok(outcome)
    }

    /// Replace `leaf` with a branch holding the original leaf (first) and a
    /// new empty leaf (second) at an even split.
    pub fn split(&mut self, leaf: PaneId, orientation: Orientation) -> Result<SplitOutcome, LayoutError> {
        self.transact(|tree| {
            tree.require_leaf(leaf)?;
            let branch_id = tree.allocate_id()?;
            let created = tree.allocate_id()?;
            let slot = tree
                .root
                .find_mut(leaf)
                .ok_or(OperationFailure::MissingNode { node_id: leaf })?;
            let original = std::mem::replace(slot, Node::Leaf(Leaf::empty(created)));
            *slot = Node::Branch(Branch::new(
                branch_id,
                orientation,
                Proportions::EVEN,
                original,
                Node::Leaf(Leaf::empty(created)),
            ));
            Ok(SplitOutcome {
                branch: branch_id,
                retained: leaf,
                created,
            })
        })
    }

    /// Remove a non-root leaf; its sibling subtree takes the parent's place.
    pub fn remove_panel(&mut self, leaf: PaneId) -> Result<RemoveOutcome, LayoutError> {
        self.transact(|tree| {
            tree.require_leaf(leaf)?;
            if tree.is_root(leaf) {
                return Err(OperationFailure::CannotRemoveRoot { node_id: leaf });
            }
            let parent_id = tree
                .parent_of(leaf)
                .ok_or(OperationFailure::CannotRemoveRoot { node_id: leaf })?;
            let slot = tree
                .root
                .find_mut(parent_id)
                .ok_or(OperationFailure::MissingNode { node_id: parent_id })?;
            let Node::Branch(parent) = std::mem::replace(slot, Node::Leaf(Leaf::empty(parent_id)))
            else {
                return Err(OperationFailure::NodeNotBranch { node_id: parent_id });
            };
            let (first, second) = parent.into_children();
            let sibling = if first.id() == leaf { second } else { first };
            let promoted = sibling.id();
            *slot = sibling;
            Ok(RemoveOutcome {
                removed: leaf,
                collapsed_branch: parent_id,
                promoted,
            })
        })
    }
}
