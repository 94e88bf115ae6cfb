//! Splitter tree node model.
//!
//! A node is either a content-hosting [`Leaf`] or a [`Branch`] that owns
//! exactly two children and splits its area along one axis. Children are
//! owned by value, so the tree can never contain shared subtrees or cycles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ProportionError};

/// Tolerance used when checking that a branch's proportions sum to one.
pub const PROPORTION_EPSILON: f64 = 1e-6;

/// Stable identifier for tree nodes.
///
/// `0` is reserved/invalid so IDs are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(u64);

impl PaneId {
    /// Lowest valid pane ID.
    pub const MIN: Self = Self(1);

    /// Create a new pane ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, ModelError> {
        if raw == 0 {
            return Err(ModelError::ZeroPaneId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next ID, or `None` on overflow.
    #[must_use]
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl Default for PaneId {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Orientation of a branch.
///
/// `Horizontal` stacks the children top (first) over bottom (second), with a
/// horizontal splitter bar between them. `Vertical` places them left (first)
/// and right (second) of a vertical bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
        }
    }
}

/// Which child of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildSlot {
    First,
    Second,
}

impl ChildSlot {
    /// The sibling slot.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl fmt::Display for ChildSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Second => f.write_str("second"),
        }
    }
}

/// Fractional shares of a branch's extent along its split axis.
///
/// Both shares lie in the open interval `(0, 1)` and sum to one within
/// [`PROPORTION_EPSILON`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proportions {
    first: f64,
    second: f64,
}

impl Proportions {
    /// An even `0.5 / 0.5` split.
    pub const EVEN: Self = Self {
        first: 0.5,
        second: 0.5,
    };

    /// Build from both shares, rejecting non-finite, out-of-range, or
    /// non-complementary values.
    pub fn new(first: f64, second: f64) -> Result<Self, ProportionError> {
        check_share(first)?;
        check_share(second)?;
        if ((first + second) - 1.0).abs() > PROPORTION_EPSILON {
            return Err(ProportionError::SumMismatch { first, second });
        }
        Ok(Self { first, second })
    }

    /// Build from the first share; the second is its complement.
    pub fn from_first(first: f64) -> Result<Self, ProportionError> {
        check_share(first)?;
        Self::new(first, 1.0 - first)
    }

    /// Share of the first child.
    #[must_use]
    pub const fn first(self) -> f64 {
        self.first
    }

    /// Share of the second child.
    #[must_use]
    pub const fn second(self) -> f64 {
        self.second
    }

    /// Share of the given child.
    #[must_use]
    pub const fn share(self, slot: ChildSlot) -> f64 {
        match slot {
            ChildSlot::First => self.first,
            ChildSlot::Second => self.second,
        }
    }

    /// Equal within [`PROPORTION_EPSILON`].
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        (self.first - other.first).abs() <= PROPORTION_EPSILON
            && (self.second - other.second).abs() <= PROPORTION_EPSILON
    }
}

impl Default for Proportions {
    fn default() -> Self {
        Self::EVEN
    }
}

fn check_share(value: f64) -> Result<(), ProportionError> {
    if !value.is_finite() {
        return Err(ProportionError::NotFinite { value });
    }
    if value <= 0.0 || value >= 1.0 {
        return Err(ProportionError::OutOfRange { value });
    }
    Ok(())
}

/// A content-hosting node. Never has children.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf<C> {
    id: PaneId,
    content: Option<C>,
}

impl<C> Leaf<C> {
    pub(crate) const fn new(id: PaneId, content: Option<C>) -> Self {
        Self { id, content }
    }

    pub(crate) const fn empty(id: PaneId) -> Self {
        Self { id, content: None }
    }

    #[must_use]
    pub const fn id(&self) -> PaneId {
        self.id
    }

    /// Opaque content identity, or `None` for an empty panel.
    #[must_use]
    pub const fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// True when no content is assigned.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    pub(crate) fn content_mut(&mut self) -> &mut Option<C> {
        &mut self.content
    }
}

/// A split node with exactly two owned children.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch<C> {
    id: PaneId,
    orientation: Orientation,
    proportions: Proportions,
    first: Box<Node<C>>,
    second: Box<Node<C>>,
}

impl<C> Branch<C> {
    pub(crate) fn new(
        id: PaneId,
        orientation: Orientation,
        proportions: Proportions,
        first: Node<C>,
        second: Node<C>,
    ) -> Self {
        Self {
            id,
            orientation,
            proportions,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    #[must_use]
    pub const fn id(&self) -> PaneId {
        self.id
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub const fn proportions(&self) -> Proportions {
        self.proportions
    }

    /// First child (top for horizontal, left for vertical).
    #[must_use]
    pub fn first(&self) -> &Node<C> {
        &self.first
    }

    /// Second child (bottom for horizontal, right for vertical).
    #[must_use]
    pub fn second(&self) -> &Node<C> {
        &self.second
    }

    #[must_use]
    pub fn child(&self, slot: ChildSlot) -> &Node<C> {
        match slot {
            ChildSlot::First => &self.first,
            ChildSlot::Second => &self.second,
        }
    }

    /// Slot of a direct child, if `id` names one.
    #[must_use]
    pub fn slot_of(&self, id: PaneId) -> Option<ChildSlot> {
        if self.first.id() == id {
            Some(ChildSlot::First)
        } else if self.second.id() == id {
            Some(ChildSlot::Second)
        } else {
            None
        }
    }

    pub(crate) fn set_proportions(&mut self, proportions: Proportions) {
        self.proportions = proportions;
    }

    pub(crate) fn into_children(self) -> (Node<C>, Node<C>) {
        (*self.first, *self.second)
    }
}

/// Tree node: a content leaf or a two-child split branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<C> {
    Leaf(Leaf<C>),
    Branch(Branch<C>),
}

impl<C> Node<C> {
    /// Node ID.
    #[must_use]
    pub const fn id(&self) -> PaneId {
        match self {
            Self::Leaf(leaf) => leaf.id,
            Self::Branch(branch) => branch.id,
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Leaf<C>> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Branch(_) => None,
        }
    }

    #[must_use]
    pub const fn as_branch(&self) -> Option<&Branch<C>> {
        match self {
            Self::Branch(branch) => Some(branch),
            Self::Leaf(_) => None,
        }
    }

    /// Find a node by ID (pre-order).
    #[must_use]
    pub fn find(&self, id: PaneId) -> Option<&Node<C>> {
        if self.id() == id {
            return Some(self);
        }
        match self {
            Self::Leaf(_) => None,
            Self::Branch(branch) => branch.first.find(id).or_else(|| branch.second.find(id)),
        }
    }

    pub(crate) fn find_mut(&mut self, id: PaneId) -> Option<&mut Node<C>> {
        if self.id() == id {
            return Some(self);
        }
        match self {
            Self::Leaf(_) => None,
            Self::Branch(Branch { first, second, .. }) => first
                .find_mut(id)
                .or_else(move || second.find_mut(id)),
        }
    }

    pub(crate) fn find_leaf_mut(&mut self, id: PaneId) -> Option<&mut Leaf<C>> {
        match self.find_mut(id)? {
            Self::Leaf(leaf) => Some(leaf),
            Self::Branch(_) => None,
        }
    }

    pub(crate) fn find_branch_mut(&mut self, id: PaneId) -> Option<&mut Branch<C>> {
        match self.find_mut(id)? {
            Self::Branch(branch) => Some(branch),
            Self::Leaf(_) => None,
        }
    }

    /// The branch that directly owns `id`, if any.
    #[must_use]
    pub fn parent_of(&self, id: PaneId) -> Option<&Branch<C>> {
        let Self::Branch(branch) = self else {
            return None;
        };
        if branch.slot_of(id).is_some() {
            return Some(branch);
        }
        branch
            .first
            .parent_of(id)
            .or_else(|| branch.second.parent_of(id))
    }

    /// All leaves in pre-order (first subtree before second).
    #[must_use]
    pub fn leaves(&self) -> Vec<&Leaf<C>> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf<C>>) {
        match self {
            Self::Leaf(leaf) => out.push(leaf),
            Self::Branch(branch) => {
                branch.first.collect_leaves(out);
                branch.second.collect_leaves(out);
            }
        }
    }

    /// All node IDs in pre-order.
    #[must_use]
    pub fn node_ids(&self) -> Vec<PaneId> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node.id());
            if let Self::Branch(branch) = node {
                stack.push(&branch.second);
                stack.push(&branch.first);
            }
        }
        out
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => branch.first.leaf_count() + branch.second.leaf_count(),
        }
    }

    #[must_use]
    pub fn branch_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Branch(branch) => {
                1 + branch.first.branch_count() + branch.second.branch_count()
            }
        }
    }

    /// Depth of the subtree; a lone leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => 1 + branch.first.depth().max(branch.second.depth()),
        }
    }

    /// Structural equivalence ignoring node IDs: same shape, orientations,
    /// proportions (within [`PROPORTION_EPSILON`]), and leaf contents.
    #[must_use]
    pub fn equivalent(&self, other: &Node<C>) -> bool
    where
        C: PartialEq,
    {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => a.content == b.content,
            (Self::Branch(a), Self::Branch(b)) => {
                a.orientation == b.orientation
                    && a.proportions.approx_eq(b.proportions)
                    && a.first.equivalent(&b.first)
                    && a.second.equivalent(&b.second)
            }
            _ => false,
        }
    }

    /// Check every branch's proportions in this subtree.
    pub(crate) fn check_proportions(&self) -> Result<(), ModelError> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Self::Branch(branch) = node {
                let Proportions { first, second } = branch.proportions;
                if let Err(reason) = Proportions::new(first, second) {
                    return Err(ModelError::InvalidProportions {
                        node_id: branch.id,
                        reason,
                    });
                }
                stack.push(&branch.second);
                stack.push(&branch.first);
            }
        }
        Ok(())
    }
}
