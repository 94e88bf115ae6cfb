//! Edge docking: wrapping the whole tree to add a panel along one side.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, OperationFailure};
use crate::node::{Branch, ChildSlot, Leaf, Node, Orientation, PaneId, Proportions};
use crate::tree::SplitterTree;

/// Share given to the first child of a docking branch.
pub const DOCK_FIRST_SHARE: f64 = 0.7;
/// Share given to the second child of a docking branch.
pub const DOCK_SECOND_SHARE: f64 = 0.3;

/// Side of the tree a new panel is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl EdgePosition {
    /// All positions, in menu order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Orientation of the branch created when docking at this edge.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Top | Self::Bottom => Orientation::Horizontal,
            Self::Left | Self::Right => Orientation::Vertical,
        }
    }

    /// Which child of the new branch holds the new panel.
    #[must_use]
    pub const fn new_panel_slot(self) -> ChildSlot {
        match self {
            Self::Top | Self::Left => ChildSlot::First,
            Self::Bottom | Self::Right => ChildSlot::Second,
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// Result of docking a panel at an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockOutcome {
    pub position: EdgePosition,
    /// New root branch.
    pub branch: PaneId,
    /// New empty leaf.
    pub created: PaneId,
    /// Root before the dock, now a child of `branch`.
    pub previous_root: PaneId,
}

impl<C: Clone> SplitterTree<C> {
    /// Wrap the current root in a new branch whose other child is an empty
    /// leaf at `position`. The first child always gets
    /// [`DOCK_FIRST_SHARE`] and the second [`DOCK_SECOND_SHARE`].
    pub fn add_edge(&mut self, position: EdgePosition) -> Result<DockOutcome, LayoutError> {
        self.transact(|tree| {
            let branch_id = tree.allocate_id()?;
            let created = tree.allocate_id()?;
            let proportions = Proportions::new(DOCK_FIRST_SHARE, DOCK_SECOND_SHARE).map_err(
                |reason| OperationFailure::InvalidProportion {
                    node_id: branch_id,
                    reason,
                },
            )?;
            let old_root = tree.replace_root(Node::Leaf(Leaf::empty(created)));
            let previous_root = old_root.id();
            let new_leaf = Node::Leaf(Leaf::empty(created));
            let (first, second) = match position.new_panel_slot() {
                ChildSlot::First => (new_leaf, old_root),
                ChildSlot::Second => (old_root, new_leaf),
            };
            tree.replace_root(Node::Branch(Branch::new(
                branch_id,
                position.orientation(),
                proportions,
                first,
                second,
            )));
            Ok(DockOutcome {
                position,
                branch: branch_id,
                created,
                previous_root,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MAX_TREE_DEPTH;

    fn docked(position: EdgePosition) -> (SplitterTree<&'static str>, DockOutcome) {
        let mut tree = SplitterTree::singleton(Some("A"));
        let outcome = tree.add_edge(position).expect("dock");
        (tree, outcome)
    }

    #[test]
    fn each_edge_builds_its_table_row() {
        // (position, orientation, new panel is the first child)
        let rows = [
            (EdgePosition::Top, Orientation::Horizontal, true),
            (EdgePosition::Bottom, Orientation::Horizontal, false),
            (EdgePosition::Left, Orientation::Vertical, true),
            (EdgePosition::Right, Orientation::Vertical, false),
        ];
        for (position, orientation, new_first) in rows {
            let (tree, outcome) = docked(position);
            let root = tree.branch(tree.root_id()).expect("root branch");
            assert_eq!(outcome.position, position);
            assert_eq!(root.id(), outcome.branch, "{position:?}");
            assert_eq!(root.orientation(), orientation, "{position:?}");
            let (first, second) = if new_first {
                (outcome.created, outcome.previous_root)
            } else {
                (outcome.previous_root, outcome.created)
            };
            assert_eq!(root.first().id(), first, "{position:?}");
            assert_eq!(root.second().id(), second, "{position:?}");
            assert_eq!(root.proportions().first(), 0.7, "{position:?}");
            assert_eq!(root.proportions().second(), 0.3, "{position:?}");
            assert_eq!(tree.content(outcome.previous_root), Some(&"A"));
            assert!(tree.leaf(outcome.created).expect("new leaf").is_empty());
        }
    }

    #[test]
    fn labels_are_plain_names() {
        let labels: Vec<_> = EdgePosition::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["Top", "Bottom", "Left", "Right"]);
    }

    #[test]
    fn docking_wraps_existing_branch_root() {
        let mut tree = SplitterTree::singleton(Some("A"));
        let split = tree
            .split(tree.root_id(), Orientation::Horizontal)
            .expect("split");
        let outcome = tree.add_edge(EdgePosition::Right).expect("dock");
        assert_eq!(outcome.previous_root, split.branch);
        assert_eq!(tree.parent_of(split.branch), Some(outcome.branch));
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn docking_stops_at_depth_limit_and_stays_loadable() {
        let mut tree = SplitterTree::singleton(Some("A"));
        while tree.depth() < MAX_TREE_DEPTH {
            tree.add_edge(EdgePosition::Right).expect("dock");
        }
        assert_eq!(tree.depth(), MAX_TREE_DEPTH);

        let before = tree.clone();
        let err = tree.add_edge(EdgePosition::Right).expect_err("too deep");
        assert_eq!(
            err.operation_failure(),
            Some(&OperationFailure::DepthLimit {
                max_depth: MAX_TREE_DEPTH
            })
        );
        assert_eq!(tree, before);

        let reloaded = SplitterTree::from_descriptor(tree.to_descriptor()).expect("reload");
        assert!(reloaded.root().equivalent(tree.root()));
        assert_eq!(reloaded.leaf_count(), MAX_TREE_DEPTH);
    }
}
