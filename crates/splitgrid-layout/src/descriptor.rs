//! Serializable layout descriptors and the save/load conversion.
//!
//! A descriptor is the persisted form of a tree. Leaves carry only content;
//! branches carry orientation, both proportions, and both children. Loading
//! validates the whole descriptor before producing a tree, so a malformed
//! input never reaches the live layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DescriptorError, DescriptorFailure};
use crate::node::{Branch, ChildSlot, Leaf, Node, Orientation, PaneId, Proportions};
use crate::tree::SplitterTree;

/// Deepest descriptor nesting accepted by [`load`].
pub const MAX_DESCRIPTOR_DEPTH: usize = 512;

/// Persisted form of a tree node.
///
/// A leaf has `orientation`, both proportions, and both children set to
/// `None`. A branch has all of them set and no content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C: Serialize",
    deserialize = "C: Deserialize<'de>"
))]
pub struct PanelDescriptor<C> {
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub first_proportion: Option<f64>,
    #[serde(default)]
    pub second_proportion: Option<f64>,
    #[serde(default)]
    pub first: Option<Box<PanelDescriptor<C>>>,
    #[serde(default)]
    pub second: Option<Box<PanelDescriptor<C>>>,
    #[serde(default)]
    pub content: Option<C>,
}

impl<C> PanelDescriptor<C> {
    #[must_use]
    pub const fn leaf(content: Option<C>) -> Self {
        Self {
            orientation: None,
            first_proportion: None,
            second_proportion: None,
            first: None,
            second: None,
            content,
        }
    }

    #[must_use]
    pub fn branch(
        orientation: Orientation,
        first_proportion: f64,
        second_proportion: f64,
        first: Self,
        second: Self,
    ) -> Self {
        Self {
            orientation: Some(orientation),
            first_proportion: Some(first_proportion),
            second_proportion: Some(second_proportion),
            first: Some(Box::new(first)),
            second: Some(Box::new(second)),
            content: None,
        }
    }
}

/// Location of a descriptor node, as child steps from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DescriptorPath(Vec<ChildSlot>);

impl DescriptorPath {
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, slot: ChildSlot) {
        self.0.push(slot);
    }

    pub fn pop(&mut self) -> Option<ChildSlot> {
        self.0.pop()
    }

    #[must_use]
    pub fn steps(&self) -> &[ChildSlot] {
        &self.0
    }

    /// Nesting depth; the root is 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for DescriptorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for step in &self.0 {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}

/// Produce the descriptor for a subtree. Contents are copied as-is.
#[must_use]
pub fn save<C: Clone>(node: &Node<C>) -> PanelDescriptor<C> {
    match node {
        Node::Leaf(leaf) => PanelDescriptor::leaf(leaf.content().cloned()),
        Node::Branch(branch) => {
            let proportions = branch.proportions();
            PanelDescriptor::branch(
                branch.orientation(),
                proportions.first(),
                proportions.second(),
                save(branch.first()),
                save(branch.second()),
            )
        }
    }
}

/// Build a fresh tree from a descriptor. Node IDs are assigned in pre-order
/// starting at [`PaneId::MIN`].
pub fn load<C>(descriptor: PanelDescriptor<C>) -> Result<SplitterTree<C>, DescriptorError> {
    let mut builder = Builder {
        next_id: Some(PaneId::MIN),
        path: DescriptorPath::root(),
    };
    let root = builder.build(descriptor)?;
    let next_id = builder.next_id.ok_or_else(|| builder.fail(DescriptorFailure::IdOverflow))?;
    SplitterTree::from_parts(root, next_id).map_err(|err| DescriptorError {
        path: DescriptorPath::root(),
        reason: DescriptorFailure::Model(err),
    })
}

struct Builder {
    next_id: Option<PaneId>,
    path: DescriptorPath,
}

impl Builder {
    fn fail(&self, reason: DescriptorFailure) -> DescriptorError {
        DescriptorError {
            path: self.path.clone(),
            reason,
        }
    }

    fn allocate(&mut self) -> Result<PaneId, DescriptorError> {
        let current = self
            .next_id
            .ok_or_else(|| self.fail(DescriptorFailure::IdOverflow))?;
        self.next_id = current.checked_next();
        Ok(current)
    }

    fn build<C>(&mut self, descriptor: PanelDescriptor<C>) -> Result<Node<C>, DescriptorError> {
        if self.path.depth() > MAX_DESCRIPTOR_DEPTH {
            return Err(self.fail(DescriptorFailure::TooDeep {
                max_depth: MAX_DESCRIPTOR_DEPTH,
            }));
        }
        let PanelDescriptor {
            orientation,
            first_proportion,
            second_proportion,
            first,
            second,
            content,
        } = descriptor;

        let Some(orientation) = orientation else {
            if first.is_some() || second.is_some() {
                return Err(self.fail(DescriptorFailure::LeafHasChildren));
            }
            if first_proportion.is_some() || second_proportion.is_some() {
                return Err(self.fail(DescriptorFailure::LeafHasProportions));
            }
            let id = self.allocate()?;
            return Ok(Node::Leaf(Leaf::new(id, content)));
        };

        if content.is_some() {
            return Err(self.fail(DescriptorFailure::BranchHasContent));
        }
        let first = first.ok_or_else(|| {
            self.fail(DescriptorFailure::MissingChild {
                slot: ChildSlot::First,
            })
        })?;
        let second = second.ok_or_else(|| {
            self.fail(DescriptorFailure::MissingChild {
                slot: ChildSlot::Second,
            })
        })?;
        let first_share = first_proportion.ok_or_else(|| {
            self.fail(DescriptorFailure::MissingProportion {
                slot: ChildSlot::First,
            })
        })?;
        let second_share = second_proportion.ok_or_else(|| {
            self.fail(DescriptorFailure::MissingProportion {
                slot: ChildSlot::Second,
            })
        })?;
        let proportions = Proportions::new(first_share, second_share)
            .map_err(|reason| self.fail(DescriptorFailure::InvalidProportions(reason)))?;

        let id = self.allocate()?;
        let first = self.build_child(ChildSlot::First, *first)?;
        let second = self.build_child(ChildSlot::Second, *second)?;
        Ok(Node::Branch(Branch::new(
            id,
            orientation,
            proportions,
            first,
            second,
        )))
    }

    fn build_child<C>(
        &mut self,
        slot: ChildSlot,
        descriptor: PanelDescriptor<C>,
    ) -> Result<Node<C>, DescriptorError> {
        self.path.push(slot);
        let node = self.build(descriptor)?;
        self.path.pop();
        Ok(node)
    }
}

impl<C: Clone> SplitterTree<C> {
    /// Descriptor for the whole tree.
    #[must_use]
    pub fn to_descriptor(&self) -> PanelDescriptor<C> {
        save(self.root())
    }
}

impl<C> SplitterTree<C> {
    /// Build a tree from a descriptor. See [`load`].
    pub fn from_descriptor(descriptor: PanelDescriptor<C>) -> Result<Self, DescriptorError> {
        load(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Desc = PanelDescriptor<String>;

    fn leaf(content: &str) -> Desc {
        PanelDescriptor::leaf(Some(content.to_string()))
    }

    #[test]
    fn load_then_save_reproduces_descriptor() {
        let descriptor = PanelDescriptor::branch(
            Orientation::Vertical,
            0.3,
            0.7,
            leaf("A"),
            PanelDescriptor::branch(
                Orientation::Horizontal,
                0.5,
                0.5,
                PanelDescriptor::leaf(None),
                leaf("B"),
            ),
        );
        let tree = load(descriptor.clone()).expect("valid descriptor");
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.to_descriptor(), descriptor);
    }

    #[test]
    fn ids_are_assigned_in_pre_order() {
        let tree = load(PanelDescriptor::branch(
            Orientation::Vertical,
            0.5,
            0.5,
            leaf("A"),
            leaf("B"),
        ))
        .expect("valid");
        let ids: Vec<u64> = tree.root().node_ids().iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(tree.next_id().get(), 4);
    }

    #[test]
    fn leaf_root_loads_as_single_panel() {
        let tree = load(leaf("only")).expect("valid");
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.content(tree.root_id()), Some(&"only".to_string()));
    }

    #[test]
    fn proportions_out_of_range_are_rejected_with_path() {
        let descriptor = PanelDescriptor::branch(
            Orientation::Vertical,
            0.5,
            0.5,
            leaf("A"),
            PanelDescriptor::branch(Orientation::Vertical, 1.5, -0.5, leaf("B"), leaf("C")),
        );
        let err = load(descriptor).expect_err("bad proportions");
        assert_eq!(err.path.steps(), &[ChildSlot::Second]);
        assert!(matches!(err.reason, DescriptorFailure::InvalidProportions(_)));
    }

    #[test]
    fn proportions_must_sum_to_one() {
        let err = load(PanelDescriptor::branch(
            Orientation::Horizontal,
            0.4,
            0.4,
            leaf("A"),
            leaf("B"),
        ))
        .expect_err("sum mismatch");
        assert!(matches!(
            err.reason,
            DescriptorFailure::InvalidProportions(crate::error::ProportionError::SumMismatch { .. })
        ));
    }

    #[test]
    fn branch_missing_child_is_rejected() {
        let mut descriptor =
            PanelDescriptor::branch(Orientation::Vertical, 0.5, 0.5, leaf("A"), leaf("B"));
        descriptor.second = None;
        let err = load(descriptor).expect_err("missing child");
        assert_eq!(
            err.reason,
            DescriptorFailure::MissingChild {
                slot: ChildSlot::Second
            }
        );
        assert_eq!(err.path, DescriptorPath::root());
    }

    #[test]
    fn branch_missing_proportion_is_rejected() {
        let mut descriptor =
            PanelDescriptor::branch(Orientation::Vertical, 0.5, 0.5, leaf("A"), leaf("B"));
        descriptor.first_proportion = None;
        assert_eq!(
            load(descriptor).expect_err("missing share").reason,
            DescriptorFailure::MissingProportion {
                slot: ChildSlot::First
            }
        );
    }

    #[test]
    fn leaf_with_children_or_proportions_is_rejected() {
        let mut with_child = leaf("A");
        with_child.first = Some(Box::new(leaf("B")));
        assert_eq!(
            load(with_child).expect_err("leaf child").reason,
            DescriptorFailure::LeafHasChildren
        );

        let mut with_share = leaf("A");
        with_share.first_proportion = Some(0.5);
        assert_eq!(
            load(with_share).expect_err("leaf share").reason,
            DescriptorFailure::LeafHasProportions
        );
    }

    #[test]
    fn branch_with_content_is_rejected() {
        let mut descriptor =
            PanelDescriptor::branch(Orientation::Vertical, 0.5, 0.5, leaf("A"), leaf("B"));
        descriptor.content = Some("stray".to_string());
        assert_eq!(
            load(descriptor).expect_err("branch content").reason,
            DescriptorFailure::BranchHasContent
        );
    }

    #[test]
    fn excessive_nesting_is_rejected() {
        let mut descriptor = leaf("deep");
        for _ in 0..=MAX_DESCRIPTOR_DEPTH {
            descriptor =
                PanelDescriptor::branch(Orientation::Vertical, 0.5, 0.5, descriptor, leaf("x"));
        }
        let err = load(descriptor).expect_err("too deep");
        assert_eq!(
            err.reason,
            DescriptorFailure::TooDeep {
                max_depth: MAX_DESCRIPTOR_DEPTH
            }
        );
        assert_eq!(err.path.depth(), MAX_DESCRIPTOR_DEPTH + 1);
    }

    #[test]
    fn json_shape_uses_snake_case_and_nulls() {
        let descriptor: PanelDescriptor<String> =
            PanelDescriptor::branch(Orientation::Horizontal, 0.5, 0.5, leaf("A"), PanelDescriptor::leaf(None));
        let json = serde_json::to_value(&descriptor).expect("serialize");
        assert_eq!(json["orientation"], "horizontal");
        assert_eq!(json["first_proportion"], 0.5);
        assert_eq!(json["first"]["content"], "A");
        assert!(json["first"]["orientation"].is_null());
        assert!(json["second"]["content"].is_null());

        let back: PanelDescriptor<String> = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, descriptor);
    }

    #[test]
    fn missing_fields_deserialize_as_leaf() {
        let descriptor: PanelDescriptor<String> =
            serde_json::from_str(r#"{"content":"A"}"#).expect("deserialize");
        assert_eq!(descriptor, leaf("A"));
    }
}
