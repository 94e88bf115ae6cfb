//! Drag-to-swap lifecycle.
//!
//! A drag picks up the content of one leaf, tracks which other leaf is under
//! the pointer, and on release exchanges the two contents. The coordinator
//! is a small state machine: every step returns a [`DragTransition`] naming
//! the states on either side and the effect the host should apply.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use splitgrid_core::{Point, Rect};

use crate::error::{LayoutError, OperationFailure};
use crate::node::{Node, PaneId};
use crate::tree::SplitterTree;

/// Drag lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: PaneId,
        drop_target: Option<PaneId>,
    },
}

/// Why an active drag ended without a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragCancelReason {
    /// The host lost pointer capture.
    CaptureLost,
    /// Edit mode was switched off mid-drag.
    EditModeDisabled,
    /// The tree was restructured, cleared, or reloaded.
    TreeMutated,
    Programmatic,
}

/// Why a step did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    TargetUnchanged,
}

/// Effect emitted by one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        source: PaneId,
    },
    TargetChanged {
        source: PaneId,
        previous: Option<PaneId>,
        current: Option<PaneId>,
    },
    Swapped {
        source: PaneId,
        target: PaneId,
    },
    /// Released over no valid target; nothing moved.
    Released {
        source: PaneId,
    },
    Canceled {
        source: PaneId,
        cleared: Option<PaneId>,
        reason: DragCancelReason,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// One deterministic lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragState,
    pub to: DragState,
    pub effect: DragEffect,
}

/// Runtime state machine for drag-to-swap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSwapCoordinator {
    state: DragState,
    transition_counter: u64,
}

impl DragSwapCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Leaf whose content is being dragged.
    #[must_use]
    pub const fn source(&self) -> Option<PaneId> {
        match self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// Currently highlighted drop target.
    #[must_use]
    pub const fn drop_target(&self) -> Option<PaneId> {
        match self.state {
            DragState::Dragging { drop_target, .. } => drop_target,
            DragState::Idle => None,
        }
    }

    fn step(&mut self, to: DragState, effect: DragEffect) -> DragTransition {
        let from = self.state;
        self.state = to;
        self.transition_counter = self.transition_counter.saturating_add(1);
        let transition = DragTransition {
            transition_id: self.transition_counter,
            from,
            to,
            effect,
        };
        tracing::trace!(
            transition_id = transition.transition_id,
            ?from,
            ?to,
            ?effect,
            "drag transition"
        );
        transition
    }

    fn noop(&mut self, reason: DragNoopReason) -> DragTransition {
        let state = self.state;
        self.step(state, DragEffect::Noop { reason })
    }

    /// Start dragging from `source`.
    ///
    /// Requires edit mode, no drag in progress, and a leaf that has a
    /// sibling. The sole root panel cannot be dragged.
    pub fn begin<C>(
        &mut self,
        tree: &SplitterTree<C>,
        source: PaneId,
        edit_mode: bool,
    ) -> Result<DragTransition, OperationFailure> {
        if !edit_mode {
            return Err(OperationFailure::EditModeDisabled);
        }
        if let Some(active) = self.source() {
            return Err(OperationFailure::DragAlreadyActive { source: active });
        }
        match tree.node(source) {
            None => return Err(OperationFailure::MissingNode { node_id: source }),
            Some(Node::Branch(_)) => {
                return Err(OperationFailure::NodeNotLeaf { node_id: source });
            }
            Some(Node::Leaf(_)) => {}
        }
        if tree.is_root(source) {
            return Err(OperationFailure::CannotDragSoleLeaf { node_id: source });
        }
        Ok(self.step(
            DragState::Dragging {
                source,
                drop_target: None,
            },
            DragEffect::Started { source },
        ))
    }

    /// Re-resolve the drop target under `pointer`.
    pub fn update<C>(
        &mut self,
        tree: &SplitterTree<C>,
        pointer: Point,
        bounds: &BTreeMap<PaneId, Rect>,
        inclusive: bool,
    ) -> DragTransition {
        let DragState::Dragging {
            source,
            drop_target: previous,
        } = self.state
        else {
            return self.noop(DragNoopReason::IdleWithoutActiveDrag);
        };
        let current = hit_test(tree, source, pointer, bounds, inclusive);
        if current == previous {
            return self.noop(DragNoopReason::TargetUnchanged);
        }
        self.step(
            DragState::Dragging {
                source,
                drop_target: current,
            },
            DragEffect::TargetChanged {
                source,
                previous,
                current,
            },
        )
    }

    /// Finish the drag, swapping contents with the highlighted target.
    ///
    /// The coordinator is idle afterwards even if the swap fails.
    pub fn end<C>(&mut self, tree: &mut SplitterTree<C>) -> Result<DragTransition, LayoutError> {
        let DragState::Dragging {
            source,
            drop_target,
        } = self.state
        else {
            return Ok(self.noop(DragNoopReason::IdleWithoutActiveDrag));
        };
        let target = drop_target.filter(|&target| {
            target != source && tree.is_leaf(target) && tree.is_leaf(source)
        });
        let Some(target) = target else {
            return Ok(self.step(DragState::Idle, DragEffect::Released { source }));
        };
        if let Err(err) = tree.swap_content(source, target) {
            self.state = DragState::Idle;
            return Err(err);
        }
        Ok(self.step(DragState::Idle, DragEffect::Swapped { source, target }))
    }

    /// Abort an active drag. Returns `None` when idle.
    pub fn cancel(&mut self, reason: DragCancelReason) -> Option<DragTransition> {
        let DragState::Dragging {
            source,
            drop_target,
        } = self.state
        else {
            return None;
        };
        Some(self.step(
            DragState::Idle,
            DragEffect::Canceled {
                source,
                cleared: drop_target,
                reason,
            },
        ))
    }
}

/// First leaf in pre-order, other than `exclude`, whose bounds contain
/// `pointer`. IDs in `bounds` that are not current leaves are ignored.
///
/// A pointer still inside `exclude`'s own bounds hits nothing, so a shared
/// edge under the inclusive test never resolves to a neighbour of the
/// excluded leaf.
#[must_use]
pub fn hit_test<C>(
    tree: &SplitterTree<C>,
    exclude: PaneId,
    pointer: Point,
    bounds: &BTreeMap<PaneId, Rect>,
    inclusive: bool,
) -> Option<PaneId> {
    if !pointer.is_finite() {
        return None;
    }
    if bounds
        .get(&exclude)
        .is_some_and(|rect| contains(rect, pointer, inclusive))
    {
        return None;
    }
    tree.leaf_ids().into_iter().find(|&id| {
        id != exclude
            && bounds
                .get(&id)
                .is_some_and(|rect| contains(rect, pointer, inclusive))
    })
}

fn contains(rect: &Rect, pointer: Point, inclusive: bool) -> bool {
    if inclusive {
        rect.contains_inclusive(pointer)
    } else {
        rect.contains(pointer)
    }
}
