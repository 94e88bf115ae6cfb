//! The host-facing layout facade.
//!
//! [`SplitterLayout`] owns the tree, the settings, the optional content
//! factory, and the drag coordinator. Every mutation goes through it so that
//! drags are canceled when the structure changes and hosts get a single
//! ordered queue of [`LayoutEvent`]s to render from.

use std::collections::BTreeMap;
use std::fmt;

use splitgrid_core::{Point, Rect};

use crate::content::{ContentFactory, ContentKind};
use crate::descriptor::PanelDescriptor;
use crate::dock::{DockOutcome, EdgePosition};
use crate::drag::{DragCancelReason, DragEffect, DragState, DragSwapCoordinator, DragTransition};
use crate::error::{LayoutError, OperationFailure};
use crate::event::{ChangeScope, LayoutEvent};
use crate::node::{Orientation, PaneId, Proportions};
use crate::settings::LayoutSettings;
use crate::solve::PaneLayout;
use crate::tree::{RemoveOutcome, SplitOutcome, SplitterTree};

/// An edit-mode action offered for a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PanelAction {
    /// Replace the leaf's content with a fresh instance of this kind.
    SetContent(ContentKind),
    /// Dock a new empty panel at an edge of the whole layout.
    AddEdge(EdgePosition),
    Split(Orientation),
    Remove,
}

impl PanelAction {
    /// Menu label.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::SetContent(kind) => format!("Set Panel Content/{}", kind.name),
            Self::AddEdge(position) => format!("Add Panel/{}", position.label()),
            Self::Split(orientation) => format!("Split Panel/{}", orientation.label()),
            Self::Remove => "Remove Panel".to_string(),
        }
    }
}

/// What an applied [`PanelAction`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelActionOutcome {
    ContentSet { leaf: PaneId },
    Docked(DockOutcome),
    Split(SplitOutcome),
    Removed(RemoveOutcome),
}

/// Splitter layout facade.
pub struct SplitterLayout<C> {
    tree: SplitterTree<C>,
    settings: LayoutSettings,
    factory: Option<Box<dyn ContentFactory<C>>>,
    drag: DragSwapCoordinator,
    events: Vec<LayoutEvent<C>>,
}

impl<C: fmt::Debug> fmt::Debug for SplitterLayout<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitterLayout")
            .field("tree", &self.tree)
            .field("settings", &self.settings)
            .field("has_factory", &self.factory.is_some())
            .field("drag", &self.drag)
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl<C: Clone> Default for SplitterLayout<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn logged<T>(op: &'static str, result: Result<T, LayoutError>) -> Result<T, LayoutError> {
    result.inspect_err(|err| {
        tracing::warn!(op, kind = ?err.kind(), error = %err, "layout operation rejected");
    })
}

impl<C: Clone> SplitterLayout<C> {
    /// A layout with a single empty panel and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(LayoutSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: LayoutSettings) -> Self {
        Self {
            tree: SplitterTree::new(),
            settings,
            factory: None,
            drag: DragSwapCoordinator::new(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub const fn tree(&self) -> &SplitterTree<C> {
        &self.tree
    }

    #[must_use]
    pub const fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    #[must_use]
    pub const fn edit_mode(&self) -> bool {
        self.settings.edit_mode
    }

    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Events queued since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[LayoutEvent<C>] {
        &self.events
    }

    /// Take all queued events in emission order.
    pub fn drain_events(&mut self) -> Vec<LayoutEvent<C>> {
        std::mem::take(&mut self.events)
    }

    // --- settings ---------------------------------------------------------

    pub fn set_content_factory(&mut self, factory: impl ContentFactory<C> + 'static) {
        self.factory = Some(Box::new(factory));
    }

    /// Remove the content factory. Returns whether one was installed.
    pub fn clear_content_factory(&mut self) -> bool {
        self.factory.take().is_some()
    }

    /// Kinds offered by the installed factory, or none.
    #[must_use]
    pub fn supported_content_kinds(&self) -> Vec<ContentKind> {
        self.factory
            .as_ref()
            .map(|factory| factory.supported_kinds())
            .unwrap_or_default()
    }

    /// Replace all settings. Turning edit mode off cancels any active drag.
    pub fn set_settings(&mut self, settings: LayoutSettings) -> Result<(), LayoutError> {
        let errors = settings.validate();
        if !errors.is_empty() {
            return logged(
                "set_settings",
                Err(OperationFailure::InvalidSettings { errors }.into()),
            );
        }
        if !settings.edit_mode {
            self.cancel_drag_with(DragCancelReason::EditModeDisabled);
        }
        self.settings = settings;
        tracing::debug!(?settings, "layout settings changed");
        self.events.push(LayoutEvent::SettingsChanged(settings));
        Ok(())
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        if self.settings.edit_mode == enabled {
            return;
        }
        if !enabled {
            self.cancel_drag_with(DragCancelReason::EditModeDisabled);
        }
        self.settings.edit_mode = enabled;
        tracing::debug!(enabled, "edit mode changed");
        self.events.push(LayoutEvent::SettingsChanged(self.settings));
    }

    /// Set the splitter bar thickness for every branch.
    pub fn set_thickness(&mut self, thickness: f64) -> Result<(), LayoutError> {
        self.set_settings(LayoutSettings {
            splitter_thickness: thickness,
            ..self.settings
        })
    }

    // --- structure --------------------------------------------------------

    fn scope_of(&self, id: PaneId) -> ChangeScope {
        if self.tree.is_root(id) {
            ChangeScope::Full
        } else {
            ChangeScope::Subtree(id)
        }
    }

    fn tree_changed(&mut self, scope: ChangeScope) {
        self.events.push(LayoutEvent::TreeChanged { scope });
    }

    /// Split a leaf into two, keeping its content in the first child.
    pub fn split(&mut self, leaf: PaneId, orientation: Orientation) -> Result<SplitOutcome, LayoutError> {
        let outcome = logged("split", self.tree.split(leaf, orientation))?;
        self.cancel_drag_with(DragCancelReason::TreeMutated);
        tracing::debug!(
            leaf = leaf.get(),
            branch = outcome.branch.get(),
            created = outcome.created.get(),
            ?orientation,
            "panel split"
        );
        let scope = self.scope_of(outcome.branch);
        self.tree_changed(scope);
        Ok(outcome)
    }

    /// Remove a non-root leaf and promote its sibling.
    pub fn remove_panel(&mut self, leaf: PaneId) -> Result<RemoveOutcome, LayoutError> {
        let outcome = logged("remove_panel", self.tree.remove_panel(leaf))?;
        self.cancel_drag_with(DragCancelReason::TreeMutated);
        tracing::debug!(
            leaf = leaf.get(),
            promoted = outcome.promoted.get(),
            "panel removed"
        );
        let scope = self.scope_of(outcome.promoted);
        self.tree_changed(scope);
        Ok(outcome)
    }

    /// Dock a new empty panel along one edge of the layout.
    pub fn add_edge(&mut self, position: EdgePosition) -> Result<DockOutcome, LayoutError> {
        let outcome = logged("add_edge", self.tree.add_edge(position))?;
        self.cancel_drag_with(DragCancelReason::TreeMutated);
        tracing::debug!(
            ?position,
            branch = outcome.branch.get(),
            created = outcome.created.get(),
            "panel docked"
        );
        self.tree_changed(ChangeScope::Full);
        Ok(outcome)
    }

    /// Resize a branch by setting its first share.
    pub fn set_proportion(&mut self, branch: PaneId, first: f64) -> Result<Proportions, LayoutError> {
        let proportions = logged("set_proportion", self.tree.set_proportion(branch, first))?;
        tracing::debug!(branch = branch.get(), first, "branch resized");
        let scope = self.scope_of(branch);
        self.tree_changed(scope);
        Ok(proportions)
    }

    /// Reset to a single empty panel.
    pub fn clear(&mut self) {
        self.cancel_drag_with(DragCancelReason::TreeMutated);
        self.tree = SplitterTree::new();
        tracing::debug!("layout cleared");
        self.tree_changed(ChangeScope::Full);
    }

    // --- content ----------------------------------------------------------

    /// Assign (or clear) a leaf's content directly.
    pub fn set_content(&mut self, leaf: PaneId, content: Option<C>) -> Result<(), LayoutError> {
        let _previous = logged("set_content", self.tree.set_content(leaf, content.clone()))?;
        tracing::debug!(leaf = leaf.get(), assigned = content.is_some(), "content set");
        self.events
            .push(LayoutEvent::ContentAssignmentChanged { leaf, content });
        Ok(())
    }

    /// Create content of `kind` through the factory and assign it to `leaf`.
    pub fn assign_content(&mut self, leaf: PaneId, kind: &str) -> Result<(), LayoutError> {
        logged("assign_content", self.create_for(leaf, kind))
            .and_then(|content| self.set_content(leaf, Some(content)))
    }

    fn create_for(&mut self, leaf: PaneId, kind: &str) -> Result<C, LayoutError> {
        if !self.tree.contains(leaf) {
            return Err(OperationFailure::MissingNode { node_id: leaf }.into());
        }
        if !self.tree.is_leaf(leaf) {
            return Err(OperationFailure::NodeNotLeaf { node_id: leaf }.into());
        }
        let factory = self
            .factory
            .as_mut()
            .ok_or(OperationFailure::NoContentFactory)?;
        factory.create_content(kind).ok_or_else(|| {
            OperationFailure::UnknownContentKind {
                kind: kind.to_string(),
            }
            .into()
        })
    }

    // --- panel actions ----------------------------------------------------

    /// Actions offered for `leaf` in edit mode, in menu order. Empty when
    /// edit mode is off or `leaf` is not a leaf.
    #[must_use]
    pub fn panel_actions(&self, leaf: PaneId) -> Vec<PanelAction> {
        if !self.settings.edit_mode || !self.tree.is_leaf(leaf) {
            return Vec::new();
        }
        let mut actions: Vec<PanelAction> = self
            .supported_content_kinds()
            .into_iter()
            .map(PanelAction::SetContent)
            .collect();
        actions.extend(EdgePosition::ALL.into_iter().map(PanelAction::AddEdge));
        actions.push(PanelAction::Split(Orientation::Horizontal));
        actions.push(PanelAction::Split(Orientation::Vertical));
        if !self.tree.is_root(leaf) {
            actions.push(PanelAction::Remove);
        }
        actions
    }

    /// Apply an action chosen from [`panel_actions`](Self::panel_actions).
    pub fn apply_panel_action(
        &mut self,
        leaf: PaneId,
        action: &PanelAction,
    ) -> Result<PanelActionOutcome, LayoutError> {
        if !self.settings.edit_mode {
            return logged(
                "apply_panel_action",
                Err(OperationFailure::EditModeDisabled.into()),
            );
        }
        match action {
            PanelAction::SetContent(kind) => {
                self.assign_content(leaf, &kind.kind)?;
                Ok(PanelActionOutcome::ContentSet { leaf })
            }
            PanelAction::AddEdge(position) => {
                if !self.tree.is_leaf(leaf) {
                    let failure = if self.tree.contains(leaf) {
                        OperationFailure::NodeNotLeaf { node_id: leaf }
                    } else {
                        OperationFailure::MissingNode { node_id: leaf }
                    };
                    return logged("apply_panel_action", Err(failure.into()));
                }
                self.add_edge(*position).map(PanelActionOutcome::Docked)
            }
            PanelAction::Split(orientation) => {
                self.split(leaf, *orientation).map(PanelActionOutcome::Split)
            }
            PanelAction::Remove => self.remove_panel(leaf).map(PanelActionOutcome::Removed),
        }
    }

    // --- drag to swap -----------------------------------------------------

    fn record_drag(&mut self, transition: &DragTransition) {
        match transition.effect {
            DragEffect::TargetChanged {
                previous, current, ..
            } => {
                if let Some(leaf) = previous {
                    self.events.push(LayoutEvent::LeafHighlightChanged {
                        leaf,
                        active: false,
                    });
                }
                if let Some(leaf) = current {
                    self.events.push(LayoutEvent::LeafHighlightChanged { leaf, active: true });
                }
            }
            DragEffect::Swapped { source, target } => {
                self.events.push(LayoutEvent::LeafHighlightChanged {
                    leaf: target,
                    active: false,
                });
                for leaf in [source, target] {
                    self.events.push(LayoutEvent::ContentAssignmentChanged {
                        leaf,
                        content: self.tree.content(leaf).cloned(),
                    });
                }
                tracing::debug!(
                    source = source.get(),
                    target = target.get(),
                    "panel contents swapped"
                );
            }
            DragEffect::Canceled {
                cleared: Some(leaf),
                ..
            } => {
                self.events.push(LayoutEvent::LeafHighlightChanged {
                    leaf,
                    active: false,
                });
            }
            DragEffect::Started { .. }
            | DragEffect::Released { .. }
            | DragEffect::Canceled { cleared: None, .. }
            | DragEffect::Noop { .. } => {}
        }
    }

    fn cancel_drag_with(&mut self, reason: DragCancelReason) -> Option<DragTransition> {
        let transition = self.drag.cancel(reason)?;
        tracing::debug!(?reason, "drag canceled");
        self.record_drag(&transition);
        Some(transition)
    }

    /// Pick up `leaf`'s content. Requires edit mode and a leaf with a
    /// sibling.
    pub fn begin_drag(&mut self, leaf: PaneId) -> Result<DragTransition, LayoutError> {
        let result = self
            .drag
            .begin(&self.tree, leaf, self.settings.edit_mode)
            .map_err(LayoutError::from);
        let transition = logged("begin_drag", result)?;
        self.record_drag(&transition);
        Ok(transition)
    }

    /// Move the pointer; `bounds` maps leaf IDs to their on-screen
    /// rectangles.
    pub fn update_drag(&mut self, pointer: Point, bounds: &BTreeMap<PaneId, Rect>) -> DragTransition {
        let transition =
            self.drag
                .update(&self.tree, pointer, bounds, self.settings.hit_test_inclusive);
        self.record_drag(&transition);
        transition
    }

    /// Release the pointer, swapping with the highlighted leaf if any.
    pub fn end_drag(&mut self) -> Result<DragTransition, LayoutError> {
        let transition = logged("end_drag", self.drag.end(&mut self.tree))?;
        self.record_drag(&transition);
        Ok(transition)
    }

    /// Abort the drag after the host lost pointer capture.
    pub fn cancel_drag(&mut self) -> Option<DragTransition> {
        self.cancel_drag_with(DragCancelReason::CaptureLost)
    }

    // --- persistence and geometry -----------------------------------------

    /// Descriptor for the current tree.
    #[must_use]
    pub fn save(&self) -> PanelDescriptor<C> {
        self.tree.to_descriptor()
    }

    /// Replace the tree with one built from `descriptor`. A malformed
    /// descriptor leaves the current tree untouched.
    pub fn load(&mut self, descriptor: PanelDescriptor<C>) -> Result<(), LayoutError> {
        let tree = logged(
            "load",
            SplitterTree::from_descriptor(descriptor).map_err(LayoutError::from),
        )?;
        self.cancel_drag_with(DragCancelReason::TreeMutated);
        self.tree = tree;
        tracing::debug!(
            leaves = self.tree.leaf_count(),
            depth = self.tree.depth(),
            "layout loaded"
        );
        self.tree_changed(ChangeScope::Full);
        Ok(())
    }

    /// Solve rectangles within `area` using the configured thickness.
    #[must_use]
    pub fn solve_layout(&self, area: Rect) -> PaneLayout {
        self.tree
            .solve_layout(area, self.settings.splitter_thickness)
    }
}
