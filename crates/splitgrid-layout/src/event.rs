//! Change notifications queued by [`SplitterLayout`](crate::SplitterLayout).
//!
//! Hosts drain the queue after each batch of calls and re-render only what
//! the events name.

use crate::node::PaneId;
use crate::settings::LayoutSettings;

/// Extent of a structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeScope {
    /// The root changed; re-render everything.
    Full,
    /// Only the subtree rooted at this node changed.
    Subtree(PaneId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent<C> {
    TreeChanged { scope: ChangeScope },
    /// Drop-target highlight turned on or off for a leaf.
    LeafHighlightChanged { leaf: PaneId, active: bool },
    ContentAssignmentChanged { leaf: PaneId, content: Option<C> },
    SettingsChanged(LayoutSettings),
}
