#![forbid(unsafe_code)]

//! Binary splitter-pane layout.
//!
//! A layout is a tree whose leaves host opaque content and whose branches
//! split their area between two children along one axis. The crate covers
//! the model and its invariants ([`SplitterTree`]), structural edits (split,
//! remove, edge docking, resize), drag-to-swap of leaf contents
//! ([`DragSwapCoordinator`]), persistence through [`PanelDescriptor`], and
//! rectangle solving ([`PaneLayout`]). [`SplitterLayout`] ties these
//! together for a host UI and reports changes as [`LayoutEvent`]s.
//!
//! Nothing here renders or measures; geometry comes from the host.

pub mod content;
pub mod descriptor;
pub mod dock;
pub mod drag;
pub mod error;
pub mod event;
pub mod node;
pub mod settings;
pub mod solve;
pub mod splitter;
pub mod tree;

pub use splitgrid_core::{Point, Rect};

pub use content::{ContentFactory, ContentKind};
pub use descriptor::{DescriptorPath, MAX_DESCRIPTOR_DEPTH, PanelDescriptor};
pub use dock::{DockOutcome, EdgePosition};
pub use drag::{
    DragCancelReason, DragEffect, DragNoopReason, DragState, DragSwapCoordinator, DragTransition,
};
pub use error::{
    DescriptorError, DescriptorFailure, LayoutError, LayoutErrorKind, ModelError,
    OperationFailure, ProportionError, SettingsError,
};
pub use event::{ChangeScope, LayoutEvent};
pub use node::{Branch, ChildSlot, Leaf, Node, Orientation, PROPORTION_EPSILON, PaneId, Proportions};
pub use settings::{DEFAULT_SPLITTER_THICKNESS, LayoutSettings};
pub use solve::{Divider, MIN_SHARE, PaneLayout};
pub use splitter::{PanelAction, PanelActionOutcome, SplitterLayout};
pub use tree::{MAX_TREE_DEPTH, RemoveOutcome, SplitOutcome, SplitterTree};
