//! Error types for tree operations, descriptor loading, and settings.

use std::fmt;

use crate::descriptor::DescriptorPath;
use crate::node::{ChildSlot, PaneId};

/// Coarse error classification exposed to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutErrorKind {
    /// Operation rejected by a precondition; state is unchanged.
    InvalidOperation,
    /// A descriptor violates the tree invariants; state is unchanged.
    MalformedDescriptor,
}

/// Top-level error returned by the tree and the facade.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    InvalidOperation(OperationFailure),
    MalformedDescriptor(DescriptorError),
}

impl LayoutError {
    #[must_use]
    pub const fn kind(&self) -> LayoutErrorKind {
        match self {
            Self::InvalidOperation(_) => LayoutErrorKind::InvalidOperation,
            Self::MalformedDescriptor(_) => LayoutErrorKind::MalformedDescriptor,
        }
    }

    /// The operation failure, if this is an invalid-operation error.
    #[must_use]
    pub const fn operation_failure(&self) -> Option<&OperationFailure> {
        match self {
            Self::InvalidOperation(failure) => Some(failure),
            Self::MalformedDescriptor(_) => None,
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOperation(failure) => write!(f, "invalid operation: {failure}"),
            Self::MalformedDescriptor(err) => write!(f, "malformed descriptor: {err}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidOperation(failure) => Some(failure),
            Self::MalformedDescriptor(err) => Some(err),
        }
    }
}

impl From<OperationFailure> for LayoutError {
    fn from(value: OperationFailure) -> Self {
        Self::InvalidOperation(value)
    }
}

impl From<DescriptorError> for LayoutError {
    fn from(value: DescriptorError) -> Self {
        Self::MalformedDescriptor(value)
    }
}

/// Why a proportion pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProportionError {
    NotFinite { value: f64 },
    OutOfRange { value: f64 },
    SumMismatch { first: f64, second: f64 },
}

impl fmt::Display for ProportionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite { value } => write!(f, "share {value} is not finite"),
            Self::OutOfRange { value } => {
                write!(f, "share {value} is outside the open interval (0, 1)")
            }
            Self::SumMismatch { first, second } => {
                write!(f, "shares {first} + {second} do not sum to 1")
            }
        }
    }
}

impl std::error::Error for ProportionError {}

/// Structural invariant violation found by tree validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    ZeroPaneId,
    DuplicateNodeId {
        node_id: PaneId,
    },
    InvalidProportions {
        node_id: PaneId,
        reason: ProportionError,
    },
    NextIdNotGreaterThanExisting {
        next_id: PaneId,
        max_existing: PaneId,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPaneId => f.write_str("pane id 0 is invalid"),
            Self::DuplicateNodeId { node_id } => write!(f, "duplicate node id {node_id}"),
            Self::InvalidProportions { node_id, reason } => {
                write!(f, "branch {node_id} has invalid proportions: {reason}")
            }
            Self::NextIdNotGreaterThanExisting {
                next_id,
                max_existing,
            } => write!(
                f,
                "next id {next_id} must be greater than max existing id {max_existing}"
            ),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::InvalidProportions { reason, .. } = self {
            return Some(reason);
        }
        None
    }
}

/// Reason an operation was rejected. The tree is left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationFailure {
    MissingNode { node_id: PaneId },
    NodeNotLeaf { node_id: PaneId },
    NodeNotBranch { node_id: PaneId },
    CannotRemoveRoot { node_id: PaneId },
    CannotDragSoleLeaf { node_id: PaneId },
    EditModeDisabled,
    DragAlreadyActive { source: PaneId },
    InvalidProportion { node_id: PaneId, reason: ProportionError },
    InvalidSettings { errors: Vec<String> },
    NoContentFactory,
    UnknownContentKind { kind: String },
    IdOverflow { current: PaneId },
    DepthLimit { max_depth: usize },
    Validation(ModelError),
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode { node_id } => write!(f, "node {node_id} not found"),
            Self::NodeNotLeaf { node_id } => write!(f, "node {node_id} is not a leaf"),
            Self::NodeNotBranch { node_id } => write!(f, "node {node_id} is not a branch"),
            Self::CannotRemoveRoot { node_id } => {
                write!(f, "cannot remove root panel {node_id}")
            }
            Self::CannotDragSoleLeaf { node_id } => {
                write!(f, "panel {node_id} has no sibling and cannot be dragged")
            }
            Self::EditModeDisabled => f.write_str("edit mode is disabled"),
            Self::DragAlreadyActive { source } => {
                write!(f, "a drag from panel {source} is already active")
            }
            Self::InvalidProportion { node_id, reason } => {
                write!(f, "branch {node_id} rejected proportion: {reason}")
            }
            Self::InvalidSettings { errors } => {
                write!(f, "invalid settings: {}", errors.join("; "))
            }
            Self::NoContentFactory => f.write_str("no content factory is installed"),
            Self::UnknownContentKind { kind } => {
                write!(f, "content factory does not support kind {kind:?}")
            }
            Self::IdOverflow { current } => write!(f, "pane id overflow after {current}"),
            Self::DepthLimit { max_depth } => {
                write!(f, "layout would exceed {max_depth} levels")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for OperationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidProportion { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// A descriptor rejected during load, with the location of the offending
/// node.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorError {
    pub path: DescriptorPath,
    pub reason: DescriptorFailure,
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: {}", self.path, self.reason)
    }
}

impl std::error::Error for DescriptorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.reason {
            DescriptorFailure::InvalidProportions(reason) => Some(reason),
            DescriptorFailure::Model(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DescriptorFailure {
    MissingChild { slot: ChildSlot },
    MissingProportion { slot: ChildSlot },
    InvalidProportions(ProportionError),
    LeafHasChildren,
    LeafHasProportions,
    BranchHasContent,
    TooDeep { max_depth: usize },
    IdOverflow,
    Model(ModelError),
}

impl fmt::Display for DescriptorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingChild { slot } => write!(f, "branch is missing its {slot} child"),
            Self::MissingProportion { slot } => {
                write!(f, "branch is missing its {slot} proportion")
            }
            Self::InvalidProportions(reason) => write!(f, "{reason}"),
            Self::LeafHasChildren => f.write_str("leaf descriptor carries children"),
            Self::LeafHasProportions => f.write_str("leaf descriptor carries proportions"),
            Self::BranchHasContent => f.write_str("branch descriptor carries content"),
            Self::TooDeep { max_depth } => {
                write!(f, "descriptor nesting exceeds {max_depth} levels")
            }
            Self::IdOverflow => f.write_str("ran out of pane ids"),
            Self::Model(err) => write!(f, "{err}"),
        }
    }
}

/// Rejected settings input.
#[derive(Debug)]
pub enum SettingsError {
    #[cfg(feature = "settings-config")]
    Toml(toml::de::Error),
    #[cfg(feature = "settings-config")]
    Json(serde_json::Error),
    Validation(Vec<String>),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "settings-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "settings-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "settings validation failed: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "settings-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "settings-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
