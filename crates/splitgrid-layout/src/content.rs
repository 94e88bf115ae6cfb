//! Content identities and the host-provided content factory.

use serde::{Deserialize, Serialize};

/// A kind of content the host can create, as offered in panel menus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKind {
    /// Display name.
    pub name: String,
    /// Key passed back to [`ContentFactory::create_content`].
    pub kind: String,
}

impl ContentKind {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// Creates content identities for panels on request.
///
/// The layout never inspects content; it only stores and moves whatever the
/// factory returns.
pub trait ContentFactory<C> {
    /// Kinds this factory can create, in display order.
    fn supported_kinds(&self) -> Vec<ContentKind>;

    /// Create new content of `kind`, or `None` if the kind is unsupported.
    fn create_content(&mut self, kind: &str) -> Option<C>;
}
