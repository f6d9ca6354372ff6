//! Editor routes addressing a single diagram.
//!
//! Diagrams are opened at `/diagrams/{id}`. [`DiagramRoute`] builds that path
//! from a [`DiagramId`] and parses it back.

use std::fmt;

use crate::identifier::DiagramId;

/// Path prefix shared by all diagram routes.
pub const DIAGRAMS_PREFIX: &str = "/diagrams/";

/// Route of the editor page showing one diagram.
///
/// # Examples
///
/// ```
/// use chartroom_core::{identifier::DiagramId, route::DiagramRoute};
///
/// let route = DiagramRoute::new(DiagramId::new("seed1").unwrap());
/// assert_eq!(route.to_string(), "/diagrams/seed1");
/// assert_eq!(DiagramRoute::parse("/diagrams/seed1"), Some(route));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagramRoute {
    id: DiagramId,
}

impl DiagramRoute {
    pub fn new(id: DiagramId) -> Self {
        Self { id }
    }

    /// Parses a `/diagrams/{id}` path, ignoring one trailing slash.
    ///
    /// Returns `None` for any other path, including `/diagrams/` itself.
    pub fn parse(path: &str) -> Option<Self> {
        let rest = path.strip_prefix(DIAGRAMS_PREFIX)?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        DiagramId::new(rest).ok().map(Self::new)
    }

    /// The diagram this route points at.
    pub fn id(&self) -> &DiagramId {
        &self.id
    }

    pub fn into_id(self) -> DiagramId {
        self.id
    }
}

impl fmt::Display for DiagramRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DIAGRAMS_PREFIX}{}", self.id)
    }
}
