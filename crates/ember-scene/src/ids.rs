use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an element of the rendering surface.
///
/// Surfaces hand these out; the runtime never interprets the number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable id of a page section (`home`, `about`, ...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub const HOME: &'static str = "home";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn home() -> Self {
        Self::new(Self::HOME)
    }

    /// Parses a link reference like `#about`. Returns `None` for empty references.
    pub fn from_href(href: &str) -> Option<Self> {
        let id = href.strip_prefix('#').unwrap_or(href);
        if id.is_empty() {
            None
        } else {
            Some(Self::new(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `href` a nav link pointing at this section carries.
    pub fn href(&self) -> String {
        format!("#{}", self.0)
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::home()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_round_trip() {
        let id = SectionId::from_href("#squad").unwrap();
        assert_eq!(id, "squad");
        assert_eq!(id.href(), "#squad");
    }

    #[test]
    fn empty_href_is_rejected() {
        assert!(SectionId::from_href("#").is_none());
        assert!(SectionId::from_href("").is_none());
    }

    #[test]
    fn bare_id_is_accepted() {
        assert_eq!(SectionId::from_href("gallery").unwrap(), "gallery");
    }
}
