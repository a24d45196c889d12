use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for element IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Interned identifier for an element on the artboard.
///
/// Backed by a `Spur` so it is 4 bytes and `Copy`. Freshly generated IDs are
/// UUID v4 strings, so an ID is never handed out twice within a session.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern `s` as an id, returning the existing handle if already known.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a brand-new unique id.
    pub fn generate() -> Self {
        Self::intern(&uuid::Uuid::new_v4().to_string())
    }

    /// True for the empty string id, which no valid element may carry.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}
