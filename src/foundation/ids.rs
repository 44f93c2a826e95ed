use std::collections::HashSet;

use uuid::Uuid;

/// Source of fresh object identifiers for one synthesis run.
///
/// Identifiers are random v4 UUIDs in their hyphenated lowercase form. The allocator remembers
/// every identifier it has issued plus any it was told about up front, and draws again on the
/// (astronomically unlikely) event of a repeat.
#[derive(Clone, Debug, Default)]
pub struct UuidAllocator {
    taken: HashSet<String>,
}

impl UuidAllocator {
    /// Create an allocator with no reserved identifiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator that will never return any of `ids`.
    pub fn with_reserved<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Mark `id` as in use. Returns `false` if it was already taken.
    pub fn reserve(&mut self, id: impl Into<String>) -> bool {
        self.taken.insert(id.into())
    }

    /// Whether `id` has been reserved or issued.
    pub fn is_taken(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    /// Issue a new identifier.
    pub fn fresh(&mut self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.taken.insert(id.clone()) {
                return id;
            }
            tracing::warn!(%id, "uuid collision, drawing again");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/ids.rs"]
mod tests;
