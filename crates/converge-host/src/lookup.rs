//! Lookup services for entities that field settings may reference.

use serde::{Deserialize, Serialize};

/// The minimal shape of a referenced entity: a section, a user group or an
/// asset source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceObject {
    /// Environment-local numeric id.
    pub id: u64,
    /// Portable handle.
    pub handle: String,
}

impl SourceObject {
    pub fn new(id: u64, handle: impl Into<String>) -> Self {
        Self {
            id,
            handle: handle.into(),
        }
    }
}

/// A host service that can find referenced entities by either key.
///
/// A miss is `None`, never an error.
pub trait SourceLookup {
    fn find_by_handle(&self, handle: &str) -> Option<SourceObject>;

    fn find_by_id(&self, id: u64) -> Option<SourceObject>;
}
