//! [`FakeLookup`]: a reference lookup over a fixed table.

use converge_host::{SourceLookup, SourceObject};

/// Answers handle and id queries from a list of objects.
///
/// Handle and id lookups are mutual inverses as long as the table has no
/// duplicate ids or handles.
#[derive(Debug, Clone, Default)]
pub struct FakeLookup {
    objects: Vec<SourceObject>,
}

impl FakeLookup {
    /// Build from `(id, handle)` pairs.
    pub fn new<'a>(entries: impl IntoIterator<Item = (u64, &'a str)>) -> Self {
        Self {
            objects: entries
                .into_iter()
                .map(|(id, handle)| SourceObject::new(id, handle))
                .collect(),
        }
    }

    /// A lookup that never finds anything.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl SourceLookup for FakeLookup {
    fn find_by_handle(&self, handle: &str) -> Option<SourceObject> {
        self.objects.iter().find(|o| o.handle == handle).cloned()
    }

    fn find_by_id(&self, id: u64) -> Option<SourceObject> {
        self.objects.iter().find(|o| o.id == id).cloned()
    }
}
