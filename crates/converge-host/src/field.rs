//! Field and field group models.

use serde::{Deserialize, Serialize};

use crate::Settings;

/// A group that owns fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub id: u64,
    pub name: String,
}

impl FieldGroup {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A custom field as stored by the host.
///
/// `settings` is opaque field-type configuration. Only the `sources` key is
/// ever interpreted, and only by the field definition mapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Unset until the host persists the field.
    pub id: Option<u64>,
    pub group_id: Option<u64>,
    pub handle: String,
    pub name: String,
    pub required: bool,
    pub instructions: String,
    pub translatable: bool,
    /// Field type identifier, e.g. `Entries` or `PlainText`.
    pub field_type: String,
    pub settings: Settings,
    /// Storage context, `global` for top-level fields.
    pub context: String,
}

impl Field {
    /// An empty, unsaved field in the global context.
    pub fn new() -> Self {
        Self {
            context: "global".to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_global_and_unsaved() {
        let field = Field::new();
        assert_eq!(field.context, "global");
        assert!(field.id.is_none());
        assert!(field.group_id.is_none());
    }
}
