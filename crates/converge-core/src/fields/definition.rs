//! Field definitions and the mapper between them and live fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use converge_host::{Field, FieldGroup, Settings};

use super::sources::{Index, SourceMapper};

/// Settings key holding source reference tokens.
pub const SOURCES_KEY: &str = "sources";

/// Declared state of a single field
///
/// Serialized keys follow declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub translatable: bool,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Converts between live fields and their portable definitions.
///
/// Only `settings.sources` is rewritten; every other setting is copied as
/// is.
pub struct FieldMapper<'h> {
    sources: SourceMapper<'h>,
}

impl<'h> FieldMapper<'h> {
    pub fn new(sources: SourceMapper<'h>) -> Self {
        Self { sources }
    }

    /// Serialize a live field, turning source ids into handles.
    ///
    /// `context` is only written when `include_context` is set.
    pub fn definition(&self, field: &Field, include_context: bool) -> FieldDefinition {
        FieldDefinition {
            name: field.name.clone(),
            required: field.required,
            instructions: field.instructions.clone(),
            translatable: field.translatable,
            field_type: field.field_type.clone(),
            settings: self.map_settings(&field.settings, Index::Id, Index::Handle),
            context: include_context.then(|| field.context.clone()),
        }
    }

    /// Serialize a set of live fields keyed by handle, keeping their order.
    pub fn definitions<'f>(
        &self,
        fields: impl IntoIterator<Item = &'f Field>,
        include_context: bool,
    ) -> IndexMap<String, FieldDefinition> {
        fields
            .into_iter()
            .map(|field| {
                (
                    field.handle.clone(),
                    self.definition(field, include_context),
                )
            })
            .collect()
    }

    /// Apply a definition to a live field, turning source handles into ids.
    ///
    /// The handle comes from the caller since definitions are keyed by it.
    /// When a group is given the field is moved into it.
    pub fn populate(
        &self,
        definition: &FieldDefinition,
        field: &mut Field,
        handle: &str,
        group: Option<&FieldGroup>,
    ) {
        field.name = definition.name.clone();
        field.handle = handle.to_string();
        field.required = definition.required;
        field.translatable = definition.translatable;
        field.instructions = definition.instructions.clone();
        field.field_type = definition.field_type.clone();
        field.settings = self.map_settings(&definition.settings, Index::Handle, Index::Id);

        if let Some(group) = group {
            field.group_id = Some(group.id);
        }
    }

    fn map_settings(&self, settings: &Settings, from: Index, to: Index) -> Settings {
        let mut settings = settings.clone();
        if let Some(sources) = settings.get_mut(SOURCES_KEY) {
            *sources = self.sources.map_sources(sources, from, to);
        }
        settings
    }
}
