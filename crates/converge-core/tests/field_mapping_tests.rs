//! Tests for source reference mapping and field definitions

use converge_core::fields::{FieldDefinition, FieldMapper, Index, SourceMapper};
use converge_host::{Field, FieldGroup, Settings};
use converge_test_utils::FakeLookup;
use proptest::prelude::*;
use serde_json::{Value, json};

struct Environment {
    sections: FakeLookup,
    groups: FakeLookup,
    folders: FakeLookup,
}

impl Environment {
    fn new() -> Self {
        Self {
            sections: FakeLookup::new([(1, "News"), (2, "blog"), (3, "homepage")]),
            groups: FakeLookup::new([(5, "editors"), (6, "authors")]),
            folders: FakeLookup::new([(8, "images"), (9, "documents")]),
        }
    }

    fn sources(&self) -> SourceMapper<'_> {
        SourceMapper::new(&self.sections, &self.groups, &self.folders)
    }

    fn fields(&self) -> FieldMapper<'_> {
        FieldMapper::new(self.sources())
    }
}

fn settings(value: Value) -> Settings {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

fn news_definition() -> FieldDefinition {
    FieldDefinition {
        name: "Related".to_string(),
        required: false,
        instructions: "Choose related entries".to_string(),
        translatable: false,
        field_type: "Entries".to_string(),
        settings: settings(json!({
            "sources": ["section:News"],
            "limit": "",
            "selectionLabel": ""
        })),
        context: None,
    }
}

mod source_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_legacy_token_resolves_like_prefixed_token() {
        let env = Environment::new();
        let mapper = env.sources();

        assert_eq!(
            mapper.map_source("News", Index::Handle, Index::Id),
            mapper.map_source("section:News", Index::Handle, Index::Id)
        );
        assert_eq!(
            mapper.map_source("News", Index::Handle, Index::Id),
            "section:1"
        );
    }

    #[test]
    fn test_singles_passes_through_in_every_direction() {
        let env = Environment::new();
        let mapper = env.sources();

        for from in [Index::Handle, Index::Id] {
            for to in [Index::Handle, Index::Id] {
                assert_eq!(mapper.map_source("singles", from, to), "singles");
            }
        }
    }

    #[test]
    fn test_lookup_miss_is_silent() {
        let env = Environment::new();
        let mapped = env.sources().map_sources(
            &json!(["section:News", "section:gone", "group:ghosts"]),
            Index::Handle,
            Index::Id,
        );
        assert_eq!(mapped, json!(["section:1", "section:gone", "group:ghosts"]));
    }

    #[test]
    fn test_kind_is_preserved() {
        let env = Environment::new();
        let mapper = env.sources();

        assert_eq!(
            mapper.map_source("group:authors", Index::Handle, Index::Id),
            "group:6"
        );
        assert_eq!(
            mapper.map_source("folder:9", Index::Id, Index::Handle),
            "folder:documents"
        );
    }
}

mod definition_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_reproduces_sources() {
        let env = Environment::new();
        let mapper = env.fields();
        let original = news_definition();

        let mut field = Field::new();
        mapper.populate(&original, &mut field, "related", None);
        assert_eq!(field.settings["sources"], json!(["section:1"]));

        let exported = mapper.definition(&field, false);
        assert_eq!(exported, original);
        assert_eq!(
            serde_json::to_string(&exported.settings["sources"]).unwrap(),
            serde_json::to_string(&original.settings["sources"]).unwrap()
        );
    }

    #[test]
    fn test_round_trip_preserves_settings_order() {
        let env = Environment::new();
        let mapper = env.fields();
        let original = news_definition();

        let mut field = Field::new();
        mapper.populate(&original, &mut field, "related", None);
        let exported = mapper.definition(&field, false);

        let keys: Vec<&String> = exported.settings.keys().collect();
        assert_eq!(keys, vec!["sources", "limit", "selectionLabel"]);
    }

    #[test]
    fn test_populate_assigns_group() {
        let env = Environment::new();
        let mut field = Field::new();
        let group = FieldGroup::new(12, "Content");

        env.fields()
            .populate(&news_definition(), &mut field, "related", Some(&group));

        assert_eq!(field.group_id, Some(12));
        assert_eq!(field.handle, "related");
        assert_eq!(field.name, "Related");
    }

    #[test]
    fn test_definitions_keep_field_order() {
        let env = Environment::new();
        let mapper = env.fields();
        let mut first = Field::new();
        let mut second = Field::new();
        mapper.populate(&news_definition(), &mut first, "zRelated", None);
        mapper.populate(&news_definition(), &mut second, "aRelated", None);

        let definitions = mapper.definitions([&first, &second], true);

        let handles: Vec<&String> = definitions.keys().collect();
        assert_eq!(handles, vec!["zRelated", "aRelated"]);
        assert_eq!(definitions["aRelated"].context.as_deref(), Some("global"));
    }

    #[test]
    fn test_definition_yaml_shape() {
        let env = Environment::new();
        let mut field = Field::new();
        env.fields()
            .populate(&news_definition(), &mut field, "related", None);

        let yaml = serde_yaml::to_string(&env.fields().definition(&field, false)).unwrap();

        assert!(yaml.contains("type: Entries"));
        assert!(yaml.contains("section:News"));
        assert!(!yaml.contains("context"));
    }
}

fn known_section() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("News"), Just("blog"), Just("homepage")]
}

proptest! {
    #[test]
    fn test_resolve_then_reverse_is_identity(handles in prop::collection::vec(known_section(), 0..8)) {
        let env = Environment::new();
        let mapper = env.sources();
        let declared = Value::Array(
            handles.iter().map(|h| Value::String(format!("section:{}", h))).collect(),
        );

        let live = mapper.map_sources(&declared, Index::Handle, Index::Id);
        let back = mapper.map_sources(&live, Index::Id, Index::Handle);

        prop_assert_eq!(back, declared);
    }

    #[test]
    fn test_unknown_tokens_are_unchanged(token in "[a-z]{1,12}(:[a-z0-9]{0,6})?") {
        let env = Environment::new();
        let mapper = env.sources();
        prop_assume!(!["News", "blog", "homepage"].contains(&token.as_str()));
        prop_assume!(!token.starts_with("section:") && !token.starts_with("group:") && !token.starts_with("folder:"));

        prop_assert_eq!(mapper.map_source(&token, Index::Handle, Index::Id), token.clone());
        prop_assert_eq!(mapper.map_source(&token, Index::Id, Index::Handle), token);
    }

    #[test]
    fn test_list_length_and_order_preserved(tokens in prop::collection::vec("[a-z:0-9]{0,10}", 0..10)) {
        let env = Environment::new();
        let mapper = env.sources();
        let declared = Value::Array(tokens.iter().cloned().map(Value::String).collect());

        let mapped = mapper.map_sources(&declared, Index::Handle, Index::Id);
        let mapped = mapped.as_array().unwrap();

        prop_assert_eq!(mapped.len(), tokens.len());
        for (original, mapped) in tokens.iter().zip(mapped) {
            if original.contains(':') || original == "singles" {
                let kind = original.split(':').next().unwrap();
                prop_assert!(mapped.as_str().unwrap().starts_with(kind));
            }
        }
    }
}
