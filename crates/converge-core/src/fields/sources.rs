//! Source reference mapping
//!
//! Field settings refer to other entities through tokens of the form
//! `<kind>:<selector>`, for example `section:news` or `group:3`. Declared
//! definitions carry handles as selectors, the live host carries numeric
//! ids. `SourceMapper` rewrites the selector in either direction while
//! keeping the kind.
//!
//! A bare token without a kind is an older section reference, except for the
//! literal `singles` which is never resolved. A token whose target cannot be
//! found is returned untouched.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use converge_host::{SourceLookup, SourceObject};

use crate::Error;

/// Token that selects all single sections and is never mapped.
pub const SINGLES: &str = "singles";

/// Which key a selector is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Index {
    Handle,
    Id,
}

/// The kind of entity a token points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Section,
    /// User group
    Group,
    /// Asset source
    Folder,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Section => "section",
            SourceKind::Group => "group",
            SourceKind::Folder => "folder",
        }
    }
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "section" => Ok(SourceKind::Section),
            "group" => Ok(SourceKind::Group),
            "folder" => Ok(SourceKind::Folder),
            _ => Err(Error::UnknownSourceKind(s.to_string())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a token into its kind and selector.
///
/// The selector ends at the next `:`, so `section:a:b` selects `a`.
/// Returns `None` for `singles` and for tokens with an unknown kind.
pub fn parse_token(token: &str) -> Option<(SourceKind, &str)> {
    let mut parts = token.split(':');
    let head = parts.next()?;
    match parts.next() {
        Some(selector) => head.parse().ok().map(|kind| (kind, selector)),
        None if token != SINGLES => Some((SourceKind::Section, token)),
        None => None,
    }
}

/// Rewrites source tokens between handles and ids.
pub struct SourceMapper<'h> {
    sections: &'h dyn SourceLookup,
    groups: &'h dyn SourceLookup,
    folders: &'h dyn SourceLookup,
}

impl<'h> SourceMapper<'h> {
    /// Create a mapper over the section, user group and asset source lookups.
    pub fn new(
        sections: &'h dyn SourceLookup,
        groups: &'h dyn SourceLookup,
        folders: &'h dyn SourceLookup,
    ) -> Self {
        Self {
            sections,
            groups,
            folders,
        }
    }

    fn lookup(&self, kind: SourceKind) -> &'h dyn SourceLookup {
        match kind {
            SourceKind::Section => self.sections,
            SourceKind::Group => self.groups,
            SourceKind::Folder => self.folders,
        }
    }

    fn find(&self, kind: SourceKind, selector: &str, from: Index) -> Option<SourceObject> {
        let service = self.lookup(kind);
        match from {
            Index::Handle => service.find_by_handle(selector),
            Index::Id => selector
                .parse::<u64>()
                .ok()
                .and_then(|id| service.find_by_id(id)),
        }
    }

    /// Map a single token from one index to the other.
    ///
    /// Unresolvable tokens come back unchanged.
    pub fn map_source(&self, token: &str, from: Index, to: Index) -> String {
        let Some((kind, selector)) = parse_token(token) else {
            return token.to_string();
        };

        match self.find(kind, selector, from) {
            Some(object) => {
                let target = match to {
                    Index::Handle => object.handle,
                    Index::Id => object.id.to_string(),
                };
                format!("{}:{}", kind, target)
            }
            None => {
                debug!(token, ?from, "Source not found, keeping token");
                token.to_string()
            }
        }
    }

    /// Map a `sources` setting, which is either one token or a list of them.
    ///
    /// Lists keep their order. Non-string values are left alone.
    pub fn map_sources(&self, sources: &Value, from: Index, to: Index) -> Value {
        match sources {
            Value::String(token) => Value::String(self.map_source(token, from, to)),
            Value::Array(tokens) => Value::Array(
                tokens
                    .iter()
                    .map(|token| match token {
                        Value::String(token) => Value::String(self.map_source(token, from, to)),
                        other => other.clone(),
                    })
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use converge_test_utils::FakeLookup;
    use rstest::rstest;
    use serde_json::json;

    struct Lookups {
        sections: FakeLookup,
        groups: FakeLookup,
        folders: FakeLookup,
    }

    impl Lookups {
        fn new() -> Self {
            Self {
                sections: FakeLookup::new([(1, "news"), (2, "blog")]),
                groups: FakeLookup::new([(7, "editors")]),
                folders: FakeLookup::new([(3, "images")]),
            }
        }

        fn mapper(&self) -> SourceMapper<'_> {
            SourceMapper::new(&self.sections, &self.groups, &self.folders)
        }
    }

    #[rstest]
    #[case("section:news", "section:1")]
    #[case("group:editors", "group:7")]
    #[case("folder:images", "folder:3")]
    #[case("news", "section:1")]
    #[case("singles", "singles")]
    #[case("section:missing", "section:missing")]
    #[case("entrytype:news", "entrytype:news")]
    fn test_handle_to_id(#[case] token: &str, #[case] expected: &str) {
        let lookups = Lookups::new();
        assert_eq!(
            lookups.mapper().map_source(token, Index::Handle, Index::Id),
            expected
        );
    }

    #[rstest]
    #[case("section:1", "section:news")]
    #[case("group:7", "group:editors")]
    #[case("folder:3", "folder:images")]
    #[case("section:abc", "section:abc")]
    #[case("section:99", "section:99")]
    #[case("singles", "singles")]
    fn test_id_to_handle(#[case] token: &str, #[case] expected: &str) {
        let lookups = Lookups::new();
        assert_eq!(
            lookups.mapper().map_source(token, Index::Id, Index::Handle),
            expected
        );
    }

    #[test]
    fn test_kind_selects_service() {
        // "editors" is a group, not a section
        let lookups = Lookups::new();
        assert_eq!(
            lookups
                .mapper()
                .map_source("section:editors", Index::Handle, Index::Id),
            "section:editors"
        );
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(
            parse_token("group:editors"),
            Some((SourceKind::Group, "editors"))
        );
        assert_eq!(parse_token("news"), Some((SourceKind::Section, "news")));
        assert_eq!(parse_token("singles"), None);
        assert_eq!(parse_token("tag:1"), None);
        assert_eq!(parse_token("section:a:b"), Some((SourceKind::Section, "a")));
    }

    #[test]
    fn test_extra_colon_segments_are_dropped_on_resolve() {
        let lookups = Lookups::new();
        let mapper = lookups.mapper();

        assert_eq!(
            mapper.map_source("section:news:old", Index::Handle, Index::Id),
            "section:1"
        );
        assert_eq!(
            mapper.map_source("group:7:x", Index::Id, Index::Handle),
            "group:editors"
        );
        // A miss still keeps the whole token
        assert_eq!(
            mapper.map_source("section:gone:x", Index::Handle, Index::Id),
            "section:gone:x"
        );
    }

    #[test]
    fn test_map_sources_list_keeps_order() {
        let lookups = Lookups::new();
        let mapped = lookups.mapper().map_sources(
            &json!(["section:blog", "singles", "section:news", 5]),
            Index::Handle,
            Index::Id,
        );
        assert_eq!(mapped, json!(["section:2", "singles", "section:1", 5]));
    }

    #[test]
    fn test_map_sources_scalar_and_other() {
        let lookups = Lookups::new();
        let mapper = lookups.mapper();
        assert_eq!(
            mapper.map_sources(&json!("group:7"), Index::Id, Index::Handle),
            json!("group:editors")
        );
        assert_eq!(
            mapper.map_sources(&json!("*"), Index::Handle, Index::Id),
            json!("*")
        );
        assert_eq!(
            mapper.map_sources(&Value::Null, Index::Handle, Index::Id),
            Value::Null
        );
    }

    #[test]
    fn test_source_kind_round_trip() {
        for kind in [SourceKind::Section, SourceKind::Group, SourceKind::Folder] {
            assert_eq!(kind.as_str().parse::<SourceKind>().unwrap(), kind);
        }
        assert!("asset".parse::<SourceKind>().is_err());
    }
}
