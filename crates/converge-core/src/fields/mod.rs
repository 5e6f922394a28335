//! Field definitions and source reference mapping
//!
//! - **sources**: Translate `kind:selector` tokens between handles and ids
//! - **definition**: Convert live fields to and from portable definitions

mod definition;
mod sources;

pub use definition::{FieldDefinition, FieldMapper, SOURCES_KEY};
pub use sources::{Index, SINGLES, SourceKind, SourceMapper, parse_token};
