//! XML text helpers shared by the parser and serializer.

mod escape;

pub use escape::{escape_attr, escape_text, resolve_entity, unescape_xml};
