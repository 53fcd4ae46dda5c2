//! In-memory XML tree for presentation parts.
//!
//! Documents are arenas of nodes addressed by stable ids and shared through
//! [`XmlDocument`] handles. Shape and chart wrappers hold [`XmlElement`]
//! views and never own the tree. New fragments are assembled with
//! [`ElementBuilder`] and grafted in one step.
//!
//! Element names are matched by qualified name (`"p:sp"`, `"a:off"`); the
//! parts this crate handles always use the conventional prefixes.

mod builder;
mod element;
pub mod ns;
mod parse;
mod serialize;
mod tree;

pub use builder::{BuilderNode, ElementBuilder};
pub use element::{XmlDocument, XmlElement};
pub use tree::NodeId;
