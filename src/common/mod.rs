//! Common types and utilities shared across the crate.

pub mod unit;
pub mod xml;

pub use unit::{EMUS_PER_INCH, cm, inches, mm, pt, px_to_emu};
