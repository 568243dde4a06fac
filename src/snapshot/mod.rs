//! Snapshot module
//!
//! One evaluation's worth of match statistics, parsed from the text fields a
//! caller collects. Parsing is atomic: a snapshot either parses completely or
//! not at all.

mod parse;
mod types;

pub use types::{FieldName, InputError, LayChoice, Snapshot, UnknownLayChoice};
