//! Tales of Betal: story catalog.
//!
//! Responsible for the typed story record, validation of raw catalog data,
//! theme lookup, subtitle cues and media path handling.

pub mod application;
pub mod domain;
