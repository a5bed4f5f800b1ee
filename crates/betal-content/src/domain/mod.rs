//! Domain types for the story catalog.

pub mod media;
pub mod story;
pub mod subtitles;
pub mod themes;
