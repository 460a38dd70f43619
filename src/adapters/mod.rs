// Adapters layer: file formats on the way in and out of the engine.

pub mod match_file;
pub mod report;

pub use match_file::{parse_matches, parse_playoffs, MatchFormat};
