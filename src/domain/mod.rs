// Domain layer: match model, standings engine, bracket deriver and ports.
// Nothing in here performs I/O; adapters and pipelines sit on top.

pub mod accumulator;
pub mod bracket;
pub mod model;
pub mod ports;
pub mod standings;
pub mod tiebreak;
