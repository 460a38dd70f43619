pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{engine::LeagueEngine, pipeline::LeaguePipeline};
pub use domain::bracket::{advance_bracket, champion, BracketAdvance, BracketConfig, FixtureTemplate, Slot};
pub use domain::model::{
    MatchIssue, MatchRecord, Outcome, PlayoffFixture, RankedEntry, ResultKind, RoundType, Side,
};
pub use domain::standings::{compute_standings, StandingsReport};
pub use domain::tiebreak::{tie_break_key, TieBreakKey};
pub use utils::error::{LeagueError, Result};
