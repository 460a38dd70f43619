//! Reading match files.
//!
//! Scores are read leniently: integers, numeric strings and null are all
//! accepted, and anything that does not coerce to a non-negative integer is
//! treated as missing so the standings fold can skip the match. Files written
//! by the older Italian-keyed tooling (`squadra_a`, `gol_a`, `risultato`, ...)
//! are accepted as well.

use crate::domain::model::{MatchBundle, MatchRecord, PlayoffFixture};
use crate::utils::error::{LeagueError, Result};
use serde::Deserialize;
use serde_json::Value;

const LEGACY_HOME_SHOOTOUT: &str = "rigori_a";
const LEGACY_AWAY_SHOOTOUT: &str = "rigori_b";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFormat {
    Json,
    Csv,
}

impl MatchFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(MatchFormat::Json),
            Some("csv") => Ok(MatchFormat::Csv),
            _ => Err(LeagueError::MatchFileError {
                message: format!("cannot tell the format of '{}' (expected .json or .csv)", path),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, alias = "giornata")]
    round: Option<Value>,
    #[serde(default, alias = "squadra_a")]
    home_team: Option<String>,
    #[serde(default, alias = "squadra_b")]
    away_team: Option<String>,
    #[serde(default, alias = "gol_a")]
    home_score: Option<Value>,
    #[serde(default, alias = "gol_b")]
    away_score: Option<Value>,
    #[serde(default)]
    played: Option<Value>,
    #[serde(default)]
    penalty_winner: Option<String>,
    #[serde(default)]
    risultato: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    List(Vec<RawMatch>),
    Bundle {
        matches: Vec<RawMatch>,
        #[serde(default)]
        playoffs: Vec<PlayoffFixture>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPlayoffs {
    List(Vec<PlayoffFixture>),
    Wrapped { playoffs: Vec<PlayoffFixture> },
}

pub fn parse_matches(data: &[u8], format: MatchFormat) -> Result<MatchBundle> {
    let (raw, playoffs) = match format {
        MatchFormat::Json => match serde_json::from_slice::<RawDocument>(data)? {
            RawDocument::List(matches) => (matches, Vec::new()),
            RawDocument::Bundle { matches, playoffs } => (matches, playoffs),
        },
        MatchFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(data);
            let rows = reader
                .deserialize::<RawMatch>()
                .collect::<std::result::Result<Vec<_>, _>>()?;
            (rows, Vec::new())
        }
    };

    let total = raw.len();
    let matches: Vec<MatchRecord> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let record = raw.into_record(index);
            if record.is_none() {
                tracing::warn!("Match #{} has no team names, ignoring it", index);
            }
            record
        })
        .collect();

    tracing::debug!("Parsed {} of {} match rows", matches.len(), total);
    Ok(MatchBundle { matches, playoffs })
}

pub fn parse_playoffs(data: &[u8]) -> Result<Vec<PlayoffFixture>> {
    Ok(match serde_json::from_slice::<RawPlayoffs>(data)? {
        RawPlayoffs::List(fixtures) | RawPlayoffs::Wrapped { playoffs: fixtures } => fixtures,
    })
}

impl RawMatch {
    fn into_record(self, row: usize) -> Option<MatchRecord> {
        let home_team = self.home_team.filter(|t| !t.trim().is_empty())?;
        let away_team = self.away_team.filter(|t| !t.trim().is_empty())?;

        let home_score = self.home_score.as_ref().and_then(coerce_score);
        let away_score = self.away_score.as_ref().and_then(coerce_score);
        let legacy_result = self.risultato.as_deref().map(str::trim);

        let played = match self.played.as_ref().and_then(coerce_flag) {
            Some(flag) => flag,
            None if legacy_result.is_some() => true,
            None => self.home_score.is_some() && self.away_score.is_some(),
        };

        let penalty_winner = self
            .penalty_winner
            .filter(|t| !t.trim().is_empty())
            .or_else(|| match legacy_result {
                Some(LEGACY_HOME_SHOOTOUT) => Some(home_team.clone()),
                Some(LEGACY_AWAY_SHOOTOUT) => Some(away_team.clone()),
                _ => None,
            });

        Some(MatchRecord {
            id: self.id.as_ref().and_then(coerce_id),
            round: self.round.as_ref().and_then(coerce_score),
            home_team,
            away_team,
            home_score,
            away_score,
            played,
            penalty_winner,
            source_row: Some(row),
        })
    }
}

/// Non-negative integer from a JSON number or numeric string.
pub fn coerce_score(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).ok()
            } else {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
                    .map(|f| f as u32)
            }
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
