use crate::domain::bracket::BracketAdvance;
use crate::domain::standings::StandingsReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// How a played match was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    RegulationWin(Side),
    ShootoutWin(Side),
    UnresolvedDraw,
}

impl Outcome {
    /// Points awarded as `(home, away)`.
    pub fn points(self) -> (u32, u32) {
        match self {
            Outcome::RegulationWin(Side::Home) => (3, 0),
            Outcome::RegulationWin(Side::Away) => (0, 3),
            Outcome::ShootoutWin(Side::Home) => (2, 1),
            Outcome::ShootoutWin(Side::Away) => (1, 2),
            Outcome::UnresolvedDraw => (1, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub played: bool,
    #[serde(default)]
    pub penalty_winner: Option<String>,
    /// Zero-based row in the file this record was read from. Issues raised
    /// by the fold are numbered by this row when it is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_row: Option<usize>,
}

impl MatchRecord {
    pub fn unplayed(home_team: &str, away_team: &str) -> Self {
        Self {
            id: None,
            round: None,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_score: None,
            away_score: None,
            played: false,
            penalty_winner: None,
            source_row: None,
        }
    }

    pub fn played(home_team: &str, away_team: &str, home_score: u32, away_score: u32) -> Self {
        Self {
            home_score: Some(home_score),
            away_score: Some(away_score),
            played: true,
            ..Self::unplayed(home_team, away_team)
        }
    }

    pub fn with_penalty_winner(mut self, team: &str) -> Self {
        self.penalty_winner = Some(team.to_string());
        self
    }

    /// The side named by `penalty_winner`, if it names a participant.
    pub fn penalty_side(&self) -> Option<Side> {
        match self.penalty_winner.as_deref() {
            Some(name) if name == self.home_team => Some(Side::Home),
            Some(name) if name == self.away_team => Some(Side::Away),
            _ => None,
        }
    }

    /// Final score as `(home, away)` for a played match with both scores present.
    pub fn scoreline(&self) -> Option<(u32, u32)> {
        if !self.played {
            return None;
        }
        self.home_score.zip(self.away_score)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        let (home, away) = self.scoreline()?;
        let outcome = match home.cmp(&away) {
            std::cmp::Ordering::Greater => Outcome::RegulationWin(Side::Home),
            std::cmp::Ordering::Less => Outcome::RegulationWin(Side::Away),
            std::cmp::Ordering::Equal => match self.penalty_side() {
                Some(side) => Outcome::ShootoutWin(side),
                None => Outcome::UnresolvedDraw,
            },
        };
        Some(outcome)
    }
}

/// A match record the fold had to skip or reinterpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchIssue {
    MalformedMatch {
        index: usize,
        home_team: String,
        away_team: String,
        reason: String,
    },
    InvalidPenaltyWinner {
        index: usize,
        home_team: String,
        away_team: String,
        named: String,
    },
}

impl std::fmt::Display for MatchIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchIssue::MalformedMatch {
                index,
                home_team,
                away_team,
                reason,
            } => write!(
                f,
                "match #{} {} vs {} skipped: {}",
                index, home_team, away_team, reason
            ),
            MatchIssue::InvalidPenaltyWinner {
                index,
                home_team,
                away_team,
                named,
            } => write!(
                f,
                "match #{} {} vs {}: penalty winner '{}' is not a participant, counted as a draw",
                index, home_team, away_team, named
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub team: String,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub matches_played: u32,
    #[serde(default)]
    pub won: u32,
    #[serde(default)]
    pub drawn: u32,
    #[serde(default)]
    pub lost: u32,
    /// Level matches won on penalties; already counted in `drawn`.
    #[serde(default)]
    pub shootout_wins: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    Quarterfinal,
    Semifinal,
    Final,
}

impl std::fmt::Display for RoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundType::Quarterfinal => "quarterfinal",
            RoundType::Semifinal => "semifinal",
            RoundType::Final => "final",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Regulation,
    PenaltiesHome,
    PenaltiesAway,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoffFixture {
    pub id: String,
    pub round_type: RoundType,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub result_kind: Option<ResultKind>,
}

impl PlayoffFixture {
    pub fn new(id: &str, round_type: RoundType) -> Self {
        Self {
            id: id.to_string(),
            round_type,
            home_team: None,
            away_team: None,
            home_score: None,
            away_score: None,
            result_kind: None,
        }
    }

    pub fn with_result(mut self, home_score: u32, away_score: u32, kind: ResultKind) -> Self {
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.result_kind = Some(kind);
        self
    }

    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }
}

/// Everything read from a match file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchBundle {
    pub matches: Vec<MatchRecord>,
    pub playoffs: Vec<PlayoffFixture>,
}

/// Result of one transform pass, handed to the load step.
#[derive(Debug, Clone)]
pub struct LeagueOutcome {
    pub standings: StandingsReport,
    pub bracket: Option<BracketAdvance>,
    pub champion: Option<String>,
}
