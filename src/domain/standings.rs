//! League table computation.

use crate::domain::accumulator::{TeamAccumulator, TeamTable};
use crate::domain::model::{MatchIssue, MatchRecord, RankedEntry};
use crate::domain::tiebreak::resolve_tied_group;

/// A ranked table plus whatever the fold had to skip along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingsReport {
    pub entries: Vec<RankedEntry>,
    pub issues: Vec<MatchIssue>,
}

impl StandingsReport {
    pub fn build(matches: &[MatchRecord]) -> Self {
        let (table, issues) = TeamTable::fold(matches.iter().enumerate());

        let mut ordered: Vec<&TeamAccumulator> = table.iter().collect();
        // Points alone cannot decide who is ahead inside a tie, so every run of
        // equal points goes through the head-to-head pass below.
        ordered.sort_by(|a, b| b.points.cmp(&a.points));

        for group in ordered.chunk_by_mut(|a, b| a.points == b.points) {
            resolve_tied_group(group, matches);
        }

        let entries = ordered
            .iter()
            .enumerate()
            .map(|(i, team)| RankedEntry::from_accumulator(i + 1, team))
            .collect();

        Self { entries, issues }
    }

    pub fn position_of(&self, team: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.team == team).map(|e| e.rank)
    }
}

impl RankedEntry {
    fn from_accumulator(rank: usize, team: &TeamAccumulator) -> Self {
        Self {
            rank,
            team: team.name.clone(),
            points: team.points,
            goals_for: team.goals_for,
            goals_against: team.goals_against,
            goal_difference: team.goal_difference(),
            matches_played: team.matches_played,
            won: team.won,
            drawn: team.drawn,
            lost: team.lost,
            shootout_wins: team.shootout_wins,
        }
    }
}

/// Ranked table for `matches`, best team first with ranks `1..=N`.
pub fn compute_standings(matches: &[MatchRecord]) -> Vec<RankedEntry> {
    StandingsReport::build(matches).entries
}
