//! Per-team running totals folded from match records.

use crate::domain::model::{MatchIssue, MatchRecord, Outcome, Side};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamAccumulator {
    pub name: String,
    pub points: u32,
    pub matches_played: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Goals scored while listed as the away side.
    pub away_goals: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub shootout_wins: u32,
}

impl TeamAccumulator {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Whether adding this result keeps every goal total within `u32`.
    fn absorbs(&self, side: Side, scored: u32, conceded: u32) -> bool {
        let away_ok = match side {
            Side::Home => true,
            Side::Away => self.away_goals.checked_add(scored).is_some(),
        };
        away_ok
            && self.goals_for.checked_add(scored).is_some()
            && self.goals_against.checked_add(conceded).is_some()
    }

    fn record(&mut self, side: Side, scored: u32, conceded: u32, outcome: Outcome) {
        let (home_points, away_points) = outcome.points();

        self.matches_played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;

        match side {
            Side::Home => self.points += home_points,
            Side::Away => {
                self.points += away_points;
                self.away_goals += scored;
            }
        }

        match outcome {
            Outcome::RegulationWin(winner) if winner == side => self.won += 1,
            Outcome::RegulationWin(_) => self.lost += 1,
            Outcome::ShootoutWin(winner) => {
                self.drawn += 1;
                if winner == side {
                    self.shootout_wins += 1;
                }
            }
            Outcome::UnresolvedDraw => self.drawn += 1,
        }
    }
}

/// Accumulators keyed by team name, kept in first-seen order so that
/// later stable sorts are deterministic.
#[derive(Debug, Clone, Default)]
pub struct TeamTable {
    teams: Vec<TeamAccumulator>,
    index: HashMap<String, usize>,
}

impl TeamTable {
    /// Fold every `(position, match)` pair exactly once. Teams are registered
    /// on sight, played or not; only valid played matches touch the totals.
    /// Issues carry the record's `source_row` when set, else its position.
    pub fn fold<'a, I>(matches: I) -> (Self, Vec<MatchIssue>)
    where
        I: IntoIterator<Item = (usize, &'a MatchRecord)>,
    {
        let mut table = Self::default();
        let mut issues = Vec::new();

        for (position, record) in matches {
            let index = record.source_row.unwrap_or(position);
            table.register(&record.home_team);
            table.register(&record.away_team);

            if !record.played {
                continue;
            }

            if let Some(reason) = structural_problem(record) {
                issues.push(MatchIssue::MalformedMatch {
                    index,
                    home_team: record.home_team.clone(),
                    away_team: record.away_team.clone(),
                    reason,
                });
                continue;
            }

            let (Some((home_score, away_score)), Some(outcome)) =
                (record.scoreline(), record.outcome())
            else {
                issues.push(MatchIssue::MalformedMatch {
                    index,
                    home_team: record.home_team.clone(),
                    away_team: record.away_team.clone(),
                    reason: "played match is missing a valid score".to_string(),
                });
                continue;
            };

            let fits = table
                .entry_mut(&record.home_team)
                .absorbs(Side::Home, home_score, away_score)
                && table
                    .entry_mut(&record.away_team)
                    .absorbs(Side::Away, away_score, home_score);
            if !fits {
                issues.push(MatchIssue::MalformedMatch {
                    index,
                    home_team: record.home_team.clone(),
                    away_team: record.away_team.clone(),
                    reason: format!("score {}-{} overflows the goal totals", home_score, away_score),
                });
                continue;
            }

            if let Some(named) = &record.penalty_winner {
                if record.penalty_side().is_none() {
                    issues.push(MatchIssue::InvalidPenaltyWinner {
                        index,
                        home_team: record.home_team.clone(),
                        away_team: record.away_team.clone(),
                        named: named.clone(),
                    });
                }
            }

            table
                .entry_mut(&record.home_team)
                .record(Side::Home, home_score, away_score, outcome);
            table
                .entry_mut(&record.away_team)
                .record(Side::Away, away_score, home_score, outcome);
        }

        (table, issues)
    }

    pub fn get(&self, name: &str) -> Option<&TeamAccumulator> {
        self.index.get(name).map(|&i| &self.teams[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamAccumulator> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    fn register(&mut self, name: &str) {
        if name.trim().is_empty() || self.index.contains_key(name) {
            return;
        }
        self.index.insert(name.to_string(), self.teams.len());
        self.teams.push(TeamAccumulator::new(name));
    }

    fn entry_mut(&mut self, name: &str) -> &mut TeamAccumulator {
        self.register(name);
        let i = self.index[name];
        &mut self.teams[i]
    }
}

fn structural_problem(record: &MatchRecord) -> Option<String> {
    if record.home_team.trim().is_empty() || record.away_team.trim().is_empty() {
        return Some("missing team name".to_string());
    }
    if record.home_team == record.away_team {
        return Some(format!("{} cannot play itself", record.home_team));
    }
    None
}
