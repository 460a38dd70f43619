//! Head-to-head resolution for teams level on points.
//!
//! Each tied group gets its own mini-league built only from matches where
//! both sides belong to the group, so results against outsiders never leak
//! into the order inside the tie.

use crate::domain::accumulator::{TeamAccumulator, TeamTable};
use crate::domain::model::MatchRecord;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Comparison key for a team inside a tied group. Fields are declared most
/// significant first; the derived `Ord` compares them in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TieBreakKey {
    pub mini_points: u32,
    pub mini_goal_difference: i64,
    pub mini_away_goals: u32,
    pub goal_difference: i64,
    pub goals_for: u32,
}

impl TieBreakKey {
    fn new(mini: Option<&TeamAccumulator>, overall: &TeamAccumulator) -> Self {
        Self {
            mini_points: mini.map_or(0, |m| m.points),
            mini_goal_difference: mini.map_or(0, TeamAccumulator::goal_difference),
            mini_away_goals: mini.map_or(0, |m| m.away_goals),
            goal_difference: overall.goal_difference(),
            goals_for: overall.goals_for,
        }
    }
}

/// Fold restricted to matches between members of `group`.
pub fn mini_league(group: &HashSet<&str>, matches: &[MatchRecord]) -> TeamTable {
    let (table, _) = TeamTable::fold(matches.iter().enumerate().filter(|(_, m)| {
        group.contains(m.home_team.as_str()) && group.contains(m.away_team.as_str())
    }));
    table
}

/// Mini-league of one tied group, built once and queried per member.
struct TiedGroup {
    mini: TeamTable,
}

impl TiedGroup {
    fn new(group: &[&TeamAccumulator], matches: &[MatchRecord]) -> Self {
        let members: HashSet<&str> = group.iter().map(|t| t.name.as_str()).collect();
        Self {
            mini: mini_league(&members, matches),
        }
    }

    fn key(&self, team: &TeamAccumulator) -> TieBreakKey {
        TieBreakKey::new(self.mini.get(&team.name), team)
    }
}

pub fn tie_break_key(
    team: &TeamAccumulator,
    group: &[&TeamAccumulator],
    matches: &[MatchRecord],
) -> TieBreakKey {
    TiedGroup::new(group, matches).key(team)
}

/// Reorders a group of teams level on points, best first. Teams equal on
/// every criterion keep the order they came in with.
pub fn resolve_tied_group(group: &mut [&TeamAccumulator], matches: &[MatchRecord]) {
    if group.len() < 2 {
        return;
    }

    let tied = TiedGroup::new(group, matches);
    group.sort_by_cached_key(|team| Reverse(tied.key(team)));

    if tracing::enabled!(tracing::Level::DEBUG) {
        let keys: Vec<(&str, TieBreakKey)> = group
            .iter()
            .map(|t| (t.name.as_str(), tied.key(t)))
            .collect();
        for pair in keys.windows(2) {
            if pair[0].1 == pair[1].1 {
                tracing::debug!(
                    "{} and {} are level on every tie-break criterion, keeping input order",
                    pair[0].0,
                    pair[1].0
                );
            }
        }
    }
}
