//! Playoff bracket seeding and advancement.
//!
//! The bracket shape is data: an ordered list of fixture templates whose
//! slots are either a final league position or the winner of an earlier
//! fixture. Advancing is a pure function from (standings, league matches,
//! persisted fixtures) to an updated fixture list.

use crate::domain::model::{MatchRecord, PlayoffFixture, RankedEntry, ResultKind, RoundType};
use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Final league position, 1-based.
    Rank(usize),
    WinnerOf(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureTemplate {
    pub id: String,
    pub round: RoundType,
    pub home: Slot,
    pub away: Slot,
}

impl FixtureTemplate {
    pub fn new(id: &str, round: RoundType, home: Slot, away: Slot) -> Self {
        Self {
            id: id.to_string(),
            round,
            home,
            away,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketConfig {
    pub fixtures: Vec<FixtureTemplate>,
}

impl Default for BracketConfig {
    /// Top-six bracket: 3v6 and 4v5 play in, 1 and 2 wait in the semifinals.
    fn default() -> Self {
        use RoundType::*;
        let winner = |id: &str| Slot::WinnerOf(id.to_string());
        Self {
            fixtures: vec![
                FixtureTemplate::new("QF1", Quarterfinal, Slot::Rank(3), Slot::Rank(6)),
                FixtureTemplate::new("QF2", Quarterfinal, Slot::Rank(4), Slot::Rank(5)),
                FixtureTemplate::new("SF1", Semifinal, Slot::Rank(1), winner("QF2")),
                FixtureTemplate::new("SF2", Semifinal, Slot::Rank(2), winner("QF1")),
                FixtureTemplate::new("F", Final, winner("SF1"), winner("SF2")),
            ],
        }
    }
}

impl BracketConfig {
    pub fn highest_seed(&self) -> usize {
        self.fixtures
            .iter()
            .flat_map(|f| [&f.home, &f.away])
            .filter_map(|slot| match slot {
                Slot::Rank(rank) => Some(*rank),
                Slot::WinnerOf(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// The last fixture of the final round.
    pub fn final_fixture(&self) -> Option<&FixtureTemplate> {
        self.fixtures.iter().rev().find(|f| f.round == RoundType::Final)
    }
}

impl Validate for BracketConfig {
    fn validate(&self) -> Result<()> {
        if self.fixtures.is_empty() {
            return Err(LeagueError::ConfigValidationError {
                field: "bracket.fixtures".to_string(),
                message: "a bracket needs at least one fixture".to_string(),
            });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut seeded: HashSet<usize> = HashSet::new();

        for fixture in &self.fixtures {
            validate_non_empty_string("bracket.fixtures.id", &fixture.id)?;

            for slot in [&fixture.home, &fixture.away] {
                match slot {
                    Slot::Rank(rank) => {
                        validate_positive_number("bracket.fixtures.rank", *rank, 1)?;
                        if !seeded.insert(*rank) {
                            return Err(LeagueError::ConfigValidationError {
                                field: format!("bracket.fixtures.{}", fixture.id),
                                message: format!("rank {} is seeded more than once", rank),
                            });
                        }
                    }
                    Slot::WinnerOf(source) if !seen.contains(source.as_str()) => {
                        return Err(LeagueError::ConfigValidationError {
                            field: format!("bracket.fixtures.{}", fixture.id),
                            message: format!(
                                "winner_of '{}' must name a fixture listed earlier",
                                source
                            ),
                        });
                    }
                    Slot::WinnerOf(_) => {}
                }
            }

            if !seen.insert(fixture.id.as_str()) {
                return Err(LeagueError::ConfigValidationError {
                    field: "bracket.fixtures.id".to_string(),
                    message: format!("duplicate fixture id '{}'", fixture.id),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketAdvance {
    /// Regular season still has unplayed matches; nothing was touched.
    SeasonIncomplete { unplayed: usize },
    Advanced {
        fixtures: Vec<PlayoffFixture>,
        changed: bool,
        /// Ids of played fixtures that are level with no shootout winner.
        /// Slots fed by them stay deferred.
        ambiguous: Vec<String>,
    },
}

impl BracketAdvance {
    pub fn changed(&self) -> bool {
        matches!(self, BracketAdvance::Advanced { changed: true, .. })
    }

    pub fn fixtures(&self) -> Option<&[PlayoffFixture]> {
        match self {
            BracketAdvance::Advanced { fixtures, .. } => Some(fixtures),
            BracketAdvance::SeasonIncomplete { .. } => None,
        }
    }

    pub fn ambiguous(&self) -> &[String] {
        match self {
            BracketAdvance::Advanced { ambiguous, .. } => ambiguous,
            BracketAdvance::SeasonIncomplete { .. } => &[],
        }
    }

    /// The error for the first ambiguous fixture, if any.
    pub fn ambiguity_error(&self) -> Option<LeagueError> {
        let fixtures = self.fixtures()?;
        self.ambiguous().iter().find_map(|id| {
            fixtures
                .iter()
                .find(|f| &f.id == id)
                .and_then(|f| f.winner().err())
        })
    }
}

impl PlayoffFixture {
    /// `Ok(None)` while the fixture is unplayed or waiting on participants.
    /// A level score needs a shootout result to produce a winner.
    pub fn winner(&self) -> Result<Option<&str>> {
        let (Some(home), Some(away)) = (&self.home_team, &self.away_team) else {
            return Ok(None);
        };
        let (Some(home_score), Some(away_score)) = (self.home_score, self.away_score) else {
            return Ok(None);
        };

        match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => Ok(Some(home.as_str())),
            std::cmp::Ordering::Less => Ok(Some(away.as_str())),
            std::cmp::Ordering::Equal => match self.result_kind {
                Some(ResultKind::PenaltiesHome) => Ok(Some(home.as_str())),
                Some(ResultKind::PenaltiesAway) => Ok(Some(away.as_str())),
                Some(ResultKind::Regulation) | None => {
                    Err(LeagueError::AmbiguousEliminationResult {
                        fixture_id: self.id.clone(),
                        home_score,
                        away_score,
                    })
                }
            },
        }
    }
}

/// Seeds and advances the bracket once every league match is played.
///
/// Fixtures missing from `persisted` are created; existing fixtures only get
/// their participants refreshed when an upstream result now resolves to a
/// different team. Recorded scores are never modified. A fixture level on
/// score without a shootout winner is listed in `ambiguous` and the slots it
/// feeds stay deferred; the rest of the bracket still advances.
pub fn advance_bracket(
    standings: &[RankedEntry],
    league_matches: &[MatchRecord],
    persisted: &[PlayoffFixture],
    bracket: &BracketConfig,
) -> Result<BracketAdvance> {
    let unplayed = league_matches.iter().filter(|m| !m.played).count();
    if unplayed > 0 || league_matches.is_empty() {
        tracing::info!("Regular season incomplete ({} unplayed), bracket left as is", unplayed);
        return Ok(BracketAdvance::SeasonIncomplete { unplayed });
    }

    if bracket.highest_seed() > standings.len() {
        return Err(LeagueError::BracketError {
            message: format!(
                "bracket seeds rank {} but the table has {} teams",
                bracket.highest_seed(),
                standings.len()
            ),
        });
    }

    let mut fixtures = persisted.to_vec();
    let mut changed = false;

    for template in &bracket.fixtures {
        let home = resolve_slot(&template.home, standings, &fixtures)?;
        let away = resolve_slot(&template.away, standings, &fixtures)?;

        match fixtures.iter_mut().find(|f| f.id == template.id) {
            Some(existing) => {
                changed |= place(existing, home, away);
            }
            None => {
                tracing::debug!("Creating playoff fixture {}", template.id);
                let mut fixture = PlayoffFixture::new(&template.id, template.round);
                fixture.home_team = home;
                fixture.away_team = away;
                fixtures.push(fixture);
                changed = true;
            }
        }
    }

    let ambiguous: Vec<String> = fixtures
        .iter()
        .filter(|f| f.winner().is_err())
        .map(|f| f.id.clone())
        .collect();
    for id in &ambiguous {
        tracing::warn!("Playoff fixture {} is level without a shootout winner", id);
    }

    Ok(BracketAdvance::Advanced {
        fixtures,
        changed,
        ambiguous,
    })
}

/// Winner of the bracket's final, once it has been played.
pub fn champion(fixtures: &[PlayoffFixture], bracket: &BracketConfig) -> Result<Option<String>> {
    let Some(final_template) = bracket.final_fixture() else {
        return Ok(None);
    };
    match fixtures.iter().find(|f| f.id == final_template.id) {
        Some(fixture) => Ok(fixture.winner()?.map(str::to_string)),
        None => Ok(None),
    }
}

fn resolve_slot(
    slot: &Slot,
    standings: &[RankedEntry],
    fixtures: &[PlayoffFixture],
) -> Result<Option<String>> {
    match slot {
        Slot::Rank(rank) => standings
            .iter()
            .find(|e| e.rank == *rank)
            .map(|e| Some(e.team.clone()))
            .ok_or_else(|| LeagueError::BracketError {
                message: format!("no team holds rank {}", rank),
            }),
        // An ambiguous source defers the slot like an unplayed one.
        Slot::WinnerOf(source) => Ok(fixtures
            .iter()
            .find(|f| &f.id == source)
            .and_then(|f| f.winner().ok().flatten())
            .map(str::to_string)),
    }
}

/// Writes resolved participants into an existing fixture. An unresolved slot
/// never clears a team that is already placed.
fn place(fixture: &mut PlayoffFixture, home: Option<String>, away: Option<String>) -> bool {
    let mut changed = false;
    for (current, resolved) in [(&mut fixture.home_team, home), (&mut fixture.away_team, away)] {
        if let Some(team) = resolved {
            if current.as_deref() != Some(team.as_str()) {
                *current = Some(team);
                changed = true;
            }
        }
    }
    if changed && fixture.is_played() {
        tracing::warn!(
            "Participants of {} changed after its result was recorded",
            fixture.id
        );
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::standings::compute_standings;

    /// Six teams, single round robin, finishing A..F in that order.
    fn finished_season() -> Vec<MatchRecord> {
        let teams = ["A", "B", "C", "D", "E", "F"];
        let mut matches = Vec::new();
        for (i, home) in teams.iter().enumerate() {
            for away in &teams[i + 1..] {
                matches.push(MatchRecord::played(home, away, 1, 0));
            }
        }
        matches
    }

    fn fixture<'a>(fixtures: &'a [PlayoffFixture], id: &str) -> &'a PlayoffFixture {
        fixtures.iter().find(|f| f.id == id).unwrap()
    }

    fn advanced(outcome: BracketAdvance) -> (Vec<PlayoffFixture>, bool) {
        match outcome {
            BracketAdvance::Advanced {
                fixtures, changed, ..
            } => (fixtures, changed),
            other => panic!("expected an advanced bracket, got {:?}", other),
        }
    }

    fn set_result(fixtures: &mut [PlayoffFixture], id: &str, home: u32, away: u32, kind: ResultKind) {
        let f = fixtures.iter_mut().find(|f| f.id == id).unwrap();
        f.home_score = Some(home);
        f.away_score = Some(away);
        f.result_kind = Some(kind);
    }

    #[test]
    fn test_default_bracket_is_valid() {
        let bracket = BracketConfig::default();
        assert!(bracket.validate().is_ok());
        assert_eq!(bracket.highest_seed(), 6);
        assert_eq!(bracket.final_fixture().unwrap().id, "F");
    }

    #[test]
    fn test_incomplete_season_is_a_noop() {
        let mut matches = finished_season();
        matches.push(MatchRecord::unplayed("A", "F"));
        let standings = compute_standings(&matches);

        let outcome =
            advance_bracket(&standings, &matches, &[], &BracketConfig::default()).unwrap();
        assert_eq!(outcome, BracketAdvance::SeasonIncomplete { unplayed: 1 });
        assert!(!outcome.changed());
    }

    #[test]
    fn test_first_round_seeded_from_table() {
        let matches = finished_season();
        let standings = compute_standings(&matches);

        let (fixtures, changed) = advanced(
            advance_bracket(&standings, &matches, &[], &BracketConfig::default()).unwrap(),
        );

        assert!(changed);
        assert_eq!(fixtures.len(), 5);
        let qf1 = fixture(&fixtures, "QF1");
        assert_eq!(qf1.home_team.as_deref(), Some("C"));
        assert_eq!(qf1.away_team.as_deref(), Some("F"));
        let sf1 = fixture(&fixtures, "SF1");
        assert_eq!(sf1.home_team.as_deref(), Some("A"));
        assert_eq!(sf1.away_team, None);
        assert_eq!(fixture(&fixtures, "F").home_team, None);
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let matches = finished_season();
        let standings = compute_standings(&matches);
        let bracket = BracketConfig::default();

        let (first, _) = advanced(advance_bracket(&standings, &matches, &[], &bracket).unwrap());
        let (second, changed) =
            advanced(advance_bracket(&standings, &matches, &first, &bracket).unwrap());

        assert!(!changed);
        assert_eq!(first, second);
    }

    #[test]
    fn test_winners_move_forward() {
        let matches = finished_season();
        let standings = compute_standings(&matches);
        let bracket = BracketConfig::default();

        let (mut fixtures, _) =
            advanced(advance_bracket(&standings, &matches, &[], &bracket).unwrap());
        set_result(&mut fixtures, "QF1", 0, 2, ResultKind::Regulation);
        set_result(&mut fixtures, "QF2", 1, 1, ResultKind::PenaltiesHome);

        let (fixtures, changed) =
            advanced(advance_bracket(&standings, &matches, &fixtures, &bracket).unwrap());

        assert!(changed);
        assert_eq!(fixture(&fixtures, "SF1").away_team.as_deref(), Some("D"));
        assert_eq!(fixture(&fixtures, "SF2").away_team.as_deref(), Some("F"));
        assert_eq!(fixture(&fixtures, "QF1").home_score, Some(0));
        assert_eq!(fixture(&fixtures, "F").home_team, None);
    }

    #[test]
    fn test_level_result_without_shootout_defers_only_its_branch() {
        let matches = finished_season();
        let standings = compute_standings(&matches);
        let bracket = BracketConfig::default();

        let (mut fixtures, _) =
            advanced(advance_bracket(&standings, &matches, &[], &bracket).unwrap());
        set_result(&mut fixtures, "QF1", 1, 1, ResultKind::Regulation);
        set_result(&mut fixtures, "QF2", 2, 0, ResultKind::Regulation);

        let outcome = advance_bracket(&standings, &matches, &fixtures, &bracket).unwrap();
        assert_eq!(outcome.ambiguous(), ["QF1".to_string()]);
        assert!(matches!(
            outcome.ambiguity_error(),
            Some(LeagueError::AmbiguousEliminationResult { ref fixture_id, home_score: 1, away_score: 1 })
                if fixture_id == "QF1"
        ));

        let (fixtures, changed) = advanced(outcome);
        assert!(changed);
        assert_eq!(fixture(&fixtures, "SF1").away_team.as_deref(), Some("D"));
        assert_eq!(fixture(&fixtures, "SF2").away_team, None);
    }

    #[test]
    fn test_correction_updates_participants_only() {
        let matches = finished_season();
        let standings = compute_standings(&matches);
        let bracket = BracketConfig::default();

        let (mut fixtures, _) =
            advanced(advance_bracket(&standings, &matches, &[], &bracket).unwrap());
        set_result(&mut fixtures, "QF1", 3, 0, ResultKind::Regulation);
        let (mut fixtures, _) =
            advanced(advance_bracket(&standings, &matches, &fixtures, &bracket).unwrap());
        assert_eq!(fixture(&fixtures, "SF2").away_team.as_deref(), Some("C"));

        set_result(&mut fixtures, "SF2", 1, 0, ResultKind::Regulation);
        set_result(&mut fixtures, "QF1", 0, 3, ResultKind::Regulation);
        let (fixtures, changed) =
            advanced(advance_bracket(&standings, &matches, &fixtures, &bracket).unwrap());

        assert!(changed);
        let sf2 = fixture(&fixtures, "SF2");
        assert_eq!(sf2.away_team.as_deref(), Some("F"));
        assert_eq!((sf2.home_score, sf2.away_score), (Some(1), Some(0)));
    }

    #[test]
    fn test_champion_after_final() {
        let bracket = BracketConfig::default();
        let mut final_fixture = PlayoffFixture::new("F", RoundType::Final);
        final_fixture.home_team = Some("A".to_string());
        final_fixture.away_team = Some("B".to_string());

        assert_eq!(champion(&[final_fixture.clone()], &bracket).unwrap(), None);

        let played = final_fixture.with_result(0, 0, ResultKind::PenaltiesAway);
        assert_eq!(
            champion(&[played], &bracket).unwrap().as_deref(),
            Some("B")
        );
    }

    #[test]
    fn test_too_few_teams_for_bracket() {
        let matches = vec![MatchRecord::played("A", "B", 1, 0)];
        let standings = compute_standings(&matches);

        let err =
            advance_bracket(&standings, &matches, &[], &BracketConfig::default()).unwrap_err();
        assert!(matches!(err, LeagueError::BracketError { .. }));
    }

    #[test]
    fn test_invalid_bracket_shapes() {
        let forward_reference = BracketConfig {
            fixtures: vec![
                FixtureTemplate::new(
                    "SF1",
                    RoundType::Semifinal,
                    Slot::Rank(1),
                    Slot::WinnerOf("QF1".to_string()),
                ),
                FixtureTemplate::new("QF1", RoundType::Quarterfinal, Slot::Rank(2), Slot::Rank(3)),
            ],
        };
        assert!(forward_reference.validate().is_err());

        let double_seed = BracketConfig {
            fixtures: vec![
                FixtureTemplate::new("F", RoundType::Final, Slot::Rank(1), Slot::Rank(1)),
            ],
        };
        assert!(double_seed.validate().is_err());

        let duplicate_id = BracketConfig {
            fixtures: vec![
                FixtureTemplate::new("F", RoundType::Final, Slot::Rank(1), Slot::Rank(2)),
                FixtureTemplate::new("F", RoundType::Final, Slot::Rank(3), Slot::Rank(4)),
            ],
        };
        assert!(duplicate_id.validate().is_err());

        assert!(BracketConfig { fixtures: vec![] }.validate().is_err());
    }
}
