use league_table::{
    advance_bracket, champion, compute_standings, BracketAdvance, BracketConfig, FixtureTemplate,
    LeagueError, MatchRecord, PlayoffFixture, ResultKind, RoundType, Slot,
};

/// Eight teams, single round robin. Earlier letters beat later ones, so the
/// table finishes A..H.
fn season(teams: &[&str]) -> Vec<MatchRecord> {
    let mut matches = Vec::new();
    for (i, home) in teams.iter().enumerate() {
        for away in &teams[i + 1..] {
            matches.push(MatchRecord::played(home, away, 2, 1));
        }
    }
    matches
}

const TEAMS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

fn advanced(outcome: BracketAdvance) -> (Vec<PlayoffFixture>, bool) {
    match outcome {
        BracketAdvance::Advanced {
            fixtures, changed, ..
        } => (fixtures, changed),
        other => panic!("expected an advanced bracket, got {:?}", other),
    }
}

fn record(fixtures: &mut [PlayoffFixture], id: &str, home: u32, away: u32, kind: ResultKind) {
    let fixture = fixtures.iter_mut().find(|f| f.id == id).unwrap();
    fixture.home_score = Some(home);
    fixture.away_score = Some(away);
    fixture.result_kind = Some(kind);
}

fn teams_of<'a>(fixtures: &'a [PlayoffFixture], id: &str) -> (Option<&'a str>, Option<&'a str>) {
    let fixture = fixtures.iter().find(|f| f.id == id).unwrap();
    (fixture.home_team.as_deref(), fixture.away_team.as_deref())
}

#[test]
fn test_full_default_bracket_to_champion() {
    let matches = season(&TEAMS);
    let standings = compute_standings(&matches);
    let bracket = BracketConfig::default();

    let (mut fixtures, changed) =
        advanced(advance_bracket(&standings, &matches, &[], &bracket).unwrap());
    assert!(changed);
    assert_eq!(fixtures.len(), 5);
    assert_eq!(teams_of(&fixtures, "QF1"), (Some("C"), Some("F")));
    assert_eq!(teams_of(&fixtures, "QF2"), (Some("D"), Some("E")));
    assert_eq!(teams_of(&fixtures, "SF1"), (Some("A"), None));
    assert_eq!(teams_of(&fixtures, "F"), (None, None));

    record(&mut fixtures, "QF1", 1, 1, ResultKind::PenaltiesAway);
    record(&mut fixtures, "QF2", 3, 0, ResultKind::Regulation);
    let (mut fixtures, changed) =
        advanced(advance_bracket(&standings, &matches, &fixtures, &bracket).unwrap());
    assert!(changed);
    assert_eq!(teams_of(&fixtures, "SF1"), (Some("A"), Some("D")));
    assert_eq!(teams_of(&fixtures, "SF2"), (Some("B"), Some("F")));

    record(&mut fixtures, "SF1", 0, 1, ResultKind::Regulation);
    record(&mut fixtures, "SF2", 2, 2, ResultKind::PenaltiesHome);
    let (mut fixtures, _) =
        advanced(advance_bracket(&standings, &matches, &fixtures, &bracket).unwrap());
    assert_eq!(teams_of(&fixtures, "F"), (Some("D"), Some("B")));
    assert_eq!(champion(&fixtures, &bracket).unwrap(), None);

    record(&mut fixtures, "F", 0, 2, ResultKind::Regulation);
    assert_eq!(champion(&fixtures, &bracket).unwrap().as_deref(), Some("B"));
}

#[test]
fn test_second_run_with_same_inputs_changes_nothing() {
    let matches = season(&TEAMS);
    let standings = compute_standings(&matches);
    let bracket = BracketConfig::default();

    let (mut first, _) = advanced(advance_bracket(&standings, &matches, &[], &bracket).unwrap());
    record(&mut first, "QF1", 2, 0, ResultKind::Regulation);

    let (second, changed) =
        advanced(advance_bracket(&standings, &matches, &first, &bracket).unwrap());
    assert!(changed);

    let (third, changed) =
        advanced(advance_bracket(&standings, &matches, &second, &bracket).unwrap());
    assert!(!changed);
    assert_eq!(second, third);
}

#[test]
fn test_unplayed_league_match_is_a_no_op() {
    let mut matches = season(&TEAMS);
    matches.push(MatchRecord::unplayed("H", "A"));
    let standings = compute_standings(&matches);

    let persisted = vec![PlayoffFixture::new("QF1", RoundType::Quarterfinal)];
    let outcome =
        advance_bracket(&standings, &matches, &persisted, &BracketConfig::default()).unwrap();

    assert_eq!(outcome, BracketAdvance::SeasonIncomplete { unplayed: 1 });
    assert!(!outcome.changed());
    assert!(outcome.fixtures().is_none());
}

#[test]
fn test_level_elimination_without_shootout_blocks_only_its_branch() {
    let matches = season(&TEAMS);
    let standings = compute_standings(&matches);
    let bracket = BracketConfig::default();

    let (mut fixtures, _) = advanced(advance_bracket(&standings, &matches, &[], &bracket).unwrap());
    record(&mut fixtures, "QF1", 1, 1, ResultKind::Regulation);
    record(&mut fixtures, "QF2", 2, 0, ResultKind::Regulation);

    let outcome = advance_bracket(&standings, &matches, &fixtures, &bracket).unwrap();
    assert_eq!(outcome.ambiguous(), ["QF1".to_string()]);
    match outcome.ambiguity_error() {
        Some(LeagueError::AmbiguousEliminationResult {
            fixture_id,
            home_score,
            away_score,
        }) => {
            assert_eq!(fixture_id, "QF1");
            assert_eq!((home_score, away_score), (1, 1));
        }
        other => panic!("unexpected ambiguity report: {:?}", other),
    }

    let (mut fixtures, changed) = advanced(outcome);
    assert!(changed);
    assert_eq!(teams_of(&fixtures, "SF1"), (Some("A"), Some("D")));
    assert_eq!(teams_of(&fixtures, "SF2"), (Some("B"), None));

    // Once the shootout is recorded the deferred slot fills in.
    record(&mut fixtures, "QF1", 1, 1, ResultKind::PenaltiesHome);
    let outcome = advance_bracket(&standings, &matches, &fixtures, &bracket).unwrap();
    assert!(outcome.ambiguous().is_empty());
    assert!(outcome.ambiguity_error().is_none());
    let (fixtures, _) = advanced(outcome);
    assert_eq!(teams_of(&fixtures, "SF2"), (Some("B"), Some("C")));
}

#[test]
fn test_corrected_result_moves_winner_but_keeps_scores() {
    let matches = season(&TEAMS);
    let standings = compute_standings(&matches);
    let bracket = BracketConfig::default();

    let (mut fixtures, _) = advanced(advance_bracket(&standings, &matches, &[], &bracket).unwrap());
    record(&mut fixtures, "QF1", 2, 0, ResultKind::Regulation);
    let (mut fixtures, _) =
        advanced(advance_bracket(&standings, &matches, &fixtures, &bracket).unwrap());
    assert_eq!(teams_of(&fixtures, "SF2"), (Some("B"), Some("C")));
    record(&mut fixtures, "SF2", 1, 0, ResultKind::Regulation);

    // QF1 is corrected after SF2 was played.
    record(&mut fixtures, "QF1", 0, 2, ResultKind::Regulation);
    let (fixtures, changed) =
        advanced(advance_bracket(&standings, &matches, &fixtures, &bracket).unwrap());

    assert!(changed);
    let sf2 = fixtures.iter().find(|f| f.id == "SF2").unwrap();
    assert_eq!(sf2.away_team.as_deref(), Some("F"));
    assert_eq!((sf2.home_score, sf2.away_score), (Some(1), Some(0)));
}

#[test]
fn test_custom_four_team_bracket() {
    let matches = season(&TEAMS[..4]);
    let standings = compute_standings(&matches);
    let winner = |id: &str| Slot::WinnerOf(id.to_string());
    let bracket = BracketConfig {
        fixtures: vec![
            FixtureTemplate::new("SF1", RoundType::Semifinal, Slot::Rank(1), Slot::Rank(4)),
            FixtureTemplate::new("SF2", RoundType::Semifinal, Slot::Rank(2), Slot::Rank(3)),
            FixtureTemplate::new("F", RoundType::Final, winner("SF1"), winner("SF2")),
        ],
    };

    let (fixtures, _) = advanced(advance_bracket(&standings, &matches, &[], &bracket).unwrap());
    assert_eq!(teams_of(&fixtures, "SF1"), (Some("A"), Some("D")));
    assert_eq!(teams_of(&fixtures, "SF2"), (Some("B"), Some("C")));

    // The default bracket seeds six teams and cannot run on this table.
    let err = advance_bracket(&standings, &matches, &[], &BracketConfig::default()).unwrap_err();
    assert!(matches!(err, LeagueError::BracketError { .. }));
}
