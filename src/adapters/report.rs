//! Rendering standings and bracket state for output files.

use crate::domain::model::{PlayoffFixture, RankedEntry};
use crate::utils::error::{LeagueError, Result};
use chrono::{DateTime, Utc};

pub fn standings_json(entries: &[RankedEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

pub fn standings_csv(entries: &[RankedEntry]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for entry in entries {
        writer.serialize(entry)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| LeagueError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| LeagueError::MatchFileError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

pub fn playoffs_json(fixtures: &[PlayoffFixture]) -> Result<String> {
    Ok(serde_json::to_string_pretty(fixtures)?)
}

/// Fixed-width table for terminals and plain-text archives.
pub fn text_report(
    title: &str,
    entries: &[RankedEntry],
    fixtures: Option<&[PlayoffFixture]>,
    champion: Option<&str>,
    generated_at: DateTime<Utc>,
) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== {} ===\n", title));
    report.push_str(&format!(
        "Generated {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    report.push_str(&format!(
        "{:>3}  {:<20} {:>3} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>5} {:>4}\n",
        "#", "Team", "P", "W", "D", "L", "SW", "GF", "GA", "GD", "Pts"
    ));
    report.push_str(&"-".repeat(68));
    report.push('\n');

    for entry in entries {
        report.push_str(&format!(
            "{:>3}  {:<20} {:>3} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+5} {:>4}\n",
            entry.rank,
            entry.team,
            entry.matches_played,
            entry.won,
            entry.drawn,
            entry.lost,
            entry.shootout_wins,
            entry.goals_for,
            entry.goals_against,
            entry.goal_difference,
            entry.points
        ));
    }

    if let Some(fixtures) = fixtures.filter(|f| !f.is_empty()) {
        report.push_str("\nPlayoffs:\n");
        for fixture in fixtures {
            report.push_str(&format!(
                "{:<6} {:<13} {:<20} vs {:<20} {}\n",
                fixture.id,
                fixture.round_type.to_string(),
                fixture.home_team.as_deref().unwrap_or("TBD"),
                fixture.away_team.as_deref().unwrap_or("TBD"),
                score_label(fixture)
            ));
        }
    }

    if let Some(champion) = champion {
        report.push_str(&format!("\nChampion: {}\n", champion));
    }

    report
}

fn score_label(fixture: &PlayoffFixture) -> String {
    use crate::domain::model::ResultKind;

    match (fixture.home_score, fixture.away_score) {
        (Some(home), Some(away)) => match fixture.result_kind {
            Some(ResultKind::PenaltiesHome) => format!("{}-{} (pens, home)", home, away),
            Some(ResultKind::PenaltiesAway) => format!("{}-{} (pens, away)", home, away),
            _ => format!("{}-{}", home, away),
        },
        _ => "-".to_string(),
    }
}
