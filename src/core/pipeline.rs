use crate::adapters::{match_file, report, MatchFormat};
use crate::core::{ConfigProvider, LeagueOutcome, MatchBundle, Pipeline, Storage};
use crate::domain::bracket::{advance_bracket, champion, BracketAdvance};
use crate::domain::standings::StandingsReport;
use crate::utils::error::{LeagueError, Result};

pub const STANDINGS_JSON: &str = "standings.json";
pub const STANDINGS_CSV: &str = "standings.csv";
pub const STANDINGS_TXT: &str = "standings.txt";

/// Reads a match file, ranks the league, optionally advances the playoff
/// bracket, and writes the configured outputs through `storage`.
pub struct LeaguePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> LeaguePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LeaguePipeline<S, C> {
    async fn extract(&self) -> Result<MatchBundle> {
        let path = self.config.matches_path();
        let format = MatchFormat::from_path(path)?;

        tracing::debug!("Reading {:?} match file: {}", format, path);
        let data = self.storage.read_file(path).await?;
        let mut bundle = match_file::parse_matches(&data, format)?;

        if let Some(state_file) = self.config.playoffs_file() {
            if self.storage.exists(state_file).await {
                tracing::debug!("Loading bracket state from {}", state_file);
                let data = self.storage.read_file(state_file).await?;
                bundle.playoffs = match_file::parse_playoffs(&data)?;
            }
        }

        Ok(bundle)
    }

    async fn transform(&self, bundle: MatchBundle) -> Result<LeagueOutcome> {
        let standings = StandingsReport::build(&bundle.matches);

        for issue in &standings.issues {
            tracing::warn!("{}", issue);
        }

        let mut champion_name = None;
        let bracket = match self.config.playoffs_file() {
            Some(_) => {
                let bracket_config = self.config.bracket();
                let advance = advance_bracket(
                    &standings.entries,
                    &bundle.matches,
                    &bundle.playoffs,
                    &bracket_config,
                )?;

                if let Some(fixtures) = advance.fixtures() {
                    // An ambiguous final is already listed in `ambiguous`.
                    champion_name = match champion(fixtures, &bracket_config) {
                        Err(LeagueError::AmbiguousEliminationResult { .. }) => None,
                        other => other?,
                    };
                }
                Some(advance)
            }
            None => None,
        };

        Ok(LeagueOutcome {
            standings,
            bracket,
            champion: champion_name,
        })
    }

    async fn load(&self, outcome: LeagueOutcome) -> Result<String> {
        let entries = &outcome.standings.entries;

        if self.wants("json") {
            let json = report::standings_json(entries)?;
            self.storage.write_file(STANDINGS_JSON, json.as_bytes()).await?;
        }

        if self.wants("csv") {
            let csv = report::standings_csv(entries)?;
            self.storage.write_file(STANDINGS_CSV, csv.as_bytes()).await?;
        }

        let fixtures = outcome.bracket.as_ref().and_then(BracketAdvance::fixtures);

        if self.wants("txt") {
            let text = report::text_report(
                self.config.title(),
                entries,
                fixtures,
                outcome.champion.as_deref(),
                chrono::Utc::now(),
            );
            self.storage.write_file(STANDINGS_TXT, text.as_bytes()).await?;
        }

        match (&outcome.bracket, self.config.playoffs_file()) {
            (Some(advance), Some(state_file)) if advance.changed() => {
                if let Some(fixtures) = advance.fixtures() {
                    let json = report::playoffs_json(fixtures)?;
                    self.storage.write_file(state_file, json.as_bytes()).await?;
                    tracing::info!("Bracket updated, {} fixtures saved", fixtures.len());
                }
            }
            (Some(BracketAdvance::SeasonIncomplete { unplayed }), _) => {
                tracing::info!("Playoffs not seeded yet: {} league matches left", unplayed);
            }
            (Some(_), _) => tracing::info!("Bracket unchanged"),
            (None, _) => {}
        }

        if let Some(name) = &outcome.champion {
            tracing::info!("Champion: {}", name);
        }

        // Standings and the rest of the bracket are on disk; the ambiguity
        // still fails the run so it gets fixed.
        if let Some(err) = outcome.bracket.as_ref().and_then(BracketAdvance::ambiguity_error) {
            return Err(err);
        }

        Ok(self.config.output_path().to_string())
    }
}
