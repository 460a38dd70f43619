use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct LeagueEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> LeagueEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract, rank, write. Nothing is written unless the first two steps succeed.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting standings run");

        let bundle = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} matches ({} played), {} playoff fixtures",
            bundle.matches.len(),
            bundle.matches.iter().filter(|m| m.played).count(),
            bundle.playoffs.len()
        );

        let outcome = self.pipeline.transform(bundle).await?;
        tracing::info!(
            "Ranked {} teams, skipped or adjusted {} matches",
            outcome.standings.entries.len(),
            outcome.standings.issues.len()
        );
        if let Some(leader) = outcome.standings.entries.first() {
            tracing::info!("Leader: {} on {} points", leader.team, leader.points);
        }

        let output_path = self.pipeline.load(outcome).await?;
        tracing::info!("Output saved to {} in {:?}", output_path, started.elapsed());

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LeagueOutcome, MatchBundle};
    use crate::domain::model::MatchRecord;
    use crate::domain::standings::StandingsReport;
    use crate::utils::error::LeagueError;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FixedPipeline {
        matches: Vec<MatchRecord>,
        fail_transform: bool,
        loaded: AtomicBool,
    }

    #[async_trait::async_trait]
    impl Pipeline for FixedPipeline {
        async fn extract(&self) -> Result<MatchBundle> {
            Ok(MatchBundle {
                matches: self.matches.clone(),
                playoffs: Vec::new(),
            })
        }

        async fn transform(&self, bundle: MatchBundle) -> Result<LeagueOutcome> {
            if self.fail_transform {
                return Err(LeagueError::BracketError {
                    message: "boom".to_string(),
                });
            }
            Ok(LeagueOutcome {
                standings: StandingsReport::build(&bundle.matches),
                bracket: None,
                champion: None,
            })
        }

        async fn load(&self, _outcome: LeagueOutcome) -> Result<String> {
            self.loaded.store(true, Ordering::SeqCst);
            Ok("memory".to_string())
        }
    }

    #[test]
    fn test_run_reaches_load() {
        let engine = LeagueEngine::new(FixedPipeline {
            matches: vec![MatchRecord::played("A", "B", 1, 0)],
            fail_transform: false,
            loaded: AtomicBool::new(false),
        });

        let path = tokio_test::block_on(engine.run()).unwrap();
        assert_eq!(path, "memory");
        assert!(engine.pipeline.loaded.load(Ordering::SeqCst));
    }

    #[test]
    fn test_failed_transform_skips_load() {
        let engine = LeagueEngine::new(FixedPipeline {
            matches: Vec::new(),
            fail_transform: true,
            loaded: AtomicBool::new(false),
        });

        assert!(tokio_test::block_on(engine.run()).is_err());
        assert!(!engine.pipeline.loaded.load(Ordering::SeqCst));
    }
}
