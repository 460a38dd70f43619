use crate::domain::bracket::BracketConfig;
use crate::domain::model::{LeagueOutcome, MatchBundle};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn title(&self) -> &str;
    fn matches_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    /// Where bracket state lives, relative to the output path. `None` disables playoffs.
    fn playoffs_file(&self) -> Option<&str>;
    fn bracket(&self) -> BracketConfig;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<MatchBundle>;
    async fn transform(&self, bundle: MatchBundle) -> Result<LeagueOutcome>;
    async fn load(&self, outcome: LeagueOutcome) -> Result<String>;
}
