use super::OUTPUT_FORMATS;
use crate::core::ConfigProvider;
use crate::domain::bracket::{BracketConfig, FixtureTemplate};
use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_one_of, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub tournament: TournamentConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub bracket: Option<BracketSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub name: String,
    pub season: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

fn default_formats() -> Vec<String> {
    OUTPUT_FORMATS.iter().map(|f| f.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketSection {
    pub enabled: Option<bool>,
    pub state_file: Option<String>,
    /// Custom bracket shape; the top-six default is used when omitted.
    pub fixtures: Option<Vec<FixtureTemplate>>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LeagueError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LeagueError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LeagueError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("tournament.name", &self.tournament.name)?;
        validate_path("source.path", &self.source.path)?;
        validate_file_extension("source.path", &self.source.path, &["json", "csv"])?;
        validate_path("output.path", &self.output.path)?;
        validate_one_of("output.formats", self.output_formats(), &OUTPUT_FORMATS)?;

        if let Some(state_file) = self.playoffs_file() {
            validate_path("bracket.state_file", state_file)?;
            self.bracket().validate()?;
        }

        Ok(())
    }

    pub fn playoffs_enabled(&self) -> bool {
        self.bracket
            .as_ref()
            .map(|b| b.enabled.unwrap_or(true))
            .unwrap_or(false)
    }

    pub fn display_name(&self) -> String {
        match &self.tournament.season {
            Some(season) => format!("{} {}", self.tournament.name, season),
            None => self.tournament.name.clone(),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn title(&self) -> &str {
        &self.tournament.name
    }

    fn matches_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn playoffs_file(&self) -> Option<&str> {
        if !self.playoffs_enabled() {
            return None;
        }
        Some(
            self.bracket
                .as_ref()
                .and_then(|b| b.state_file.as_deref())
                .unwrap_or("playoffs.json"),
        )
    }

    fn bracket(&self) -> BracketConfig {
        match self.bracket.as_ref().and_then(|b| b.fixtures.clone()) {
            Some(fixtures) => BracketConfig { fixtures },
            None => BracketConfig::default(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
