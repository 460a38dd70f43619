use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },

    #[error("Match file error: {message}")]
    MatchFileError { message: String },

    #[error("Bracket error: {message}")]
    BracketError { message: String },

    #[error(
        "Playoff fixture '{fixture_id}' ended {home_score}-{away_score} without a shootout winner"
    )]
    AmbiguousEliminationResult {
        fixture_id: String,
        home_score: u32,
        away_score: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Bracket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LeagueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LeagueError::IoError(_) => ErrorCategory::Io,
            LeagueError::CsvError(_)
            | LeagueError::SerializationError(_)
            | LeagueError::MatchFileError { .. } => ErrorCategory::Data,
            LeagueError::ConfigError { .. }
            | LeagueError::ConfigValidationError { .. }
            | LeagueError::InvalidConfigValueError { .. }
            | LeagueError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LeagueError::BracketError { .. } | LeagueError::AmbiguousEliminationResult { .. } => {
                ErrorCategory::Bracket
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LeagueError::AmbiguousEliminationResult { .. } => ErrorSeverity::Medium,
            LeagueError::CsvError(_)
            | LeagueError::SerializationError(_)
            | LeagueError::MatchFileError { .. }
            | LeagueError::BracketError { .. } => ErrorSeverity::High,
            LeagueError::ConfigError { .. }
            | LeagueError::ConfigValidationError { .. }
            | LeagueError::InvalidConfigValueError { .. }
            | LeagueError::MissingConfigError { .. } => ErrorSeverity::High,
            LeagueError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LeagueError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            LeagueError::CsvError(_) => {
                "Make sure the CSV file has a header row with home_team,away_team,home_score,away_score,played".to_string()
            }
            LeagueError::SerializationError(_) | LeagueError::MatchFileError { .. } => {
                "Make sure the match file is a JSON array of matches or an object with a \"matches\" list".to_string()
            }
            LeagueError::ConfigError { .. }
            | LeagueError::ConfigValidationError { .. }
            | LeagueError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            LeagueError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            LeagueError::BracketError { .. } => {
                "Check that every seeded rank exists in the final table".to_string()
            }
            LeagueError::AmbiguousEliminationResult { fixture_id, .. } => format!(
                "Record the shootout winner of '{}' as penalties_home or penalties_away",
                fixture_id
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write a file: {}", self),
            ErrorCategory::Data => format!("The match data could not be read: {}", self),
            ErrorCategory::Configuration => format!("The configuration is invalid: {}", self),
            ErrorCategory::Bracket => format!("The playoff bracket cannot advance: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
