pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

/// Output formats the load step knows how to write.
pub const OUTPUT_FORMATS: [&str; 3] = ["json", "csv", "txt"];

#[cfg(feature = "cli")]
mod args {
    use super::OUTPUT_FORMATS;
    use crate::core::ConfigProvider;
    use crate::domain::bracket::BracketConfig;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_file_extension, validate_non_empty_string, validate_one_of, validate_path,
        Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "league-table")]
    #[command(about = "Compute league standings and advance the playoff bracket")]
    pub struct CliConfig {
        /// Match file (.json or .csv)
        #[arg(long, default_value = "matches.json")]
        pub matches: String,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "json,csv,txt")]
        pub formats: Vec<String>,

        #[arg(long, default_value = "League")]
        pub title: String,

        /// Seed and advance the default top-six bracket
        #[arg(long)]
        pub playoffs: bool,

        /// Bracket state file, relative to the output path
        #[arg(long, default_value = "playoffs.json")]
        pub playoffs_file: String,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl ConfigProvider for CliConfig {
        fn title(&self) -> &str {
            &self.title
        }

        fn matches_path(&self) -> &str {
            &self.matches
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn playoffs_file(&self) -> Option<&str> {
            self.playoffs.then_some(self.playoffs_file.as_str())
        }

        fn bracket(&self) -> BracketConfig {
            BracketConfig::default()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("matches", &self.matches)?;
            validate_file_extension("matches", &self.matches, &["json", "csv"])?;
            validate_path("output_path", &self.output_path)?;
            validate_one_of("formats", &self.formats, &OUTPUT_FORMATS)?;
            validate_non_empty_string("title", &self.title)?;
            if self.playoffs {
                validate_path("playoffs_file", &self.playoffs_file)?;
            }
            Ok(())
        }
    }

}
