use clap::Parser;
use league_table::config::cli::absolute_input_path;
use league_table::utils::error::{ErrorSeverity, LeagueError};
use league_table::utils::{logger, validation::Validate};
use league_table::{CliConfig, LeagueEngine, LeaguePipeline, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting league-table");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    config.matches = absolute_input_path(&config.matches)?;

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = LeaguePipeline::new(storage, config);
    let engine = LeagueEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Standings written to {}", output_path);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn exit_with(e: LeagueError) -> ! {
    tracing::error!(
        "Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
