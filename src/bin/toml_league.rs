use clap::Parser;
use league_table::config::cli::absolute_input_path;
use league_table::config::toml_config::BracketSection;
use league_table::core::{ConfigProvider, Pipeline};
use league_table::utils::error::ErrorSeverity;
use league_table::utils::{logger, validation::Validate};
use league_table::{BracketAdvance, LeagueEngine, LeaguePipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-league")]
#[command(about = "League standings driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "league.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Override whether the playoff bracket is advanced
    #[arg(long)]
    playoffs: Option<bool>,

    /// Compute and print the table without writing any file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_logger(args.verbose, args.json_logs);

    tracing::info!("Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(enabled) = args.playoffs {
        let section = config.bracket.get_or_insert_with(|| BracketSection {
            enabled: None,
            state_file: None,
            fixtures: None,
        });
        section.enabled = Some(enabled);
        tracing::info!("Playoffs overridden to: {}", enabled);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    config.source.path = absolute_input_path(&config.source.path)?;
    display_config_summary(&config, &args);

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = LeaguePipeline::new(storage, config);

    if args.dry_run {
        tracing::info!("DRY RUN MODE - nothing will be written");
        perform_dry_run(&pipeline).await?;
        return Ok(());
    }

    let engine = LeagueEngine::new(pipeline);
    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Standings written to {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Tournament: {}", config.display_name());
    println!("  Matches: {}", config.matches_path());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));

    match config.playoffs_file() {
        Some(state_file) => {
            let bracket = config.bracket();
            println!(
                "  Playoffs: {} fixtures, top {} seeded, state in {}",
                bracket.fixtures.len(),
                bracket.highest_seed(),
                state_file
            );
        }
        None => println!("  Playoffs: disabled"),
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run<P: Pipeline>(pipeline: &P) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = pipeline.extract().await?;
    let outcome = pipeline.transform(bundle).await?;

    println!("🔍 Dry Run Table:");
    for entry in &outcome.standings.entries {
        println!(
            "  {:>2}. {:<20} {:>3} pts  {:>+4} GD",
            entry.rank, entry.team, entry.points, entry.goal_difference
        );
    }

    if !outcome.standings.issues.is_empty() {
        println!();
        println!("⚠️ Skipped or adjusted matches:");
        for issue in &outcome.standings.issues {
            println!("  {}", issue);
        }
    }

    match &outcome.bracket {
        Some(BracketAdvance::SeasonIncomplete { unplayed }) => {
            println!();
            println!("🏆 Playoffs wait on {} unplayed league matches", unplayed);
        }
        Some(advance @ BracketAdvance::Advanced { fixtures, .. }) => {
            println!();
            println!(
                "🏆 Playoffs: {} fixtures ({})",
                fixtures.len(),
                if advance.changed() { "would change" } else { "unchanged" }
            );
            for id in advance.ambiguous() {
                println!("  ⚠️ {} is level without a shootout winner", id);
            }
        }
        None => {}
    }

    Ok(())
}
