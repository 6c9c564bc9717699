use clap::Parser;
use strike_edge::cli::{Cli, Commands};
use strike_edge::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    let _guard = strike_edge::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Quote(args) => {
            args.execute(&config).await?;
        }
        Commands::Replay(args) => {
            tracing::info!(file = %args.file.display(), "Starting replay");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  History: capacity={}, min_points={}",
                config.history.capacity, config.history.min_points_for_signal
            );
            println!("  Pricing: base_decay_rate={}", config.pricing.base_decay_rate);
            println!(
                "  Ladder: increment={}, range={}, extension_steps={}",
                config.ladder.increment, config.ladder.range, config.ladder.extension_steps
            );
            println!("  Signal: min_edge={}%", config.signal.min_edge);
            println!(
                "  Risk: bankroll=${}, max_bet={}%",
                config.risk.initial_bankroll,
                config.risk.max_bet_fraction * 100.0
            );
            println!("  Session: {} min to expiry", config.session.time_to_expiry_minutes);
        }
    }

    Ok(())
}
