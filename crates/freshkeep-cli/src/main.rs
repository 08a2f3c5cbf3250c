use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "freshkeep-cli", version, about = "FreshKeep CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute an expiration date and freshness tier
    Expiration(commands::expiration::ExpirationArgs),
    /// Estimate the value and environmental cost of food
    Impact(commands::impact::ImpactArgs),
    /// Inventory operations over an items JSON file
    Items {
        #[command(subcommand)]
        action: commands::items::ItemsAction,
    },
    /// Analytics over daily aggregate and log files
    Analytics {
        #[command(subcommand)]
        action: commands::analytics::AnalyticsAction,
    },
    /// Recipe recommendations
    Recipes {
        #[command(subcommand)]
        action: commands::recipes::RecipesAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "freshkeep=info,freshkeep_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Expiration(args) => commands::expiration::run(args),
        Commands::Impact(args) => commands::impact::run(args),
        Commands::Items { action } => commands::items::run(action),
        Commands::Analytics { action } => commands::analytics::run(action),
        Commands::Recipes { action } => commands::recipes::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
