/// Cadence - simulated music player shell
use anyhow::Context;
use cadence_cli::{app::render_catalog, shell, App, CliConfig};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence music player core, driven from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the song catalog
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive player shell reading commands from stdin
    Shell,
    /// Play through the catalog on the simulated clock
    Demo {
        /// Number of tracks to play to the end
        #[arg(short, long, default_value_t = 5)]
        finishes: usize,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cadence_cli=info,cadence_playback=info,cadence_playlists=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    config.validate()?;

    match cli.command {
        Commands::Catalog { json } => {
            let catalog = config.build_catalog()?;
            println!("{}", render_catalog(&catalog, json)?);
        }
        Commands::Shell => {
            let mut app = App::new(&config)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            shell::run_shell(&mut app, stdin.lock(), &mut stdout)?;
        }
        Commands::Demo { finishes } => {
            let mut app = App::new(&config)?;
            let mut stdout = io::stdout();
            let finished = app.run_demo(finishes, &mut stdout)?;
            tracing::info!("Demo finished {} tracks", finished);
        }
    }

    Ok(())
}
