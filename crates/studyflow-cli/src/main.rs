use anyhow::Result;
use clap::{Parser, Subcommand};
use studyflow_core::upload::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "studyflow")]
#[command(about = "StudyFlow CLI - turn a syllabus into a study roadmap", long_about = None)]
struct Cli {
    /// Base URL of the StudyFlow service (overrides config and STUDYFLOW_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a syllabus (PDF or plain text) and print the plan
    Analyze {
        /// Path to the syllabus document
        file: std::path::PathBuf,

        /// Number of weeks to plan for
        #[arg(long, default_value_t = 4)]
        weeks: u32,

        /// Study hours per day
        #[arg(long, default_value_t = 10.0)]
        hours: f64,

        /// Beginner, Intermediate or Advanced
        #[arg(long, default_value = "Beginner")]
        level: Level,
    },
    /// Interactive shell with topic chat
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the rendered plan
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.api_url)?;

    match cli.command {
        Commands::Analyze {
            file,
            weeks,
            hours,
            level,
        } => commands::analyze::run(&config, &file, weeks, hours, level).await?,
        Commands::Shell => commands::shell::run(&config).await?,
    }

    Ok(())
}
