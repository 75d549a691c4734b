use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use kodo_chat::cli::chat::config::{
    ChatConfig, OutputMode, DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS,
};
use kodo_chat::cli::chat::ChatContext;
use kodo_chat::dialogue::classify;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Send one message to a fresh conversation and exit
    #[arg(short, long)]
    input: Option<String>,

    /// Shortest "typing" pause before a reply, in milliseconds
    #[arg(long, env = "KODO_CHAT_MIN_DELAY_MS", default_value_t = DEFAULT_MIN_DELAY_MS)]
    min_delay_ms: u64,

    /// Longest "typing" pause before a reply, in milliseconds
    #[arg(long, env = "KODO_CHAT_MAX_DELAY_MS", default_value_t = DEFAULT_MAX_DELAY_MS)]
    max_delay_ms: u64,

    /// Reply immediately, without the "typing" pause
    #[arg(long)]
    no_delay: bool,

    /// Seed for reply choice and pacing, for reproducible sessions
    #[arg(long, env = "KODO_CHAT_SEED")]
    seed: Option<u64>,

    /// How messages are printed
    #[arg(long, value_enum, env = "KODO_CHAT_OUTPUT", default_value_t = OutputMode::Styled)]
    output: OutputMode,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a chat session (the default)
    Chat,
    /// Print the topic a message would be routed to
    Classify {
        /// Message to classify
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Kodo Labs chat");

    match cli.command {
        Some(Commands::Classify { text }) => {
            println!("{}", classify(&text));
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Chat) | None => {
            let config = ChatConfig::new(
                cli.min_delay_ms,
                cli.max_delay_ms,
                cli.no_delay,
                cli.seed,
                cli.output,
            )?;
            let mut chat_context =
                ChatContext::new(Box::new(io::stdout()), cli.input, true, &config);
            chat_context.run().await
        }
    }
}
