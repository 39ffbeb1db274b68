// src/main.rs
// Folio CLI - talk to the portfolio assistant from a terminal

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use folio::chat::{Assistant, ChatMessage, ChatSession, MessageStatus, prompt};
use folio::config::{EnvConfig, SiteConfig};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Interactive core for a personal portfolio site")]
#[command(version)]
struct Cli {
    /// Site content TOML (placeholder content when omitted)
    #[arg(short, long, global = true, env = "FOLIO_SITE_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level instead of info
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the portfolio assistant (default)
    Chat,

    /// Print the assistant's system prompt and exit
    Prompt,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv(); // Load .env from current directory

    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let site = match &cli.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };

    match cli.command {
        None | Some(Commands::Chat) => run_chat(site).await,
        Some(Commands::Prompt) => {
            println!("{}", prompt::system_prompt(&site));
            Ok(())
        }
    }
}

async fn run_chat(site: SiteConfig) -> Result<()> {
    let env = EnvConfig::load();
    let validation = env.validate();
    for warning in &validation.warnings {
        eprintln!("Warning: {warning}");
    }
    if !validation.is_valid() {
        anyhow::bail!("{}", validation.report());
    }

    let assistant = Assistant::gemini(
        env.api_keys.gemini.clone(),
        env.chat.model.clone(),
        &site,
        env.chat.limiter_config(),
    )?;
    let _window_reset = assistant.spawn_window_reset();
    let mut session = ChatSession::new(assistant, &site, env.chat.reply_delay());

    print_message(session.messages().last());
    println!("Type a message, /retry to retry a failed one, /quit to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "/quit" | "/exit" => break,
            "/retry" => {
                if session.can_retry() {
                    let failed = print_message(session.resubmit().await);
                    offer_retry(failed, &session);
                } else {
                    println!("Nothing to retry.");
                }
            }
            input => {
                let failed = print_message(session.send(input).await);
                offer_retry(failed, &session);
            }
        }
    }

    Ok(())
}

/// Print one appended log entry; returns `true` when it was an error
/// reply.
fn print_message(message: Option<&ChatMessage>) -> bool {
    let Some(message) = message else {
        return false;
    };
    match (&message.status, &message.error_kind) {
        (Some(MessageStatus::Error), Some(kind)) => {
            println!("assistant [{kind}]: {}", message.content);
            true
        }
        _ => {
            println!("assistant: {}", message.content);
            false
        }
    }
}

fn offer_retry(failed: bool, session: &ChatSession) {
    if failed && session.can_retry() {
        println!("(use /retry to try again)");
    }
}
