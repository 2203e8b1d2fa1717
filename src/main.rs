//! relay - command-line front end for the message relay

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use message_relay::{
    config::env_lookup, Config, ConversationMessage, CredentialStore, FileCredentialStore,
    MessageRelay,
};

#[derive(Parser)]
#[command(name = "relay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Send a single message and print the reply
    Send {
        text: String,

        #[arg(long)]
        user_id: Option<String>,

        #[arg(long)]
        chat_id: Option<String>,
    },

    /// Chat interactively, one message per line
    Chat {
        #[arg(long)]
        user_id: Option<String>,

        #[arg(long)]
        chat_id: Option<String>,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Save an API key to the credential file
    Set { key: String },

    /// Report whether an API key is stored
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(Config::log_json_from(&env_lookup));

    match cli.command {
        Commands::Key { action } => run_key(action),
        Commands::Send {
            text,
            user_id,
            chat_id,
        } => {
            let config = Config::from_env()?;
            let relay = MessageRelay::from_config(&config)?;
            let messages = vec![ConversationMessage::user(text)];
            let reply = relay
                .send(&messages, user_id.as_deref(), chat_id.as_deref())
                .await?;
            println!("{}", reply);
            Ok(())
        }
        Commands::Chat { user_id, chat_id } => {
            let config = Config::from_env()?;
            let relay = MessageRelay::from_config(&config)?;
            run_chat(&relay, user_id.as_deref(), chat_id.as_deref()).await
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "message_relay=info,relay=info".into());

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Key management only needs the credential file location
fn run_key(action: KeyAction) -> Result<()> {
    let store = FileCredentialStore::new(Config::credential_file_from(&env_lookup));
    match action {
        KeyAction::Set { key } => {
            store
                .save(&key)
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            info!(path = %store.path().display(), "API key saved");
            println!("API key saved to {}", store.path().display());
        }
        KeyAction::Status => {
            let stored = store.exists();
            let from_env = Config::api_key_from(&env_lookup).is_some();
            println!(
                "credential file: {} ({})",
                store.path().display(),
                if stored { "key stored" } else { "no key" }
            );
            if from_env {
                println!("ANTHROPIC_API_KEY is set and takes precedence");
            }
        }
    }
    Ok(())
}

async fn run_chat(relay: &MessageRelay, user_id: Option<&str>, chat_id: Option<&str>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut conversation: Vec<ConversationMessage> = Vec::new();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }

        conversation.push(ConversationMessage::user(line));

        match relay.send(&conversation, user_id, chat_id).await {
            Ok(reply) => {
                stdout.write_all(format!("{}\n", reply).as_bytes()).await?;
                conversation.push(ConversationMessage::ai(reply));
            }
            Err(e) => {
                // Drop the unanswered turn so the next attempt starts clean
                conversation.pop();
                if e.is_missing_credential() {
                    stdout
                        .write_all(b"No API key stored. Run `relay key set <KEY>` first.\n")
                        .await?;
                } else {
                    stdout.write_all(format!("error: {}\n", e).as_bytes()).await?;
                }
            }
        }
    }

    Ok(())
}
