use clap::{Parser, Subcommand};
use std::sync::Arc;

mod application;
mod domain;
mod infrastructure;

use application::contest::{ContestHandler, ContestService, CONFIRM_ACTION};
use application::errors::BotError;
use domain::entities::Participant;
use domain::traits::Bot;
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::telegram::TelegramAdapter;
use infrastructure::audit::{ChannelAuditPublisher, LogAuditPublisher};
use infrastructure::config::{self, Config};
use infrastructure::health;

#[derive(Parser)]
#[command(name = "tally-bot")]
#[command(about = "Referral contest entry bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Bot token (overrides the BOT_TOKEN environment variable)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot against the Telegram API
    Run,
    /// Run a local console session (no Telegram, audit goes to the log)
    Console,
    /// Show version
    Version,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.token);
        }
        Commands::Console => {
            let rt = tokio::runtime::Runtime::new().expect("failed to start runtime");
            rt.block_on(run_console());
        }
        Commands::Version => {
            println!("tally-bot v{}", env!("CARGO_PKG_VERSION"));
        }
    }
}

fn run_bot(token_override: Option<String>) {
    if let Some(token) = token_override {
        std::env::set_var(config::ENV_BOT_TOKEN, token);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let rt = tokio::runtime::Runtime::new().expect("failed to start runtime");
    rt.block_on(async {
        if let Err(e) = run_telegram_bot(config).await {
            tracing::error!("Bot stopped: {}", e);
            std::process::exit(1);
        }
    });
}

async fn run_telegram_bot(config: Config) -> Result<(), BotError> {
    let mut adapter = TelegramAdapter::new(&config.bot_token);
    adapter.fetch_bot_info().await?;

    if let Err(e) = adapter.register_commands().await {
        tracing::warn!("Failed to register commands: {}", e);
    }

    let info = adapter.bot_info();
    tracing::info!("Bot started: @{}", info.username);
    tracing::info!("Audit events go to channel {}", config.audit_channel_id);

    if let Some(port) = config.health_port {
        tokio::spawn(async move {
            if let Err(e) = health::serve(port).await {
                tracing::error!("Liveness endpoint failed: {}", e);
            }
        });
    }

    let audit = Arc::new(ChannelAuditPublisher::new(&config.bot_token));
    let service = ContestService::new(audit, config.audit_channel_id);
    let mut handler = ContestHandler::new(&adapter, service);

    let mut offset: i64 = 0;
    let timeout_seconds = 30;

    tracing::info!("Starting message loop...");

    loop {
        match adapter.get_updates(offset, timeout_seconds).await {
            Ok(updates) => {
                for update in &updates {
                    if let Some(msg) = &update.message {
                        let (Some(from), Some(text)) = (&msg.from, &msg.text) else {
                            continue;
                        };
                        let chat_id = msg.chat.id.to_string();
                        let mut participant = Participant::new(from.id);
                        if let Some(username) = &from.username {
                            participant = participant.with_username(username);
                        }
                        if let Err(e) = handler.handle_text(&chat_id, participant, text).await {
                            tracing::error!("Failed to handle message: {}", e);
                        }
                    }

                    if let Some(cb) = &update.callback_query {
                        let chat_id = cb
                            .message
                            .as_ref()
                            .map(|m| m.chat.id.to_string())
                            .unwrap_or_else(|| cb.from.id.to_string());
                        let data = cb.data.as_deref().unwrap_or_default();
                        if let Err(e) = handler
                            .handle_callback(&cb.id, &chat_id, cb.from.id, data)
                            .await
                        {
                            tracing::error!("Failed to handle callback: {}", e);
                        }
                    }
                }

                if !updates.is_empty() {
                    offset = TelegramAdapter::get_next_offset(&updates);
                }
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
            }
        }
    }
}

/// Local development loop: one fixed participant, `/confirm` stands in for
/// the inline button press.
async fn run_console() {
    let adapter = ConsoleAdapter::new();
    let service = ContestService::new(Arc::new(LogAuditPublisher), 0);
    let mut handler = ContestHandler::new(&adapter, service);
    let me = Participant::new(0).with_username("console");

    println!("Console mode. /start to begin, /confirm to press the button, /quit to exit.");

    loop {
        let Some(line) = adapter.read_line("> ") else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        match line.as_str() {
            "/quit" | "/exit" => break,
            "/confirm" => {
                if let Err(e) = handler
                    .handle_callback("console_cb", "console", 0, CONFIRM_ACTION)
                    .await
                {
                    tracing::error!("Failed to handle confirm: {}", e);
                }
            }
            _ => {
                if let Err(e) = handler.handle_text("console", me.clone(), &line).await {
                    tracing::error!("Failed to handle input: {}", e);
                }
            }
        }
    }
}
