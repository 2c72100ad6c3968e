mod logging;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use brujula_ai::{AiService, Assistant, AssistantTurn, SimulatedAiService};
use brujula_config::{expand_tilde, Config, ConfigManager};
use brujula_core::{AssistantProfile, Suggestion, SuggestionType};
use brujula_proactive::{
    default_storage_path, ContextStorage, EngineSettings, EventCalendar, ProactiveSession,
};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

#[derive(Parser)]
#[command(name = "brujula")]
#[command(about = "Proactive marketing assistant for Colombian businesses")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, env = "BRUJULA_CONFIG", default_value = "~/.brujula/config.json")]
    config: String,

    /// Assistant profile (brujula, tause_pro); overrides the config
    #[arg(long)]
    profile: Option<AssistantProfile>,

    /// Session whose context is loaded and saved
    #[arg(long, default_value = "default")]
    session: String,

    /// Enable debug mode
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat
    Chat,
    /// Show topics and suggestion cards for a message without saving anything
    Analyze {
        /// Message text
        message: String,
    },
    /// List upcoming commercial dates
    Events {
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Inspect or reset the stored context
    Context(ContextArgs),
    /// Configuration commands
    Config(ConfigArgs),
}

#[derive(Args, Clone)]
struct ContextArgs {
    #[command(subcommand)]
    command: ContextCommands,
}

#[derive(Subcommand, Clone)]
enum ContextCommands {
    /// Print the stored context as JSON
    Show,
    /// Delete the stored context for the session
    Reset,
}

#[derive(Args, Clone)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Read a value (e.g. proactive.max_suggestions, assistant.profile)
    Get { key: String },
    /// Write a value
    Set { key: String, value: String },
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, default_value = "false")]
        force: bool,
    },
    /// Print the current config
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = expand_tilde(&cli.config).unwrap_or_else(|| PathBuf::from(&cli.config));

    if let Commands::Config(args) = &cli.command {
        return handle_config(args.clone(), config_path).await;
    }

    let manager = ConfigManager::load(&config_path).await?;
    let config = manager.snapshot().await;
    let _guard = logging::init(&config.logging, cli.debug)?;
    debug!(path = ?config_path, "config loaded");

    let profile = cli.profile.unwrap_or(config.assistant.profile);
    let storage = ContextStorage::new(storage_root(&config));

    match cli.command {
        Commands::Chat => run_interactive_chat(&config, profile, &storage, &cli.session).await,
        Commands::Analyze { message } => {
            analyze(&config, &storage, &cli.session, &message).await
        }
        Commands::Events { limit } => {
            show_events(limit);
            Ok(())
        }
        Commands::Context(args) => handle_context(args, &storage, &cli.session).await,
        Commands::Config(_) => Ok(()),
    }
}

fn engine_settings(config: &Config) -> EngineSettings {
    EngineSettings {
        max_suggestions: config.proactive.max_suggestions,
        max_recent_topics: config.proactive.max_recent_topics,
        optimization_threshold: config.proactive.optimization_threshold,
    }
}

fn storage_root(config: &Config) -> PathBuf {
    config
        .storage
        .path
        .as_deref()
        .and_then(expand_tilde)
        .unwrap_or_else(default_storage_path)
}

fn ai_service(config: &Config) -> SimulatedAiService {
    SimulatedAiService::new(
        Duration::from_millis(config.ai.thinking_delay_min_ms),
        Duration::from_millis(config.ai.thinking_delay_max_ms),
    )
}

async fn load_session(
    config: &Config,
    storage: &ContextStorage,
    session_id: &str,
) -> anyhow::Result<ProactiveSession> {
    let snapshot = storage.load(session_id).await?;
    Ok(ProactiveSession::restore(snapshot, engine_settings(config)))
}

async fn run_interactive_chat(
    config: &Config,
    profile: AssistantProfile,
    storage: &ContextStorage,
    session_id: &str,
) -> anyhow::Result<()> {
    storage.init().await?;
    let session = load_session(config, storage, session_id).await?;
    let mut assistant = Assistant::new(profile, ai_service(config), session);

    println!("{}", format!("🧭 {}", profile.display_name()).cyan().bold());
    println!("{}", format!("Session: {}", session_id).dimmed());
    println!(
        "{}",
        "Commands: /dismiss <n>, /accept <n>, /context, /quit".dimmed()
    );
    println!();

    if let Some(name) = &config.assistant.user_name {
        println!("{}", format!("Usuario: {}", name).dimmed());
    }
    println!("{} {}", "Assistant:".green().bold(), assistant.greeting());
    print_suggestions(&assistant.welcome());
    println!();

    loop {
        print!("{} ", "You:".cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") || input == "/quit" {
            break;
        }

        if let Some(command) = input.strip_prefix('/') {
            handle_chat_command(&mut assistant, command).await;
        } else {
            println!("{}", "…".dimmed());
            match assistant.send(input).await {
                Ok(turn) => print_turn(&turn),
                Err(e) => println!("{}", format!("❌ Error: {}", e).red()),
            }
        }

        if let Err(e) = storage.save(&assistant.session().snapshot()).await {
            println!("{}", format!("⚠️  Could not save context: {}", e).yellow());
        }
        println!();
    }

    storage.save(&assistant.session().snapshot()).await?;
    println!("{}", "👋 ¡Hasta pronto!".cyan());
    Ok(())
}

async fn handle_chat_command<S: AiService>(assistant: &mut Assistant<S>, command: &str) {
    let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "context" => match serde_json::to_string_pretty(assistant.session().store().user_context()) {
            Ok(json) => println!("{}", json),
            Err(e) => println!("{}", format!("❌ Error: {}", e).red()),
        },
        "dismiss" | "accept" => {
            let Some(id) = card_id(assistant.session().suggestions(), arg) else {
                println!("{}", format!("❌ No card number {}", arg.trim()).red());
                return;
            };
            if name == "dismiss" {
                assistant.dismiss_suggestion(&id);
                println!("{}", "Card dismissed".dimmed());
                print_suggestions(assistant.session().suggestions());
            } else {
                println!("{}", "…".dimmed());
                match assistant.accept_suggestion(&id).await {
                    Ok(turn) => print_turn(&turn),
                    Err(e) => println!("{}", format!("❌ Error: {}", e).red()),
                }
            }
        }
        _ => println!("{}", format!("❌ Unknown command: /{}", name).red()),
    }
}

/// Resolve a 1-based card number to the card id
fn card_id(suggestions: &[Suggestion], arg: &str) -> Option<String> {
    let index: usize = arg.trim().parse().ok()?;
    suggestions
        .get(index.checked_sub(1)?)
        .map(|s| s.id.clone())
}

fn print_turn(turn: &AssistantTurn) {
    let label = if turn.fallback {
        "Assistant (fallback):".yellow().bold()
    } else {
        "Assistant:".green().bold()
    };
    println!("{} {}", label, turn.reply.content);
    print_suggestions(&turn.suggestions);
}

fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        return;
    }
    println!();
    for (i, suggestion) in suggestions.iter().enumerate() {
        let tag = format!("[{}]", suggestion.kind);
        let tag = match suggestion.kind {
            SuggestionType::Regional => tag.blue(),
            SuggestionType::Trend => tag.magenta(),
            SuggestionType::Date => tag.yellow(),
            SuggestionType::Optimization => tag.red(),
            SuggestionType::Insight | SuggestionType::Opportunity => tag.cyan(),
        };
        println!("  {}. {} {}", i + 1, tag, suggestion.title.bold());
        println!("     {}", suggestion.description.dimmed());
        if let Some(action) = &suggestion.action {
            println!("     {}", format!("→ {}", action.label).green());
        }
    }
}

async fn analyze(
    config: &Config,
    storage: &ContextStorage,
    session_id: &str,
    message: &str,
) -> anyhow::Result<()> {
    let mut session = load_session(config, storage, session_id).await?;
    let topics = session.generator().extractor().extract(message);

    println!("{}", "🔎 Topics:".cyan().bold());
    if topics.is_empty() {
        println!("{}", "  (none)".dimmed());
    }
    for topic in &topics {
        let categories: Vec<String> = session
            .generator()
            .extractor()
            .categories(topic)
            .iter()
            .map(|c| format!("{:?}", c).to_lowercase())
            .collect();
        println!("  {} {}", topic, format!("({})", categories.join(", ")).dimmed());
    }

    println!();
    println!("{}", "💡 Suggestions:".cyan().bold());
    let suggestions = session.process_user_message(message).to_vec();
    if suggestions.is_empty() {
        println!("{}", "  (none)".dimmed());
    }
    print_suggestions(&suggestions);
    Ok(())
}

fn show_events(limit: usize) {
    let calendar = EventCalendar::default();
    let events = calendar.upcoming(Utc::now(), limit);

    println!("{}", "📅 Upcoming dates:".cyan().bold());
    for event in events {
        let when = match event.days_until {
            1 => "mañana".to_string(),
            n => format!("en {} días", n),
        };
        println!(
            "  {} {} {}",
            event.date.to_string().yellow(),
            event.name.bold(),
            format!("({})", when).dimmed()
        );
        println!("     {}", event.description.dimmed());
    }
}

async fn handle_context(args: ContextArgs, storage: &ContextStorage, session_id: &str) -> anyhow::Result<()> {
    match args.command {
        ContextCommands::Show => {
            let snapshot = storage.load(session_id).await?;
            println!("{}", format!("📋 Context for session {}:", session_id).cyan().bold());
            println!();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        ContextCommands::Reset => {
            if storage.delete(session_id).await? {
                println!("{}", format!("✅ Context reset for session {}", session_id).green());
            } else {
                println!("{}", format!("⚠️  No stored context for session {}", session_id).yellow());
            }
        }
    }
    Ok(())
}

async fn handle_config(args: ConfigArgs, config_path: PathBuf) -> anyhow::Result<()> {
    match args.command {
        ConfigCommands::Get { key } => {
            let manager = ConfigManager::load(&config_path).await?;
            let config = manager.snapshot().await;

            match config.get_value(&key) {
                Some(value) => println!("{}", format!("{} = {}", key, value).green()),
                None => {
                    println!("{}", format!("❌ Key not found: {}", key).red());
                    std::process::exit(1);
                }
            }
        }
        ConfigCommands::Set { key, value } => {
            let manager = ConfigManager::load(&config_path).await?;
            if let Err(e) = manager.update(|config| config.set_value(&key, &value)).await {
                println!("{}", format!("❌ Failed to set value: {}", e).red());
                std::process::exit(1);
            }
            println!("{}", format!("✅ Set {} = {}", key, value).green());
        }
        ConfigCommands::Init { force } => {
            if config_path.exists() && !force {
                println!("{}", format!("⚠️  Config already exists at {:?}", config_path).yellow());
                println!("{}", "Use --force to overwrite".dimmed());
                return Ok(());
            }

            brujula_config::init_brujula_dirs().await?;
            let manager = ConfigManager::new(Config::default(), config_path.clone());
            manager.save().await?;

            println!("{}", format!("✅ Config initialized at {:?}", config_path).green());
        }
        ConfigCommands::Show => {
            let manager = ConfigManager::load(&config_path).await?;
            let config = manager.snapshot().await;

            println!("{}", "📋 Current Configuration:".cyan().bold());
            println!();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
