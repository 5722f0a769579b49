//! `campusdesk chat`: Interactive or single-message chat mode.
//!
//! Tasks and appointments are kept in memory for the life of the process.
//! Knowledge documents and menus come from an optional JSON seed file:
//!
//! ```json
//! {
//!   "knowledge": [{"content": "Room 203 is IT", "category": "rooms"}],
//!   "menus": [{"day": "Monday", "items": [{"name": "Lentil soup", "price": 3.5}]}]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use campusdesk_agent::{ChatService, Collaborators};
use campusdesk_config::AppConfig;
use campusdesk_core::knowledge::KnowledgeSource;
use campusdesk_core::message::UserId;
use campusdesk_core::services::Menu;
use campusdesk_knowledge::{JsonFileKnowledgeSource, StaticKnowledgeSource};
use campusdesk_providers::OpenAiCompatProvider;
use campusdesk_tools::{InMemoryAppointmentService, InMemoryTaskService, StaticMenuService};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct SeedMenus {
    #[serde(default)]
    menus: Vec<Menu>,
}

fn parse_menus(content: &str) -> Result<Vec<Menu>, serde_json::Error> {
    // A bare array of documents carries no menus.
    if content.trim_start().starts_with('[') {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str::<SeedMenus>(content)?.menus)
}

async fn load_menus(path: &Path) -> Result<Vec<Menu>, Box<dyn std::error::Error>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read seed file {}: {e}", path.display()))?;
    let menus = parse_menus(&content)
        .map_err(|e| format!("Invalid seed file {}: {e}", path.display()))?;
    debug!(count = menus.len(), "Loaded menus");
    Ok(menus)
}

pub async fn run(
    message: Option<String>,
    user: String,
    seed: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early, give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    CAMPUSDESK_API_KEY = 'sk-...'");
        eprintln!("    OPENAI_API_KEY     = 'sk-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let seed = seed.or_else(|| config.knowledge.seed_file.clone());
    let knowledge: Arc<dyn KnowledgeSource> = match &seed {
        Some(path) => Arc::new(JsonFileKnowledgeSource::new(path.clone())),
        None => Arc::new(StaticKnowledgeSource::new(vec![])),
    };
    let menus = match &seed {
        Some(path) => load_menus(path).await?,
        None => Vec::new(),
    };

    let provider = Arc::new(OpenAiCompatProvider::from_config(&config)?);
    let service = ChatService::from_config(
        &config,
        Collaborators {
            provider: provider.clone(),
            embedder: provider,
            knowledge,
            tasks: Arc::new(InMemoryTaskService::new()),
            appointments: Arc::new(InMemoryAppointmentService::new()),
            menus: Arc::new(StaticMenuService::new(menus)),
        },
    );
    let user = UserId::new(user);

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let response = service.chat(&msg, &user).await;
        eprint!("\r              \r");
        println!("{}", response?);
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  {} — Interactive Mode", config.identity.assistant_name);
    println!();
    println!("  Model:     {}", config.default_model);
    println!("  User:      {user}");
    match &seed {
        Some(path) => println!("  Knowledge: {}", path.display()),
        None => println!("  Knowledge: (none)"),
    }
    println!();
    println!("  Each message is answered on its own; earlier messages are not remembered.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"  You > ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        eprint!("  ...");
        match service.chat(line, &user).await {
            Ok(response) => {
                eprint!("\r     \r");
                println!();
                for reply_line in response.lines() {
                    println!("  Assistant > {reply_line}");
                }
                println!();
            }
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }
    }

    println!();
    println!("  Goodbye!");
    println!();
    Ok(())
}
