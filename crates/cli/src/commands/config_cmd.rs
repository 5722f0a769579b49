//! `campusdesk config`: Configuration commands.

use campusdesk_config::AppConfig;

pub fn print_default() {
    print!("{}", AppConfig::default_toml());
}

pub fn validate() -> Result<(), Box<dyn std::error::Error>> {
    let path = AppConfig::config_dir().join("config.toml");
    println!("Validating {}", path.display());

    match AppConfig::load() {
        Ok(config) => {
            println!("  Config OK");
            if !config.has_api_key() {
                println!("  Warning: no API key set (CAMPUSDESK_API_KEY or OPENAI_API_KEY)");
            }
            println!();
            println!("  Endpoint:        {}", config.base_url);
            println!("  Model:           {}", config.default_model);
            println!("  Embedding model: {}", config.embedding_model);
            println!("  Max iterations:  {}", config.agent.max_iterations);
            println!("  Search top-k:    {}", config.knowledge.top_k);
            if let Some(seed) = &config.knowledge.seed_file {
                println!("  Seed file:       {}", seed.display());
            }
            Ok(())
        }
        Err(e) => {
            println!("  Config error: {e}");
            Err(e.into())
        }
    }
}
