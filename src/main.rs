use std::env;
use svgen::config::{Config, NimConfig};
use svgen::logger;
use svgen::nim::NimClient;
use svgen::server;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(logger::LoggerConfig::development())?;

    log::info!("🔍 Checking NIM environment...");

    // Check the credential without printing its value
    match env::var("NVIDIA_API_KEY") {
        Ok(key) => {
            log::info!("✅ NVIDIA API key found in environment");
            log::debug!("API key length: {}", key.len());
        }
        Err(_) => {
            log::warn!("⚠️  NVIDIA_API_KEY is not set");
            log::error!("❌ Generation requests cannot be attempted without it");
        }
    }

    if let Ok(url) = env::var("NIM_INVOKE_URL") {
        log::info!("NIM_INVOKE_URL override: {}", url);
    }

    let config = Config::from_env().with_nim(NimConfig::from_env());

    log::info!("🔄 Creating NIM client...");
    let client = match NimClient::new(config.nim.clone().unwrap_or_default()) {
        Ok(client) => {
            log::info!("✅ NIM client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize NIM client: {}", e);
            return Err(e.into());
        }
    };

    server::run(&config, client).await?;

    Ok(())
}
