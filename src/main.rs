use std::process::ExitCode;

use auth_seed::app::app::App;
use auth_seed::config::mongo_conf::MongoConfig;
use auth_seed::util::logger::Logger;
use dotenv::dotenv;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before the logger so LOG_DIR / RUST_LOG apply
    let dotenv_result = dotenv();

    let _logger = match Logger::new() {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("🚀 Starting auth-seed provisioning");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let config = match MongoConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Mongo config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app = match App::new(&config).await {
        Ok(app) => app,
        Err(e) => {
            error!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    match app.run().await {
        Ok(_) => {
            info!("🎉 Database provisioned");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("❌ Provisioning failed: {e}");
            ExitCode::FAILURE
        }
    }
}
