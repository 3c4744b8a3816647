pub mod admin_repo;
pub mod auth_record_repo;
pub mod repository_error;

use crate::config::mongo_conf::MongoConfig;
use tracing::{debug, info};

/// Open a client for the configured deployment and return the target database
pub async fn connect(config: &MongoConfig) -> Result<mongodb::Database, mongodb::error::Error> {
    use mongodb::{options::{ClientOptions, Credential, ResolverConfig}, Client};

    info!("Connecting to MongoDB database: {}", config.database);
    let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("AuthSeed".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));
    client_options.server_selection_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
        debug!("Using credential for {} (source: {})", username, config.auth_source);
        client_options.credential = Some(Credential::builder()
            .username(username.clone())
            .password(password.clone())
            .source(config.auth_source.clone())
            .build());
    }

    let client = Client::with_options(client_options)?;
    Ok(client.database(&config.database))
}
