mod cli;

use crate::cli::{Command, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tinylink_core::{CreateRequest, CreateResponse, ExpiryPolicy, MappingStore, ResolveResponse};
use tinylink_generator::RandomGenerator;
use tinylink_redirector::RedirectorService;
use tinylink_shortener::{Shortener, ShortenerConfig, ShortenerService};
use tinylink_storage::{InMemoryMappingStore, MySqlMappingStore, RedisMappingStore, TimeoutStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit code for a short id that is unknown or expired.
const NOT_FOUND: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = CLI::parse();
    init_tracing(config.log_json);

    info!(
        storage_backend = %config.storage,
        id_length = config.id_length,
        base_url = %config.base_url,
        "starting tinylink"
    );

    let timeout = Duration::from_millis(config.store_timeout_ms);

    match config.storage {
        StorageBackendArg::InMemory => {
            warn!("in-memory storage does not outlive this process");
            run(&config, TimeoutStore::new(InMemoryMappingStore::new(), timeout)).await
        }
        StorageBackendArg::Mysql => {
            let dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let store = MySqlMappingStore::connect(dsn).await?;
            store.ensure_schema().await?;
            run(&config, TimeoutStore::new(store, timeout)).await
        }
        StorageBackendArg::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("redis url is required when storage backend is redis")?;
            let store = RedisMappingStore::connect(url).await?;
            run(&config, TimeoutStore::new(store, timeout)).await
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run<S: MappingStore>(config: &CLI, store: S) -> anyhow::Result<ExitCode> {
    match &config.command {
        Command::Create { long_url } => {
            let generator = RandomGenerator::new(config.id_length)?;
            let shortener_config = ShortenerConfig::builder()
                .base_url(config.base_url.as_str())
                .expiry(ExpiryPolicy::new(Duration::from_secs(config.ttl_secs))?)
                .max_attempts(config.max_attempts)
                .build();
            let shortener = ShortenerService::new(store, generator, shortener_config);

            let mapping = shortener.shorten(CreateRequest::new(long_url)).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&CreateResponse::from(&mapping))?
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Resolve { short_id } => {
            let redirector = RedirectorService::new(store);

            match redirector.resolve_str(short_id).await? {
                Some(mapping) => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&ResolveResponse::from(&mapping))?
                    );
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("short id not found: {}", short_id);
                    Ok(ExitCode::from(NOT_FOUND))
                }
            }
        }
        Command::Purge => {
            let removed = store.purge_expired().await?;
            info!(removed, "purged expired mappings");
            println!("{}", serde_json::json!({ "removed": removed }));
            Ok(ExitCode::SUCCESS)
        }
    }
}
