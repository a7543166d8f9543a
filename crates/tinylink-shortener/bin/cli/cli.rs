use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};

pub const ID_LENGTH_ENV: &str = "TINYLINK_ID_LENGTH";
pub const BASE_URL_ENV: &str = "TINYLINK_BASE_URL";
pub const TTL_SECS_ENV: &str = "TINYLINK_TTL_SECS";
pub const MAX_ATTEMPTS_ENV: &str = "TINYLINK_MAX_ATTEMPTS";
pub const STORAGE_BACKEND_ENV: &str = "TINYLINK_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "TINYLINK_MYSQL_DSN";
pub const REDIS_URL_ENV: &str = "TINYLINK_REDIS_URL";
pub const STORE_TIMEOUT_MS_ENV: &str = "TINYLINK_STORE_TIMEOUT_MS";

pub const DEFAULT_ID_LENGTH: usize = 12;
pub const DEFAULT_BASE_URL: &str = "https://short.witek.com.br/t/";
pub const DEFAULT_TTL_SECS: u64 = 157_680_000;
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tinylink", about = "Create and resolve short links")]
pub struct CLI {
    #[arg(long, env = ID_LENGTH_ENV, default_value_t = DEFAULT_ID_LENGTH)]
    pub id_length: usize,

    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = TTL_SECS_ENV, default_value_t = DEFAULT_TTL_SECS)]
    pub ttl_secs: u64,

    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = tinylink_shortener::DEFAULT_MAX_ATTEMPTS
    )]
    pub max_attempts: u32,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    #[arg(long, env = STORE_TIMEOUT_MS_ENV, default_value_t = DEFAULT_STORE_TIMEOUT_MS)]
    pub store_timeout_ms: u64,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a URL and print the created mapping.
    Create { long_url: String },
    /// Look up the destination of a short id.
    Resolve { short_id: String },
    /// Drop expired mappings from the store.
    Purge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["tinylink", "create", "https://witek.com.br"]).unwrap();

        assert_eq!(cli.id_length, 12);
        assert_eq!(cli.base_url, "https://short.witek.com.br/t/");
        assert_eq!(cli.ttl_secs, 157_680_000);
        assert_eq!(cli.max_attempts, 5);
        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert!(matches!(cli.command, Command::Create { .. }));
    }

    #[test]
    fn mysql_requires_dsn() {
        let result = CLI::try_parse_from(["tinylink", "--storage", "mysql", "purge"]);
        assert!(result.is_err());

        let cli = CLI::try_parse_from([
            "tinylink",
            "--storage",
            "mysql",
            "--mysql-dsn",
            "mysql://root@localhost/tinylink",
            "purge",
        ])
        .unwrap();
        assert_eq!(cli.storage, StorageBackendArg::Mysql);
    }

    #[test]
    fn redis_requires_url() {
        let result = CLI::try_parse_from(["tinylink", "--storage", "redis", "resolve", "abc"]);
        assert!(result.is_err());
    }
}
