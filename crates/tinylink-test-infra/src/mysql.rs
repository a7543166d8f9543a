use crate::{until_ready, Result};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MYSQL_PORT: u16 = 3306;

/// Settings for the disposable MySQL server and the pool opened against it.
#[derive(Debug, Clone, TypedBuilder)]
pub struct MySqlFixtureConfig {
    #[builder(default = "tinylink".to_string(), setter(into))]
    database: String,
    #[builder(default = "tinylink".to_string(), setter(into))]
    username: String,
    #[builder(default = "tinylink".to_string(), setter(into))]
    password: String,
    #[builder(default = 5)]
    max_connections: u32,
    /// The server logs "ready" before it finishes its init restart, so the
    /// first connections may still be refused.
    #[builder(default = 40)]
    connect_attempts: u32,
    #[builder(default = Duration::from_millis(500))]
    retry_interval: Duration,
}

/// A MySQL 8.4 container with a pool that is known to accept queries.
pub struct MySqlServer {
    _container: ContainerAsync<GenericImage>,
    pool: MySqlPool,
}

impl MySqlServer {
    /// Starts the container and waits until a pool can be opened.
    pub async fn start(config: MySqlFixtureConfig) -> Result<Self> {
        let container = GenericImage::new("mysql", "8.4")
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", "root")
            .start()
            .await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(MYSQL_PORT).await?;
        let url = format!(
            "mysql://{}:{}@{}:{}/{}",
            config.username, config.password, host, port, config.database
        );

        let pool = until_ready("mysql", config.connect_attempts, config.retry_interval, || {
            MySqlPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&url)
        })
        .await?;

        Ok(Self {
            _container: container,
            pool,
        })
    }

    /// Starts the server and runs `ddl` against the fresh database.
    pub async fn with_schema(config: MySqlFixtureConfig, ddl: &str) -> Result<Self> {
        let server = Self::start(config).await?;
        sqlx::query(ddl).execute(&server.pool).await?;
        Ok(server)
    }

    /// A pool on the fixture database. Clones share the same connections.
    pub fn pool(&self) -> MySqlPool {
        self.pool.clone()
    }
}
