use crate::{until_ready, Result};
use redis::aio::MultiplexedConnection;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};

const REDIS_PORT: u16 = 6379;
const CONNECT_ATTEMPTS: u32 = 20;
const RETRY_INTERVAL: Duration = Duration::from_millis(250);

/// A standalone Redis container with a connection that has answered `PING`.
pub struct RedisServer {
    _container: ContainerAsync<GenericImage>,
    conn: MultiplexedConnection,
}

impl RedisServer {
    pub async fn start() -> Result<Self> {
        let container = GenericImage::new("redis", "8.6.0")
            .with_exposed_port(REDIS_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .start()
            .await?;

        // "localhost" may resolve to ::1 while the port is only mapped on v4.
        let host = match container.get_host().await?.to_string().as_str() {
            "localhost" => String::from("127.0.0.1"),
            other => other.to_string(),
        };
        let port = container.get_host_port_ipv4(REDIS_PORT).await?;
        let client = redis::Client::open(format!("redis://{}:{}", host, port))?;

        let conn = until_ready("redis", CONNECT_ATTEMPTS, RETRY_INTERVAL, || async {
            let mut conn = client.get_multiplexed_async_connection().await?;
            redis::cmd("PING").query_async::<String>(&mut conn).await?;
            Ok::<_, redis::RedisError>(conn)
        })
        .await?;

        Ok(Self {
            _container: container,
            conn,
        })
    }

    /// A handle on the shared multiplexed connection.
    pub fn connection(&self) -> MultiplexedConnection {
        self.conn.clone()
    }
}
