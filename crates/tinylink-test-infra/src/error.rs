use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("failed to start container: {0}")]
    Container(#[from] testcontainers::TestcontainersError),
    #[error("mysql fixture failed: {0}")]
    MySql(#[from] sqlx::Error),
    #[error("redis fixture failed: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("{service} did not accept connections after {attempts} attempts: {last_error}")]
    NotReady {
        service: &'static str,
        attempts: u32,
        last_error: String,
    },
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
