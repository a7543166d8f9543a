//! Disposable backing services for the store integration tests.
//!
//! Each fixture starts a container and hands back a connection that has
//! already answered, so tests never race the server's startup.

pub mod error;
pub mod mysql;
pub mod redis;

pub use error::{Result, TestInfraError};

use std::future::Future;
use std::time::Duration;

/// Retries `connect` until it succeeds or `attempts` run out.
async fn until_ready<T, E, F, Fut>(
    service: &'static str,
    attempts: u32,
    interval: Duration,
    mut connect: F,
) -> Result<T>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let mut last_error = String::from("no attempt made");

    for _ in 0..attempts {
        match connect().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                last_error = err.to_string();
                tokio::time::sleep(interval).await;
            }
        }
    }

    Err(TestInfraError::NotReady {
        service,
        attempts,
        last_error,
    })
}
