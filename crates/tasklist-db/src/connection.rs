//! Database connection bootstrap.
//!
//! Startup is the only place where store failures are retried: a fixed
//! number of connect-and-probe attempts with a fixed delay in between.
//! Exhausting them is fatal to the process; per-request operations never
//! retry.

use std::future::Future;
use std::time::Duration;

use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use tasklist_core::AppError;

const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Establish and verify the shared database connection.
///
/// Each attempt parses the URI, builds a client, and runs a `ping` probe so
/// a handle that cannot actually serve queries never escapes. The returned
/// client is internally pooled and safe to share across all in-flight
/// requests for the life of the process.
pub async fn initialize(
    uri: &str,
    server_selection_timeout: Duration,
) -> Result<Client, AppError> {
    tracing::info!("Connecting to database...");
    let client = with_fixed_retry(MAX_ATTEMPTS, RETRY_DELAY, || {
        connect_and_probe(uri, server_selection_timeout)
    })
    .await?;
    tracing::info!("Database connected successfully");
    Ok(client)
}

/// Liveness probe against the shared connection, used by the health route.
pub async fn ping(client: &Client) -> Result<(), mongodb::error::Error> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(drop)
}

async fn connect_and_probe(
    uri: &str,
    server_selection_timeout: Duration,
) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(uri).await?;
    // Bound server selection so a dead URI fails each attempt in finite time
    // instead of hanging on the driver's 30s default.
    options.server_selection_timeout = Some(server_selection_timeout);
    let client = Client::with_options(options)?;
    ping(&client).await?;
    Ok(client)
}

/// Run `op` up to `attempts` times (including the first), sleeping `delay`
/// between attempts. The terminal error carries the attempt count.
async fn with_fixed_retry<T, F, Fut>(
    attempts: u32,
    delay: Duration,
    mut op: F,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, mongodb::error::Error>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(source) if attempt >= attempts => {
                return Err(AppError::Connection {
                    attempts: attempt,
                    source,
                });
            }
            Err(err) => {
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    error = %err,
                    "database connection attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
