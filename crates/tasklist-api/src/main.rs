use tasklist_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tasklist_api::telemetry::init_tracing();

    let config = Config::from_env()?;

    // Database, repositories, and routes; a dead database is fatal here.
    let (_state, router) = tasklist_api::setup::initialize_app(config.clone()).await?;

    tasklist_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
