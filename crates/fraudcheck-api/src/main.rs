use fraudcheck_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    fraudcheck_api::setup::init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    // Build collaborator clients, state, and routes
    let (_state, router) = fraudcheck_api::setup::initialize_app(config.clone())?;

    // Start the server
    fraudcheck_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
