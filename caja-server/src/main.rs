use caja_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, config, work dirs, logging)
    let (config, _log_guard) = setup_environment()?;

    tracing::info!(
        work_dir = %config.work_dir,
        port = config.http_port,
        "Caja server starting"
    );

    // 2. Initialize server state (ledgers, printer)
    let state = ServerState::initialize(&config)?;

    // 3. Run the HTTP server until ctrl-c
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
