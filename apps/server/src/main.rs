use tickergate_server::{
    build_state,
    config::Config,
    init_tracing,
    server::{shutdown_signal, GatewayServer},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let state = build_state()?;
    let server = GatewayServer::bind(&config, state).await?;
    server.run_until(shutdown_signal()).await
}
