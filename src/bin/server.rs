use minesweeper_sync::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    log::info!(
        "Serving {}x{} boards, read timeout {:?}",
        config.board.width,
        config.board.height,
        config.read_timeout
    );
    run_server(config, None).await
}
