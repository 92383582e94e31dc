// Serves a synthetic accelerometer on 127.0.0.1:12008.
//
//   cargo run --example serve_mock -- [server.toml]
//
// Connect with `nc 127.0.0.1 12008` to watch the records.

use accel_sensor::services;
use accel_server::{run_server, ServerConfig};
use common::Sample;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    let (feed_handle, feed) =
        services::run_mock_service("Mock", Sample::new(0, 0, -1024), 33, true, None)?;
    let (server_handle, _server) = run_server(config, feed.clone()).await?;

    server_handle.await?;
    feed.stop();
    feed_handle.await?;
    Ok(())
}
