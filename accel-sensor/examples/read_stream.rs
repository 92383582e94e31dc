// Logs the samples streamed by an accelerometer server.
//
//   cargo run --example read_stream -- [address]

use accel_sensor::services;
use common::constants::DEFAULT_SERVER_PORT;
use common::{Sample, SampleSource};
use publisher::Listener;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| format!("127.0.0.1:{}", DEFAULT_SERVER_PORT));

    let (handle, feed) = services::run_stream_service("N95", &addr, None).await?;

    let mut listener = Listener::new(|_id: Uuid, sample: Arc<Sample>| {
        log::info!("{}", sample);
    });
    feed.connect(&mut listener)?;

    handle.await?;
    Ok(())
}
