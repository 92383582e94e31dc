// Draws a live graph of accelerometer samples.
//
//   cargo run --example grapher -- [graph.toml] [server address]
//
// Without a server address a synthetic accelerometer is graphed. Press Enter to
// re-zero. The graph is written to accel_graph.png every second.

use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use accel_sensor::services;
use common::{Sample, SampleSource};
use recorder_rs::{attach, shared, GraphConfig, KeyEvent, Recorder, Scancode};
use test_utils::surfaces::PlotSurface;

const OUTPUT_FILE: &str = "accel_graph.png";
const REFRESH_PERIOD_MILLIS: u64 = 1000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GraphConfig::load(path)?,
        None => GraphConfig::default(),
    };

    let surface = PlotSurface::new(config.width, config.height);
    let recorder = shared(Recorder::new(surface, config));

    let (mut handle, feed): (_, Arc<dyn SampleSource>) = match args.next() {
        Some(addr) => {
            let (handle, feed) = services::run_stream_service("N95", &addr, None).await?;
            (handle, feed as Arc<dyn SampleSource>)
        }
        None => {
            let (handle, feed) =
                services::run_mock_service("Mock", Sample::new(0, 0, -1024), 33, true, None)?;
            (handle, feed as Arc<dyn SampleSource>)
        }
    };
    attach(&*feed, &recorder)?;

    let mut keys = BufReader::new(tokio::io::stdin()).lines();
    let mut refresh = tokio::time::interval(Duration::from_millis(REFRESH_PERIOD_MILLIS));

    loop {
        tokio::select! {
            _ = &mut handle => {
                break;
            }

            line = keys.next_line() => {
                if let Ok(Some(_)) = line {
                    if let Ok(mut recorder) = recorder.lock() {
                        recorder.on_key(&KeyEvent::down(Scancode::Select));
                    }
                }
            }

            _ = refresh.tick() => {
                if let Ok(recorder) = recorder.lock() {
                    if let Err(e) = recorder.surface().save_png(OUTPUT_FILE, feed.get_tag()) {
                        log::error!("Unable to render graph: {}", e);
                    }
                }
            }
        }
    }
    Ok(())
}
