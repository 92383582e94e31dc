use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use uuid::Uuid;

use accel_sensor::services;
use accel_server::{run_server, ServerConfig, ServerError};
use common::{Sample, SampleSource};
use publisher::Listener;

fn local_config() -> ServerConfig {
    ServerConfig {
        port: 0,
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn test_stream_client_receives_mock_feed() {
    let rest = Sample::new(12, -5, 300);
    let (feed_handle, feed) = services::run_mock_service("Mock", rest, 5, false, None).unwrap();
    let (server_handle, server) = run_server(local_config(), feed.clone()).await.unwrap();

    let addr = server.local_addr().to_string();
    let (client_handle, client) = services::run_stream_service("Client", &addr, None)
        .await
        .unwrap();

    let received = Arc::new(Mutex::new(Vec::new()));
    let mut listener = Listener::new({
        let received = received.clone();
        move |_id: Uuid, sample: Arc<Sample>| {
            received.lock().unwrap().push(*sample);
        }
    });
    client.connect(&mut listener).unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    {
        let received = received.lock().unwrap();
        assert!(!received.is_empty());
        assert!(received.iter().all(|sample| *sample == rest));
    }

    // server going away ends the client feed
    server.stop();
    server_handle.await.unwrap();
    tokio::time::timeout(Duration::from_secs(2), client_handle)
        .await
        .expect("client did not stop")
        .unwrap();
    assert!(client.is_finished());

    feed.stop();
    feed_handle.await.unwrap();
}

#[tokio::test]
async fn test_echo_interleaved_with_records() {
    let (feed_handle, feed) =
        services::run_mock_service("Mock", Sample::new(1, 2, 3), 5, false, None).unwrap();
    let (server_handle, server) = run_server(local_config(), feed.clone()).await.unwrap();

    let mut client = TcpStream::connect(server.local_addr()).await.unwrap();
    client.write_all(b"ping").await.unwrap();

    let mut received = String::new();
    let mut buffer = [0u8; 256];
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !(received.contains("ping") && received.contains("1,2,3*")) {
        let n = tokio::time::timeout_at(deadline, client.read(&mut buffer))
            .await
            .expect("nothing received")
            .unwrap();
        assert!(n > 0);
        received.push_str(&String::from_utf8_lossy(&buffer[..n]));
    }
    assert_eq!(received.replace("ping", "").replace("1,2,3*", ""), "");

    server.stop();
    server_handle.await.unwrap();
    feed.stop();
    feed_handle.await.unwrap();
}

#[tokio::test]
async fn test_port_in_use() {
    let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = ServerConfig {
        port: occupied.local_addr().unwrap().port(),
        ..ServerConfig::default()
    };
    let (feed_handle, feed) =
        services::run_mock_service("Mock", Sample::zero(), 5, false, None).unwrap();

    let result = run_server(config, feed.clone()).await;
    assert!(matches!(result, Err(ServerError::ListenerBindFailed { .. })));
    assert_eq!(feed.n_listeners(), 0);

    feed.stop();
    feed_handle.await.unwrap();
}

#[tokio::test]
async fn test_stopped_feed_is_unavailable() {
    let (feed_handle, feed) =
        services::run_mock_service("Mock", Sample::zero(), 5, false, None).unwrap();
    feed.stop();
    feed_handle.await.unwrap();

    let result = run_server(local_config(), feed).await;
    assert!(matches!(result, Err(ServerError::SensorUnavailable(_))));
}
