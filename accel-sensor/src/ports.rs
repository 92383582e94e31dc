use std::sync::Arc;
use tokio::sync::Notify;

use async_trait::async_trait;

use common::{Sample, SensorError};
use publisher::Publisher;

#[async_trait]
pub trait SensorPort: Send + Sync {
    /// Runs the feed, publishing every sample, until `abort_signal` is notified or the
    /// feed runs dry.
    async fn start(
        &self,
        publisher: Publisher<Sample>,
        abort_signal: Arc<Notify>,
    ) -> Result<(), SensorError>;

    fn get_tag(&self) -> &str;
}
