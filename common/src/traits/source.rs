use uuid::Uuid;

use crate::errors::SensorError;
use crate::traits::Notifiable;
use crate::types::Sample;

/// Push based feed of accelerometer samples.
pub trait SampleSource: Send + Sync {
    /// Returns the tag identifying the feed
    fn get_tag(&self) -> &str;

    /// Connects `listener` to the feed. Every new sample is delivered to it until
    /// it is disconnected.
    /// Returns SensorUnavailable if the feed cannot be connected.
    fn connect(&self, listener: &mut dyn Notifiable<Sample>) -> Result<Uuid, SensorError>;

    /// Disconnects a listener previously connected.
    /// Returns ListenerNotFound if the id is unknown.
    fn disconnect(&self, id: Uuid) -> Result<(), SensorError>;
}
