use std::sync::{Arc, Mutex};
use uuid::Uuid;

use common::traits::{SampleSource, Surface};
use common::{Sample, SensorError};
use publisher::Listener;

use crate::recorder::Recorder;

/// Feeds may deliver samples from several threads at once, so the recorder is
/// shared behind a mutex.
pub type SharedRecorder<S> = Arc<Mutex<Recorder<S>>>;

pub fn shared<S: Surface>(recorder: Recorder<S>) -> SharedRecorder<S> {
    Arc::new(Mutex::new(recorder))
}

/// Re-zeroes the recorder and connects it to `source`, so every sample of the feed
/// gets drawn. Returns the listener id needed to `detach` it.
/// Returns SensorUnavailable if the feed can't be connected.
pub fn attach<S>(
    source: &dyn SampleSource,
    recorder: &SharedRecorder<S>,
) -> Result<Uuid, SensorError>
where
    S: Surface + 'static,
{
    match recorder.lock() {
        Ok(mut recorder) => recorder.request_rezero(),
        Err(e) => {
            return Err(SensorError::SensorUnavailable(format!(
                "recorder unusable: {}",
                e
            )))
        }
    }

    let mut listener = Listener::new({
        let recorder = recorder.clone();
        move |_id: Uuid, sample: Arc<Sample>| match recorder.lock() {
            Ok(mut recorder) => {
                recorder.on_sample(*sample);
            }
            Err(e) => log::error!("Dropping sample {}: {}", sample, e),
        }
    });

    let id = source.connect(&mut listener)?;
    log::info!("Recorder attached to {}", source.get_tag());
    Ok(id)
}

/// Disconnects a recorder previously attached to `source`.
pub fn detach(source: &dyn SampleSource, id: Uuid) -> Result<(), SensorError> {
    source.disconnect(id)?;
    log::info!("Recorder detached from {}", source.get_tag());
    Ok(())
}
