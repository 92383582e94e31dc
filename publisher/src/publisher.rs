use dashmap::DashMap;
use rayon::prelude::*;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::Callback;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PublisherError {
    #[error("listener with id {0} not found")]
    ListenerNotFound(Uuid),
}

pub trait Publishable<T> {
    fn register_listener(&self, listener: &mut dyn Notifiable<T>) -> Uuid;
    fn unregister_listener(&self, listener_id: Uuid) -> Result<(), PublisherError>;
    fn unregister_all(&self);
    fn notify_listeners(&self, data: Arc<T>);
}

/// Record of registered listeners that will be notified of updates.
/// Cloning a `Publisher` shares the same set of listeners.
pub struct Publisher<T> {
    listeners: Arc<DashMap<Uuid, Callback<T>>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<T> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Publisher<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(DashMap::new()),
        }
    }

    // Returns true if no listeners registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    // Returns number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl<T> Publishable<T> for Publisher<T>
where
    T: Send + Sync + 'static,
{
    fn register_listener(&self, listener: &mut dyn Notifiable<T>) -> Uuid {
        let callback = listener.get_callback();
        let listener_id = Uuid::new_v4();
        listener.set_id(listener_id);
        self.listeners.insert(listener_id, callback);
        log::debug!("Registered listener {}", listener_id);
        listener_id
    }

    fn unregister_all(&self) {
        self.listeners.clear();
    }

    /// Returns PublisherError::ListenerNotFound if no id matches any registered listener
    fn unregister_listener(&self, listener_id: Uuid) -> Result<(), PublisherError> {
        self.listeners
            .remove(&listener_id)
            .map(|_| ())
            .ok_or(PublisherError::ListenerNotFound(listener_id))
    }

    /// Calls each registered listener with the provided data. Listeners run in
    /// parallel and the call returns once all of them are done.
    fn notify_listeners(&self, data: Arc<T>) {
        let listeners: Vec<(Uuid, Callback<T>)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        listeners.into_par_iter().for_each(|(id, callback)| {
            let data = data.clone();
            callback(id, data);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{listener, listener::Listener};
    use common::Sample;
    use std::sync::Mutex;

    struct TestHandler {
        data: Arc<Mutex<Sample>>,
    }

    impl TestHandler {
        fn new() -> Self {
            Self {
                data: Arc::new(Mutex::new(Sample::zero())),
            }
        }

        fn handle(&self, _id: Uuid, value: Arc<Sample>) {
            let mut data = self.data.lock().unwrap();
            *data = *value;
        }
    }

    #[test]
    fn test_publisher_initialization() {
        let publisher = Publisher::<Sample>::new();
        assert!(publisher.is_empty());
    }

    #[test]
    fn test_register_and_notify_listener() {
        let publisher = Publisher::new();
        let handler = Arc::new(TestHandler::new());

        let mut listener = Listener::new({
            let handler = handler.clone();
            move |id: Uuid, value| {
                handler.handle(id, value);
            }
        });

        let listener_id = publisher.register_listener(&mut listener);
        assert_eq!(listener.get_id(), Some(listener_id));
        publisher.notify_listeners(Arc::new(Sample::new(4, 8, 12)));

        assert_eq!(*handler.data.lock().unwrap(), Sample::new(4, 8, 12));
    }

    #[test]
    fn test_register_and_notify_listener_macro() {
        let publisher = Publisher::new();
        let handler = Arc::new(TestHandler::new());

        let mut listener = listener!(handler.handle);

        let _listener_id = publisher.register_listener(&mut listener);
        publisher.notify_listeners(Arc::new(Sample::new(1, 1, 1)));

        assert_eq!(*handler.data.lock().unwrap(), Sample::new(1, 1, 1));
    }

    #[test]
    fn test_notify_all_listeners() {
        let publisher = Publisher::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..4 {
            let received = received.clone();
            let mut listener = Listener::new(move |id: Uuid, value: Arc<Sample>| {
                received.lock().unwrap().push((id, *value));
            });
            publisher.register_listener(&mut listener);
        }
        assert_eq!(publisher.len(), 4);

        publisher.notify_listeners(Arc::new(Sample::new(0, 1, 2)));
        assert_eq!(received.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_unregister_listener() {
        let publisher = Publisher::new();
        let handler = Arc::new(TestHandler::new());

        let mut listener = listener!(handler.handle);

        let listener_id = publisher.register_listener(&mut listener);
        assert_eq!(publisher.unregister_listener(listener_id), Ok(()));
        publisher.notify_listeners(Arc::new(Sample::new(100, 100, 100)));

        // Should remain unchanged since listener was removed
        assert_eq!(*handler.data.lock().unwrap(), Sample::zero());
        assert_eq!(
            publisher.unregister_listener(listener_id),
            Err(PublisherError::ListenerNotFound(listener_id))
        );
    }

    #[test]
    fn test_unregister_all() {
        let publisher = Publisher::<Sample>::new();
        let handler = Arc::new(TestHandler::new());
        let mut listener1 = listener!(handler.handle);
        let mut listener2 = listener!(handler.handle);
        publisher.register_listener(&mut listener1);
        publisher.register_listener(&mut listener2);

        let shared = publisher.clone();
        shared.unregister_all();
        assert!(publisher.is_empty());
    }
}
