//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate provides a mechanism for registering and notifying listeners
//! of new events of type `T`. Sensor feeds use it to push every accelerometer sample
//! to whoever is connected (the graph recorder, the TCP broadcaster).
//!
//! ### Example
//!
//! ```
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use publisher::{Listener, Publishable, Publisher};
//!
//! let publisher = Publisher::<i32>::new();
//!
//! // Register a listener
//! let mut listener = Listener::new(|_id: Uuid, data: Arc<i32>| {
//!     println!("Listener received: {}", data);
//! });
//! let listener_id = publisher.register_listener(&mut listener);
//!
//! // Notify all listeners
//! publisher.notify_listeners(Arc::new(42));
//!
//! // Unregister the listener
//! publisher.unregister_listener(listener_id).expect("Failed to unregister listener");
//! assert!(publisher.is_empty());
//! ```

pub mod listener;
pub mod macros;
pub mod publisher;

pub use listener::Listener;
pub use publisher::{Publishable, Publisher, PublisherError};
