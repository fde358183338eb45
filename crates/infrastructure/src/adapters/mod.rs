//! Port adapters

mod postman_client;
mod system_clock;
mod tracing_observer;

pub use postman_client::{API_KEY_HEADER, ClientInitError, DEFAULT_BASE_URL, PostmanApiClient};
pub use system_clock::SystemClock;
pub use tracing_observer::TracingObserver;
