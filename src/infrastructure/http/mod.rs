//! HTTP transport adapters.

mod transport;

pub use transport::{DEFAULT_TIMEOUT_SECS, ReqwestTransport};
