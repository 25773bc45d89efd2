//! mentor-engine: Headless engine for the mentor chat client
//!
//! This crate provides everything that does not need a terminal:
//! - Messages and the append-only conversation
//! - The gate that keeps one request in flight at a time
//! - The HTTP transport to the mentor service
//! - Session flows that tie the three together
//! - Configuration

pub mod config;
pub mod gate;
pub mod message;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use gate::{Gate, GatePermit};
pub use message::{Conversation, Message, Sender};
pub use session::{PendingAsk, PendingUpload, Rejected, Reply, Session, ASK_FAILED, UPLOAD_FAILED};
pub use transport::{HttpTransport, Transport, TransportError, UploadFile, UploadStatus};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
