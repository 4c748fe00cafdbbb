// Port Layer - Interfaces for external dependencies

pub mod queue_service;

// Re-exports
pub use queue_service::{QueueService, QueueServiceError};
