// Domain Layer - Pure business logic and entities

pub mod error;
pub mod filter;
pub mod fingerprint;
pub mod queue;

// Re-exports
pub use error::DomainError;
pub use filter::{FilterMode, NameFilter};
pub use fingerprint::fingerprint;
pub use queue::{
    queue_id, validate_identifier, ListQueuesQuery, PullQueueDetail, QueueInfo,
    QueueListResult, QueueSummary, PULL_QUEUE_TYPE,
};
