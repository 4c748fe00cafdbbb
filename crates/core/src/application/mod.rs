// Application Layer - Use Cases

pub mod pull_queue_inspector;
pub mod queue_lister;

// Re-exports
pub use pull_queue_inspector::PullQueueInspector;
pub use queue_lister::{QueueLister, LIST_QUEUES_LIMIT};
