// Queue Domain Model

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Queue type reported by IronMQ for pull queues
pub const PULL_QUEUE_TYPE: &str = "pull";

/// Queue as returned by the list call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSummary {
    pub name: String,
}

impl QueueSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Queue metadata as returned by the info call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueueInfo {
    pub name: String,
    pub project_id: String,
    /// `pull`, `unicast` or `multicast`; absent on some older queues
    pub queue_type: Option<String>,
    /// Messages currently in the queue
    pub size: i64,
    /// Messages ever posted to the queue
    pub total_messages: i64,
    pub message_timeout: Option<i64>,
    pub message_expiration: Option<i64>,
}

impl QueueInfo {
    pub fn is_pull(&self) -> bool {
        self.queue_type.as_deref() == Some(PULL_QUEUE_TYPE)
    }
}

/// Cursor arguments for listing queues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQueuesQuery {
    pub prefix: Option<String>,
    /// List queues after this name
    pub previous: Option<String>,
    pub per_page: u32,
}

impl ListQueuesQuery {
    /// First page, no prefix
    pub fn first_page(per_page: u32) -> Self {
        Self {
            prefix: None,
            previous: None,
            per_page,
        }
    }
}

/// Filtered queue listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueListResult {
    pub names: Vec<String>,
    /// Fingerprint of `names`
    pub id: String,
}

/// Message counters of a pull queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PullQueueDetail {
    pub exists: bool,
    pub is_pull_type: bool,
    pub message_count: i64,
    pub message_count_total: i64,
}

impl PullQueueDetail {
    /// Missing queue, or a queue that is not a pull queue
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn found(message_count: i64, message_count_total: i64) -> Self {
        Self {
            exists: true,
            is_pull_type: true,
            message_count,
            message_count_total,
        }
    }
}

/// Stable identifier of a queue within a project
pub fn queue_id(project_id: &str, queue_name: &str) -> String {
    format!("{}/{}", project_id, queue_name)
}

/// Reject identifiers that cannot name a single URL path segment
///
/// Empty or blank values and the dot segments `.` and `..` are refused; the
/// latter would be collapsed by URL normalisation and address another resource.
pub fn validate_identifier(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid(field, "must not be empty"));
    }
    if matches!(value, "." | "..") {
        return Err(DomainError::invalid(
            field,
            format!("must not be the path segment {:?}", value),
        ));
    }
    Ok(())
}
