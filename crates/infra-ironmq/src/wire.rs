// IronMQ v3 wire format

use ironmq_core::domain::{QueueInfo, QueueSummary};
use serde::Deserialize;

/// GET /projects/{project_id}/queues
#[derive(Debug, Deserialize)]
pub(crate) struct ListQueuesResponse {
    #[serde(default)]
    pub queues: Vec<QueueEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueueEntry {
    pub name: String,
}

impl From<QueueEntry> for QueueSummary {
    fn from(entry: QueueEntry) -> Self {
        QueueSummary::new(entry.name)
    }
}

/// GET /projects/{project_id}/queues/{queue_name}
#[derive(Debug, Deserialize)]
pub(crate) struct QueueInfoResponse {
    pub queue: QueueInfoBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueueInfoBody {
    pub name: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(rename = "type", default)]
    pub queue_type: Option<String>,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub total_messages: i64,
    #[serde(default)]
    pub message_timeout: Option<i64>,
    #[serde(default)]
    pub message_expiration: Option<i64>,
}

impl From<QueueInfoBody> for QueueInfo {
    fn from(body: QueueInfoBody) -> Self {
        QueueInfo {
            name: body.name,
            project_id: body.project_id,
            queue_type: body.queue_type,
            size: body.size,
            total_messages: body.total_messages,
            message_timeout: body.message_timeout,
            message_expiration: body.message_expiration,
        }
    }
}

/// Error body, e.g. `{"msg":"Queue not found"}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub msg: String,
}
