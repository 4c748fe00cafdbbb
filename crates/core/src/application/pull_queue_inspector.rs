// Pull-Queue Inspector Use Case

use crate::domain::{validate_identifier, PullQueueDetail};
use crate::error::Result;
use crate::port::QueueService;
use std::sync::Arc;
use tracing::{debug, info};

/// Reads the message counters of a single pull queue
pub struct PullQueueInspector {
    queue_service: Arc<dyn QueueService>,
}

impl PullQueueInspector {
    pub fn new(queue_service: Arc<dyn QueueService>) -> Self {
        Self { queue_service }
    }

    /// Look up a pull queue by name
    ///
    /// Returns `PullQueueDetail::not_found()` when the queue does not exist or
    /// is not a pull queue. Neither case is an error.
    ///
    /// # Errors
    /// - AppError::Upstream for any other queue service failure
    pub async fn get_pull_queue_detail(
        &self,
        project_id: &str,
        queue_name: &str,
    ) -> Result<PullQueueDetail> {
        validate_identifier("project_id", project_id)?;
        validate_identifier("name", queue_name)?;

        debug!(project_id = %project_id, queue = %queue_name, "Fetching queue info");

        let info = match self.queue_service.queue_info(project_id, queue_name).await {
            Ok(info) => info,
            Err(e) if e.is_not_found() => {
                info!(project_id = %project_id, queue = %queue_name, "Queue not found");
                return Ok(PullQueueDetail::not_found());
            }
            Err(e) => return Err(e.into()),
        };

        if !info.is_pull() {
            info!(
                project_id = %project_id,
                queue = %queue_name,
                queue_type = ?info.queue_type,
                "Queue is not a pull queue"
            );
            return Ok(PullQueueDetail::not_found());
        }

        Ok(PullQueueDetail::found(info.size, info.total_messages))
    }
}
