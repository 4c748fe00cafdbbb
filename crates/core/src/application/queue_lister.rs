// Queue Lister Use Case

use crate::domain::{fingerprint, validate_identifier, ListQueuesQuery, NameFilter, QueueListResult};
use crate::error::Result;
use crate::port::QueueService;
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum number of queues fetched per listing
///
/// Only the first page is read: projects with more queues see the first
/// `LIST_QUEUES_LIMIT` names.
pub const LIST_QUEUES_LIMIT: u32 = 1000;

/// Lists the queues of a project, filtered by a wildcard name pattern
pub struct QueueLister {
    queue_service: Arc<dyn QueueService>,
}

impl QueueLister {
    pub fn new(queue_service: Arc<dyn QueueService>) -> Self {
        Self { queue_service }
    }

    /// List queue names matching `raw_pattern`
    ///
    /// # Arguments
    /// * `project_id` - IronMQ project
    /// * `raw_pattern` - `""`, `*text*`, `*text`, `text*` or `text`
    ///
    /// # Errors
    /// - AppError::Domain(InvalidFilter) for a wildcard pattern without text,
    ///   reported before any remote call
    /// - AppError::Upstream for any queue service failure
    pub async fn list_filtered_queue_names(
        &self,
        project_id: &str,
        raw_pattern: &str,
    ) -> Result<QueueListResult> {
        validate_identifier("project_id", project_id)?;
        let filter = NameFilter::parse(raw_pattern)?;

        debug!(
            project_id = %project_id,
            mode = ?filter.mode(),
            pattern = %filter.pattern(),
            "Listing queues"
        );

        let queues = self
            .queue_service
            .list_queues(project_id, &ListQueuesQuery::first_page(LIST_QUEUES_LIMIT))
            .await?;
        let fetched = queues.len();

        let names = filter.apply(queues.into_iter().map(|q| q.name));
        let id = fingerprint(&names);

        info!(
            project_id = %project_id,
            fetched = fetched,
            matched = names.len(),
            "Queues listed"
        );

        Ok(QueueListResult { names, id })
    }
}
