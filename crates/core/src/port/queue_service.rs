// Queue Service Port (Interface)
// Abstraction over the remote message-queue service (IronMQ)

use crate::domain::{ListQueuesQuery, QueueInfo, QueueSummary};
use async_trait::async_trait;
use thiserror::Error;

const HTTP_NOT_FOUND: u16 = 404;

/// Errors reported by a queue service adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueServiceError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    /// The request could not be addressed (e.g. a dot path segment)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl QueueServiceError {
    /// True when the service reported that the queue does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueueServiceError::Http { status, .. } if *status == HTTP_NOT_FOUND)
    }
}

/// Read-only queue service interface
///
/// Implementations:
/// - IronMqClient: IronMQ v3 REST API over HTTPS
/// - MockQueueService: canned responses for tests
#[async_trait]
pub trait QueueService: Send + Sync {
    /// List queues of a project (single page)
    ///
    /// # Errors
    /// - QueueServiceError::Http if the service answers with a non-2xx status
    /// - QueueServiceError::Transport if the service cannot be reached
    async fn list_queues(
        &self,
        project_id: &str,
        query: &ListQueuesQuery,
    ) -> Result<Vec<QueueSummary>, QueueServiceError>;

    /// Fetch metadata of a single queue
    ///
    /// # Errors
    /// - QueueServiceError::Http with status 404 if the queue does not exist
    async fn queue_info(
        &self,
        project_id: &str,
        queue_name: &str,
    ) -> Result<QueueInfo, QueueServiceError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Mock QueueService for testing
    pub struct MockQueueService {
        queues: Arc<Mutex<Result<Vec<QueueSummary>, QueueServiceError>>>,
        infos: Arc<Mutex<HashMap<String, Result<QueueInfo, QueueServiceError>>>>,
        last_query: Arc<Mutex<Option<(String, ListQueuesQuery)>>>,
        call_count: Arc<Mutex<usize>>,
    }

    impl Default for MockQueueService {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockQueueService {
        pub fn new() -> Self {
            Self {
                queues: Arc::new(Mutex::new(Ok(Vec::new()))),
                infos: Arc::new(Mutex::new(HashMap::new())),
                last_query: Arc::new(Mutex::new(None)),
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        /// Service whose list call returns these names, in order
        pub fn with_queue_names(names: &[&str]) -> Self {
            let mock = Self::new();
            mock.set_queue_names(names);
            mock
        }

        pub fn set_queue_names(&self, names: &[&str]) {
            *self.queues.lock().unwrap() =
                Ok(names.iter().map(|n| QueueSummary::new(*n)).collect());
        }

        pub fn fail_list(&self, err: QueueServiceError) {
            *self.queues.lock().unwrap() = Err(err);
        }

        pub fn set_info(&self, queue_name: &str, info: Result<QueueInfo, QueueServiceError>) {
            self.infos
                .lock()
                .unwrap()
                .insert(queue_name.to_string(), info);
        }

        /// Register a queue of the given type with its counters
        pub fn add_queue(&self, queue_name: &str, queue_type: &str, size: i64, total: i64) {
            self.set_info(
                queue_name,
                Ok(QueueInfo {
                    name: queue_name.to_string(),
                    queue_type: Some(queue_type.to_string()),
                    size,
                    total_messages: total,
                    ..Default::default()
                }),
            );
        }

        pub fn last_query(&self) -> Option<(String, ListQueuesQuery)> {
            self.last_query.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl QueueService for MockQueueService {
        async fn list_queues(
            &self,
            project_id: &str,
            query: &ListQueuesQuery,
        ) -> Result<Vec<QueueSummary>, QueueServiceError> {
            *self.call_count.lock().unwrap() += 1;
            *self.last_query.lock().unwrap() = Some((project_id.to_string(), query.clone()));

            let queues = self.queues.lock().unwrap().clone()?;
            Ok(queues.into_iter().take(query.per_page as usize).collect())
        }

        async fn queue_info(
            &self,
            project_id: &str,
            queue_name: &str,
        ) -> Result<QueueInfo, QueueServiceError> {
            *self.call_count.lock().unwrap() += 1;

            match self.infos.lock().unwrap().get(queue_name) {
                Some(Ok(info)) => Ok(QueueInfo {
                    project_id: project_id.to_string(),
                    ..info.clone()
                }),
                Some(Err(e)) => Err(e.clone()),
                None => Err(QueueServiceError::Http {
                    status: HTTP_NOT_FOUND,
                    message: "Queue not found".to_string(),
                }),
            }
        }
    }
}
