//! Provider
//!
//! Registry of data sources sharing one queue service.

use crate::error::ProviderError;
use crate::handler::{
    pull_queue_schema, queues_schema, DataSource, PullQueueDataSource, QueuesDataSource,
    PULL_QUEUE_DATA_SOURCE, QUEUES_DATA_SOURCE,
};
use crate::schema::DataSourceSchema;
use crate::types::{AttributeMap, ReadResponse};
use ironmq_core::port::QueueService;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Schemas of every data source, by type name
///
/// Available without a configured queue service.
pub fn schemas() -> BTreeMap<&'static str, DataSourceSchema> {
    BTreeMap::from([
        (QUEUES_DATA_SOURCE, queues_schema()),
        (PULL_QUEUE_DATA_SOURCE, pull_queue_schema()),
    ])
}

/// IronMQ data source provider
///
/// Built once with its queue service; reads are independent and share no state.
pub struct Provider {
    data_sources: BTreeMap<&'static str, Arc<dyn DataSource>>,
}

impl Provider {
    pub fn new(queue_service: Arc<dyn QueueService>) -> Self {
        let mut provider = Self {
            data_sources: BTreeMap::new(),
        };
        provider.register(Arc::new(QueuesDataSource::new(queue_service.clone())));
        provider.register(Arc::new(PullQueueDataSource::new(queue_service)));
        provider
    }

    fn register(&mut self, data_source: Arc<dyn DataSource>) {
        self.data_sources.insert(data_source.name(), data_source);
    }

    pub fn data_source_names(&self) -> Vec<&'static str> {
        self.data_sources.keys().copied().collect()
    }

    pub fn data_source(&self, name: &str) -> Result<&Arc<dyn DataSource>, ProviderError> {
        self.data_sources
            .get(name)
            .ok_or_else(|| ProviderError::UnknownDataSource(name.to_string()))
    }

    /// Read a data source by type name
    pub async fn read_data_source(
        &self,
        name: &str,
        config: &AttributeMap,
    ) -> Result<ReadResponse, ProviderError> {
        let data_source = self.data_source(name)?;

        match data_source.read(config).await {
            Ok(response) => {
                info!(
                    data_source = %name,
                    id = %response.id,
                    present = response.is_present(),
                    "Data source read"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(data_source = %name, error = %e, "Data source read failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironmq_core::port::queue_service::mocks::MockQueueService;
    use serde_json::json;

    #[test]
    fn test_registers_both_data_sources() {
        let provider = Provider::new(Arc::new(MockQueueService::new()));
        assert_eq!(
            provider.data_source_names(),
            vec!["ironio_pull_queue", "ironio_queues"]
        );
        assert_eq!(
            schemas().keys().copied().collect::<Vec<_>>(),
            provider.data_source_names()
        );
        for name in provider.data_source_names() {
            assert_eq!(provider.data_source(name).unwrap().schema(), schemas()[name]);
        }
    }

    #[tokio::test]
    async fn test_unknown_data_source() {
        let provider = Provider::new(Arc::new(MockQueueService::new()));
        let err = provider
            .read_data_source("ironio_push_queue", &AttributeMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::UnknownDataSource(ref n) if n == "ironio_push_queue"));
    }

    #[tokio::test]
    async fn test_reads_share_queue_service() {
        let mock = Arc::new(MockQueueService::with_queue_names(&["jobs", "mail"]));
        mock.add_queue("jobs", "pull", 2, 4);
        let provider = Provider::new(mock.clone());

        let queues = provider
            .read_data_source(
                "ironio_queues",
                json!({"project_id": "p"}).as_object().unwrap(),
            )
            .await
            .unwrap();
        let pull = provider
            .read_data_source(
                "ironio_pull_queue",
                json!({"project_id": "p", "name": "jobs"}).as_object().unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(queues.state["names"], json!(["jobs", "mail"]));
        assert_eq!(pull.id, "p/jobs");
        assert_eq!(mock.call_count(), 2);
    }
}
