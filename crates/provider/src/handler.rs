//! Data Source Handlers
//!
//! Translate attribute maps into use-case calls and the results back into
//! attribute maps.

use crate::error::ProviderError;
use crate::schema::{Attribute, AttributeType, DataSourceSchema};
use crate::types::{AttributeMap, ReadResponse};
use async_trait::async_trait;
use ironmq_core::application::{PullQueueInspector, QueueLister};
use ironmq_core::domain::{queue_id, DomainError};
use ironmq_core::error::AppError;
use ironmq_core::port::QueueService;
use serde_json::Value;
use std::sync::Arc;

pub const QUEUES_DATA_SOURCE: &str = "ironio_queues";
pub const PULL_QUEUE_DATA_SOURCE: &str = "ironio_pull_queue";

const FILTER_NAME_KEY: &str = "filter_name";
const NAMES_KEY: &str = "names";
const PROJECT_ID_KEY: &str = "project_id";
const NAME_KEY: &str = "name";
const MESSAGE_COUNT_KEY: &str = "message_count";
const MESSAGE_COUNT_TOTAL_KEY: &str = "message_count_total";

/// Read-only data source
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Type name, e.g. `ironio_queues`
    fn name(&self) -> &'static str;

    fn schema(&self) -> DataSourceSchema;

    /// Read the data source for the given config
    ///
    /// # Errors
    /// - ProviderError::InvalidConfig if the config does not match the schema
    /// - ProviderError::App for use-case and upstream failures
    async fn read(&self, config: &AttributeMap) -> Result<ReadResponse, ProviderError>;
}

/// String attribute of a resolved config
fn string_attr<'a>(resolved: &'a AttributeMap, key: &str) -> Result<&'a str, ProviderError> {
    resolved
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ProviderError::invalid(key, "attribute is required"))
}

/// Point caller input errors at the attribute they came from
fn attribute_error(err: AppError) -> ProviderError {
    match err {
        AppError::Domain(DomainError::InvalidFilter(_)) => {
            ProviderError::invalid(FILTER_NAME_KEY, err.to_string())
        }
        AppError::Domain(DomainError::ValidationError { ref field, .. }) => {
            ProviderError::invalid(field.as_str(), err.to_string())
        }
        other => other.into(),
    }
}

fn project_id_attribute() -> Attribute {
    Attribute::required(AttributeType::String)
        .force_new()
        .with_description("The project id")
}

/// Attributes of `ironio_queues`
pub fn queues_schema() -> DataSourceSchema {
    DataSourceSchema::new()
        .with_attribute(
            FILTER_NAME_KEY,
            Attribute::optional(AttributeType::String)
                .with_default("")
                .force_new()
                .with_description("The name filter"),
        )
        .with_attribute(
            NAMES_KEY,
            Attribute::computed(AttributeType::list_of(AttributeType::String)),
        )
        .with_attribute(PROJECT_ID_KEY, project_id_attribute())
}

/// Attributes of `ironio_pull_queue`
pub fn pull_queue_schema() -> DataSourceSchema {
    DataSourceSchema::new()
        .with_attribute(
            MESSAGE_COUNT_KEY,
            Attribute::computed(AttributeType::Int)
                .with_description("The number of messages currently in the queue"),
        )
        .with_attribute(
            MESSAGE_COUNT_TOTAL_KEY,
            Attribute::computed(AttributeType::Int)
                .with_description("The number of messages which have been processed by the queue"),
        )
        .with_attribute(
            NAME_KEY,
            Attribute::required(AttributeType::String)
                .force_new()
                .with_description("The name of the queue"),
        )
        .with_attribute(PROJECT_ID_KEY, project_id_attribute())
}

/// `ironio_queues`: queue names of a project
pub struct QueuesDataSource {
    lister: QueueLister,
}

impl QueuesDataSource {
    pub fn new(queue_service: Arc<dyn QueueService>) -> Self {
        Self {
            lister: QueueLister::new(queue_service),
        }
    }
}

#[async_trait]
impl DataSource for QueuesDataSource {
    fn name(&self) -> &'static str {
        QUEUES_DATA_SOURCE
    }

    fn schema(&self) -> DataSourceSchema {
        queues_schema()
    }

    async fn read(&self, config: &AttributeMap) -> Result<ReadResponse, ProviderError> {
        let mut state = self.schema().resolve(config)?;
        let project_id = string_attr(&state, PROJECT_ID_KEY)?;
        let filter_name = string_attr(&state, FILTER_NAME_KEY)?;

        let result = self
            .lister
            .list_filtered_queue_names(project_id, filter_name)
            .await
            .map_err(attribute_error)?;

        state.insert(
            NAMES_KEY.to_string(),
            Value::Array(result.names.into_iter().map(Value::String).collect()),
        );

        Ok(ReadResponse::found(result.id, state))
    }
}

/// `ironio_pull_queue`: message counters of one pull queue
pub struct PullQueueDataSource {
    inspector: PullQueueInspector,
}

impl PullQueueDataSource {
    pub fn new(queue_service: Arc<dyn QueueService>) -> Self {
        Self {
            inspector: PullQueueInspector::new(queue_service),
        }
    }
}

#[async_trait]
impl DataSource for PullQueueDataSource {
    fn name(&self) -> &'static str {
        PULL_QUEUE_DATA_SOURCE
    }

    fn schema(&self) -> DataSourceSchema {
        pull_queue_schema()
    }

    async fn read(&self, config: &AttributeMap) -> Result<ReadResponse, ProviderError> {
        let mut state = self.schema().resolve(config)?;
        let project_id = string_attr(&state, PROJECT_ID_KEY)?.to_string();
        let queue_name = string_attr(&state, NAME_KEY)?.to_string();

        let detail = self
            .inspector
            .get_pull_queue_detail(&project_id, &queue_name)
            .await
            .map_err(attribute_error)?;

        if !detail.exists {
            return Ok(ReadResponse::absent(state));
        }

        state.insert(MESSAGE_COUNT_KEY.to_string(), detail.message_count.into());
        state.insert(
            MESSAGE_COUNT_TOTAL_KEY.to_string(),
            detail.message_count_total.into(),
        );

        Ok(ReadResponse::found(queue_id(&project_id, &queue_name), state))
    }
}
