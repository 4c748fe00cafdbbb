//! IronMQ Data Source Provider
//!
//! Read-only data sources over the queue service port:
//! - `ironio_queues`: queue names of a project, filtered by a wildcard pattern
//! - `ironio_pull_queue`: message counters of one pull queue
//!
//! Reads take a flat attribute map and return the populated attributes plus
//! an id. An empty id means the object is not present.

pub mod error;
pub mod handler;
pub mod provider;
pub mod schema;
pub mod types;

pub use error::{Diagnostic, ProviderError, Severity};
pub use handler::{DataSource, PullQueueDataSource, QueuesDataSource};
pub use provider::{schemas, Provider};
pub use schema::{Attribute, AttributeType, DataSourceSchema, Presence};
pub use types::{AttributeMap, ReadResponse};
