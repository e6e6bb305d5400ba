//! Collaborator interfaces consumed by the orchestrator.
//!
//! The core never talks to a warehouse driver or an object store SDK
//! directly; it holds two independent capability traits and sequences calls
//! across them. Implementations wrap whatever driver or SDK the deployment
//! uses; the test suite ships in-memory fakes.
//!
//! ## Contracts
//!
//! - [`WarehouseClient::execute`] must commit on success when not fetching,
//!   must distinguish "no rows returned" (`rows: None`) from a failed query
//!   (an `Err`), and must cancel the remote statement cleanly on an operator
//!   interrupt, reporting it through [`QueryOutput::interrupted`] rather than
//!   an error.
//! - [`ObjectStoreClient`] operations are single blocking round trips; the
//!   orchestrator performs no retries on top of them.

use async_trait::async_trait;
use std::error::Error;

use crate::redstage::frame::FieldValue;

/// Boxed error type surfaced by gateway implementations.
pub type GatewayError = Box<dyn Error + Send + Sync>;

/// Result of executing a statement against the warehouse.
#[derive(Debug, Clone, Default)]
pub struct QueryOutput {
    /// Fetched rows; `None` when nothing was fetched or returned
    pub rows: Option<Vec<Vec<FieldValue>>>,
    /// Column names of the fetched rows
    pub columns: Option<Vec<String>>,
    /// Set when the operator interrupted the statement; the remote query was
    /// cancelled and the connection closed cleanly
    pub interrupted: bool,
}

impl QueryOutput {
    /// A completed statement that returned no data.
    pub fn done() -> Self {
        QueryOutput::default()
    }

    /// A fetched result set.
    pub fn fetched(columns: Vec<String>, rows: Vec<Vec<FieldValue>>) -> Self {
        QueryOutput {
            rows: Some(rows),
            columns: Some(columns),
            interrupted: false,
        }
    }

    /// An operator-cancelled statement.
    pub fn cancelled() -> Self {
        QueryOutput {
            rows: None,
            columns: None,
            interrupted: true,
        }
    }
}

/// Statement execution against the warehouse.
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    /// Execute a rendered statement, optionally fetching its result rows.
    async fn execute(&self, statement: &str, fetch: bool) -> Result<QueryOutput, GatewayError>;
}

/// Object storage operations on the staging area.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// Upload an object.
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), GatewayError>;

    /// Download an object.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, GatewayError>;

    /// List keys under a prefix.
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, GatewayError>;

    /// Delete an object.
    async fn delete(&self, bucket: &str, key: &str) -> Result<(), GatewayError>;

    /// Whether the bucket exists and is accessible.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, GatewayError>;

    /// Whether the key exists in the bucket.
    async fn key_exists(&self, bucket: &str, key: &str) -> Result<bool, GatewayError>;
}
