//! Configuration types for staged transfers
//!
//! Connection details for the warehouse and credentials/defaults for the
//! object store staging area. Gateway implementations consume
//! [`WarehouseConfig`]; the orchestrator and the statement renderers consume
//! [`StagingConfig`] and [`AwsCredentials`].

use serde::{Deserialize, Serialize};

/// Warehouse connection configuration.
///
/// Carried for gateway implementations; the statement renderers never read it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WarehouseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub dbname: String,
}

/// Static credentials granting the warehouse access to object storage.
///
/// All fields are optional. A key pair is only usable when both the access key
/// id and the secret are present; the session token is an add-on to the key
/// pair, never a credential on its own.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AwsCredentials {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

impl AwsCredentials {
    /// Whether a complete access-key/secret pair is available.
    pub fn has_key_pair(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }
}

/// Staging-area configuration for the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StagingConfig {
    /// Bucket used when a transfer call does not name one explicitly
    pub default_bucket: Option<String>,
    /// Credentials rendered into load/unload authorization clauses
    pub credentials: AwsCredentials,
    /// Object store region, rendered when the staging bucket lives outside
    /// the warehouse region
    pub region: Option<String>,
}
