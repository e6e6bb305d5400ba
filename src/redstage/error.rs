/*!
# Transfer Error Handling

This module provides error handling for staged-transfer operations. All
statement rendering and orchestration APIs return well-structured errors with
enough context to tell a caller mistake from a warehouse-side failure.

## Error Categories

- **Configuration Errors**: Missing buckets, missing credentials, or
  conflicting statement options, raised before any I/O happens
- **Reserved Word Errors**: Column names that collide with warehouse keywords,
  raised before any DDL is rendered
- **Schema Errors**: Inconsistent in-memory table construction
- **Serialization Errors**: Failures in the delimited-text codec
- **Execution Errors**: Failures surfaced by the warehouse gateway
- **Storage Errors**: Failures surfaced by the object store gateway

## Examples

```rust
use redstage::redstage::error::TransferError;

let error = TransferError::configuration("bucket cannot be None");
println!("{}", error); // "Configuration error: bucket cannot be None"

let error = TransferError::reserved_word(vec!["select".to_string()]);
println!("{}", error); // "Reserved word error: invalid column names [select]"
```

Validation errors are always raised before side effects occur. Mid-transfer
failures are reported as execution or storage errors after best-effort cleanup
of staged artifacts has run.
*/

use std::fmt;

/// Error types for statement rendering and staged-transfer orchestration.
///
/// Each variant includes the context relevant to its failure mode. Variants
/// split along the lines a caller cares about: whether the call itself was
/// malformed (configuration, reserved words, schema) or whether a collaborator
/// failed mid-flight (execution, storage).
#[derive(Debug, Clone)]
pub enum TransferError {
    /// Invalid or incomplete configuration detected before any I/O.
    ///
    /// Covers missing staging buckets, missing credentials, and mutually
    /// exclusive statement options that were both requested.
    Configuration {
        /// Human-readable description of the invalid configuration
        message: String,
    },

    /// Column names that collide with warehouse reserved keywords.
    ///
    /// Raised before DDL rendering; a reserved word inside a `create table`
    /// column list fails at the warehouse with a much less helpful message.
    ReservedWord {
        /// The offending column names
        columns: Vec<String>,
    },

    /// Inconsistent in-memory table construction.
    ///
    /// Occurs when frame columns have mismatched lengths or a query result
    /// cannot be shaped into a frame.
    Schema {
        /// Description of the schema inconsistency
        message: String,
    },

    /// Delimited-text encoding or decoding failure.
    Serialization {
        /// Description of the codec failure
        message: String,
    },

    /// Failure surfaced by the warehouse gateway while executing a statement.
    Execution {
        /// Description of the execution failure
        message: String,
        /// The rendered statement, credentials masked, if available
        statement: Option<String>,
    },

    /// Failure surfaced by the object store gateway.
    Storage {
        /// Bucket involved in the failed operation
        bucket: String,
        /// Key involved in the failed operation, if any
        key: Option<String>,
        /// Description of the storage failure
        message: String,
    },
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Configuration { message } => {
                write!(f, "Configuration error: {}", message)
            }
            TransferError::ReservedWord { columns } => {
                write!(
                    f,
                    "Reserved word error: invalid column names [{}]",
                    columns.join(", ")
                )
            }
            TransferError::Schema { message } => write!(f, "Schema error: {}", message),
            TransferError::Serialization { message } => {
                write!(f, "Serialization error: {}", message)
            }
            TransferError::Execution { message, statement } => {
                if let Some(stmt) = statement {
                    write!(f, "Execution error in '{}': {}", stmt, message)
                } else {
                    write!(f, "Execution error: {}", message)
                }
            }
            TransferError::Storage {
                bucket,
                key,
                message,
            } => {
                if let Some(k) = key {
                    write!(f, "Storage error for '{}/{}': {}", bucket, k, message)
                } else {
                    write!(f, "Storage error for '{}': {}", bucket, message)
                }
            }
        }
    }
}

impl std::error::Error for TransferError {}

impl TransferError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        TransferError::Configuration {
            message: message.into(),
        }
    }

    /// Create a reserved word error
    pub fn reserved_word(columns: Vec<String>) -> Self {
        TransferError::ReservedWord { columns }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        TransferError::Schema {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        TransferError::Serialization {
            message: message.into(),
        }
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>, statement: Option<String>) -> Self {
        TransferError::Execution {
            message: message.into(),
            statement,
        }
    }

    /// Create a storage error
    pub fn storage(
        bucket: impl Into<String>,
        key: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        TransferError::Storage {
            bucket: bucket.into(),
            key,
            message: message.into(),
        }
    }
}

/// Result type for transfer operations
pub type TransferResult<T> = Result<T, TransferError>;
