//! Staged-transfer core: frames, statement synthesis, gateways and the
//! orchestrator that ties them together.

pub mod config;
pub mod error;
pub mod frame;
pub mod gateway;
pub mod schema;
pub mod serialization;
pub mod sql;
pub mod transfer;

pub use config::{AwsCredentials, StagingConfig, WarehouseConfig};
pub use error::{TransferError, TransferResult};
pub use frame::{Column, DType, FieldValue, Frame};
pub use gateway::{GatewayError, ObjectStoreClient, QueryOutput, WarehouseClient};
pub use schema::{
    infer_column_definitions, infer_table_definition, validate_column_names, ColumnDefinition,
    ColumnTypeHint, DefaultValue, DistStyle, SortStyle, TableDefinition,
};
pub use serialization::{csv_to_frame, frame_to_csv, CsvOptions};
pub use sql::{
    mask_credentials, render_copy, render_create_table, render_drop_table, render_unload,
    LoadOptions, UnloadFormat, UnloadOptions,
};
pub use transfer::{TableToWarehouseOptions, Transfer, WarehouseToStoreOptions};
