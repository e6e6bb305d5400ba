//! # redstage
//!
//! A staged-transfer library for moving tabular data between a columnar
//! warehouse, an object store and in-memory tables, built around explicit
//! statement synthesis rather than an ORM layer.
//!
//! ## Features
//!
//! - **Statement Synthesis**: `copy`, `unload`, `create table` and
//!   `drop table` rendering from typed option bags, with credential masking
//!   for logs
//! - **Schema Inference**: warehouse column types derived from native dtype
//!   tags, gated by a reserved-word check
//! - **Staged Transfers**: frame-to-warehouse loads through an object-store
//!   staging area, with guaranteed best-effort cleanup of staged files
//! - **Pluggable Gateways**: warehouse and object-store access behind async
//!   traits, so drivers and SDKs stay at the edge
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redstage::{
//!     AwsCredentials, Column, Frame, ObjectStoreClient, StagingConfig,
//!     TableToWarehouseOptions, Transfer, WarehouseClient,
//! };
//! use std::sync::Arc;
//!
//! async fn load(
//!     warehouse: Arc<dyn WarehouseClient>,
//!     store: Arc<dyn ObjectStoreClient>,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let staging = StagingConfig {
//!         default_bucket: Some("staging-bucket".to_string()),
//!         credentials: AwsCredentials {
//!             access_key_id: Some("AKIA...".to_string()),
//!             secret_access_key: Some("...".to_string()),
//!             session_token: None,
//!         },
//!         region: None,
//!     };
//!     let transfer = Transfer::new(warehouse, store, staging);
//!
//!     let frame = Frame::new(vec![
//!         Column::from_i64("id", vec![1, 2, 3]),
//!         Column::from_strings("name", vec!["a", "b", "c"]),
//!     ])?;
//!     transfer
//!         .table_to_warehouse(&frame, "public.events", &TableToWarehouseOptions::new())
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod redstage;

pub use redstage::{
    csv_to_frame, frame_to_csv, infer_column_definitions, infer_table_definition,
    mask_credentials, render_copy, render_create_table, render_drop_table, render_unload,
    validate_column_names, AwsCredentials, Column, ColumnDefinition, ColumnTypeHint, CsvOptions,
    DType, DefaultValue, DistStyle, FieldValue, Frame, GatewayError, LoadOptions,
    ObjectStoreClient, QueryOutput, SortStyle, StagingConfig, TableDefinition,
    TableToWarehouseOptions, Transfer, TransferError, TransferResult, UnloadFormat, UnloadOptions,
    WarehouseClient, WarehouseConfig, WarehouseToStoreOptions,
};
