/*!
# Staged-Transfer Orchestration

The [`Transfer`] type sequences the three-step staged transfers between an
in-memory frame, the object store and the warehouse:

- **Frame to warehouse**: serialize, upload to the staging area, create or
  append to the target table via a rendered `copy` statement, then clean up
  the staged object
- **Warehouse to object store**: render and execute an `unload` statement;
  the output files are the artifact, not an intermediate
- **Frame to/from object store**: direct staging without a warehouse hop

Each transfer is a linear sequence of blocking round trips. There are no
retries and no cross-call coordination; a staged object is owned exclusively
by the call that created it. Statement execution failures propagate to the
caller, but cleanup of the staged object still runs first (best effort) so a
failed load never leaves orphaned staging files. A failed load does not roll
back a partially created table; table creation and population are not
transactional here.
*/

use log::{info, warn};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;

use crate::redstage::config::StagingConfig;
use crate::redstage::error::{TransferError, TransferResult};
use crate::redstage::frame::Frame;
use crate::redstage::gateway::{ObjectStoreClient, QueryOutput, WarehouseClient};
use crate::redstage::schema::{
    infer_column_definitions, infer_table_definition, validate_column_names, ColumnTypeHint,
    TableDefinition,
};
use crate::redstage::serialization::{csv_to_frame, frame_to_csv, CsvOptions};
use crate::redstage::sql::{
    mask_credentials, render_copy, render_create_table, render_drop_table, render_unload,
    LoadOptions, UnloadOptions,
};

/// Options for a frame-to-warehouse transfer.
///
/// A closed bag replacing open-ended keyword filtering: every knob is a named
/// field, and a name the orchestrator does not know cannot be passed at all.
#[derive(Debug, Clone, Default)]
pub struct TableToWarehouseOptions {
    /// Staging bucket; falls back to the configured default bucket
    pub bucket: Option<String>,
    /// Key prefix for the staged object, excluding the file name
    pub path: Option<String>,
    /// Staged file name; generated with a unique suffix when absent
    pub file_name: Option<String>,
    /// Append to the existing table instead of dropping and recreating it
    pub append: bool,
    /// Delete the staged object after the load (default true)
    pub cleanup: bool,
    /// Target table definition; inferred from the frame when absent
    pub table: Option<TableDefinition>,
    /// Restrict the load to the named columns
    pub column_list: Option<Vec<String>>,
    /// Dialect used to serialize the frame
    pub csv: CsvOptions,
    /// Bulk-load statement options
    pub load: LoadOptions,
}

impl TableToWarehouseOptions {
    pub fn new() -> Self {
        TableToWarehouseOptions {
            cleanup: true,
            ..Default::default()
        }
    }
}

/// Options for a warehouse-to-object-store transfer.
#[derive(Debug, Clone, Default)]
pub struct WarehouseToStoreOptions {
    /// Destination bucket; falls back to the configured default bucket
    pub bucket: Option<String>,
    /// Key path under the bucket
    pub path: Option<String>,
    /// File prefix under the path
    pub prefix: Option<String>,
    /// Bulk-unload statement options
    pub unload: UnloadOptions,
}

/// Orchestrator for staged transfers.
///
/// Holds the two collaborator gateways and the staging configuration. With
/// `dry_run` set, rendered statements are logged (credentials masked) but not
/// executed; staging I/O still happens so the full path stays observable.
pub struct Transfer {
    warehouse: Arc<dyn WarehouseClient>,
    store: Arc<dyn ObjectStoreClient>,
    staging: StagingConfig,
    dry_run: bool,
}

impl Transfer {
    pub fn new(
        warehouse: Arc<dyn WarehouseClient>,
        store: Arc<dyn ObjectStoreClient>,
        staging: StagingConfig,
    ) -> Self {
        Transfer {
            warehouse,
            store,
            staging,
            dry_run: false,
        }
    }

    /// Log statements instead of executing them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Execute a statement against the warehouse, logging it first with
    /// credentials masked.
    ///
    /// An operator interrupt is logged and returned as a normal, empty
    /// output; the gateway has already cancelled the remote statement.
    pub async fn run_statement(&self, statement: &str, fetch: bool) -> TransferResult<QueryOutput> {
        info!("{}", mask_credentials(statement));
        if self.dry_run {
            return Ok(QueryOutput::done());
        }
        let output = self
            .warehouse
            .execute(statement, fetch)
            .await
            .map_err(|e| {
                TransferError::execution(e.to_string(), Some(mask_credentials(statement)))
            })?;
        if output.interrupted {
            warn!("User canceled query.");
        }
        Ok(output)
    }

    /// Create a table from a declarative definition, dropping any existing
    /// table first when `drop_first` is set.
    ///
    /// The drop and the create are separate statements, not a transaction.
    pub async fn create_table(&self, table_name: &str, def: &TableDefinition) -> TransferResult<()> {
        if def.drop_first {
            self.run_statement(&render_drop_table(table_name), false)
                .await?;
        }
        self.run_statement(&render_create_table(table_name, def), false)
            .await?;
        Ok(())
    }

    /// Load an already-staged object into a warehouse table.
    ///
    /// When not appending, a table definition is required: the target table
    /// is dropped and recreated before the load.
    pub async fn stage_to_warehouse(
        &self,
        bucket: &str,
        key: &str,
        table_name: &str,
        table: Option<&TableDefinition>,
        append: bool,
        column_list: Option<&[String]>,
        load: &LoadOptions,
    ) -> TransferResult<()> {
        if !append {
            let def = table.ok_or_else(|| {
                TransferError::configuration(
                    "table definition cannot be None if append is false",
                )
            })?;
            let mut def = def.clone();
            def.drop_first = true;
            self.create_table(table_name, &def).await?;
        }
        let load = self.with_default_region_load(load);
        let statement = render_copy(
            table_name,
            column_list,
            bucket,
            key,
            &load,
            &self.staging.credentials,
        )?;
        self.run_statement(&statement, false).await?;
        Ok(())
    }

    /// Move a frame into a warehouse table through the staging area.
    ///
    /// Validates before any I/O (bucket resolution, schema inference,
    /// reserved-word gate), then stages, loads and cleans up. Cleanup runs
    /// even when the load fails, so the staging area never accumulates
    /// orphans; a partially created table is left as-is for inspection.
    pub async fn table_to_warehouse(
        &self,
        frame: &Frame,
        table_name: &str,
        options: &TableToWarehouseOptions,
    ) -> TransferResult<()> {
        let bucket = self.resolve_bucket(options.bucket.as_deref())?;

        let mut table = options
            .table
            .clone()
            .unwrap_or_else(|| infer_table_definition(&frame.type_hints()));
        if options.csv.index {
            if let Some(index) = frame.index() {
                let label = options.csv.resolve_index_label(Some(index));
                let mut columns =
                    infer_column_definitions(&[ColumnTypeHint::new(label, index.dtype.tag())]);
                columns.append(&mut table.columns);
                table.columns = columns;
            }
        }
        validate_column_names(&table.column_names())?;

        let file_name = options
            .file_name
            .clone()
            .unwrap_or_else(generate_staged_name);
        let key = match &options.path {
            Some(path) => format!("{}/{}", path.trim_end_matches('/'), file_name),
            None => file_name,
        };

        self.table_to_store(frame, &bucket, &key, &options.csv)
            .await?;

        let result = self
            .stage_to_warehouse(
                &bucket,
                &key,
                table_name,
                Some(&table),
                options.append,
                options.column_list.as_deref(),
                &options.load,
            )
            .await;

        if options.cleanup {
            if let Err(cleanup_err) = self.delete_staged(&bucket, &key).await {
                warn!(
                    "Failed to clean up staged object {}/{}: {}",
                    bucket, key, cleanup_err
                );
            }
        }
        result
    }

    /// Run a query and unload its result to object storage.
    ///
    /// Pre-existing keys under the destination prefix are a warning, not an
    /// error: the unload proceeds, but its output may mix with older files.
    pub async fn warehouse_to_store(
        &self,
        query: &str,
        options: &WarehouseToStoreOptions,
    ) -> TransferResult<()> {
        let bucket = self.resolve_bucket(options.bucket.as_deref())?;

        let destination = join_destination(options.path.as_deref(), options.prefix.as_deref());
        let existing = self
            .store
            .list(&bucket, &destination)
            .await
            .map_err(|e| TransferError::storage(&bucket, None, e.to_string()))?;
        if !existing.is_empty() {
            warn!(
                "These keys already exist under '{}'. May cause data consistency issues: {:?}",
                destination, existing
            );
        }

        let uri = if destination.is_empty() {
            format!("s3://{}", bucket)
        } else {
            format!("s3://{}/{}", bucket, destination)
        };
        let unload = self.with_default_region_unload(&options.unload);
        let statement = render_unload(query, &uri, &unload, &self.staging.credentials)?;
        self.run_statement(&statement, false).await?;
        Ok(())
    }

    /// Materialize a query result as a frame.
    pub async fn warehouse_to_table(&self, query: &str) -> TransferResult<Frame> {
        let output = self.run_statement(query, true).await?;
        Frame::from_query(
            output.columns.unwrap_or_default(),
            output.rows.unwrap_or_default(),
        )
    }

    /// Serialize a frame and upload it to object storage.
    pub async fn table_to_store(
        &self,
        frame: &Frame,
        bucket: &str,
        key: &str,
        csv: &CsvOptions,
    ) -> TransferResult<()> {
        match self.store.bucket_exists(bucket).await {
            Ok(false) => warn!("{} does not exist or you do not have access to it.", bucket),
            Ok(true) => {}
            Err(e) => warn!("Could not check bucket {}: {}", bucket, e),
        }
        match self.store.key_exists(bucket, key).await {
            Ok(true) => warn!(
                "{} exists in {}. May cause data consistency issues.",
                key, bucket
            ),
            Ok(false) => {}
            Err(e) => warn!("Could not check key {}/{}: {}", bucket, key, e),
        }
        let bytes = frame_to_csv(frame, csv)?;
        self.store
            .put(bucket, key, bytes)
            .await
            .map_err(|e| TransferError::storage(bucket, Some(key.to_string()), e.to_string()))
    }

    /// Download an object and decode it into a frame.
    pub async fn store_to_table(
        &self,
        bucket: &str,
        key: &str,
        csv: &CsvOptions,
    ) -> TransferResult<Frame> {
        let bytes = self
            .store
            .get(bucket, key)
            .await
            .map_err(|e| TransferError::storage(bucket, Some(key.to_string()), e.to_string()))?;
        csv_to_frame(&bytes, csv)
    }

    /// Delete a staged object, silently succeeding when it is already gone.
    pub async fn delete_staged(&self, bucket: &str, key: &str) -> TransferResult<()> {
        let exists = self
            .store
            .key_exists(bucket, key)
            .await
            .map_err(|e| TransferError::storage(bucket, Some(key.to_string()), e.to_string()))?;
        if !exists {
            info!("{}: {} does not exist.", bucket, key);
            return Ok(());
        }
        self.store
            .delete(bucket, key)
            .await
            .map_err(|e| TransferError::storage(bucket, Some(key.to_string()), e.to_string()))
    }

    fn resolve_bucket(&self, explicit: Option<&str>) -> TransferResult<String> {
        explicit
            .map(|b| b.to_string())
            .or_else(|| self.staging.default_bucket.clone())
            .ok_or_else(|| {
                TransferError::configuration(
                    "no bucket given and no default staging bucket configured",
                )
            })
    }

    fn with_default_region_load(&self, load: &LoadOptions) -> LoadOptions {
        let mut load = load.clone();
        if load.region.is_none() {
            load.region = self.staging.region.clone();
        }
        load
    }

    fn with_default_region_unload(&self, unload: &UnloadOptions) -> UnloadOptions {
        let mut unload = unload.clone();
        if unload.region.is_none() {
            unload.region = self.staging.region.clone();
        }
        unload
    }
}

/// Generate a unique staged file name: timestamp plus random suffix, so
/// concurrent transfers into the same prefix cannot collide.
fn generate_staged_name() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!(
        "redstage-{}-{}",
        chrono::Utc::now().timestamp(),
        suffix.to_lowercase()
    )
}

/// Compose the destination key of an unload from its path and prefix parts,
/// keeping exactly one separator between them.
fn join_destination(path: Option<&str>, prefix: Option<&str>) -> String {
    let mut destination = String::new();
    if let Some(path) = path {
        destination.push_str(path.trim_matches('/'));
    }
    if let Some(prefix) = prefix {
        if !destination.is_empty() && !destination.ends_with('/') {
            destination.push('/');
        }
        destination.push_str(prefix.trim_start_matches('/'));
    }
    destination
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_destination_handles_separators() {
        assert_eq!(join_destination(None, None), "");
        assert_eq!(join_destination(Some("exports"), None), "exports");
        assert_eq!(join_destination(None, Some("part-")), "part-");
        assert_eq!(
            join_destination(Some("exports/"), Some("part-")),
            "exports/part-"
        );
        assert_eq!(
            join_destination(Some("exports"), Some("/part-")),
            "exports/part-"
        );
    }

    #[test]
    fn test_generated_staged_names_are_unique() {
        let a = generate_staged_name();
        let b = generate_staged_name();
        assert!(a.starts_with("redstage-"));
        assert_ne!(a, b);
    }
}
