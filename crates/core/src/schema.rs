//! Suggested downstream tables, rendered as SQL for the user to run themselves.
//!
//! Nothing here is executed. The metadata table is keyed by `document_id`; the content
//! table is for a separate ingestion job that later reads raw files from the volume.

use crate::config::CoreConfig;
use crate::metadata::MetadataRecord;
use crate::volume_path::VolumePath;
use chrono::SecondsFormat;
use intake_types::NonEmptyText;

/// SQL text describing where an upload's metadata is expected to end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlSuggestion {
    pub create_metadata_table: String,
    pub create_content_table: String,
    pub insert_record: String,
}

impl SqlSuggestion {
    /// Builds the suggestion for `record`, with tables placed in the volume's schema.
    pub fn for_record(record: &MetadataRecord, volume: &VolumePath, config: &CoreConfig) -> Self {
        let metadata_table = qualified_table(volume, config.metadata_table());
        let content_table = qualified_table(volume, config.content_table());

        Self {
            create_metadata_table: metadata_table_ddl(&metadata_table),
            create_content_table: content_table_ddl(&content_table),
            insert_record: insert_statement(&metadata_table, record),
        }
    }

    /// All three statements as one script.
    pub fn to_script(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}\n",
            self.create_metadata_table, self.create_content_table, self.insert_record
        )
    }
}

/// The two `CREATE TABLE` statements for tables placed in `volume`'s schema.
pub fn create_tables_script(volume: &VolumePath, config: &CoreConfig) -> String {
    format!(
        "{}\n\n{}\n",
        metadata_table_ddl(&qualified_table(volume, config.metadata_table())),
        content_table_ddl(&qualified_table(volume, config.content_table()))
    )
}

/// `` `catalog`.`schema`.`table` ``
pub fn qualified_table(volume: &VolumePath, table: &str) -> String {
    format!(
        "{}.{}.{}",
        quote_ident(volume.catalog()),
        quote_ident(volume.schema()),
        quote_ident(table)
    )
}

fn quote_ident(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

fn quote_str(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn quote_opt(value: Option<&str>) -> String {
    value.map(quote_str).unwrap_or_else(|| "NULL".to_owned())
}

fn quote_array(values: &[String]) -> String {
    if values.is_empty() {
        return "ARRAY()".to_owned();
    }
    let items: Vec<String> = values.iter().map(|v| quote_str(v)).collect();
    format!("ARRAY({})", items.join(", "))
}

fn metadata_table_ddl(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
  document_id STRING NOT NULL,
  original_filename STRING NOT NULL,
  stored_filename STRING NOT NULL,
  volume_path STRING NOT NULL,
  file_size_bytes BIGINT,
  content_hash STRING,
  media_type STRING,
  document_type STRING NOT NULL,
  business_area STRING NOT NULL,
  geographic_scope STRING NOT NULL,
  data_source STRING NOT NULL,
  confidentiality_level STRING NOT NULL,
  description STRING NOT NULL,
  time_period STRING,
  tags ARRAY<STRING>,
  content_categories ARRAY<STRING>,
  uploaded_by STRING,
  upload_timestamp TIMESTAMP NOT NULL,
  processing_status STRING NOT NULL,
  CONSTRAINT document_metadata_pk PRIMARY KEY (document_id)
)
COMMENT 'Descriptive metadata for documents uploaded to Unity Catalog volumes';"
    )
}

fn content_table_ddl(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
  document_id STRING NOT NULL,
  volume_path STRING NOT NULL,
  extracted_text STRING,
  page_count INT,
  extraction_status STRING,
  extracted_at TIMESTAMP
)
COMMENT 'Text extracted from uploaded documents by a separate ingestion job';"
    )
}

fn insert_statement(table: &str, record: &MetadataRecord) -> String {
    let opt_text = |v: &Option<NonEmptyText>| quote_opt(v.as_ref().map(NonEmptyText::as_str));

    let values = [
        quote_str(&record.document_id.to_string()),
        quote_str(&record.original_filename),
        quote_str(&record.stored_filename),
        quote_str(&record.volume_path),
        record.file_size_bytes.to_string(),
        quote_str(record.content_hash.as_str()),
        quote_opt(record.media_type.as_deref()),
        quote_str(record.document_type.as_str()),
        quote_str(record.business_area.as_str()),
        quote_str(record.geographic_scope.as_str()),
        quote_str(record.data_source.as_str()),
        quote_str(record.confidentiality_level.as_str()),
        quote_str(record.description.as_str()),
        opt_text(&record.time_period),
        quote_array(&record.tags),
        quote_array(&record.content_categories),
        opt_text(&record.uploaded_by),
        format!(
            "TIMESTAMP {}",
            quote_str(
                &record
                    .upload_timestamp
                    .to_rfc3339_opts(SecondsFormat::Secs, true)
            )
        ),
        quote_str(&record.processing_status.to_string()),
    ];

    let columns: Vec<&str> = record.fields().into_iter().map(|(name, _)| name).collect();

    format!(
        "INSERT INTO {table} ({})\nVALUES ({});",
        columns.join(", "),
        values.join(", ")
    )
}
