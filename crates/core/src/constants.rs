//! Constants used throughout the intake core crate.
//!
//! The option lists populate the form's select inputs. Submitted values are not checked
//! against them; any non-blank value is accepted.

/// Placeholder shown in the volume path input.
pub const VOLUME_PATH_PLACEHOLDER: &str = "main.document_intake.raw_files";

/// Expected shape of a volume path, quoted in error messages.
pub const VOLUME_PATH_FORMAT: &str = "catalog.schema.volume_name";

/// Default name of the suggested metadata table.
pub const DEFAULT_METADATA_TABLE: &str = "document_metadata";

/// Default name of the suggested content-extraction table.
pub const DEFAULT_CONTENT_TABLE: &str = "document_content";

/// Default upload size limit (100 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

pub const DOCUMENT_TYPES: &[&str] = &[
    "Report",
    "Policy",
    "Contract",
    "Presentation",
    "Research paper",
    "Meeting notes",
    "Specification",
    "Other",
];

pub const BUSINESS_AREAS: &[&str] = &[
    "Finance",
    "Human Resources",
    "Legal",
    "Marketing",
    "Operations",
    "Research & Development",
    "Sales",
    "Technology",
];

pub const GEOGRAPHIC_SCOPES: &[&str] = &[
    "Global",
    "North America",
    "Latin America",
    "Europe",
    "Middle East & Africa",
    "Asia Pacific",
    "Single country",
];

pub const DATA_SOURCES: &[&str] = &[
    "Internal",
    "Customer",
    "Partner",
    "Vendor",
    "Public",
    "Regulator",
];

pub const CONFIDENTIALITY_LEVELS: &[&str] = &["Public", "Internal", "Confidential", "Restricted"];

pub const CONTENT_CATEGORIES: &[&str] = &[
    "Financial data",
    "Personal data",
    "Strategy",
    "Technical",
    "Legal terms",
    "Market analysis",
    "Operational procedures",
];
