//! Path and naming constants for stored files.

/// Absolute prefix under which every Unity Catalog volume is addressed.
pub const VOLUMES_ROOT: &str = "/Volumes";

/// `chrono` format for the timestamp prefix of a stored filename.
///
/// Fixed width (15 characters), UTC, sorts lexically in upload order.
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
