//! Three-part volume addressing.

use crate::error::MalformedPathError;
use intake_files::{StoredFilename, VOLUMES_ROOT};
use std::fmt;
use std::str::FromStr;

/// A Unity Catalog volume addressed as `catalog.schema.volume`.
///
/// All three components are non-empty and free of `/`. Their character sets are
/// otherwise left for the storage backend to judge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct VolumePath {
    catalog: String,
    schema: String,
    volume: String,
}

impl VolumePath {
    /// Parses a dotted three-part path.
    ///
    /// Leading and trailing whitespace is removed before splitting on `.`; the parts
    /// themselves are taken as-is.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPathError`] unless the input splits into exactly three
    /// non-empty parts, none of which contains the `/` path separator.
    pub fn parse(input: &str) -> Result<Self, MalformedPathError> {
        let parts: Vec<&str> = input.trim().split('.').collect();

        match parts.as_slice() {
            [catalog, schema, volume] if parts.iter().all(|part| is_valid_part(part)) => {
                Ok(Self {
                    catalog: (*catalog).to_owned(),
                    schema: (*schema).to_owned(),
                    volume: (*volume).to_owned(),
                })
            }
            _ => Err(MalformedPathError::new(input)),
        }
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn volume(&self) -> &str {
        &self.volume
    }

    /// `/Volumes/{catalog}/{schema}/{volume}`
    pub fn directory(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            VOLUMES_ROOT, self.catalog, self.schema, self.volume
        )
    }

    /// `/Volumes/{catalog}/{schema}/{volume}/{stored}`
    pub fn file_path(&self, stored: &StoredFilename) -> String {
        format!("{}/{}", self.directory(), stored)
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty() && !part.contains('/')
}

impl fmt::Display for VolumePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.catalog, self.schema, self.volume)
    }
}

impl FromStr for VolumePath {
    type Err = MalformedPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use intake_uuid::ShortId;

    #[test]
    fn test_parse_three_parts() {
        let path = VolumePath::parse("lib.intake.docs").unwrap();

        assert_eq!(path.catalog(), "lib");
        assert_eq!(path.schema(), "intake");
        assert_eq!(path.volume(), "docs");
        assert_eq!(path.to_string(), "lib.intake.docs");
    }

    #[test]
    fn test_parse_trims_outer_whitespace_only() {
        let path = VolumePath::parse("  users.ana.research_files \n").unwrap();
        assert_eq!(path.catalog(), "users");
        assert_eq!(path.volume(), "research_files");

        let inner = VolumePath::parse("a .b. c").unwrap();
        assert_eq!(inner.catalog(), "a ");
        assert_eq!(inner.volume(), " c");
    }

    #[test]
    fn test_parse_rejects_wrong_part_counts() {
        for input in ["", "   ", "lib", "lib.intake", "lib.intake.docs.extra", "a.b.c.d.e"] {
            let err = VolumePath::parse(input).unwrap_err();
            assert_eq!(err.input(), input);
        }
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        for input in ["..", "lib..docs", ".intake.docs", "lib.intake."] {
            assert!(VolumePath::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_parse_rejects_separator_in_part() {
        for input in ["a/b.c.d", "lib.int/ake.docs", "lib.intake.docs/", "/lib.intake.docs"] {
            let err = VolumePath::parse(input).unwrap_err();
            assert_eq!(err.input(), input);
        }
    }

    #[test]
    fn test_error_names_expected_format() {
        let err = VolumePath::parse("lib.intake").unwrap_err();
        assert!(err.to_string().contains("catalog.schema.volume_name"));
    }

    #[test]
    fn test_file_path() {
        let path: VolumePath = "lib.intake.docs".parse().unwrap();
        let now = chrono::Utc.with_ymd_and_hms(2026, 1, 18, 14, 35, 22).unwrap();
        let stored =
            StoredFilename::compose(now, ShortId::parse("0a1b2c3d").unwrap(), "notes.txt").unwrap();

        assert_eq!(path.directory(), "/Volumes/lib/intake/docs");
        assert_eq!(
            path.file_path(&stored),
            "/Volumes/lib/intake/docs/20260118_143522_0a1b2c3d_notes.txt"
        );
    }
}
