//! Version marker: `R/.version` holds the version of bettersave that last wrote the
//! save tree. Recovery uses it to decide whether the tree predates list categorization.

use crate::error::{Result, SaveError};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaveVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// First version that stored lists in the category system.
pub const LISTS_CATEGORIZED_SINCE: SaveVersion = SaveVersion::new(1, 1, 0);

impl SaveVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The version of this build.
    pub fn current() -> Self {
        env!("CARGO_PKG_VERSION")
            .parse()
            .unwrap_or(LISTS_CATEGORIZED_SINCE)
    }
}

impl FromStr for SaveVersion {
    type Err = SaveError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s.strip_prefix('v').unwrap_or(s);
        // Pre-release and build suffixes don't take part in the comparison
        let core = s.split(['-', '+']).next().unwrap_or_default();
        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(SaveError::Api(format!("Invalid version '{}'", s)));
        }
        let parse = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| SaveError::Api(format!("Invalid version '{}'", s)))
        };
        Ok(Self::new(parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
    }
}

impl fmt::Display for SaveVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Version recorded in the marker file. Missing or unreadable markers count as absent.
pub fn read_existing(path: &Path) -> Option<SaveVersion> {
    let content = fs::read_to_string(path).ok()?;
    match content.parse() {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::warn!(path = %path.display(), "Ignoring version marker: {}", e);
            None
        }
    }
}

pub fn write_current(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SaveError::fs("create save root", parent, e))?;
    }
    fs::write(path, SaveVersion::current().to_string())
        .map_err(|e| SaveError::fs("write version marker", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_and_orders() {
        let old: SaveVersion = "1.0.3".parse().unwrap();
        let new: SaveVersion = "v1.1.0-beta.2".parse().unwrap();
        assert!(old < LISTS_CATEGORIZED_SINCE);
        assert_eq!(new, LISTS_CATEGORIZED_SINCE);
        assert!(SaveVersion::new(2, 0, 0) > SaveVersion::new(1, 9, 9));
    }

    #[test]
    fn rejects_garbage() {
        assert!("1.2".parse::<SaveVersion>().is_err());
        assert!("one.two.three".parse::<SaveVersion>().is_err());
    }

    #[test]
    fn marker_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("root").join(".version");
        assert_eq!(read_existing(&path), None);

        write_current(&path).unwrap();
        assert_eq!(read_existing(&path), Some(SaveVersion::current()));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn unparsable_marker_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".version");
        fs::write(&path, "garbage").unwrap();
        assert_eq!(read_existing(&path), None);
    }
}
