//! Build list parsing.
//!
//! Both the build manifest (ordered top-level documents) and the asset
//! copy list share one format: one entry per line, `#` comments and blank
//! lines ignored, surrounding whitespace trimmed.

use std::path::Path;

use crate::storage::{DocStorage, StorageError};

/// Parse list-file content into ordered entries.
#[must_use]
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Load and parse a list file from storage.
///
/// # Errors
///
/// Returns [`StorageError::NotFound`] if the list file is absent, or
/// another variant if it can't be read.
pub fn load_list(storage: &dyn DocStorage, path: &Path) -> Result<Vec<String>, StorageError> {
    let content = storage.read(path)?;
    Ok(parse_list(&content))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_list_basic() {
        let entries = parse_list("intro.rst\nstorage.rst\n");
        assert_eq!(entries, vec!["intro.rst", "storage.rst"]);
    }

    #[test]
    fn test_parse_list_skips_comments_and_blanks() {
        let content = "# chapters for this build\n\nintro.rst\n  \n# more\nstorage.rst\n";
        let entries = parse_list(content);
        assert_eq!(entries, vec!["intro.rst", "storage.rst"]);
    }

    #[test]
    fn test_parse_list_trims_whitespace() {
        let entries = parse_list("  intro.rst  \n\tstorage.rst\n");
        assert_eq!(entries, vec!["intro.rst", "storage.rst"]);
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(parse_list("").is_empty());
        assert!(parse_list("# only comments\n").is_empty());
    }

    #[test]
    fn test_parse_list_preserves_order() {
        let entries = parse_list("zfs.rst\nintro.rst\naccounts.rst\n");
        assert_eq!(entries, vec!["zfs.rst", "intro.rst", "accounts.rst"]);
    }
}
