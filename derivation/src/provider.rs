//! Address providers: the seam between fan-out planning and key material.
//!
//! Cryptographic derivation stays outside this toolkit. A provider only
//! answers "which address sits at index i" for the key source it wraps.

use std::fs;
use std::path::Path;

use crate::error::DerivationError;

/// Serves destination addresses by derivation index.
pub trait AddressProvider: Send + Sync {
    /// The address at a non-hardened derivation index.
    fn address_at(&self, index: u32) -> Result<String, DerivationError>;

    /// Human-readable name of this provider.
    fn name(&self) -> &str;
}

/// Address book backed by a plain text file, one address per line.
///
/// The lines are pre-derived by an external wallet tool in index order,
/// so index `i` maps to the i-th non-blank, non-comment line.
#[derive(Debug)]
pub struct FileAddressBook {
    addresses: Vec<String>,
    name: String,
}

impl FileAddressBook {
    /// Loads a book from `path`. Blank lines and `#` comments are skipped,
    /// surrounding whitespace is trimmed.
    pub fn load(path: &Path) -> Result<Self, DerivationError> {
        let raw = fs::read_to_string(path)?;
        Ok(Self {
            addresses: parse_address_lines(&raw),
            name: format!("file:{}", path.display()),
        })
    }

    /// Book over an already-loaded address list.
    pub fn from_addresses(addresses: Vec<String>) -> Self {
        Self {
            addresses,
            name: "memory".to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl AddressProvider for FileAddressBook {
    fn address_at(&self, index: u32) -> Result<String, DerivationError> {
        self.addresses.get(index as usize).cloned().ok_or_else(|| {
            DerivationError::AddressUnavailable {
                index,
                provider: self.name.clone(),
            }
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn parse_address_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let raw = "# header\nbc1qaaa\n\n  bc1qbbb  \n# trailer\nbc1qccc\n";
        let lines = parse_address_lines(raw);
        assert_eq!(lines, vec!["bc1qaaa", "bc1qbbb", "bc1qccc"]);
    }

    #[test]
    fn test_address_at_serves_lines_in_order() {
        let book = FileAddressBook::from_addresses(vec![
            "bc1qaaa".to_string(),
            "bc1qbbb".to_string(),
        ]);
        assert_eq!(book.address_at(0).unwrap(), "bc1qaaa");
        assert_eq!(book.address_at(1).unwrap(), "bc1qbbb");
        assert_eq!(book.len(), 2);
        assert!(!book.is_empty());
    }

    #[test]
    fn test_address_past_end_is_unavailable() {
        let book = FileAddressBook::from_addresses(vec!["bc1qaaa".to_string()]);
        let err = book.address_at(5).unwrap_err();
        match err {
            DerivationError::AddressUnavailable { index, .. } => assert_eq!(index, 5),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# pre-derived by external wallet").unwrap();
        writeln!(file, "bc1q_first").unwrap();
        writeln!(file, "bc1q_second").unwrap();
        file.flush().unwrap();

        let book = FileAddressBook::load(file.path()).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.address_at(1).unwrap(), "bc1q_second");
        assert!(book.name().starts_with("file:"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = FileAddressBook::load(Path::new("/nonexistent/book.txt")).unwrap_err();
        assert!(matches!(err, DerivationError::Io(_)));
    }
}
