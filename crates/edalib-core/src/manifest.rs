//! Library manifest: which archives to process and what they must contain.
//!
//! The built-in manifest is compiled from [`crate::builtin::LIBRARIES`]. A
//! TOML file with the same shape can replace it:
//!
//! ```toml
//! [normalize]
//! prefix = "ul_"
//! subdirectory = "KiCADv6"
//! extension = "kicad_sym"
//!
//! [[library]]
//! path = "3rd_party/LIB_X.zip"
//! checks = [
//!   { pattern = 'X/KiCad/X\.kicad_sym', sha256 = "..." },
//! ]
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use regex::Regex;
use serde::Deserialize;

use crate::Error;
use crate::Result;
use crate::builtin::LIBRARIES;
use crate::hash::is_sha256_hex;
use crate::normalize::NormalizeRule;

/// A member-name pattern and the digest its single match must have.
#[derive(Debug, Clone)]
pub struct ContentCheck {
    pattern: String,
    regex: Regex,
    sha256: String,
}

impl ContentCheck {
    /// Compiles a content check.
    ///
    /// The pattern must match a member name in full; it is anchored at both
    /// ends, so `X\.stp` does not match `dir/X.stp`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the pattern does not compile and
    /// [`Error::InvalidManifest`] if the digest is not 64 hex characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use edalib_core::ContentCheck;
    ///
    /// # fn main() -> Result<(), edalib_core::Error> {
    /// let check = ContentCheck::new(
    ///     r"X/3D/X\.stp",
    ///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    /// )?;
    /// assert!(check.matches("X/3D/X.stp"));
    /// assert!(!check.matches("lib/X/3D/X.stp"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pattern: &str, sha256: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        let sha256 = sha256.trim();
        if !is_sha256_hex(sha256) {
            return Err(Error::InvalidManifest(format!(
                "expected a hex SHA-256 digest for pattern '{pattern}', got '{sha256}'"
            )));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            sha256: sha256.to_ascii_lowercase(),
        })
    }

    /// The pattern as written in the manifest.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Expected lowercase hex SHA-256 digest.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Returns `true` if `member` matches the pattern in full.
    pub fn matches(&self, member: &str) -> bool {
        self.regex.is_match(member)
    }
}

/// One archive and the checks its content must pass.
#[derive(Debug, Clone)]
pub struct LibraryEntry {
    /// Archive path, relative to the project root.
    pub path: PathBuf,
    /// Content checks in manifest order.
    pub checks: Vec<ContentCheck>,
}

impl LibraryEntry {
    /// Creates an entry from a path and compiled checks.
    pub fn new(path: impl Into<PathBuf>, checks: Vec<ContentCheck>) -> Self {
        Self {
            path: path.into(),
            checks,
        }
    }
}

/// Ordered set of library archives plus the symbol-name normalization rule.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: Vec<LibraryEntry>,
    normalize: NormalizeRule,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    normalize: NormalizeRule,
    #[serde(default, rename = "library")]
    libraries: Vec<LibraryFile>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LibraryFile {
    path: PathBuf,
    #[serde(default)]
    checks: Vec<CheckFile>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CheckFile {
    pattern: String,
    sha256: String,
}

impl Manifest {
    /// Creates a manifest from entries and a normalization rule.
    pub fn new(entries: Vec<LibraryEntry>, normalize: NormalizeRule) -> Self {
        Self { entries, normalize }
    }

    /// Compiles the manifest built into this crate.
    pub fn builtin() -> Result<Self> {
        let entries = LIBRARIES
            .iter()
            .map(|library| {
                let checks = library
                    .checks
                    .iter()
                    .map(|(pattern, sha256)| ContentCheck::new(pattern, sha256))
                    .collect::<Result<Vec<_>>>()?;
                Ok(LibraryEntry::new(library.path, checks))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(entries, NormalizeRule::default()))
    }

    /// Parses a manifest from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ManifestFile =
            toml::from_str(text).map_err(|e| Error::InvalidManifest(e.to_string()))?;

        let entries = file
            .libraries
            .into_iter()
            .map(|library| {
                let checks = library
                    .checks
                    .iter()
                    .map(|check| ContentCheck::new(&check.pattern, &check.sha256))
                    .collect::<Result<Vec<_>>>()?;
                Ok(LibraryEntry::new(library.path, checks))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(entries, file.normalize))
    }

    /// Reads and parses a TOML manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::InvalidManifest(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text).map_err(|e| match e {
            Error::InvalidManifest(reason) => {
                Error::InvalidManifest(format!("{}: {reason}", path.display()))
            }
            other => other,
        })
    }

    /// Entries in manifest order.
    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    /// Rule used to rename timestamp-named symbol files.
    pub fn normalize_rule(&self) -> &NormalizeRule {
        &self.normalize
    }

    /// Distinct parent directories of all archives, in sorted order.
    ///
    /// These are the directories the normalizer scans after extraction.
    pub fn scan_roots(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .map(|entry| {
                entry
                    .path
                    .parent()
                    .map_or_else(PathBuf::new, Path::to_path_buf)
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EMPTY_DIGEST: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_pattern_is_full_match() {
        let check = ContentCheck::new(r"KiCad/X\.kicad_sym", EMPTY_DIGEST).unwrap();
        assert!(check.matches("KiCad/X.kicad_sym"));
        assert!(!check.matches("KiCad/X.kicad_sym.bak"));
        assert!(!check.matches("lib/KiCad/X.kicad_sym"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let check = ContentCheck::new("a|b", EMPTY_DIGEST).unwrap();
        assert!(check.matches("a"));
        assert!(check.matches("b"));
        assert!(!check.matches("ab"));
        assert!(!check.matches("xa"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = ContentCheck::new("(unclosed", EMPTY_DIGEST).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_invalid_digest() {
        let err = ContentCheck::new("x", "not-a-digest").unwrap_err();
        assert!(matches!(err, Error::InvalidManifest(_)));
    }

    #[test]
    fn test_digest_is_lowercased() {
        let check = ContentCheck::new("x", &EMPTY_DIGEST.to_ascii_uppercase()).unwrap();
        assert_eq!(check.sha256(), EMPTY_DIGEST);
    }

    #[test]
    fn test_builtin_manifest_compiles() {
        let manifest = Manifest::builtin().unwrap();
        assert_eq!(manifest.entries().len(), LIBRARIES.len());
        assert!(manifest.entries().iter().all(|e| !e.checks.is_empty()));
        assert_eq!(manifest.scan_roots(), vec![PathBuf::from("3rd_party")]);
    }

    #[test]
    fn test_from_toml() {
        let text = format!(
            r#"
            [normalize]
            prefix = "snap_"
            subdirectory = "KiCad"
            extension = "kicad_sym"

            [[library]]
            path = "vendor/one.zip"
            checks = [
                {{ pattern = 'one\.txt', sha256 = "{EMPTY_DIGEST}" }},
            ]

            [[library]]
            path = "other/two.zip"
            "#
        );
        let manifest = Manifest::from_toml_str(&text).unwrap();
        assert_eq!(manifest.entries().len(), 2);
        assert_eq!(manifest.entries()[0].path, PathBuf::from("vendor/one.zip"));
        assert_eq!(manifest.entries()[0].checks[0].pattern(), r"one\.txt");
        assert!(manifest.entries()[1].checks.is_empty());
        assert_eq!(manifest.normalize_rule().prefix, "snap_");
        assert_eq!(
            manifest.scan_roots(),
            vec![PathBuf::from("other"), PathBuf::from("vendor")]
        );
    }

    #[test]
    fn test_from_toml_default_normalize_rule() {
        let manifest = Manifest::from_toml_str("").unwrap();
        assert!(manifest.entries().is_empty());
        assert_eq!(manifest.normalize_rule(), &NormalizeRule::default());
    }

    #[test]
    fn test_from_toml_rejects_unknown_fields() {
        let err = Manifest::from_toml_str("[[library]]\npath = \"a.zip\"\nhash = \"x\"\n")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidManifest(_)));
    }

    #[test]
    fn test_scan_root_of_bare_file_name() {
        let manifest = Manifest::new(
            vec![LibraryEntry::new("a.zip", Vec::new())],
            NormalizeRule::default(),
        );
        assert_eq!(manifest.scan_roots(), vec![PathBuf::new()]);
    }
}
