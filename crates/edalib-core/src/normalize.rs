//! Renaming of timestamp-named symbol files to stable names.
//!
//! Ultra Librarian names the KiCad symbol file in each download after the
//! moment it was downloaded (`KiCADv6/2024-01-01_00-00-00.kicad_sym`).
//! Schematics reference symbol libraries by file name, so after extraction
//! the file is renamed after its library: `ul_NCP167/KiCADv6/NCP167.kicad_sym`.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use log::debug;
use log::warn;
use regex::Regex;
use serde::Deserialize;

use crate::Result;
use crate::report::RenameRecord;

static TIMESTAMP_STEM: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}_[0-9]{2}-[0-9]{2}-[0-9]{2}$").unwrap()
});

/// Where timestamp-named files live and what they are called.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeRule {
    /// Prefix of extraction directories to scan; stripped to form the new name.
    pub prefix: String,
    /// Subdirectory of each extraction directory holding the symbol file.
    pub subdirectory: String,
    /// File extension, without the leading dot.
    pub extension: String,
}

impl Default for NormalizeRule {
    fn default() -> Self {
        Self {
            prefix: "ul_".to_string(),
            subdirectory: "KiCADv6".to_string(),
            extension: "kicad_sym".to_string(),
        }
    }
}

impl NormalizeRule {
    /// Returns `true` if `file_name` is `YYYY-MM-DD_HH-MM-SS.<extension>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use edalib_core::NormalizeRule;
    ///
    /// let rule = NormalizeRule::default();
    /// assert!(rule.is_timestamp_name("2024-01-01_00-00-00.kicad_sym"));
    /// assert!(!rule.is_timestamp_name("NCP167.kicad_sym"));
    /// assert!(!rule.is_timestamp_name("2024-01-01_00-00-00.kicad_mod"));
    /// ```
    pub fn is_timestamp_name(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(self.extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .is_some_and(|stem| TIMESTAMP_STEM.is_match(stem))
    }

    /// Stable library name for an extraction directory, if it carries the prefix.
    pub fn stable_name<'a>(&self, dir_name: &'a str) -> Option<&'a str> {
        dir_name
            .strip_prefix(self.prefix.as_str())
            .filter(|rest| !rest.is_empty())
    }
}

/// Renames every timestamp-named symbol file under `scan_root`.
///
/// Looks at `<scan_root>/<prefix><name>/<subdirectory>/` and renames each
/// `YYYY-MM-DD_HH-MM-SS.<extension>` file there to `<name>.<extension>`.
/// A missing `scan_root` or subdirectory is not an error.
///
/// # Examples
///
/// ```no_run
/// use edalib_core::NormalizeRule;
/// use edalib_core::normalize_symbol_names;
///
/// # fn main() -> Result<(), edalib_core::Error> {
/// let renamed = normalize_symbol_names("3rd_party", &NormalizeRule::default())?;
/// for record in renamed {
///     println!("{} -> {}", record.from.display(), record.to.display());
/// }
/// # Ok(())
/// # }
/// ```
pub fn normalize_symbol_names(
    scan_root: impl AsRef<Path>,
    rule: &NormalizeRule,
) -> Result<Vec<RenameRecord>> {
    let scan_root = scan_root.as_ref();
    let mut renamed = Vec::new();

    if !scan_root.is_dir() {
        debug!("skipping normalization of missing {}", scan_root.display());
        return Ok(renamed);
    }

    for library_dir in sorted_children(scan_root)? {
        if !library_dir.is_dir() {
            continue;
        }
        let Some(stable) = library_dir
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| rule.stable_name(name))
        else {
            continue;
        };

        let symbol_dir = library_dir.join(&rule.subdirectory);
        if !symbol_dir.is_dir() {
            continue;
        }

        let target = symbol_dir.join(format!("{stable}.{}", rule.extension));
        for file in sorted_children(&symbol_dir)? {
            let is_match = file.is_file()
                && file
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| rule.is_timestamp_name(name));
            if !is_match {
                continue;
            }

            if target.exists() {
                warn!("replacing existing {}", target.display());
            }
            fs::rename(&file, &target)?;
            debug!("renamed {} -> {}", file.display(), target.display());
            renamed.push(RenameRecord {
                from: file,
                to: target.clone(),
            });
        }
    }

    Ok(renamed)
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    children.sort();
    Ok(children)
}
