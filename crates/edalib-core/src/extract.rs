//! Extraction of verified library archives.

use std::fs;
use std::fs::File;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use log::info;
use log::warn;

use crate::Error;
use crate::ExtractionReport;
use crate::Result;
use crate::archive::LoadedArchive;
use crate::archive::open_archive;

/// Directory an archive is extracted into: its path without the extension.
///
/// # Examples
///
/// ```
/// use edalib_core::extraction_dir;
/// use std::path::Path;
///
/// assert_eq!(
///     extraction_dir(Path::new("3rd_party/LIB_SK6805-EC15.zip")),
///     Path::new("3rd_party/LIB_SK6805-EC15")
/// );
/// ```
#[must_use]
pub fn extraction_dir(archive_path: &Path) -> PathBuf {
    let stem = archive_path.file_stem().unwrap_or_default();
    archive_path
        .parent()
        .map_or_else(|| PathBuf::from(stem), |parent| parent.join(stem))
}

/// Extracts every member of `archive_path` into its extraction directory.
///
/// Any existing extraction directory is removed first. Removal is best
/// effort: a failure is logged and extraction proceeds over whatever
/// remains. Member paths are preserved relative to the extraction directory.
///
/// Call this only after [`crate::verify_library`] has succeeded.
///
/// # Errors
///
/// Returns an error if:
/// - The archive is missing or not a readable ZIP file
/// - A member name is absolute or would escape the extraction directory
///   ([`Error::PathTraversal`])
/// - Writing to the extraction directory fails
pub fn extract_library<P: AsRef<Path>>(archive_path: P) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let mut archive = open_archive(archive_path)?;
    extract_archive(archive_path, &mut archive)
}

/// Extracts an archive that is already loaded, so the bytes written are the
/// bytes that were verified.
pub(crate) fn extract_archive(
    archive_path: &Path,
    archive: &mut LoadedArchive,
) -> Result<ExtractionReport> {
    let start = Instant::now();
    let target = extraction_dir(archive_path);
    let mut report = ExtractionReport::new(&target);

    if target.exists() {
        report.replaced_existing = true;
        if let Err(e) = fs::remove_dir_all(&target) {
            warn!("failed to remove {}: {e}", target.display());
        }
    }
    fs::create_dir_all(&target)?;

    for i in 0..archive.len() {
        let mut member = archive.by_index(i).map_err(|e| Error::InvalidArchive {
            path: archive_path.to_path_buf(),
            reason: format!("failed to read ZIP entry: {e}"),
        })?;

        let relative = member_path(member.name()).ok_or_else(|| Error::PathTraversal {
            archive: archive_path.to_path_buf(),
            member: member.name().to_string(),
        })?;
        let out_path = target.join(relative);

        if member.is_dir() {
            fs::create_dir_all(&out_path)?;
            report.directories_created += 1;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&out_path)?;
        report.bytes_written += io::copy(&mut member, &mut file)?;
        report.files_extracted += 1;
    }

    report.duration = start.elapsed();
    info!(
        "extracted {} files from {} into {}",
        report.files_extracted,
        archive_path.display(),
        target.display()
    );
    Ok(report)
}

/// Relative output path of a member, or `None` if the name is absolute,
/// carries a drive letter, or climbs out with `..`.
///
/// Backslashes count as separators.
fn member_path(name: &str) -> Option<PathBuf> {
    if name.contains('\0') || name.starts_with(['/', '\\']) {
        return None;
    }
    if matches!(name.as_bytes(), [drive, b':', ..] if drive.is_ascii_alphabetic()) {
        return None;
    }

    let name = name.replace('\\', "/");
    let mut path = PathBuf::new();
    for component in Path::new(&name).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipTestBuilder;
    use crate::test_utils::create_test_zip;
    use tempfile::TempDir;

    #[test]
    fn test_extraction_dir() {
        assert_eq!(
            extraction_dir(Path::new("3rd_party/LIB_DS4424N+T&R.zip")),
            PathBuf::from("3rd_party/LIB_DS4424N+T&R")
        );
        assert_eq!(extraction_dir(Path::new("a.zip")), PathBuf::from("a"));
    }

    #[test]
    fn test_extracts_members_at_relative_paths() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("LIB_X.zip");
        fs::write(
            &archive,
            create_test_zip(&[
                ("X/KiCad/X.kicad_sym", "symbol"),
                ("X/3D/X.stp", "model"),
            ]),
        )
        .unwrap();

        let report = extract_library(&archive).unwrap();

        let target = temp.path().join("LIB_X");
        assert_eq!(report.target_dir, target);
        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.bytes_written, 11);
        assert!(!report.replaced_existing);
        assert_eq!(
            fs::read_to_string(target.join("X/KiCad/X.kicad_sym")).unwrap(),
            "symbol"
        );
        assert_eq!(fs::read_to_string(target.join("X/3D/X.stp")).unwrap(), "model");
    }

    #[test]
    fn test_replaces_previous_extraction() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("lib.zip");
        fs::write(&archive, create_test_zip(&[("new.txt", "new")])).unwrap();

        let target = temp.path().join("lib");
        fs::create_dir_all(target.join("stale/dir")).unwrap();
        fs::write(target.join("stale/dir/old.txt"), "old").unwrap();
        fs::write(target.join("new.txt"), "old content").unwrap();

        let report = extract_library(&archive).unwrap();

        assert!(report.replaced_existing);
        assert!(!target.join("stale").exists());
        assert_eq!(fs::read_to_string(target.join("new.txt")).unwrap(), "new");
    }

    #[test]
    fn test_directory_members() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("lib.zip");
        let data = ZipTestBuilder::new()
            .add_directory("empty/")
            .add_file("full/a.txt", "a")
            .build();
        fs::write(&archive, data).unwrap();

        let report = extract_library(&archive).unwrap();

        assert_eq!(report.directories_created, 1);
        assert_eq!(report.files_extracted, 1);
        assert!(temp.path().join("lib/empty").is_dir());
        assert!(temp.path().join("lib/full/a.txt").is_file());
    }

    #[test]
    fn test_rejects_path_traversal() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("evil.zip");
        fs::write(&archive, create_test_zip(&[("../escaped.txt", "x")])).unwrap();

        let err = extract_library(&archive).unwrap_err();

        assert!(matches!(err, Error::PathTraversal { ref member, .. } if member == "../escaped.txt"));
        assert!(!temp.path().join("escaped.txt").exists());
    }

    #[test]
    fn test_member_path() {
        assert_eq!(
            member_path("X/KiCad/X.kicad_sym"),
            Some(PathBuf::from("X/KiCad/X.kicad_sym"))
        );
        assert_eq!(member_path("./X/a.txt"), Some(PathBuf::from("X/a.txt")));
        assert_eq!(member_path(r"X\3D\X.stp"), Some(PathBuf::from("X/3D/X.stp")));

        for name in [
            "/tmp/x.txt",
            r"\tmp\x.txt",
            "C:/x.txt",
            "c:x.txt",
            "../x.txt",
            "X/../../x.txt",
            r"X\..\..\x.txt",
            "X/a\0.txt",
        ] {
            assert_eq!(member_path(name), None, "{name} was accepted");
        }
    }

    #[test]
    fn test_rejects_absolute_member() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("evil.zip");
        fs::write(&archive, create_test_zip(&[("/tmp/edalib-abs.txt", "x")])).unwrap();

        let err = extract_library(&archive).unwrap_err();

        assert!(
            matches!(err, Error::PathTraversal { ref member, .. } if member == "/tmp/edalib-abs.txt")
        );
        assert!(!temp.path().join("evil/tmp/edalib-abs.txt").exists());
    }

    #[test]
    fn test_missing_archive_leaves_directory_untouched() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("gone");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("keep.txt"), "keep").unwrap();

        let err = extract_library(temp.path().join("gone.zip")).unwrap_err();

        assert!(matches!(err, Error::MissingArchive { .. }));
        assert!(target.join("keep.txt").exists());
    }
}
