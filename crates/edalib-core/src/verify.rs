//! Archive content verification.

use std::io::Read;
use std::io::Seek;
use std::path::Path;

use log::debug;
use log::info;
use zip::ZipArchive;

use crate::CheckFailure;
use crate::ContentCheck;
use crate::Error;
use crate::LibraryEntry;
use crate::Result;
use crate::archive::LoadedArchive;
use crate::archive::member_names;
use crate::archive::open_archive;
use crate::archive::read_member;
use crate::hash::digest_matches;
use crate::hash::sha256_hex;
use crate::report::CheckReport;
use crate::report::MemberDigest;
use crate::report::VerificationReport;

/// Verifies that a library archive contains exactly the pinned files.
///
/// Every content check of `entry` must match exactly one member name, and
/// that member's SHA-256 must equal the expected digest. All checks run
/// even after one fails; the returned [`Error::Verification`] carries
/// every failure.
///
/// # Arguments
///
/// * `root` - Project root the entry's path is relative to
/// * `entry` - Archive path and content checks
///
/// # Errors
///
/// Returns an error if:
/// - The archive does not exist ([`Error::MissingArchive`])
/// - The archive is not a readable ZIP file ([`Error::InvalidArchive`])
/// - Any content check fails ([`Error::Verification`])
///
/// # Examples
///
/// ```no_run
/// use edalib_core::Manifest;
/// use edalib_core::verify_library;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let manifest = Manifest::builtin()?;
/// for entry in manifest.entries() {
///     let report = verify_library(".", entry)?;
///     println!("{}: {} checks passed", report.archive.display(), report.checks.len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn verify_library<P: AsRef<Path>>(root: P, entry: &LibraryEntry) -> Result<VerificationReport> {
    let archive_path = root.as_ref().join(&entry.path);
    let mut archive = open_archive(&archive_path)?;
    verify_archive(&archive_path, &mut archive, entry)
}

/// Runs the checks of `entry` against an archive that is already loaded.
pub(crate) fn verify_archive(
    archive_path: &Path,
    archive: &mut LoadedArchive,
    entry: &LibraryEntry,
) -> Result<VerificationReport> {
    let names = member_names(archive);

    let mut report = VerificationReport::new(archive_path);
    report.total_members = archive.len();

    let mut failures = Vec::new();
    for check in &entry.checks {
        match verify_check(check, &names, archive) {
            Ok(passed) => {
                debug!("{}: {} ok", archive_path.display(), passed.member);
                report.checks.push(passed);
            }
            Err(failure) => {
                debug!("{}: {failure}", archive_path.display());
                failures.push(failure);
            }
        }
    }

    if !failures.is_empty() {
        return Err(Error::Verification {
            archive: archive_path.to_path_buf(),
            failures,
        });
    }

    info!(
        "verified {} ({} checks)",
        archive_path.display(),
        report.checks.len()
    );
    Ok(report)
}

fn verify_check<R: Read + Seek>(
    check: &ContentCheck,
    names: &[String],
    archive: &mut ZipArchive<R>,
) -> std::result::Result<CheckReport, CheckFailure> {
    let matching: Vec<&String> = names.iter().filter(|name| check.matches(name)).collect();

    let member = match matching.as_slice() {
        [] => {
            return Err(CheckFailure::NotFound {
                pattern: check.pattern().to_string(),
            });
        }
        [member] => (*member).clone(),
        many => {
            return Err(CheckFailure::NotUnique {
                pattern: check.pattern().to_string(),
                count: many.len(),
            });
        }
    };

    let data = read_member(archive, &member).map_err(|reason| CheckFailure::Unreadable {
        member: member.clone(),
        reason,
    })?;

    let actual = sha256_hex(&data);
    if !digest_matches(&actual, check.sha256()) {
        return Err(CheckFailure::HashMismatch {
            member,
            expected: check.sha256().to_string(),
            actual,
        });
    }

    Ok(CheckReport {
        pattern: check.pattern().to_string(),
        member,
        sha256: actual,
        size: data.len() as u64,
    })
}

/// Lists every file member of an archive with its SHA-256 digest.
///
/// Directory members are skipped. Useful for writing or refreshing manifest
/// entries after a library is re-downloaded.
///
/// # Errors
///
/// Returns an error if the archive is missing, unreadable, or a member
/// cannot be decompressed.
pub fn list_members<P: AsRef<Path>>(archive_path: P) -> Result<Vec<MemberDigest>> {
    let archive_path = archive_path.as_ref();
    let mut archive = open_archive(archive_path)?;

    let mut digests = Vec::new();
    for name in member_names(&archive) {
        if name.ends_with('/') {
            continue;
        }
        let data = read_member(&mut archive, &name).map_err(|reason| Error::InvalidArchive {
            path: archive_path.to_path_buf(),
            reason: format!("failed to read {name}: {reason}"),
        })?;
        digests.push(MemberDigest {
            sha256: sha256_hex(&data),
            size: data.len() as u64,
            name,
        });
    }

    Ok(digests)
}
