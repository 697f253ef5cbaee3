//! In-memory access to library ZIP archives.

use std::fs;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use zip::ZipArchive;

use crate::Error;
use crate::Result;

/// A ZIP archive loaded fully into memory.
pub type LoadedArchive = ZipArchive<Cursor<Vec<u8>>>;

const EOCD_SIGNATURE: &[u8] = b"PK\x05\x06";
const EOCD_LEN: usize = 22;
const ZIP64_LOCATOR_SIGNATURE: &[u8] = b"PK\x06\x07";
const ZIP64_LOCATOR_LEN: usize = 20;
const ZIP64_EOCD_SIGNATURE: &[u8] = b"PK\x06\x06";

/// Reads `path` into memory and opens it as a ZIP archive.
///
/// The reader indexes members by name, so two central-directory entries
/// with the same name would collapse into one. Such archives are rejected.
///
/// # Errors
///
/// Returns [`Error::MissingArchive`] if `path` does not exist, and
/// [`Error::InvalidArchive`] if its bytes are not a readable ZIP file or
/// it holds several members with the same name.
pub fn open_archive(path: &Path) -> Result<LoadedArchive> {
    if !path.exists() {
        return Err(Error::MissingArchive {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    let declared = declared_entry_count(&bytes);
    let archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| Error::InvalidArchive {
        path: path.to_path_buf(),
        reason: format!("failed to open ZIP archive: {e}"),
    })?;

    if let Some(declared) = declared
        && declared > archive.len() as u64
    {
        return Err(Error::InvalidArchive {
            path: path.to_path_buf(),
            reason: format!(
                "central directory lists {declared} entries but only {} distinct member names",
                archive.len()
            ),
        });
    }

    Ok(archive)
}

/// Total entry count recorded in the end-of-central-directory record.
///
/// Returns `None` when the record cannot be located.
fn declared_entry_count(bytes: &[u8]) -> Option<u64> {
    let last = bytes.len().checked_sub(EOCD_LEN)?;
    let eocd = (last.saturating_sub(usize::from(u16::MAX))..=last)
        .rev()
        .find(|&pos| bytes[pos..pos + 4] == *EOCD_SIGNATURE)?;

    let total = u16::from_le_bytes([bytes[eocd + 10], bytes[eocd + 11]]);
    if total != u16::MAX {
        return Some(u64::from(total));
    }

    // ZIP64: the real count lives in the ZIP64 end record.
    let locator = eocd.checked_sub(ZIP64_LOCATOR_LEN)?;
    if bytes[locator..locator + 4] != *ZIP64_LOCATOR_SIGNATURE {
        return Some(u64::from(total));
    }
    let record = usize::try_from(read_u64(bytes, locator + 8)?).ok()?;
    if bytes.get(record..record.checked_add(4)?)? != ZIP64_EOCD_SIGNATURE {
        return None;
    }
    read_u64(bytes, record + 32)
}

fn read_u64(bytes: &[u8], at: usize) -> Option<u64> {
    let field = bytes.get(at..at.checked_add(8)?)?;
    field.try_into().ok().map(u64::from_le_bytes)
}

/// Reads the full contents of the member called `name`.
pub fn read_member<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> std::result::Result<Vec<u8>, String> {
    let mut member = archive.by_name(name).map_err(|e| e.to_string())?;
    let mut data = Vec::new();
    member.read_to_end(&mut data).map_err(|e| e.to_string())?;
    Ok(data)
}

/// Member names in archive order.
pub fn member_names<R: Read + Seek>(archive: &ZipArchive<R>) -> Vec<String> {
    archive.file_names().map(str::to_string).collect()
}
