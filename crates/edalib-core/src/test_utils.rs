//! Test utilities for building library archives in memory.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (path, text content). Files are stored
/// uncompressed with mode 0o644.
///
/// # Examples
///
/// ```
/// use edalib_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("file.txt", "hello"), ("dir/nested.txt", "world")]);
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    entries
        .iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Builder for ZIP test archives with files and explicit directory members.
///
/// # Examples
///
/// ```
/// use edalib_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("KiCADv6/")
///     .add_file("KiCADv6/2024-01-01_00-00-00.kicad_sym", b"(kicad_symbol_lib)")
///     .build();
/// ```
pub struct ZipTestBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn options(mode: u32) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(mode)
    }

    /// Adds a regular file to the archive.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: impl AsRef<[u8]>) -> Self {
        self.writer.start_file(path, Self::options(0o644)).unwrap();
        self.writer.write_all(data.as_ref()).unwrap();
        self
    }

    /// Adds a directory member to the archive.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        self.writer
            .add_directory(path, Self::options(0o755))
            .unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.writer.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces every occurrence of `from` in `data` with `to`.
///
/// Used to build archives the writer refuses to produce, such as two
/// members sharing a name, or to corrupt stored member bytes after their
/// CRC has been recorded. Both slices must have the same length.
///
/// # Examples
///
/// ```
/// use edalib_core::test_utils::create_test_zip;
/// use edalib_core::test_utils::patch_bytes;
///
/// let zip_data = create_test_zip(&[("X/a.txt", "one"), ("X/b.txt", "two")]);
/// let duplicated = patch_bytes(zip_data, b"X/b.txt", b"X/a.txt");
/// ```
#[must_use]
pub fn patch_bytes(mut data: Vec<u8>, from: &[u8], to: &[u8]) -> Vec<u8> {
    assert_eq!(from.len(), to.len(), "replacement must keep the length");
    let mut pos = 0;
    while let Some(offset) = data[pos..].windows(from.len()).position(|w| w == from) {
        let start = pos + offset;
        data[start..start + from.len()].copy_from_slice(to);
        pos = start + from.len();
    }
    data
}
