//! Verification and extraction of pinned EDA component-library archives.
//!
//! `edalib-core` checks that third-party symbol/footprint/3D-model bundles
//! contain exactly the files a hardware project expects, byte for byte,
//! before unpacking them next to the archive. Each archive is described by a
//! [`LibraryEntry`] in a [`Manifest`]: a list of member-name patterns and the
//! SHA-256 digest each matched member must have.
//!
//! # Examples
//!
//! ```no_run
//! use edalib_core::Manifest;
//! use edalib_core::Pipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = Manifest::builtin()?;
//! let report = Pipeline::new(&manifest, ".").run()?;
//! println!("Extracted {} archives", report.entries.len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod builtin;
pub mod error;
pub mod extract;
pub mod hash;
pub mod manifest;
pub mod normalize;
pub mod pipeline;
pub mod report;
#[doc(hidden)]
pub mod test_utils;
pub mod verify;

// Re-export main API types
pub use error::CheckFailure;
pub use error::Error;
pub use error::Result;
pub use extract::extract_library;
pub use extract::extraction_dir;
pub use hash::sha256_hex;
pub use manifest::ContentCheck;
pub use manifest::LibraryEntry;
pub use manifest::Manifest;
pub use normalize::NormalizeRule;
pub use normalize::normalize_symbol_names;
pub use pipeline::EntryState;
pub use pipeline::NoopObserver;
pub use pipeline::Pipeline;
pub use pipeline::PipelineObserver;
pub use report::CheckReport;
pub use report::EntryReport;
pub use report::ExtractionReport;
pub use report::MemberDigest;
pub use report::PipelineReport;
pub use report::RenameRecord;
pub use report::VerificationReport;
pub use verify::list_members;
pub use verify::verify_library;
