//! Struct archiving functionality
//!
//! Modules which produce per-cycle data implement the `Archived` trait and
//! use an `Archiver` to append one CSV record per cycle into the session's
//! archive directory.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use std::fs::{File, OpenOptions};
use std::path::Path;
use csv::WriterBuilder;
pub use csv::Writer;
use serde::Serialize;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
///
/// A default (unconnected) archiver silently discards records, which allows
/// modules to be driven in unit tests without a session on disk.
#[derive(Default)]
pub struct Archiver {
    writer: Option<Writer<File>>
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A trait which enables a struct to be archived as a CSV file.
///
/// To implement this trait the struct shall have one `Archiver` member per
/// archive file, set up in the struct's `init` function. Records shall be
/// flat (scalar fields only) so they serialise to a single CSV row.
pub trait Archived {
    /// Write the archives for this struct
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archiver from a particular path relative to the session's
    /// archive root.
    pub fn from_path<P: AsRef<Path>>(
        session: &Session, path: P
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut session_path = session.arch_root.clone();
        session_path.push(path);

        // Create the file if it does not exist
        std::fs::File::create(session_path.clone())?;

        // Open the file in append mode
        let file = OpenOptions::new()
            .append(true)
            .open(session_path)?;

        Ok(Self {
            writer: Some(
                WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(file)
            )
        })
    }

    /// Append a single record to the archive.
    ///
    /// Records written through a default (unconnected) archiver are dropped.
    pub fn serialise<T: Serialize>(
        &mut self, record: T
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref mut writer) = self.writer {
            writer.serialize(record)?;
            writer.flush()?;
        }

        Ok(())
    }
}
