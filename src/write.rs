//! Writes rendered [`Page`]s to disk. Pages are rendered completely before
//! the [`Writer`] is invoked, so a failed load or render never leaves a
//! partially updated output directory behind.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// An output HTML file.
#[derive(Debug, PartialEq)]
pub struct Page {
    /// The file name relative to the output directory, e.g. `academic.html`.
    pub file_name: String,

    /// The rendered document.
    pub html: String,
}

/// Responsible for writing [`Page`]s into an output directory.
pub struct Writer<'a> {
    /// The directory in which the page files will be written. It is created
    /// if it doesn't exist; other files in it are left alone.
    pub output_directory: &'a Path,
}

impl Writer<'_> {
    /// Writes every page, returning the paths written in order. Stops at the
    /// first failure.
    pub fn write_pages(&self, pages: &[Page]) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(self.output_directory).map_err(|err| Error {
            path: self.output_directory.to_owned(),
            err,
        })?;
        pages.iter().map(|page| self.write_page(page)).collect()
    }

    fn write_page(&self, page: &Page) -> Result<PathBuf> {
        let path = self.output_directory.join(&page.file_name);
        std::fs::write(&path, &page.html).map_err(|err| Error {
            path: path.clone(),
            err,
        })?;
        tracing::info!(path = %path.display(), bytes = page.html.len(), "Wrote page");
        Ok(path)
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error writing a page (or creating its directory) at `path`.
#[derive(Debug)]
pub struct Error {
    pub path: PathBuf,
    pub err: io::Error,
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Writing '{}': {}", self.path.display(), self.err)
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}
