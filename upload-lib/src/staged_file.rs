use std::io;
use std::path::{Path, PathBuf};

use crate::utils::{generate_unique_filename, remove_file_if_exists};

/// Hidden prefix and marker that distinguish an upload still being validated
const STAGING_PREFIX: &str = ".";
const STAGING_MARKER: &str = "part";

/// An uploaded file that has not been accepted yet.
///
/// The file lives at a hidden temporary path next to its final path. Calling
/// [`StagedFile::persist`] renames it into place; dropping the guard without
/// persisting removes the temporary file. A file is therefore only ever at one
/// of the two paths, or gone.
#[derive(Debug)]
pub struct StagedFile {
    temp_path: PathBuf,
    final_path: PathBuf,
    armed: bool,
}

impl StagedFile {
    /// Reserve a temporary and a final path in `dir`.
    ///
    /// The extension is kept on both paths so the workbook reader can detect
    /// the format. Nothing is created on disk until the caller writes to
    /// [`StagedFile::path`].
    pub fn create(dir: &Path, extension: Option<&str>) -> Self {
        let final_name = generate_unique_filename(extension);
        let temp_name = match extension {
            Some(extension) => {
                let stem = final_name
                    .strip_suffix(&format!(".{extension}"))
                    .unwrap_or(final_name.as_str());
                format!("{STAGING_PREFIX}{stem}.{STAGING_MARKER}.{extension}")
            }
            None => format!("{STAGING_PREFIX}{final_name}.{STAGING_MARKER}"),
        };

        StagedFile {
            temp_path: dir.join(temp_name),
            final_path: dir.join(final_name),
            armed: true,
        }
    }

    /// Temporary location the upload is written to
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Location the file will have once persisted
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// Move the file to its final path and release the guard.
    ///
    /// An existing file at the final path is never overwritten. On error the
    /// guard is dropped, which removes the temporary file.
    pub fn persist(mut self) -> io::Result<PathBuf> {
        if self.final_path.try_exists()? {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", self.final_path.display()),
            ));
        }

        std::fs::rename(&self.temp_path, &self.final_path)?;
        self.armed = false;
        Ok(std::mem::take(&mut self.final_path))
    }

    /// Remove the temporary file now instead of on drop.
    pub fn discard(mut self) -> io::Result<()> {
        self.armed = false;
        remove_file_if_exists(&self.temp_path)?;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match remove_file_if_exists(&self.temp_path) {
            Ok(true) => tracing::debug!("Removed staged upload {}", self.temp_path.display()),
            Ok(false) => {}
            Err(e) => tracing::warn!(
                "Failed to remove staged upload {}: {}",
                self.temp_path.display(),
                e
            ),
        }
    }
}
