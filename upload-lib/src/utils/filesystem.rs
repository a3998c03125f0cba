use std::io;
use std::path::Path;

use crate::utils::get_local_datetime_with_format;

/// Longest extension kept from a client supplied filename
const MAX_EXTENSION_LEN: usize = 8;

/// Generate a server-side filename that never collides with an earlier upload.
///
/// # Arguments
/// * `extension` - Extension without the leading dot, or `None` for no extension
pub fn generate_unique_filename(extension: Option<&str>) -> String {
    let timestamp = get_local_datetime_with_format("%Y-%m-%d_%H-%M-%S");
    let id = uuid::Uuid::new_v4().simple();
    let filename = match extension {
        Some(extension) => format!("{timestamp}_{id}.{extension}"),
        None => format!("{timestamp}_{id}"),
    };
    return filename;
}

/// Extract a safe extension from a client supplied filename.
///
/// Only short ASCII alphanumeric extensions survive, lower-cased. Anything else
/// (path separators, dots, unicode) is dropped so the name cannot escape the
/// upload directory.
pub fn sanitize_extension(original_name: &str) -> Option<String> {
    // Browsers on Windows may send a full path
    let base_name = original_name.rsplit(['/', '\\']).next().unwrap_or(original_name);
    let extension = Path::new(base_name).extension()?.to_str()?;

    if extension.is_empty()
        || extension.len() > MAX_EXTENSION_LEN
        || !extension.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    return Some(extension.to_ascii_lowercase());
}

/// Remove a file, treating an already missing file as success.
///
/// Returns `true` if a file was removed.
pub fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
