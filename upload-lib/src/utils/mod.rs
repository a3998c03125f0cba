mod datetime;
mod filesystem;
mod string;

pub use datetime::get_local_datetime_with_format;
pub use filesystem::{generate_unique_filename, remove_file_if_exists, sanitize_extension};
pub use string::normalize_string;
