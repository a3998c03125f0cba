use chrono::prelude::Local;

// let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
pub fn get_local_datetime_with_format(format: &str) -> String {
    return Local::now().format(format).to_string();
}
