/// Normalize text by replacing control characters with spaces and normalizing whitespace
///
/// Spreadsheet headers often carry line breaks (Alt+Enter in Excel) or runs of
/// spaces. Error messages quote the header, so it is collapsed to a single line.
pub fn normalize_string(value: &str) -> String {
    return value
        .chars() // Process character by character
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace() // Split on whitespace to normalize multiple spaces
        .collect::<Vec<&str>>()
        .join(" ");
}
