use crate::error::{LogoError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Lines whose trimmed form starts with this marker are ignored.
pub const COMMENT_MARKER: char = '#';

/// Characters that are not allowed in output file names.
const UNSAFE_FILENAME_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Read the brand list from a newline-delimited text file.
///
/// A missing file is reported as [`LogoError::BrandsFileMissing`]; an empty
/// list is a valid result.
pub fn read_brands<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LogoError::BrandsFileMissing {
            path: path.to_path_buf(),
        },
        _ => LogoError::Io(e),
    })?;

    Ok(parse_brands(&content))
}

/// Trimmed, non-empty, non-comment lines in input order.
pub fn parse_brands(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .map(str::to_string)
        .collect()
}

/// Replace filesystem-unsafe characters with `_` and trim the result.
pub fn sanitize_filename(name: &str) -> String {
    name.replace(&UNSAFE_FILENAME_CHARS[..], "_").trim().to_string()
}

/// Output file name (`<sanitized brand>.png`) for a brand.
pub fn logo_file_name(brand: &str) -> String {
    format!("{}.png", sanitize_filename(brand))
}
