//! Pretty-printing and file output helpers.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Render a value as indented JSON with `indent` spaces per level
///
/// # Examples
/// ```
/// use libbart::utils::output::pretty;
/// use serde_json::json;
///
/// assert_eq!(pretty(&json!({"b": 1, "a": [true]}), 1)?, "{\n \"a\": [\n  true\n ],\n \"b\": 1\n}");
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn pretty<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String, serde_json::Error> {
    let indent = b" ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Print a value to stdout in indented form
pub fn beautify<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<(), serde_json::Error> {
    println!("{}", pretty(value, indent)?);
    Ok(())
}

/// Write `data` to `filename`, creating parent directories as needed.
///
/// Relative names are resolved against the current directory. Returns the
/// absolute path that was written.
pub fn save_file<D: Display + ?Sized>(data: &D, filename: &Path) -> io::Result<PathBuf> {
    let output_file = std::path::absolute(filename)?;

    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, data.to_string())?;

    log::info!("Successfully written to: {:?}", output_file);
    Ok(output_file)
}
