use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use viewref::{Reference, View};
use viewref_core::Schema;

use super::CliError;

pub fn load_schema(path: &Path) -> Result<Schema, CliError> {
    let json = load_text(path)?;
    let schema = Schema::from_json(&json)?;
    tracing::debug!(path = %path.display(), objects = schema.len(), "loaded schema");
    Ok(schema)
}

/// Read a file, or stdin when the path is `-`.
pub fn load_text(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(CliError::Stdin)?;
        return Ok(buf);
    }

    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write to a file, or stdout when no path is given. Adds a final newline.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<(), CliError> {
    let mut text = text.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }

    match path {
        Some(path) => fs::write(path, text).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => io::stdout()
            .write_all(text.as_bytes())
            .map_err(|source| CliError::Write {
                path: "<stdout>".into(),
                source,
            }),
    }
}

/// Look up a reference by position.
pub fn select_reference(view: &View, index: usize) -> Result<&Reference, CliError> {
    view.references()
        .get(index)
        .ok_or(CliError::NoSuchReference {
            index,
            len: view.len(),
        })
}
