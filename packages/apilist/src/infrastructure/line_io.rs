//! Line-oriented text files
//!
//! Handles are scoped to each call, so they are closed on every exit path.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{ApiListError, Result};

/// Read every line of a UTF-8 text file, without line terminators
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ApiListError::file_access(path, e))?;

    let lines = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .map_err(|e| ApiListError::file_access(path, e))?;

    debug!("read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Write one entry per line, creating parent directories as needed
pub fn write_lines<I, S>(path: impl AsRef<Path>, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ApiListError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| ApiListError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut count = 0usize;
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(|e| ApiListError::io(path, e))?;
        count += 1;
    }
    writer.flush().map_err(|e| ApiListError::io(path, e))?;

    debug!("wrote {} lines to {}", count, path.display());
    Ok(())
}
