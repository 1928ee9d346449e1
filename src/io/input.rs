use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use anyhow::{Context, Result};

/// Open a transcript file as a buffered line iterator
///
/// Lines are read lazily so arbitrarily large corpora stream through
/// without being held in memory.
pub fn open_lines(path: &Path) -> Result<Lines<BufReader<File>>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open transcript file: {:?}", path))?;
    Ok(BufReader::new(file).lines())
}
