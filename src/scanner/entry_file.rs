use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::errors::BrightError;

pub fn write_entry_point_ids(path: &Path, ids: &[String]) -> Result<(), BrightError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for id in ids {
        writeln!(writer, "{}", id)?;
    }
    writer.flush()?;

    info!("Entry points have been saved to '{}'.", path.display());
    Ok(())
}

pub fn read_entry_point_ids(path: &Path) -> Result<Vec<String>, BrightError> {
    let ids = read_list(path)?;
    info!("Loaded {} entry points from {}", ids.len(), path.display());
    Ok(ids)
}

pub fn read_list(path: &Path) -> Result<Vec<String>, BrightError> {
    let file = File::open(path).map_err(|e| {
        BrightError::Config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let mut items = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            items.push(trimmed.to_string());
        }
    }
    Ok(items)
}
