//! Export stored content as JSON lines
//!
//! One JSON object per record, sorted by URL, for downstream index
//! builders that would rather not open the database themselves.

use crate::storage::{ContentRecord, ContentStore};
use crate::HarvestError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct ExportLine<'a> {
    key: String,
    #[serde(flatten)]
    record: &'a ContentRecord,
}

/// Writes every stored record to `writer`, returning how many were written
pub fn export_jsonl<W: Write>(store: &dyn ContentStore, mut writer: W) -> Result<usize, HarvestError> {
    let records = store.records()?;

    for record in &records {
        let line = ExportLine {
            key: record.key(),
            record,
        };
        serde_json::to_writer(&mut writer, &line)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(records.len())
}

/// Exports to a file, or to stdout when `path` is `-`
pub fn export_to_path(store: &dyn ContentStore, path: &Path) -> Result<usize, HarvestError> {
    if path == Path::new("-") {
        let stdout = std::io::stdout();
        return export_jsonl(store, stdout.lock());
    }

    let file = File::create(path)?;
    let count = export_jsonl(store, BufWriter::new(file))?;
    tracing::info!("Exported {} records to {}", count, path.display());
    Ok(count)
}
