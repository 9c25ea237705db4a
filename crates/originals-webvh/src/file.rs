//! # Update Log File I/O
//!
//! Reads and writes `did.jsonl`: one canonical JSON object per line, in
//! append order. Writes go through a temp-file-then-rename so a crash or
//! concurrent reader never observes a partially written log.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::WebvhError;
use crate::model::UpdateLogEntry;

/// Resolve the on-disk path for a DID's log file under `base_dir`, mirroring
/// the DID's own path segments so a single directory tree can host many
/// DIDs.
pub fn log_path(base_dir: &Path, domain: &str, path_segments: &[String]) -> PathBuf {
    let mut path = base_dir.join(domain);
    for segment in path_segments {
        path = path.join(segment);
    }
    path.join("did.jsonl")
}

/// Read and parse every entry in a `did.jsonl` file, in file order.
pub async fn read_log(path: &Path) -> Result<Vec<UpdateLogEntry>, WebvhError> {
    let contents = tokio::fs::read_to_string(path).await?;
    let mut entries = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry: UpdateLogEntry = serde_json::from_str(line).map_err(|e| {
            WebvhError::Integrity(format!("malformed log entry at line {}: {e}", line_no + 1))
        })?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Atomically overwrite `path` with `entries`, one JSON object per line.
/// Writes to a sibling temp file first, then renames it into place so
/// concurrent readers never see a half-written file.
pub async fn write_log(path: &Path, entries: &[UpdateLogEntry]) -> Result<(), WebvhError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut body = String::new();
    for entry in entries {
        let line = serde_json::to_string(entry)
            .map_err(|e| WebvhError::Integrity(format!("failed to serialize log entry: {e}")))?;
        body.push_str(&line);
        body.push('\n');
    }

    let tmp_path = path.with_extension("jsonl.tmp");
    let mut tmp_file = tokio::fs::File::create(&tmp_path).await?;
    tmp_file.write_all(body.as_bytes()).await?;
    tmp_file.flush().await?;
    drop(tmp_file);

    tokio::fs::rename(&tmp_path, path).await?;
    Ok(())
}
