//! Atomic file writes
//!
//! Every persisted file goes through write-to-temp, sync, rename so an
//! interrupted run never leaves a half-written JSON document behind.

use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::MigrateResult;

/// Write `bytes` to `path` atomically, creating parent directories
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> MigrateResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let mut file = fs::File::create(temp_path).await?;
    file.write_all(bytes).await?;
    // Sync to disk before rename
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, path).await?;
    Ok(())
}

/// Serialize `value` as pretty JSON and write it atomically
pub async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> MigrateResult<()> {
    let json = serde_json::to_vec_pretty(value)?;
    write_atomic(path, &json).await
}
