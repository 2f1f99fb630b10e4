pub mod record_file;
pub mod roster_file;
pub mod traits;

// Re-export
pub use record_file::FileRecordRepository;
pub use roster_file::FileRosterRepository;
pub use traits::{RecordRepository, RosterRepository};

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, TrackerError};

/// Writes `value` as pretty JSON to a sibling temp file and renames it over
/// `path`, so a failed write never leaves a half-written file behind.
pub(crate) fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    let result = write_then_rename(&tmp_path, path, value);
    if result.is_err() && tmp_path.is_file() {
        let _ = fs::remove_file(&tmp_path);
    }
    result.map_err(|source| TrackerError::StorageWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn write_then_rename<T: Serialize + ?Sized>(tmp_path: &Path, path: &Path, value: &T) -> io::Result<()> {
    let file = File::create(tmp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    fs::rename(tmp_path, path)
}
