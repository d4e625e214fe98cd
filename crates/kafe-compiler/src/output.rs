//! Atomic class file output.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Write `<out_dir>/<class_name>.class`.
///
/// Bytes go to a temporary file in `out_dir` that is renamed over the target
/// once fully written, so a failed write never leaves a partial class file.
pub fn write_class_file(out_dir: &Path, class_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = out_dir.join(format!("{class_name}.class"));
    let io_err = |source| Error::Io {
        path: path.clone(),
        source,
    };

    let mut file = tempfile::NamedTempFile::new_in(out_dir).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    file.persist(&path).map_err(|e| io_err(e.error))?;

    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}
