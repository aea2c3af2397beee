//! Whole-file output.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::IffError;
use crate::node::Node;

/// Serialise `node` in memory and write it to `path`.
pub fn write_file(path: &Path, node: &Node) -> Result<(), IffError> {
    let bytes = node.to_bytes()?;
    write_atomic(path, &bytes)?;
    info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Write `bytes` to a sibling temporary file, then rename it over `path`.
///
/// The destination is either left untouched or fully replaced. The
/// temporary file is removed on failure.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    write_atomic_all(&[(path, bytes)])
}

/// Write several files that only make sense together.
///
/// Every file is staged under a temporary name before any is renamed into
/// place. If staging or a rename fails, the temporary files and any
/// destinations already renamed are removed, so either every file is
/// written or none is.
pub fn write_atomic_all(files: &[(&Path, &[u8])]) -> io::Result<()> {
    let temps: Vec<PathBuf> = files.iter().map(|(path, _)| temp_path(path)).collect();
    let cleanup = |renamed: usize| {
        for (i, tmp) in temps.iter().enumerate() {
            let _ = fs::remove_file(if i < renamed { files[i].0 } else { tmp.as_path() });
        }
    };

    for ((_, bytes), tmp) in files.iter().zip(&temps) {
        let staged = fs::File::create(tmp).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(e) = staged {
            cleanup(0);
            return Err(e);
        }
    }
    for (i, ((path, _), tmp)) in files.iter().zip(&temps).enumerate() {
        if let Err(e) = fs::rename(tmp, path) {
            cleanup(i);
            return Err(e);
        }
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
