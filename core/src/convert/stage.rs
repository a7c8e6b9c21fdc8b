use crate::error::Result;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Copies one series into its own directory under `staging_root`
///
/// The converter processes every file in a directory, so each series gets
/// an isolated folder. Staged names are prefixed with the discovery index
/// to keep same-named files from different folders apart.
pub fn stage_series(staging_root: &Path, name: &str, files: &[PathBuf]) -> Result<PathBuf> {
    let out = staging_root.join(name);
    fs::create_dir_all(&out)?;

    for (i, src) in files.iter().enumerate() {
        let file_name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dst = out.join(format!("{:05}_{}", i, file_name));
        fs::copy(src, &dst)?;
    }

    debug!("Staged {} files into {}", files.len(), out.display());
    Ok(out)
}
