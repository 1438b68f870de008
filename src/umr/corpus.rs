use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

pub const UMR_EXTENSION: &str = ".umr";

/// Data folders looked up inside every language folder, in this order.
pub const DATA_DIRECTORIES: [&str; 2] = ["umr_data", "formatted_data"];

/// Finds `<root>/<language>/{umr_data,formatted_data}/*.umr`.
///
/// Paths are sorted so that repeated runs see the same order.
pub fn find_umr_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut umr_files = Vec::new();

    for language_dir in read_dir_paths(root)? {
        if !language_dir.is_dir() {
            continue;
        }

        for data_dir in DATA_DIRECTORIES {
            let data_dir = language_dir.join(data_dir);
            if !data_dir.exists() {
                continue;
            }

            umr_files.extend(list_umr_files(&data_dir)?);
        }
    }

    umr_files.sort();

    Ok(umr_files)
}

/// `*.umr` entries of a single folder, sorted.
pub fn list_umr_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut umr_files: Vec<_> = read_dir_paths(dir)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .map_or(false, |name| name.to_string_lossy().ends_with(UMR_EXTENSION))
        })
        .collect();

    umr_files.sort();

    Ok(umr_files)
}

pub(crate) fn read_dir_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        paths.push(entry.path());
    }
    Ok(paths)
}
