//! Packager
//!
//! Bundles the generated layer and drill files into one deflate
//! compressed archive for manufacturing hand-off, preserving
//! relative paths.

use std::fs::File;
use std::io;
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::DesignError;

/// Archive every file under `src_dir` into `zip_path`.
///
/// A missing or unreadable source directory is a `Packaging` error;
/// callers treat it as non-fatal and surface the absence of the
/// archive instead of aborting the run.
pub fn create_archive(src_dir: &Path, zip_path: &Path) -> Result<(), DesignError> {
    if !src_dir.is_dir() {
        return Err(DesignError::Packaging(format!(
            "source directory {} is missing or not a directory",
            src_dir.display()
        )));
    }

    let file = File::create(zip_path)
        .map_err(|e| DesignError::Packaging(format!("cannot create {}: {}", zip_path.display(), e)))?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    add_directory(&mut writer, src_dir, src_dir, options)
        .map_err(|e| DesignError::Packaging(e.to_string()))?;

    writer
        .finish()
        .map_err(|e| DesignError::Packaging(e.to_string()))?;
    tracing::info!("created gerber archive {}", zip_path.display());
    Ok(())
}

fn add_directory(
    writer: &mut ZipWriter<File>,
    base: &Path,
    dir: &Path,
    options: FileOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            add_directory(writer, base, &path, options)?;
        } else if path.is_file() {
            let relative = path.strip_prefix(base)?;
            let name: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            writer.start_file(name.join("/"), options)?;
            let mut source = File::open(&path)?;
            io::copy(&mut source, writer)?;
        }
    }
    Ok(())
}
