//! Archive Builder - Zip the Pack and Name It By Content
//!
//! Entry bytes depend only on file contents: entries are sorted, timestamps
//! are pinned to the zip epoch and permissions are fixed.

use log::{debug, info};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::{BuildError, IoResultExt};
use crate::hashing::{short_digest, ContentHasher};

/// Result of archiving a pack tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedPack {
    pub path: PathBuf,
    pub digest: String,
    pub entries: usize,
}

impl ArchivedPack {
    pub fn short_digest(&self) -> &str {
        short_digest(&self.digest)
    }
}

/// Files under `root` in sorted walk order, skipping `exclude`.
pub fn collect_files(root: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if exclude.is_some_and(|skip| entry.path() == skip) {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Zip entry name for `path`, relative to `root` with `/` separators.
fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    parts.map(|p| p.join("/"))
}

/// Write every file under `folder` into `zip_path`, then rename the archive
/// to embed its content digest.
pub fn write_folder_to_zip(folder: &Path, zip_path: &Path) -> Result<ArchivedPack, BuildError> {
    if !folder.is_dir() {
        return Err(BuildError::Io {
            path: folder.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "source directory missing"),
        });
    }

    let files = collect_files(folder, Some(zip_path))?;
    if files.is_empty() {
        return Err(BuildError::EmptySource(folder.to_path_buf()));
    }

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let file = File::create(zip_path).at(zip_path)?;
    let mut writer = ZipWriter::new(file);
    for path in &files {
        let name = entry_name(folder, path).ok_or_else(|| BuildError::Io {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "path is not valid UTF-8"),
        })?;
        let contents = fs::read(path).at(path)?;
        debug!("Archiving {}", name);
        writer.start_file(name, options)?;
        writer.write_all(&contents).at(zip_path)?;
    }
    writer.finish()?;

    let digest = compute_zip_md5(zip_path)?;
    let path = add_hash_to_filename(zip_path, &digest)?;
    info!("Wrote {} ({} files)", path.display(), files.len());

    Ok(ArchivedPack { path, digest, entries: files.len() })
}

/// MD5 over the decompressed contents of every entry, in archive order.
pub fn compute_zip_md5(zip_path: &Path) -> Result<String, BuildError> {
    let file = File::open(zip_path).at(zip_path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut hasher = ContentHasher::new();
    let mut buf = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        buf.clear();
        entry.read_to_end(&mut buf).at(zip_path)?;
        hasher.update(&buf);
    }

    Ok(hasher.finalize_hex())
}

/// `pack.zip` becomes `pack-<8 hex>.zip`. Returns the new path.
pub fn add_hash_to_filename(zip_path: &Path, digest: &str) -> Result<PathBuf, BuildError> {
    let hashed = hashed_path(zip_path, short_digest(digest))?;
    fs::rename(zip_path, &hashed).at(&hashed)?;
    Ok(hashed)
}

fn hashed_path(zip_path: &Path, suffix: &str) -> Result<PathBuf, BuildError> {
    let stem = zip_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| BuildError::InvalidArchivePath(zip_path.to_path_buf()))?;

    let name = match zip_path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-{}.{}", stem, suffix, ext),
        None => format!("{}-{}", stem, suffix),
    };
    Ok(zip_path.with_file_name(name))
}
