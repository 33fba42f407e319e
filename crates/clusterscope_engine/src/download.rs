use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clusterscope_core::Download;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("cannot use download directory {}: {source}", .dir.display())]
    Dir { dir: PathBuf, source: io::Error },
    #[error("cannot write download: {0}")]
    Io(#[from] io::Error),
}

/// Where a download ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDownload {
    pub path: PathBuf,
    /// A file with the same name was already there and got swapped out.
    pub replaced: bool,
}

/// Saves generated downloads into one directory.
///
/// The content is staged in a temp file next to the target and renamed into
/// place, so a reader sees either the previous file or the new one.
#[derive(Debug, Clone)]
pub struct DownloadWriter {
    dir: PathBuf,
}

impl DownloadWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, download: &Download) -> Result<SavedDownload, DownloadError> {
        fs::create_dir_all(&self.dir).map_err(|source| DownloadError::Dir {
            dir: self.dir.clone(),
            source,
        })?;

        let target = self.dir.join(safe_filename(&download.filename));
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(download.content.as_bytes())?;
        staged.as_file().sync_all()?;

        match staged.persist_noclobber(&target) {
            Ok(_) => Ok(SavedDownload {
                path: target,
                replaced: false,
            }),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                // rename(2) swaps the staged file in without a gap.
                err.file.persist(&target).map_err(|e| e.error)?;
                Ok(SavedDownload {
                    path: target,
                    replaced: true,
                })
            }
            Err(err) => Err(err.error.into()),
        }
    }
}

/// Cluster ids come from the server, so the generated name may hold path
/// separators or other characters a file system rejects.
pub fn safe_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let trimmed = cleaned.trim_matches(&[' ', '.'][..]);
    if trimmed.is_empty() {
        "download.txt".to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
