use std::path::{Path, PathBuf};

pub type EntryId = u64;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Metadata for one file chosen by the user. Contents are never read here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub extension: String,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let extension = extension_of(&name);
        Self {
            path,
            name,
            size_bytes,
            extension,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn icon(&self) -> FileIcon {
        FileIcon::for_extension(&self.extension)
    }

    pub fn size_label(&self) -> String {
        format_file_size(self.size_bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIcon {
    Pdf,
    Word,
    Text,
    Spreadsheet,
    Generic,
}

impl FileIcon {
    pub fn for_name(name: &str) -> Self {
        Self::for_extension(&extension_of(name))
    }

    pub fn for_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => FileIcon::Pdf,
            "doc" | "docx" => FileIcon::Word,
            "txt" => FileIcon::Text,
            "csv" | "xls" | "xlsx" => FileIcon::Spreadsheet,
            _ => FileIcon::Generic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileIcon::Pdf => "PDF",
            FileIcon::Word => "DOC",
            FileIcon::Text => "TXT",
            FileIcon::Spreadsheet => "SHEET",
            FileIcon::Generic => "FILE",
        }
    }
}

/// Lower-cased text after the last dot, or empty when the name has none.
fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Human-readable size using 1024-based tiers up to GB.
///
/// The scaled value is rounded to two decimals and printed without
/// trailing zeros, so `1536` becomes `1.5 KB` and `1024` becomes `1 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut tier = 0;
    while tier + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(tier as u32 + 1) {
        tier += 1;
    }

    let scaled = bytes as f64 / 1024f64.powi(tier as i32);
    let fixed = format!("{scaled:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[tier])
}
