//! File selection for upload fields.

use std::path::{Path, PathBuf};

use horizon_loom_core::Signal;
use horizon_loom_core::logging::targets;

use crate::error::{Error, Result};

/// A file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub path: Option<PathBuf>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            path: None,
        }
    }

    /// Describe a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            size: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }

    /// Human-readable size, e.g. `1.5 KB`.
    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }
}

/// Format a byte count with binary units: `0 Bytes`, `512 Bytes`, `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// The files chosen in an upload field.
#[derive(Debug, Default)]
pub struct FileSelection {
    multiple: bool,
    max_size: Option<u64>,
    accept: Option<String>,
    files: Vec<SelectedFile>,
    error: Option<String>,
    dragging: bool,
    files_changed: Signal<Vec<SelectedFile>>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow several files; new picks are appended.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Reject files larger than `bytes`.
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Accepted formats, in the `accept` attribute syntax (`.png,.jpg`).
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Inline error for the last rejected pick.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn files_changed(&self) -> &Signal<Vec<SelectedFile>> {
        &self.files_changed
    }

    /// Hint shown under the drop zone.
    pub fn description(&self) -> String {
        match &self.accept {
            Some(accept) => format!("Accepted formats: {accept}"),
            None => "All file types supported".to_string(),
        }
    }

    /// Add picked or dropped files.
    ///
    /// If any file is over the size limit the whole batch is rejected, the
    /// previous selection is kept and the inline error names the file.
    pub fn add(&mut self, incoming: Vec<SelectedFile>) -> Result<()> {
        self.dragging = false;
        self.error = None;
        if incoming.is_empty() {
            return Ok(());
        }

        if let Some(max) = self.max_size
            && let Some(big) = incoming.iter().find(|f| f.size > max)
        {
            let err = Error::file_too_large(&big.name, big.size, max);
            tracing::debug!(target: targets::WIDGET, file = %big.name, size = big.size, max, "file rejected");
            self.error = Some(err.to_string());
            return Err(err);
        }

        if self.multiple {
            self.files.extend(incoming);
        } else {
            self.files = incoming.into_iter().take(1).collect();
        }
        self.files_changed.emit(self.files.clone());
        Ok(())
    }

    /// Add files from disk paths.
    pub fn add_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        let files = paths
            .iter()
            .map(SelectedFile::from_path)
            .collect::<Result<Vec<_>>>()?;
        self.add(files)
    }

    /// Remove the file at `index`.
    pub fn remove(&mut self, index: usize) -> Option<SelectedFile> {
        if index >= self.files.len() {
            return None;
        }
        let removed = self.files.remove(index);
        self.files_changed.emit(self.files.clone());
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.error = None;
        if !self.files.is_empty() {
            self.files.clear();
            self.files_changed.emit(Vec::new());
        }
    }

    /// Whether files are being dragged over the drop zone.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }

    #[test]
    fn test_single_takes_first() {
        let mut selection = FileSelection::new();
        selection
            .add(vec![SelectedFile::new("a.png", 10), SelectedFile::new("b.png", 20)])
            .unwrap();
        selection.add(vec![SelectedFile::new("c.png", 30)]).unwrap();
        let names: Vec<_> = selection.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c.png"]);
    }

    #[test]
    fn test_multiple_appends_and_removes() {
        let mut selection = FileSelection::new().with_multiple(true);
        selection.add(vec![SelectedFile::new("a.png", 10)]).unwrap();
        selection
            .add(vec![SelectedFile::new("b.png", 20), SelectedFile::new("c.png", 30)])
            .unwrap();
        assert_eq!(selection.files().len(), 3);
        assert_eq!(selection.remove(1).map(|f| f.name), Some("b.png".to_string()));
        assert_eq!(selection.remove(5), None);
        assert_eq!(selection.files().len(), 2);
    }

    #[test]
    fn test_oversized_rejects_batch() {
        let mut selection = FileSelection::new()
            .with_multiple(true)
            .with_max_size(2 * 1024 * 1024);
        selection.add(vec![SelectedFile::new("ok.txt", 100)]).unwrap();

        let result = selection.add(vec![
            SelectedFile::new("small.txt", 100),
            SelectedFile::new("video.mp4", 3 * 1024 * 1024),
        ]);
        assert!(matches!(result, Err(Error::FileTooLarge { .. })));
        assert_eq!(selection.files().len(), 1);
        assert_eq!(
            selection.error(),
            Some("File video.mp4 is too large. Max size is 2.0MB.")
        );

        selection.add(vec![SelectedFile::new("next.txt", 1)]).unwrap();
        assert_eq!(selection.error(), None);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let mut selection = FileSelection::new().with_accept(".txt");
        selection.add_paths(&[&path]).unwrap();
        assert_eq!(selection.files()[0].name, "notes.txt");
        assert_eq!(selection.files()[0].formatted_size(), "5 Bytes");
        assert_eq!(selection.description(), "Accepted formats: .txt");

        let missing = dir.path().join("missing.txt");
        assert!(matches!(selection.add_paths(&[missing]), Err(Error::Io { .. })));
    }
}
