//! Notes persistence: one flat text file under the per-user data
//! directory, whole-file read/replace semantics.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants;

/// Reads and writes the notes file. The containing directory is created
/// on demand before every operation; I/O errors propagate to the caller.
#[derive(Debug, Clone)]
pub struct NotesStore {
    data_dir: PathBuf,
    notes_file: PathBuf,
}

impl NotesStore {
    /// Store at the default per-user path (`~/.holographic/data/notes.txt`).
    pub fn new() -> Self {
        Self {
            data_dir: constants::data_dir(),
            notes_file: constants::notes_file_path(),
        }
    }

    /// Store rooted at an arbitrary directory (used by tests).
    pub fn with_root(root: &Path) -> Self {
        let data_dir = root.join("data");
        let notes_file = data_dir.join("notes.txt");
        Self {
            data_dir,
            notes_file,
        }
    }

    /// Idempotent create of the data directory (with parents).
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }

    /// Full contents of the notes file, or empty text if it doesn't exist yet.
    pub fn load(&self) -> io::Result<String> {
        self.ensure_dir()?;
        match fs::read_to_string(&self.notes_file) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e),
        }
    }

    /// Overwrite the notes file with `content` in full.
    pub fn save(&self, content: &str) -> io::Result<()> {
        self.ensure_dir()?;
        fs::write(&self.notes_file, content)
    }
}

impl Default for NotesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_on_fresh_root_returns_empty_and_creates_dir() {
        let dir = tempdir().unwrap();
        let store = NotesStore::with_root(dir.path());

        assert_eq!(store.load().unwrap(), "");
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = NotesStore::with_root(dir.path());

        store.save("remember the milk\n").unwrap();
        assert_eq!(store.load().unwrap(), "remember the milk\n");
    }

    #[test]
    fn save_of_loaded_content_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = NotesStore::with_root(dir.path());

        store.save("line one\nline two").unwrap();
        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();
        assert_eq!(store.load().unwrap(), loaded);
    }

    #[test]
    fn save_replaces_previous_contents_entirely() {
        let dir = tempdir().unwrap();
        let store = NotesStore::with_root(dir.path());

        store.save("a much longer original note").unwrap();
        store.save("short").unwrap();
        assert_eq!(store.load().unwrap(), "short");
    }

    #[test]
    fn empty_save_clears_the_file() {
        let dir = tempdir().unwrap();
        let store = NotesStore::with_root(dir.path());

        store.save("something").unwrap();
        store.save("").unwrap();
        assert_eq!(store.load().unwrap(), "");
    }

    #[test]
    fn utf8_content_survives() {
        let dir = tempdir().unwrap();
        let store = NotesStore::with_root(dir.path());

        store.save("météo: 26°C ✓").unwrap();
        assert_eq!(store.load().unwrap(), "météo: 26°C ✓");
    }
}
