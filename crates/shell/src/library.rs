//! Image library
//!
//! A sorted directory listing of image files with a browse cursor.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Browsable set of image files from one directory
#[derive(Debug, Default)]
pub struct ImageLibrary {
    paths: Vec<PathBuf>,
    cursor: Option<usize>,
}

impl ImageLibrary {
    /// Scan a directory for supported image files, sorted by file name
    pub fn scan(dir: &Path) -> io::Result<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| is_supported(path))
            .collect();
        paths.sort();

        info!("image library: {} files in {}", paths.len(), dir.display());
        Ok(Self {
            paths,
            cursor: None,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The image under the cursor, if browsing has started
    pub fn current(&self) -> Option<&Path> {
        self.cursor.map(|i| self.paths[i].as_path())
    }

    /// Advance the cursor, wrapping at the end
    pub fn next(&mut self) -> Option<&Path> {
        if self.paths.is_empty() {
            return None;
        }
        self.cursor = Some(match self.cursor {
            Some(i) => (i + 1) % self.paths.len(),
            None => 0,
        });
        self.current()
    }

    /// Step the cursor back, wrapping at the start
    pub fn prev(&mut self) -> Option<&Path> {
        if self.paths.is_empty() {
            return None;
        }
        self.cursor = Some(match self.cursor {
            Some(0) | None => self.paths.len() - 1,
            Some(i) => i - 1,
        });
        self.current()
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(names: &[&str]) -> ImageLibrary {
        ImageLibrary {
            paths: names.iter().map(PathBuf::from).collect(),
            cursor: None,
        }
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("a.png")));
        assert!(is_supported(Path::new("b.JPG")));
        assert!(is_supported(Path::new("c.webp")));
        assert!(!is_supported(Path::new("d.txt")));
        assert!(!is_supported(Path::new("noext")));
    }

    #[test]
    fn test_next_wraps() {
        let mut lib = library(&["a.png", "b.png"]);
        assert_eq!(lib.next().unwrap(), Path::new("a.png"));
        assert_eq!(lib.next().unwrap(), Path::new("b.png"));
        assert_eq!(lib.next().unwrap(), Path::new("a.png"));
    }

    #[test]
    fn test_prev_from_start_wraps_to_end() {
        let mut lib = library(&["a.png", "b.png", "c.png"]);
        assert_eq!(lib.prev().unwrap(), Path::new("c.png"));
        assert_eq!(lib.prev().unwrap(), Path::new("b.png"));
    }

    #[test]
    fn test_empty_library() {
        let mut lib = library(&[]);
        assert!(lib.is_empty());
        assert!(lib.next().is_none());
        assert!(lib.prev().is_none());
        assert!(lib.current().is_none());
    }
}
