//! Durable storage for dictionary pages.
//!
//! Each page is one JSON file, `dict00.json`, `dict01.json`, ..., holding the page's words as
//! a pretty-printed array in page order.

use crate::error::LbmsError;
use crate::pager::Page;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const PAGE_FILE_PREFIX: &str = "dict";
const PAGE_FILE_EXTENSION: &str = "json";

/// Accepts pages one at a time, addressable later by page number.
pub trait PageSink {
    fn store(&mut self, page: &Page) -> Result<(), LbmsError>;

    fn store_all(&mut self, pages: &[Page]) -> Result<(), LbmsError> {
        for page in pages {
            self.store(page)?;
        }
        Ok(())
    }
}

/// File name for a page, zero-padded to two digits.
pub fn page_file_name(number: usize) -> String {
    format!("{}{:02}.{}", PAGE_FILE_PREFIX, number, PAGE_FILE_EXTENSION)
}

/// Page number of a canonical page file name; `dict1.json` or `dict+01.json` are not pages.
fn parse_page_file_name(name: &str) -> Option<usize> {
    let digits = name
        .strip_prefix(PAGE_FILE_PREFIX)?
        .strip_suffix(PAGE_FILE_EXTENSION)?
        .strip_suffix('.')?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number = digits.parse().ok()?;
    (page_file_name(number) == name).then_some(number)
}

/// Writes each page to its own JSON file under a directory.
pub struct JsonDirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonDirSink {
    /// Creates the directory if it does not exist yet and removes page files left in it by
    /// an earlier run, so the directory only ever holds one page set.
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self, LbmsError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let stale = clear_page_files(&dir)?;
        if stale > 0 {
            warn!("Removed {} stale page files from {}", stale, dir.display());
        }
        Ok(Self { dir, written: Vec::new() })
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl PageSink for JsonDirSink {
    fn store(&mut self, page: &Page) -> Result<(), LbmsError> {
        let path = self.dir.join(page_file_name(page.number));
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, &page.words)?;
        writer.flush()?;
        debug!("Wrote page {} ({} words) to {}", page.number, page.len(), path.display());
        self.written.push(path);
        Ok(())
    }
}

fn clear_page_files(dir: &Path) -> Result<usize, LbmsError> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_page = entry.file_name().to_str().and_then(parse_page_file_name).is_some();
        if is_page && entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Keeps pages in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub pages: Vec<Page>,
}

impl PageSink for MemorySink {
    fn store(&mut self, page: &Page) -> Result<(), LbmsError> {
        self.pages.push(page.clone());
        Ok(())
    }
}

/// Load every page file in `dir`, ordered by page number. Other files are ignored.
pub fn load_pages<P: AsRef<Path>>(dir: P) -> Result<Vec<Page>, LbmsError> {
    let mut pages = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(number) = name.to_str().and_then(parse_page_file_name) else {
            continue;
        };
        let reader = BufReader::new(File::open(entry.path())?);
        let words: Vec<String> = serde_json::from_reader(reader)?;
        pages.push(Page::new(number, words));
    }
    pages.sort_by_key(|p| p.number);
    info!("Loaded {} dictionary pages from {}", pages.len(), dir.as_ref().display());
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(page_file_name(0), "dict00.json");
        assert_eq!(page_file_name(7), "dict07.json");
        assert_eq!(page_file_name(123), "dict123.json");
        assert_eq!(parse_page_file_name("dict07.json"), Some(7));
        assert_eq!(parse_page_file_name("dict07.txt"), None);
        assert_eq!(parse_page_file_name("notes.json"), None);
        assert_eq!(parse_page_file_name("dict123.json"), Some(123));
        assert_eq!(parse_page_file_name("dict1.json"), None);
        assert_eq!(parse_page_file_name("dict007.json"), None);
        assert_eq!(parse_page_file_name("dict+1.json"), None);
    }

    #[test]
    fn pages_reload_in_order() {
        let dir = TempDir::new().unwrap();
        let pages = vec![
            Page::new(0, vec!["the".into(), "of".into()]),
            Page::new(1, vec!["naïve".into(), "\"quoted\"".into()]),
        ];
        let mut sink = JsonDirSink::create(dir.path()).unwrap();
        sink.store_all(&pages).unwrap();
        assert_eq!(sink.written().len(), 2);

        fs::write(dir.path().join("README.txt"), "ignored").unwrap();
        assert_eq!(load_pages(dir.path()).unwrap(), pages);
    }

    #[test]
    fn files_are_json_arrays() {
        let dir = TempDir::new().unwrap();
        let mut sink = JsonDirSink::create(dir.path().join("nested")).unwrap();
        sink.store(&Page::new(3, vec!["a".into()])).unwrap();
        let text = fs::read_to_string(dir.path().join("nested").join("dict03.json")).unwrap();
        let words: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(words, vec!["a"]);
    }

    #[test]
    fn reassembly_replaces_previous_page_set() {
        let dir = TempDir::new().unwrap();
        let first: Vec<Page> = (0..3)
            .map(|n| Page::new(n, vec![format!("a{}", n), format!("b{}", n)]))
            .collect();
        JsonDirSink::create(dir.path()).unwrap().store_all(&first).unwrap();
        fs::write(dir.path().join("notes.txt"), "kept").unwrap();

        let second = vec![Page::new(0, vec!["x".into(), "y".into()])];
        JsonDirSink::create(dir.path()).unwrap().store_all(&second).unwrap();

        assert_eq!(load_pages(dir.path()).unwrap(), second);
        assert!(!dir.path().join("dict01.json").exists());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn memory_sink_collects_pages() {
        let mut sink = MemorySink::default();
        sink.store(&Page::new(0, vec!["x".into()])).unwrap();
        assert_eq!(sink.pages.len(), 1);
    }
}
