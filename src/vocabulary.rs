//! Ordered word lists, most frequent word first.
//!
//! The source list is trusted to be deduplicated and frequency sorted. Neither property is
//! enforced here; duplicates are counted so callers can log them, and everything downstream
//! keeps working (the pager reproduces the list as given, lookups resolve the first copy).

use crate::error::LbmsError;
use log::{debug, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { words: words.into_iter().map(Into::into).collect() }
    }

    /// Reads the first column of every non-blank row, e.g. a `word,count` unigram table.
    ///
    /// A `word` header row is not special-cased; frequency lists without one are expected.
    /// Entries containing whitespace (quoted phrases such as `"new york"`) cannot be sent as a
    /// single word and are skipped with a warning.
    pub fn from_csv_reader<R: BufRead>(reader: R) -> Result<Self, LbmsError> {
        let mut words = Vec::new();
        for (row, line) in reader.lines().enumerate() {
            let line = line?;
            let Some(word) = first_column(&line) else {
                continue;
            };
            if word.chars().any(char::is_whitespace) {
                warn!("Skipping row {}: {:?} is not a single word", row + 1, word);
                continue;
            }
            words.push(word);
        }
        debug!("Loaded {} words from CSV", words.len());
        Ok(Self { words })
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, LbmsError> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.words.get(position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Mean word length in characters, 0.0 for an empty list.
    pub fn mean_word_len(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        let total: usize = self.words.iter().map(|w| w.chars().count()).sum();
        total as f64 / self.words.len() as f64
    }

    /// Number of entries that repeat an earlier word (case-insensitive).
    pub fn duplicate_count(&self) -> usize {
        let mut seen = HashSet::with_capacity(self.words.len());
        self.words.iter().filter(|w| !seen.insert(w.to_lowercase())).count()
    }
}

fn first_column(line: &str) -> Option<String> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let field = if let Some(quoted) = line.strip_prefix('"') {
        // "" inside a quoted field is an escaped quote
        let mut out = String::new();
        let mut chars = quoted.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    out.push('"');
                    chars.next();
                } else {
                    break;
                }
            } else {
                out.push(c);
            }
        }
        out
    } else {
        line.split(',').next().unwrap_or_default().to_string()
    };
    let field = field.trim();
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}
