//! Splitting a vocabulary into numbered, fixed-capacity pages.

use crate::config::AddressWidth;
use crate::error::LbmsError;
use crate::vocabulary::Vocabulary;
use log::debug;
use serde::{Deserialize, Serialize};

/// One dictionary page: a contiguous slice of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub number: usize,
    pub words: Vec<String>,
}

impl Page {
    pub fn new(number: usize, words: Vec<String>) -> Self {
        Self { number, words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Partition `vocabulary` into consecutive pages of at most `capacity` words.
///
/// Every page but the last is full and the last is never empty. Order is preserved within
/// and across pages, so concatenating the result gives back the vocabulary.
pub fn paginate(vocabulary: &Vocabulary, capacity: usize) -> Result<Vec<Page>, LbmsError> {
    if capacity == 0 {
        return Err(LbmsError::InvalidCapacity(capacity));
    }
    if vocabulary.is_empty() {
        return Err(LbmsError::EmptyVocabulary);
    }

    let pages: Vec<Page> = vocabulary
        .words()
        .chunks(capacity)
        .enumerate()
        .map(|(number, words)| Page::new(number, words.to_vec()))
        .collect();

    debug!(
        "Paginated {} words into {} pages of up to {} words",
        vocabulary.len(),
        pages.len(),
        capacity
    );
    Ok(pages)
}

/// Paginate with the capacity implied by `width`, refusing vocabularies the page selector
/// cannot address.
pub fn paginate_for_width(vocabulary: &Vocabulary, width: &AddressWidth) -> Result<Vec<Page>, LbmsError> {
    let pages = paginate(vocabulary, width.page_capacity())?;
    check_page_count(pages.len(), width)?;
    Ok(pages)
}

pub(crate) fn check_page_count(needed: usize, width: &AddressWidth) -> Result<(), LbmsError> {
    if needed as u64 > width.max_pages() {
        return Err(LbmsError::AddressSpaceExhausted {
            needed,
            available: usize::try_from(width.max_pages()).unwrap_or(usize::MAX),
        });
    }
    Ok(())
}
