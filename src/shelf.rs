//! The loaded set of dictionary pages, used to turn words into references and back.

use crate::config::AddressWidth;
use crate::error::LbmsError;
use crate::pager::{check_page_count, Page};
use crate::reference::{decode_hex, encode_hex, WordRef};
use log::{debug, warn};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Shelf {
    width: AddressWidth,
    pages: Vec<Page>,
    lookup: HashMap<String, WordRef>,
}

impl Shelf {
    /// Build a shelf from pages numbered `0..n` in order.
    ///
    /// Pages must not exceed the capacity implied by `width`, and there must be no more of
    /// them than the page selector can address.
    pub fn from_pages(pages: Vec<Page>, width: AddressWidth) -> Result<Self, LbmsError> {
        check_page_count(pages.len(), &width)?;

        let capacity = width.page_capacity();
        let mut lookup = HashMap::new();
        for (position, page) in pages.iter().enumerate() {
            if page.number != position {
                return Err(LbmsError::InvalidReference(format!(
                    "page {} found where page {} was expected",
                    page.number, position
                )));
            }
            if page.len() > capacity {
                return Err(LbmsError::PageOverflow {
                    page: page.number,
                    len: page.len(),
                    capacity,
                });
            }
            for (index, word) in page.words.iter().enumerate() {
                // earlier (more frequent) entries win
                let key = word.to_lowercase();
                if lookup.contains_key(&key) {
                    warn!("Duplicate word {:?} on page {} ignored", word, page.number);
                    continue;
                }
                lookup.insert(key, WordRef::new(page.number, index));
            }
        }
        debug!("Shelf holds {} pages, {} distinct words", pages.len(), lookup.len());

        Ok(Self { width, pages, lookup })
    }

    pub fn width(&self) -> &AddressWidth {
        &self.width
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn word_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Case-insensitive lookup of a word's reference.
    pub fn resolve(&self, word: &str) -> Result<WordRef, LbmsError> {
        self.lookup
            .get(&word.to_lowercase())
            .copied()
            .ok_or_else(|| LbmsError::OutOfVocabulary(word.to_string()))
    }

    pub fn word_at(&self, word_ref: WordRef) -> Result<&str, LbmsError> {
        self.pages
            .get(word_ref.page)
            .and_then(|page| page.words.get(word_ref.index))
            .map(String::as_str)
            .ok_or_else(|| LbmsError::InvalidReference(format!("no word at {}", word_ref)))
    }

    /// Encode whitespace-separated text as packed hex references.
    pub fn encode_message(&self, text: &str) -> Result<String, LbmsError> {
        let refs = text
            .split_whitespace()
            .map(|word| self.resolve(word))
            .collect::<Result<Vec<_>, _>>()?;
        encode_hex(&refs, &self.width)
    }

    /// Decode a packed hex payload back into space-separated words.
    pub fn decode_message(&self, payload: &str) -> Result<String, LbmsError> {
        let words = decode_hex(payload.trim(), &self.width)?
            .into_iter()
            .map(|word_ref| self.word_at(word_ref))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::paginate_for_width;
    use crate::vocabulary::Vocabulary;
    use std::collections::HashSet;

    fn sample_shelf() -> Shelf {
        let width = AddressWidth::new(2, 2).unwrap();
        let vocabulary = Vocabulary::from_words(["the", "of", "and", "a", "to"]);
        Shelf::from_pages(paginate_for_width(&vocabulary, &width).unwrap(), width).unwrap()
    }

    #[test]
    fn resolves_sample_words() {
        let shelf = sample_shelf();
        assert_eq!(shelf.resolve("to").unwrap(), WordRef::new(1, 0));
        assert_eq!(shelf.resolve("the").unwrap(), WordRef::new(0, 0));
        assert_eq!(shelf.resolve("THE").unwrap(), WordRef::new(0, 0));
    }

    #[test]
    fn unknown_words_are_out_of_vocabulary() {
        let shelf = sample_shelf();
        assert!(matches!(shelf.resolve("zebra"), Err(LbmsError::OutOfVocabulary(w)) if w == "zebra"));
        assert!(shelf.encode_message("the zebra").is_err());
    }

    #[test]
    fn references_are_unique_and_in_range() {
        let width = AddressWidth::new(3, 3).unwrap();
        let vocabulary = Vocabulary::from_words((0..45).map(|i| format!("w{}", i)));
        let shelf = Shelf::from_pages(paginate_for_width(&vocabulary, &width).unwrap(), width).unwrap();
        let page_count = shelf.pages().len();

        let mut seen = HashSet::new();
        for (position, word) in vocabulary.words().iter().enumerate() {
            let word_ref = shelf.resolve(word).unwrap();
            assert!(word_ref.index < width.page_capacity());
            assert!(word_ref.page < page_count);
            assert_eq!(word_ref, WordRef::from_position(position, &width));
            assert!(seen.insert(word_ref));
        }
    }

    #[test]
    fn message_round_trips_through_hex() {
        let shelf = sample_shelf();
        let payload = shelf.encode_message("a to the").unwrap();
        assert_eq!(payload, "340");
        assert_eq!(shelf.decode_message(&payload).unwrap(), "a to the");
    }

    #[test]
    fn decode_rejects_unknown_reference() {
        let shelf = sample_shelf();
        // page 1 only holds index 0
        assert!(matches!(shelf.decode_message("5"), Err(LbmsError::InvalidReference(_))));
    }

    #[test]
    fn duplicates_resolve_to_first_occurrence() {
        let width = AddressWidth::new(2, 1).unwrap();
        let pages = vec![
            Page::new(0, vec!["go".into(), "Go".into()]),
            Page::new(1, vec!["go".into()]),
        ];
        let shelf = Shelf::from_pages(pages, width).unwrap();
        assert_eq!(shelf.resolve("go").unwrap(), WordRef::new(0, 0));
        assert_eq!(shelf.word_count(), 3);
    }

    #[test]
    fn rejects_oversized_or_misnumbered_pages() {
        let width = AddressWidth::new(1, 1).unwrap();
        let too_big = vec![Page::new(0, vec!["a".into(), "b".into(), "c".into()])];
        let err = Shelf::from_pages(too_big, width).unwrap_err();
        assert!(matches!(err, LbmsError::PageOverflow { page: 0, len: 3, capacity: 2 }));
        assert_eq!(err.to_string(), "Page 0 holds 3 words but pages hold at most 2");

        let gap = vec![Page::new(1, vec!["a".into()])];
        assert!(Shelf::from_pages(gap, width).is_err());

        let too_many = (0..3).map(|n| Page::new(n, vec![format!("w{}", n)])).collect();
        assert!(matches!(
            Shelf::from_pages(too_many, width),
            Err(LbmsError::AddressSpaceExhausted { .. })
        ));
    }
}
